pub mod bowlers;
pub mod dashboard;
pub mod refresh;
