//! Core data models for bowling analysis.

mod dashboard;
mod delivery;
mod insight;
mod selection;
mod stats;
mod team;

pub use dashboard::*;
pub use delivery::*;
pub use insight::*;
pub use selection::*;
pub use stats::*;
pub use team::*;
