//! Statistics calculation engine.
//!
//! Every function here is a pure aggregation over an immutable slice of
//! deliveries:
//! - Filtering by bowler, opponent, phase and handedness
//! - Headline bowling metrics
//! - Pitch-length zone distribution and per-length economy
//! - Wagon-wheel scoring zones
//! - Threshold-driven insight notes

mod dashboard;
mod filter;
mod insights;
mod length;
mod metrics;
mod wagon;

pub use dashboard::build_dashboard;
pub use filter::{bowlers, bowling_team, filter_deliveries, opponents, partition_by_hand, phases};
pub use insights::{economy_insights, pitch_map_insights};
pub use length::length_zones;
pub use metrics::compute_metrics;
pub use wagon::{intensity_color, wagon_wheel, zone_angles, zone_label, WheelLayout};

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Overs in cricket notation: completed overs plus remaining balls as tenths.
pub fn overs_notation(balls: u32) -> f64 {
    (balls / 6) as f64 + (balls % 6) as f64 / 10.0
}

/// Runs per six balls, two decimals. Zero when no balls were bowled.
pub fn economy_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        round_to(runs as f64 / (balls as f64 / 6.0), 2)
    }
}

/// `count` as a percentage of `total`, unrounded. Zero when `total` is zero.
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Format an already-rounded figure the way the dashboard prints it:
/// whole numbers keep one decimal (`25.0`), others print as-is (`7.33`).
pub fn format_figure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
