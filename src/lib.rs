//! # Bowler Insights
//!
//! Bowling statistics for a ball-by-ball cricket tournament table: headline
//! figures, pitch-map length distribution, wagon wheels and rule-based notes
//! for any bowler/opponent/phase/handedness selection.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (deliveries, selections, stats, insights)
//! - **calculate**: Filtering, aggregation and the insight rule engine
//! - **source**: CSV loading over HTTP or from disk, and the snapshot cache
//! - **api**: REST API endpoints
//! - **report**: Plain-text dashboard rendering
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod report;
pub mod source;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "1h", "5m", "60s").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.trim().parse().ok()?;
    num.checked_mul(multiplier).map(Duration::from_secs)
}
