//! Headline bowling figures.

use crate::models::{BowlingMetrics, Delivery};

use super::{economy_rate, overs_notation, percentage, round_to};

/// Compute the six headline metrics for a filtered set.
///
/// Ball counts and rates use legal deliveries only; runs and wickets count
/// every delivery, extras included.
pub fn compute_metrics(deliveries: &[&Delivery]) -> BowlingMetrics {
    let mut balls = 0u32;
    let mut dots = 0u32;
    let mut stump_hits = 0u32;
    let mut runs = 0u32;
    let mut wickets = 0u32;

    for d in deliveries {
        runs = runs.saturating_add(d.total_runs);
        if d.is_out {
            wickets += 1;
        }
        if !d.is_valid_ball {
            continue;
        }
        balls += 1;
        if d.is_dot() {
            dots += 1;
        }
        if d.hit_stumps {
            stump_hits += 1;
        }
    }

    BowlingMetrics {
        balls,
        overs: overs_notation(balls),
        runs,
        wickets,
        economy: economy_rate(runs, balls),
        dot_pct: round_to(percentage(dots, balls), 1),
        stump_pct: round_to(percentage(stump_hits, balls), 1),
    }
}
