//! Pitch-length zone distribution.

use crate::models::{Delivery, LengthZoneTable};

use super::{economy_rate, percentage};

/// Bucket legal deliveries into the four canonical lengths.
///
/// Ball share is measured against every legal ball, so deliveries with an
/// unclassified length lower the shares without appearing in any zone.
/// Economy here is bat runs per over, unlike the headline economy.
pub fn length_zones(deliveries: &[&Delivery]) -> LengthZoneTable {
    let mut table = LengthZoneTable::empty();
    let mut total_balls = 0u32;

    for d in deliveries.iter().filter(|d| d.is_valid_ball) {
        total_balls += 1;
        let Some(length) = d.length else {
            continue;
        };
        if let Some(zone) = table.zones.iter_mut().find(|z| z.length == length) {
            zone.balls += 1;
            zone.runs = zone.runs.saturating_add(d.bat_runs);
        }
    }

    for zone in &mut table.zones {
        zone.ball_share = percentage(zone.balls, total_balls);
        zone.economy = economy_rate(zone.runs, zone.balls);
    }

    table
}
