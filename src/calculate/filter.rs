//! Narrowing the delivery table to a selection, plus the option lists that
//! drive the filter controls.

use std::collections::BTreeSet;

use crate::models::{BatsmanType, Delivery, DeliveryTable, Selection, OVERALL_TOURNAMENT};

/// Deliveries matching every part of `selection`.
pub fn filter_deliveries<'a>(table: &'a DeliveryTable, selection: &Selection) -> Vec<&'a Delivery> {
    table
        .iter()
        .filter(|d| d.bowler_name == selection.bowler)
        .filter(|d| selection.opponent.matches(&d.batting_team))
        .filter(|d| selection.includes_phase(&d.phase))
        .filter(|d| selection.handedness.matches(d.batsman_type))
        .collect()
}

/// Deliveries faced by one handedness. Unknown handedness belongs to neither.
pub fn partition_by_hand<'a>(
    deliveries: &[&'a Delivery],
    batsman_type: BatsmanType,
) -> Vec<&'a Delivery> {
    deliveries
        .iter()
        .copied()
        .filter(|d| d.batsman_type == Some(batsman_type))
        .collect()
}

/// Sorted, unique bowler names.
pub fn bowlers(table: &DeliveryTable) -> Vec<String> {
    table
        .iter()
        .map(|d| d.bowler_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// "Overall Tournament" followed by every team `bowler` has bowled at.
pub fn opponents(table: &DeliveryTable, bowler: &str) -> Vec<String> {
    let teams: BTreeSet<&str> = table
        .iter()
        .filter(|d| d.bowler_name == bowler)
        .map(|d| d.batting_team.as_str())
        .collect();

    std::iter::once(OVERALL_TOURNAMENT.to_string())
        .chain(teams.into_iter().map(str::to_string))
        .collect()
}

/// Sorted, unique phases across the whole table.
pub fn phases(table: &DeliveryTable) -> Vec<String> {
    table
        .iter()
        .map(|d| d.phase.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Bowling team of the first delivery, or "Unknown" for an empty set.
pub fn bowling_team<'a>(deliveries: &[&'a Delivery]) -> &'a str {
    deliveries
        .first()
        .map(|d| d.bowling_team.as_str())
        .unwrap_or("Unknown")
}
