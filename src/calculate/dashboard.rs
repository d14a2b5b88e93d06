//! Assemble the full dashboard bundle for one selection.

use tracing::debug;

use crate::models::{
    BatsmanType, Dashboard, Delivery, DeliveryTable, Handedness, HandednessView, Selection,
    TeamPalette,
};

use super::{
    bowling_team, compute_metrics, economy_insights, filter_deliveries, length_zones,
    partition_by_hand, pitch_map_insights, wagon_wheel, WheelLayout,
};

/// Run every analysis for `selection` against `table`.
///
/// Headline metrics and the pitch map honour the selected handedness. The
/// per-handedness views are split from the bowler/opponent/phase set so both
/// sides are always available.
pub fn build_dashboard(table: &DeliveryTable, selection: &Selection) -> Dashboard {
    let selected = filter_deliveries(table, selection);

    let base = if selection.handedness == Handedness::All {
        selected.clone()
    } else {
        let unhanded = selection.clone().with_handedness(Handedness::All);
        filter_deliveries(table, &unhanded)
    };

    let metrics = compute_metrics(&selected);
    let lengths = length_zones(&selected);
    let pitch_map_insights = pitch_map_insights(&metrics, &lengths);

    let team = bowling_team(&base).to_string();

    debug!(
        bowler = %selection.bowler,
        opponent = %selection.opponent,
        handedness = %selection.handedness,
        deliveries = selected.len(),
        balls = metrics.balls,
        "Built dashboard"
    );

    Dashboard {
        selection: selection.clone(),
        palette: TeamPalette::for_team(&team),
        bowling_team: team,
        deliveries: selected.len(),
        metrics,
        lengths,
        pitch_map_insights,
        rhb: handedness_view(&base, BatsmanType::Rhb),
        lhb: handedness_view(&base, BatsmanType::Lhb),
    }
}

fn handedness_view(base: &[&Delivery], batsman_type: BatsmanType) -> HandednessView {
    let faced = partition_by_hand(base, batsman_type);
    let length_economy = length_zones(&faced);

    HandednessView {
        batsman_type,
        metrics: compute_metrics(&faced),
        wagon_wheel: wagon_wheel(&faced, WheelLayout::for_batsman(batsman_type)),
        insights: economy_insights(&length_economy),
        length_economy,
    }
}
