//! The bundle handed to renderers for one filter selection.

use serde::Serialize;

use super::{
    BatsmanType, BowlingMetrics, Insight, LengthZoneTable, Selection, TeamPalette, WagonWheel,
};

/// Everything shown for one batter handedness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandednessView {
    pub batsman_type: BatsmanType,

    /// Summary figures against this handedness
    pub metrics: BowlingMetrics,

    pub wagon_wheel: WagonWheel,

    /// Per-length economy (bat runs per over)
    pub length_economy: LengthZoneTable,

    /// Economy notes for this handedness
    pub insights: Vec<Insight>,
}

/// Complete dashboard for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selection: Selection,

    /// Bowling team of the first matching delivery, or "Unknown"
    pub bowling_team: String,

    pub palette: TeamPalette,

    /// Deliveries matching the selection, extras included
    pub deliveries: usize,

    pub metrics: BowlingMetrics,

    /// Pitch-map length distribution
    pub lengths: LengthZoneTable,

    /// Notes for the pitch map
    pub pitch_map_insights: Vec<Insight>,

    pub rhb: HandednessView,
    pub lhb: HandednessView,
}

impl Dashboard {
    pub fn view(&self, batsman_type: BatsmanType) -> &HandednessView {
        match batsman_type {
            BatsmanType::Rhb => &self.rhb,
            BatsmanType::Lhb => &self.lhb,
        }
    }
}
