//! Derived statistics models.

use serde::{Deserialize, Serialize};

use super::Length;

/// Headline bowling figures for a filtered set of deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BowlingMetrics {
    /// Legal deliveries (wides and no-balls excluded)
    pub balls: u32,

    /// Overs in cricket notation: 7 balls is 1.1, not 1.17
    pub overs: f64,

    /// Runs conceded including extras
    pub runs: u32,

    pub wickets: u32,

    /// Runs conceded per six legal balls, two decimals
    pub economy: f64,

    /// Percentage of legal balls with no runs off the bat, one decimal
    pub dot_pct: f64,

    /// Percentage of legal balls hitting the stumps, one decimal
    pub stump_pct: f64,
}

/// One pitch-length zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthZoneStat {
    pub length: Length,

    /// Legal balls pitched at this length
    pub balls: u32,

    /// Runs off the bat from those balls
    pub runs: u32,

    /// Share of all legal balls (0 to 100), unrounded
    pub ball_share: f64,

    /// Bat runs per six balls at this length, two decimals
    pub economy: f64,
}

impl LengthZoneStat {
    pub fn empty(length: Length) -> Self {
        Self {
            length,
            balls: 0,
            runs: 0,
            ball_share: 0.0,
            economy: 0.0,
        }
    }
}

/// Per-length table, always holding the four canonical lengths in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthZoneTable {
    pub zones: Vec<LengthZoneStat>,
}

impl LengthZoneTable {
    /// All four lengths with zero values.
    pub fn empty() -> Self {
        Self {
            zones: Length::ALL.iter().map(|&l| LengthZoneStat::empty(l)).collect(),
        }
    }

    pub fn get(&self, length: Length) -> Option<&LengthZoneStat> {
        self.zones.iter().find(|z| z.length == length)
    }

    /// Sum of the four ball shares. Below 100 when some lengths are unclassified.
    pub fn total_share(&self) -> f64 {
        self.zones.iter().map(|z| z.ball_share).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LengthZoneStat> {
        self.zones.iter()
    }

    /// Economy at one length, zero when nothing was bowled there.
    pub fn economy(&self, length: Length) -> f64 {
        self.get(length).map(|z| z.economy).unwrap_or(0.0)
    }

    /// Ball share at one length, zero when nothing was bowled there.
    pub fn ball_share(&self, length: Length) -> f64 {
        self.get(length).map(|z| z.ball_share).unwrap_or(0.0)
    }
}

impl Default for LengthZoneTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// One wedge of the wagon wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonZone {
    /// Zone index, 1 to 8
    pub zone: u8,

    /// Fielding position name (e.g. "Cover")
    pub label: String,

    /// Runs off the bat scored into this zone
    pub runs: u32,

    /// Runs relative to the busiest zone (0.0 to 1.0)
    pub intensity: f64,

    /// Hex color for the intensity on a blue-to-red scale
    pub color: String,

    /// Wedge start angle in degrees, counter-clockwise from the positive x axis
    pub start_deg: f64,

    pub end_deg: f64,

    /// Angle at which to place the label and run total
    pub mid_deg: f64,
}

/// Scoring-zone breakdown for one batter handedness.
///
/// `NoData` means no shot zone was recorded at all, which renderers must
/// show differently from zones that were recorded but scored nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WagonWheel {
    NoData,
    Zones {
        /// Largest zone total; top of the color scale
        max_runs: u32,
        /// Whether the layout is mirrored (left-handers)
        mirrored: bool,
        zones: Vec<WagonZone>,
    },
}

impl WagonWheel {
    pub fn is_no_data(&self) -> bool {
        matches!(self, WagonWheel::NoData)
    }

    pub fn zones(&self) -> &[WagonZone] {
        match self {
            WagonWheel::NoData => &[],
            WagonWheel::Zones { zones, .. } => zones,
        }
    }

    pub fn zone(&self, zone: u8) -> Option<&WagonZone> {
        self.zones().iter().find(|z| z.zone == zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_table_empty_has_all_lengths() {
        let table = LengthZoneTable::empty();

        assert_eq!(table.zones.len(), 4);
        for (zone, length) in table.iter().zip(Length::ALL) {
            assert_eq!(zone.length, length);
            assert_eq!(zone.balls, 0);
            assert_eq!(zone.economy, 0.0);
        }
        assert_eq!(table.total_share(), 0.0);
    }

    #[test]
    fn test_length_table_get() {
        let table = LengthZoneTable::empty();
        assert_eq!(table.get(Length::Good).unwrap().length, Length::Good);
    }

    #[test]
    fn test_wagon_wheel_no_data_serialization() {
        let json = serde_json::to_value(WagonWheel::NoData).unwrap();
        assert_eq!(json["status"], "no_data");
        assert!(WagonWheel::NoData.zones().is_empty());
    }

    #[test]
    fn test_wagon_wheel_zones_serialization() {
        let wheel = WagonWheel::Zones {
            max_runs: 6,
            mirrored: false,
            zones: vec![WagonZone {
                zone: 3,
                label: "Cover".to_string(),
                runs: 6,
                intensity: 1.0,
                color: "#b40426".to_string(),
                start_deg: 180.0,
                end_deg: 225.0,
                mid_deg: 202.5,
            }],
        };

        let json = serde_json::to_string(&wheel).unwrap();
        let parsed: WagonWheel = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, wheel);
        assert_eq!(parsed.zone(3).unwrap().label, "Cover");
        assert!(parsed.zone(4).is_none());
    }

    #[test]
    fn test_metrics_default_is_zero() {
        let metrics = BowlingMetrics::default();
        assert_eq!(metrics.balls, 0);
        assert_eq!(metrics.economy, 0.0);
        assert_eq!(metrics.dot_pct, 0.0);
    }
}
