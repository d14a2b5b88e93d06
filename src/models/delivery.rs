//! Ball-by-ball delivery model.

use serde::{Deserialize, Serialize};

/// Batter handedness as recorded in the `Batsman Type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatsmanType {
    #[serde(rename = "RHB")]
    Rhb,
    #[serde(rename = "LHB")]
    Lhb,
}

impl BatsmanType {
    /// Both handedness values, right-handers first.
    pub const ALL: [BatsmanType; 2] = [BatsmanType::Rhb, BatsmanType::Lhb];

    /// Parse a raw cell value. Anything other than RHB/LHB is unknown.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "RHB" => Some(BatsmanType::Rhb),
            "LHB" => Some(BatsmanType::Lhb),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatsmanType::Rhb => "RHB",
            BatsmanType::Lhb => "LHB",
        }
    }
}

impl std::fmt::Display for BatsmanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pitch length of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Length {
    Yorker,
    Full,
    Good,
    Short,
}

impl Length {
    /// Canonical order, from the batter's feet back towards the bowler.
    pub const ALL: [Length; 4] = [Length::Yorker, Length::Full, Length::Good, Length::Short];

    /// Parse a raw cell value. Unrecognised lengths are unclassified (`None`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yorker" => Some(Length::Yorker),
            "full" => Some(Length::Full),
            "good" => Some(Length::Good),
            "short" => Some(Length::Short),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Yorker => "Yorker",
            Length::Full => "Full",
            Length::Good => "Good",
            Length::Short => "Short",
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wagon-wheel scoring zone, always in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShotArea(u8);

impl ShotArea {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(zone: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&zone).then_some(Self(zone))
    }

    /// Parse a raw cell value.
    ///
    /// Integral numeric text (`"3"`, `"3.0"`) is accepted; blanks, words and
    /// out-of-range numbers mean no shot zone was recorded.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: f64 = raw.trim().parse().ok()?;
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if value < Self::MIN as f64 || value > Self::MAX as f64 {
            return None;
        }
        Self::new(value as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ShotArea {
    type Error = String;

    fn try_from(zone: u8) -> Result<Self, Self::Error> {
        Self::new(zone).ok_or_else(|| format!("shot area {} outside 1..=8", zone))
    }
}

impl From<ShotArea> for u8 {
    fn from(area: ShotArea) -> Self {
        area.0
    }
}

/// One ball bowled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub bowler_name: String,
    pub bowling_team: String,
    pub batting_team: String,

    /// `None` when the handedness column held something other than RHB/LHB
    pub batsman_type: Option<BatsmanType>,

    pub phase: String,

    /// `None` for unclassified lengths
    pub length: Option<Length>,

    /// `None` when no shot zone was recorded
    pub shot_area: Option<ShotArea>,

    /// False for wides and no-balls
    pub is_valid_ball: bool,

    /// Runs conceded including extras
    pub total_runs: u32,

    /// Runs credited to the batter off the bat
    pub bat_runs: u32,

    pub is_out: bool,
    pub hit_stumps: bool,
}

impl Delivery {
    /// Create a legal, scoreless delivery with no length or shot zone recorded.
    pub fn new(
        bowler_name: impl Into<String>,
        bowling_team: impl Into<String>,
        batting_team: impl Into<String>,
        phase: impl Into<String>,
    ) -> Self {
        Self {
            bowler_name: bowler_name.into(),
            bowling_team: bowling_team.into(),
            batting_team: batting_team.into(),
            batsman_type: None,
            phase: phase.into(),
            length: None,
            shot_area: None,
            is_valid_ball: true,
            total_runs: 0,
            bat_runs: 0,
            is_out: false,
            hit_stumps: false,
        }
    }

    pub fn with_batsman(mut self, batsman_type: BatsmanType) -> Self {
        self.batsman_type = Some(batsman_type);
        self
    }

    pub fn with_length(mut self, length: Length) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_shot_area(mut self, zone: u8) -> Self {
        self.shot_area = ShotArea::new(zone);
        self
    }

    /// Runs off the bat; total runs are raised to match if lower.
    pub fn with_bat_runs(mut self, runs: u32) -> Self {
        self.bat_runs = runs;
        self.total_runs = self.total_runs.max(runs);
        self
    }

    /// Total runs conceded, e.g. bat runs plus byes or wide runs.
    pub fn with_total_runs(mut self, runs: u32) -> Self {
        self.total_runs = runs;
        self
    }

    /// Mark as a wide or no-ball.
    pub fn extra(mut self) -> Self {
        self.is_valid_ball = false;
        self
    }

    pub fn wicket(mut self) -> Self {
        self.is_out = true;
        self
    }

    pub fn hitting_stumps(mut self) -> Self {
        self.hit_stumps = true;
        self
    }

    pub fn is_dot(&self) -> bool {
        self.bat_runs == 0
    }
}

/// Immutable snapshot of every loaded delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTable {
    deliveries: Vec<Delivery>,
}

impl DeliveryTable {
    pub fn new(deliveries: Vec<Delivery>) -> Self {
        Self { deliveries }
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delivery> {
        self.deliveries.iter()
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Whether any delivery was bowled by `bowler`.
    pub fn has_bowler(&self, bowler: &str) -> bool {
        self.deliveries.iter().any(|d| d.bowler_name == bowler)
    }
}

impl FromIterator<Delivery> for DeliveryTable {
    fn from_iter<I: IntoIterator<Item = Delivery>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
