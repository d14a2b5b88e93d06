//! Filter selections chosen by the user.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BatsmanType;

/// Opponent label meaning "every batting team".
pub const OVERALL_TOURNAMENT: &str = "Overall Tournament";

/// Opponent selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Opponent {
    #[default]
    Overall,
    Team(String),
}

impl Opponent {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == OVERALL_TOURNAMENT {
            Opponent::Overall
        } else {
            Opponent::Team(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Opponent::Overall => OVERALL_TOURNAMENT,
            Opponent::Team(team) => team,
        }
    }

    /// Whether a delivery against `batting_team` passes this selection.
    pub fn matches(&self, batting_team: &str) -> bool {
        match self {
            Opponent::Overall => true,
            Opponent::Team(team) => team == batting_team,
        }
    }
}

impl From<String> for Opponent {
    fn from(raw: String) -> Self {
        Opponent::parse(&raw)
    }
}

impl From<Opponent> for String {
    fn from(opponent: Opponent) -> Self {
        opponent.as_str().to_string()
    }
}

impl std::fmt::Display for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handedness selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    #[default]
    All,
    Rhb,
    Lhb,
}

impl Handedness {
    pub fn matches(&self, batsman_type: Option<BatsmanType>) -> bool {
        match self {
            Handedness::All => true,
            Handedness::Rhb => batsman_type == Some(BatsmanType::Rhb),
            Handedness::Lhb => batsman_type == Some(BatsmanType::Lhb),
        }
    }
}

impl FromStr for Handedness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Handedness::All),
            "rhb" => Ok(Handedness::Rhb),
            "lhb" => Ok(Handedness::Lhb),
            other => Err(format!(
                "unknown handedness '{}' (expected all, rhb or lhb)",
                other
            )),
        }
    }
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handedness::All => write!(f, "all"),
            Handedness::Rhb => write!(f, "rhb"),
            Handedness::Lhb => write!(f, "lhb"),
        }
    }
}

/// A complete filter selection.
///
/// An empty `phases` list matches nothing, the same as clearing every phase
/// in a multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub bowler: String,
    #[serde(default)]
    pub opponent: Opponent,
    pub phases: Vec<String>,
    #[serde(default)]
    pub handedness: Handedness,
}

impl Selection {
    /// Select a bowler across the whole tournament in the given phases.
    pub fn new(bowler: impl Into<String>, phases: Vec<String>) -> Self {
        Self {
            bowler: bowler.into(),
            opponent: Opponent::Overall,
            phases,
            handedness: Handedness::All,
        }
    }

    pub fn against(mut self, opponent: Opponent) -> Self {
        self.opponent = opponent;
        self
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    pub fn includes_phase(&self, phase: &str) -> bool {
        self.phases.iter().any(|p| p == phase)
    }
}

/// Split a comma-separated phase list, dropping blank entries.
pub fn split_phases(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
