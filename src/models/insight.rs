//! Text observations produced by the insight rules.

use serde::{Deserialize, Serialize};

/// Which rule produced a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    LengthShare,
    FrequentLength,
    StumpHits,
    HighDotBalls,
    HighEconomy,
    GoodControl,
}

/// How a renderer should emphasise a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Highlight,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Highlight => write!(f, "highlight"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single human-readable observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,

    /// Sub-point of the previous note
    #[serde(default)]
    pub nested: bool,

    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            severity,
            nested: false,
            message,
        }
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indent = if self.nested { "  " } else { "" };
        write!(f, "{}- {}", indent, self.message)
    }
}
