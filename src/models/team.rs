//! Team colors and flags used to theme a bowler's dashboard.

use serde::Serialize;

/// Colors and flag for a bowling team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamPalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub flag: &'static str,
}

const FALLBACK: TeamPalette = TeamPalette {
    primary: "#333333",
    secondary: "#666666",
    accent: "#999999",
    flag: "",
};

const fn palette(
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    flag: &'static str,
) -> TeamPalette {
    TeamPalette {
        primary,
        secondary,
        accent,
        flag,
    }
}

const TEAMS: &[(&str, TeamPalette)] = &[
    ("India", palette("#FF9933", "#000080", "#138808", "🇮🇳")),
    ("Australia", palette("#FFD700", "#006447", "#000000", "🇦🇺")),
    ("Pakistan", palette("#006400", "#FFFFFF", "#008000", "🇵🇰")),
    ("England", palette("#0056B3", "#FFFFFF", "#000000", "🏴")),
    ("South Africa", palette("#007A33", "#FFD700", "#000000", "🇿🇦")),
    ("West Indies", palette("#800000", "#FFC60B", "#FFFFFF", "🇼🇸")),
    ("New Zealand", palette("#000000", "#808080", "#FFFFFF", "🇳🇿")),
    ("Sri Lanka", palette("#002366", "#FDB913", "#FFFFFF", "🇱🇰")),
    ("Bangladesh", palette("#006600", "#F42A41", "#FFFFFF", "🇧🇩")),
    ("Afghanistan", palette("#D52B1E", "#000000", "#FFFFFF", "🇦🇫")),
    ("USA", palette("#002868", "#BF0A30", "#FFFFFF", "🇺🇸")),
    ("Ireland", palette("#169B62", "#FFFFFF", "#FF8200", "🇮🇪")),
    ("Canada", palette("#FF0000", "#FFFFFF", "#000000", "🇨🇦")),
    ("Italy", palette("#009246", "#FFFFFF", "#CE2B37", "🇮🇹")),
    ("Netherlands", palette("#EF7C00", "#FFFFFF", "#21468B", "🇳🇱")),
    ("Namibia", palette("#007A5E", "#FCD116", "#DB1C2C", "🇳🇦")),
    ("Zimbabwe", palette("#007934", "#FCCE10", "#000000", "🇿🇼")),
    ("Nepal", palette("#DC143C", "#003893", "#FFFFFF", "🇳🇵")),
    ("Oman", palette("#CE1126", "#FFFFFF", "#000000", "🇴🇲")),
    ("UAE", palette("#00732F", "#FFFFFF", "#CE1126", "🇦🇪")),
];

impl TeamPalette {
    /// Look up a team by exact name, falling back to neutral greys.
    pub fn for_team(team: &str) -> Self {
        TEAMS
            .iter()
            .find(|(name, _)| *name == team)
            .map(|(_, palette)| *palette)
            .unwrap_or(FALLBACK)
    }
}
