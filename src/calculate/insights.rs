//! Threshold-driven insight notes.
//!
//! Rules are evaluated in table order. Per-length rules run once per
//! canonical length; metric rules run once per selection.

use crate::models::{
    BowlingMetrics, Insight, InsightKind, LengthZoneStat, LengthZoneTable, Severity,
};

use super::format_figure;

const FREQUENT_SHARE: f64 = 40.0;
const STUMP_PCT_THRESHOLD: f64 = 20.0;
const DOT_PCT_THRESHOLD: f64 = 50.0;
const HIGH_ECONOMY: f64 = 8.5;
const GOOD_ECONOMY: f64 = 6.0;

struct LengthRule {
    kind: InsightKind,
    severity: Severity,
    nested: bool,
    applies: fn(&LengthZoneStat) -> bool,
    message: fn(&LengthZoneStat) -> String,
}

struct MetricRule {
    kind: InsightKind,
    severity: Severity,
    applies: fn(&BowlingMetrics) -> bool,
    message: fn(&BowlingMetrics) -> String,
}

/// Pitch-map rules, all evaluated for each length.
const LENGTH_SHARE_RULES: &[LengthRule] = &[
    LengthRule {
        kind: InsightKind::LengthShare,
        severity: Severity::Info,
        nested: false,
        applies: |z| z.ball_share > 0.0,
        message: |z| format!("Bowls {:.1}% of deliveries as {}", z.ball_share, z.length),
    },
    LengthRule {
        kind: InsightKind::FrequentLength,
        severity: Severity::Highlight,
        nested: true,
        applies: |z| z.ball_share >= FREQUENT_SHARE,
        message: |z| {
            format!(
                "Focus on {} length, bowler uses this frequently",
                z.length
            )
        },
    },
];

const METRIC_RULES: &[MetricRule] = &[
    MetricRule {
        kind: InsightKind::StumpHits,
        severity: Severity::Highlight,
        applies: |m| m.stump_pct > STUMP_PCT_THRESHOLD,
        message: |m| format!("Hits stumps {}% of the time", format_figure(m.stump_pct)),
    },
    MetricRule {
        kind: InsightKind::HighDotBalls,
        severity: Severity::Warning,
        applies: |m| m.dot_pct > DOT_PCT_THRESHOLD,
        message: |m| format!("High dot ball %: {}%", format_figure(m.dot_pct)),
    },
];

/// Economy rules; at most one fires per length.
const ECONOMY_RULES: &[LengthRule] = &[
    LengthRule {
        kind: InsightKind::HighEconomy,
        severity: Severity::Warning,
        nested: false,
        applies: |z| z.economy > HIGH_ECONOMY,
        message: |z| format!("High economy in {}: {}", z.length, format_figure(z.economy)),
    },
    LengthRule {
        kind: InsightKind::GoodControl,
        severity: Severity::Info,
        nested: false,
        applies: |z| z.economy > 0.0 && z.economy < GOOD_ECONOMY,
        message: |z| format!("Good control in {}: {}", z.length, format_figure(z.economy)),
    },
];

impl LengthRule {
    fn emit(&self, zone: &LengthZoneStat) -> Insight {
        let insight = Insight::new(self.kind, self.severity, (self.message)(zone));
        if self.nested {
            insight.nested()
        } else {
            insight
        }
    }
}

/// Notes shown beside the pitch map: length shares, then stump hits and dot balls.
pub fn pitch_map_insights(metrics: &BowlingMetrics, lengths: &LengthZoneTable) -> Vec<Insight> {
    let mut notes: Vec<Insight> = lengths
        .iter()
        .flat_map(|zone| {
            LENGTH_SHARE_RULES
                .iter()
                .filter(move |rule| (rule.applies)(zone))
                .map(move |rule| rule.emit(zone))
        })
        .collect();

    notes.extend(
        METRIC_RULES
            .iter()
            .filter(|rule| (rule.applies)(metrics))
            .map(|rule| Insight::new(rule.kind, rule.severity, (rule.message)(metrics))),
    );

    notes
}

/// Notes shown beside a per-length economy chart.
pub fn economy_insights(lengths: &LengthZoneTable) -> Vec<Insight> {
    lengths
        .iter()
        .filter_map(|zone| {
            ECONOMY_RULES
                .iter()
                .find(|rule| (rule.applies)(zone))
                .map(|rule| rule.emit(zone))
        })
        .collect()
}
