//! CSV parsing into a [`DeliveryTable`].

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::SourceError;
use crate::models::{BatsmanType, Delivery, DeliveryTable, Length, ShotArea};

/// Header names for each delivery field.
///
/// Fields left out of a config table keep the default header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub bowler_name: String,
    pub bowling_team: String,
    pub batting_team: String,
    pub batsman_type: String,
    pub phase: String,
    pub length: String,
    pub shot_area: String,
    pub valid_ball: String,
    pub total_runs: String,
    pub bat_runs: String,
    pub out: String,
    pub hit_stumps: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            bowler_name: "Bowler Name".to_string(),
            bowling_team: "Bowling Team".to_string(),
            batting_team: "Batting Team".to_string(),
            batsman_type: "Batsman Type".to_string(),
            phase: "Phase".to_string(),
            length: "Length".to_string(),
            shot_area: "Shot_Area".to_string(),
            valid_ball: "Valid_Ball".to_string(),
            total_runs: "Total_Runs".to_string(),
            bat_runs: "Bat_Runs".to_string(),
            out: "Out".to_string(),
            hit_stumps: "Hitting_Stumps".to_string(),
        }
    }
}

/// Column positions resolved against a header row.
struct ColumnIndex {
    bowler_name: usize,
    bowling_team: usize,
    batting_team: usize,
    batsman_type: usize,
    phase: usize,
    length: usize,
    shot_area: usize,
    valid_ball: usize,
    total_runs: usize,
    bat_runs: usize,
    out: usize,
    hit_stumps: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, names: &ColumnNames) -> Result<Self, SourceError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name.trim())
                .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            bowler_name: find(&names.bowler_name)?,
            bowling_team: find(&names.bowling_team)?,
            batting_team: find(&names.batting_team)?,
            batsman_type: find(&names.batsman_type)?,
            phase: find(&names.phase)?,
            length: find(&names.length)?,
            shot_area: find(&names.shot_area)?,
            valid_ball: find(&names.valid_ball)?,
            total_runs: find(&names.total_runs)?,
            bat_runs: find(&names.bat_runs)?,
            out: find(&names.out)?,
            hit_stumps: find(&names.hit_stumps)?,
        })
    }
}

/// Parse deliveries using the default column names.
pub fn parse_deliveries<R: Read>(reader: R) -> Result<DeliveryTable, SourceError> {
    parse_deliveries_with(reader, &ColumnNames::default())
}

/// Parse deliveries with custom column names.
///
/// Header and cell whitespace is trimmed. Malformed lengths, handedness and
/// shot areas load as unclassified; malformed counts load as zero.
pub fn parse_deliveries_with<R: Read>(
    reader: R,
    names: &ColumnNames,
) -> Result<DeliveryTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers, names)?;

    let mut deliveries = Vec::new();
    let mut inconsistent = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let delivery = Delivery {
            bowler_name: cell(columns.bowler_name).to_string(),
            bowling_team: cell(columns.bowling_team).to_string(),
            batting_team: cell(columns.batting_team).to_string(),
            batsman_type: BatsmanType::parse(cell(columns.batsman_type)),
            phase: cell(columns.phase).to_string(),
            length: Length::parse(cell(columns.length)),
            shot_area: ShotArea::parse(cell(columns.shot_area)),
            is_valid_ball: parse_flag(cell(columns.valid_ball)),
            total_runs: parse_count(cell(columns.total_runs)),
            bat_runs: parse_count(cell(columns.bat_runs)),
            is_out: parse_flag(cell(columns.out)),
            hit_stumps: parse_flag(cell(columns.hit_stumps)),
        };

        if delivery.bat_runs > delivery.total_runs {
            inconsistent += 1;
            debug!(
                row = row + 2,
                bat_runs = delivery.bat_runs,
                total_runs = delivery.total_runs,
                "Bat runs exceed total runs"
            );
        }

        deliveries.push(delivery);
    }

    if inconsistent > 0 {
        warn!(
            "{} deliveries have more bat runs than total runs",
            inconsistent
        );
    }

    info!("Parsed {} deliveries", deliveries.len());
    Ok(DeliveryTable::new(deliveries))
}

/// Boolean cells: `1`, `true`, `yes`, `y` (any case) and non-zero numbers are true.
pub fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => true,
        "" | "false" | "no" | "n" => false,
        other => other.parse::<f64>().map(|v| v != 0.0).unwrap_or(false),
    }
}

/// Largest run count a single delivery can plausibly carry.
pub const MAX_RUNS_PER_BALL: u32 = 50;

/// Non-negative integer cells, accepting integral floats such as `"4.0"`.
///
/// Counts above [`MAX_RUNS_PER_BALL`] are treated as garbled and read as zero.
pub fn parse_count(raw: &str) -> u32 {
    let raw = raw.trim();
    let value = match raw.parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Some(v as u64),
            _ => None,
        },
    };

    match value {
        Some(v) if v <= MAX_RUNS_PER_BALL as u64 => v as u32,
        Some(v) => {
            warn!("Ignoring implausible run count {} in a single delivery", v);
            0
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
 Bowler Name ,Bowling Team,Batting Team,Batsman Type,Phase,Length,Shot_Area,Valid_Ball,Total_Runs,Bat_Runs,Out,Hitting_Stumps
Bumrah,India,Australia,RHB,Powerplay,Yorker,,1,0,0,1,1
Bumrah,India,Australia,LHB,Powerplay,Good,3,1,4,4,0,0
Bumrah,India,Australia,RHB,Death,Bouncer,7.0,1,1.0,1,0,0
Bumrah,India,Australia,RHB,Death,Full,NA,0,1,0,0,0
";

    #[test]
    fn test_parse_sample() {
        let table = parse_deliveries(SAMPLE.as_bytes()).unwrap();
        let rows = table.deliveries();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].bowler_name, "Bumrah");
        assert_eq!(rows[0].batsman_type, Some(BatsmanType::Rhb));
        assert_eq!(rows[0].length, Some(Length::Yorker));
        assert!(rows[0].shot_area.is_none());
        assert!(rows[0].is_out);
        assert!(rows[0].hit_stumps);

        assert_eq!(rows[1].shot_area.map(|a| a.get()), Some(3));
        assert_eq!(rows[1].bat_runs, 4);

        assert_eq!(rows[2].length, None);
        assert_eq!(rows[2].shot_area.map(|a| a.get()), Some(7));
        assert_eq!(rows[2].total_runs, 1);

        assert!(!rows[3].is_valid_ball);
        assert!(rows[3].shot_area.is_none());
    }

    #[test]
    fn test_missing_column() {
        let csv = "Bowler Name,Phase\nBumrah,Death\n";
        let err = parse_deliveries(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, SourceError::MissingColumn(ref c) if c == "Bowling Team"));
    }

    #[test]
    fn test_custom_column_names() {
        let csv = "bowler,bteam,opp,hand,phase,len,zone,legal,runs,bat,wkt,stumps\n\
                   Rashid,Afghanistan,Nepal,LHB,Middle,Good,2,true,2,2,no,no\n";
        let names = ColumnNames {
            bowler_name: "bowler".into(),
            bowling_team: "bteam".into(),
            batting_team: "opp".into(),
            batsman_type: "hand".into(),
            phase: "phase".into(),
            length: "len".into(),
            shot_area: "zone".into(),
            valid_ball: "legal".into(),
            total_runs: "runs".into(),
            bat_runs: "bat".into(),
            out: "wkt".into(),
            hit_stumps: "stumps".into(),
        };

        let table = parse_deliveries_with(csv.as_bytes(), &names).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.deliveries()[0].batting_team, "Nepal");
        assert!(table.deliveries()[0].is_valid_ball);
    }

    #[test]
    fn test_header_only() {
        let header = SAMPLE.lines().next().unwrap();
        let table = parse_deliveries(header.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("1.0"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("False"));
        assert!(!parse_flag("maybe"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4"), 4);
        assert_eq!(parse_count(" 6.0 "), 6);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-1"), 0);
        assert_eq!(parse_count("2.5"), 0);
        assert_eq!(parse_count("four"), 0);
        assert_eq!(parse_count("50"), 50);
        assert_eq!(parse_count("51"), 0);
        assert_eq!(parse_count("4294967295"), 0);
        assert_eq!(parse_count("99999999999999999999"), 0);
    }

    #[test]
    fn test_garbled_run_cell_does_not_poison_totals() {
        let csv = format!(
            "{}\n{}\n{}\n",
            SAMPLE.lines().next().unwrap(),
            "Bumrah,India,Australia,RHB,Death,Good,4,1,4294967295,4294967295,0,0",
            "Bumrah,India,Australia,RHB,Death,Good,4,1,4,4,0,0",
        );

        let table = parse_deliveries(csv.as_bytes()).unwrap();
        let rows: Vec<&Delivery> = table.iter().collect();
        let metrics = crate::calculate::compute_metrics(&rows);

        assert_eq!(rows[0].total_runs, 0);
        assert_eq!(rows[0].bat_runs, 0);
        assert_eq!(metrics.balls, 2);
        assert_eq!(metrics.runs, 4);
        assert_eq!(metrics.economy, 12.0);
    }
}
