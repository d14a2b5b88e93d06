//! Plain-text rendering of a dashboard for the terminal.

use std::fmt::Write;

use crate::calculate::format_figure;
use crate::models::{BatsmanType, Dashboard, HandednessView, Insight, WagonWheel};

/// Render `dashboard` as a multi-section text report.
pub fn render_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, dashboard);
    out
}

fn write_report(out: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    let selection = &dashboard.selection;
    let flag = dashboard.palette.flag;

    writeln!(
        out,
        "{}{} ({}) vs {}",
        if flag.is_empty() { String::new() } else { format!("{} ", flag) },
        selection.bowler,
        dashboard.bowling_team,
        selection.opponent
    )?;
    writeln!(
        out,
        "Phases: {}  Batters: {}",
        if selection.phases.is_empty() {
            "(none)".to_string()
        } else {
            selection.phases.join(", ")
        },
        selection.handedness
    )?;
    writeln!(out, "Deliveries: {}", dashboard.deliveries)?;
    writeln!(out)?;

    let m = &dashboard.metrics;
    writeln!(out, "Overs:    {}", format_figure(m.overs))?;
    writeln!(out, "Runs:     {}", m.runs)?;
    writeln!(out, "Wickets:  {}", m.wickets)?;
    writeln!(out, "Economy:  {}", format_figure(m.economy))?;
    writeln!(out, "Dot %:    {}", format_figure(m.dot_pct))?;
    writeln!(out, "Stumps %: {}", format_figure(m.stump_pct))?;

    writeln!(out)?;
    writeln!(out, "Pitch map")?;
    for zone in dashboard.lengths.iter() {
        writeln!(
            out,
            "  {:<7} {:>5.1}%  {:>3} balls",
            zone.length.as_str(),
            zone.ball_share,
            zone.balls
        )?;
    }
    write_notes(out, &dashboard.pitch_map_insights)?;

    for batsman_type in BatsmanType::ALL {
        writeln!(out)?;
        write_view(out, dashboard.view(batsman_type))?;
    }

    Ok(())
}

fn write_view(out: &mut String, view: &HandednessView) -> std::fmt::Result {
    let m = &view.metrics;
    writeln!(
        out,
        "vs {}: {} balls, {} runs, {} wkts, economy {}",
        view.batsman_type,
        m.balls,
        m.runs,
        m.wickets,
        format_figure(m.economy)
    )?;

    match &view.wagon_wheel {
        WagonWheel::NoData => writeln!(out, "  Wagon wheel: no shot data")?,
        WagonWheel::Zones { zones, .. } => {
            writeln!(out, "  Wagon wheel")?;
            for zone in zones {
                writeln!(out, "    {:<11} {:>3}", zone.label, zone.runs)?;
            }
        }
    }

    writeln!(out, "  Economy by length")?;
    for zone in view.length_economy.iter() {
        writeln!(
            out,
            "    {:<7} {}",
            zone.length.as_str(),
            format_figure(zone.economy)
        )?;
    }
    write_notes(out, &view.insights)
}

fn write_notes(out: &mut String, notes: &[Insight]) -> std::fmt::Result {
    if notes.is_empty() {
        return Ok(());
    }
    writeln!(out, "Notes:")?;
    for note in notes {
        writeln!(out, "{}", note)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::build_dashboard;
    use crate::models::{Delivery, DeliveryTable, Length, Selection};

    fn table() -> DeliveryTable {
        vec![
            Delivery::new("Shaheen", "Pakistan", "India", "Powerplay")
                .with_batsman(BatsmanType::Lhb)
                .with_length(Length::Yorker)
                .hitting_stumps()
                .wicket(),
            Delivery::new("Shaheen", "Pakistan", "India", "Powerplay")
                .with_batsman(BatsmanType::Rhb)
                .with_length(Length::Full)
                .with_shot_area(3)
                .with_bat_runs(4),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_text_sections() {
        let dashboard = build_dashboard(
            &table(),
            &Selection::new("Shaheen", vec!["Powerplay".to_string()]),
        );

        let text = render_text(&dashboard);

        assert!(text.starts_with("🇵🇰 Shaheen (Pakistan) vs Overall Tournament\n"));
        assert!(text.contains("Phases: Powerplay  Batters: all"));
        assert!(text.contains("Economy:  12.0"));
        assert!(text.contains("- Bowls 50.0% of deliveries as Yorker"));
        assert!(text.contains("  - Focus on Yorker length, bowler uses this frequently"));
        assert!(text.contains("- Hits stumps 50.0% of the time"));
        assert!(text.contains("vs RHB: 1 balls, 4 runs, 0 wkts, economy 24.0"));
        assert!(text.contains("    Cover         4"));
        assert!(text.contains("vs LHB: 1 balls, 0 runs, 1 wkts, economy 0.0"));
        assert!(text.contains("  Wagon wheel: no shot data"));
    }

    #[test]
    fn test_render_text_empty_selection() {
        let dashboard = build_dashboard(&table(), &Selection::new("Shaheen", vec![]));

        let text = render_text(&dashboard);

        assert!(text.starts_with("Shaheen (Unknown) vs Overall Tournament\n"));
        assert!(text.contains("Phases: (none)"));
        assert!(text.contains("Deliveries: 0"));
        assert!(!text.contains("Notes:"));
    }
}
