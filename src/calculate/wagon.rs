//! Wagon-wheel scoring zones.
//!
//! Eight 45° wedges around the batter. Right-handers use the standard
//! layout; left-handers get the mirror image so each named fielding
//! position sits on the correct side of the wicket.

use crate::models::{BatsmanType, Delivery, ShotArea, WagonWheel, WagonZone};

const ZONE_LABELS: [&str; 8] = [
    "Third Man",
    "Point",
    "Cover",
    "Long Off",
    "Long On",
    "Mid-wicket",
    "Square Leg",
    "Fine Leg",
];

const WEDGE_DEG: f64 = 45.0;
const TOP_DEG: f64 = 90.0;

// Diverging blue -> light grey -> red scale (matplotlib "coolwarm" endpoints)
const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const HOT: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Angular layout of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelLayout {
    /// Zones run counter-clockwise from the top
    Standard,
    /// Zones run clockwise from the top
    Mirrored,
}

impl WheelLayout {
    pub fn for_batsman(batsman_type: BatsmanType) -> Self {
        match batsman_type {
            BatsmanType::Rhb => WheelLayout::Standard,
            BatsmanType::Lhb => WheelLayout::Mirrored,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        matches!(self, WheelLayout::Mirrored)
    }
}

/// Fielding position name for a zone.
pub fn zone_label(area: ShotArea) -> &'static str {
    ZONE_LABELS[(area.get() - ShotArea::MIN) as usize]
}

/// `(start, end, mid)` angles in degrees for a zone.
pub fn zone_angles(area: ShotArea, layout: WheelLayout) -> (f64, f64, f64) {
    let zone = area.get() as f64;
    let start = match layout {
        WheelLayout::Standard => TOP_DEG + (zone - 1.0) * WEDGE_DEG,
        WheelLayout::Mirrored => TOP_DEG - zone * WEDGE_DEG,
    };
    (start, start + WEDGE_DEG, start + WEDGE_DEG / 2.0)
}

/// Hex color for an intensity in `[0, 1]`; values outside are clamped.
pub fn intensity_color(intensity: f64) -> String {
    let t = if intensity.is_finite() {
        intensity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (from, to, f) = if t < 0.5 {
        (COLD, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, HOT, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        lerp(from.0, to.0),
        lerp(from.1, to.1),
        lerp(from.2, to.2)
    )
}

/// Sum bat runs per shot zone and normalise against the busiest zone.
///
/// Deliveries without a recorded zone are ignored. If none has a zone the
/// result is [`WagonWheel::NoData`].
pub fn wagon_wheel(deliveries: &[&Delivery], layout: WheelLayout) -> WagonWheel {
    let mut zone_runs = [0u32; ZONE_LABELS.len()];
    let mut recorded = false;

    for d in deliveries {
        if let Some(area) = d.shot_area {
            recorded = true;
            let slot = &mut zone_runs[(area.get() - ShotArea::MIN) as usize];
            *slot = slot.saturating_add(d.bat_runs);
        }
    }

    if !recorded {
        return WagonWheel::NoData;
    }

    let max_runs = zone_runs.iter().copied().max().unwrap_or(0);

    let zones = (ShotArea::MIN..=ShotArea::MAX)
        .filter_map(ShotArea::new)
        .map(|area| {
            let runs = zone_runs[(area.get() - ShotArea::MIN) as usize];
            let intensity = if max_runs > 0 {
                runs as f64 / max_runs as f64
            } else {
                0.0
            };
            let (start_deg, end_deg, mid_deg) = zone_angles(area, layout);
            WagonZone {
                zone: area.get(),
                label: zone_label(area).to_string(),
                runs,
                intensity,
                color: intensity_color(intensity),
                start_deg,
                end_deg,
                mid_deg,
            }
        })
        .collect();

    WagonWheel::Zones {
        max_runs,
        mirrored: layout.is_mirrored(),
        zones,
    }
}
