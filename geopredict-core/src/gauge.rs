//! Gauge geometry and climate-tile derivation for the result view.
//!
//! The math lives here as pure functions; drawing is left to a rendering
//! adapter in the UI crate. Everything is recomputed from the latest
//! `PredictionResult` on each render pass.

use std::f64::consts::PI;

use crate::model::{ClimateTile, WeatherDetails};

/// Color band of one arc segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Pass,
    Fail,
}

/// One segment of the semicircular arc, as a share of the full 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub band: Band,
    pub fraction: f64,
}

/// Drawable representation of the gauge, derived purely from confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeGeometry {
    /// Needle angle in radians from the horizontal right, sweeping
    /// counter-clockwise: confidence 0 points left (pi), 100 points right (0).
    pub needle_angle: f64,
    pub segments: [ArcSegment; 2],
}

/// Needle length as a fraction of the drawable arc's vertical extent.
pub const NEEDLE_LENGTH_RATIO: f64 = 1.0 / 2.5;

/// Map a canonical 0-100 confidence to needle angle and arc split.
///
/// Out-of-range input is clamped, not rejected; the two segment fractions
/// always sum to exactly 100.
pub fn compute_geometry(confidence: f64) -> GaugeGeometry {
    let c = if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 100.0)
    };

    GaugeGeometry {
        needle_angle: PI * (1.0 - c / 100.0),
        segments: [
            ArcSegment {
                band: Band::Pass,
                fraction: c,
            },
            ArcSegment {
                band: Band::Fail,
                fraction: 100.0 - c,
            },
        ],
    }
}

/// Endpoint of a needle anchored at `center`, with y growing upward.
pub fn needle_point(center: (f64, f64), length: f64, angle: f64) -> (f64, f64) {
    (
        center.0 + length * angle.cos(),
        center.1 + length * angle.sin(),
    )
}

impl GaugeGeometry {
    /// Band covering a sample angle on the semicircle.
    ///
    /// The pass segment sweeps from the left edge (pi) down to the needle;
    /// the remainder toward the right edge (0) is the fail segment.
    pub fn band_at(&self, angle: f64) -> Band {
        if angle >= self.needle_angle {
            Band::Pass
        } else {
            Band::Fail
        }
    }
}

/// Derive the fixed set of climate tiles for the result view.
///
/// Air Quality and UV Index are not sourced from the payload; they stay
/// fixed labels until the backend feeds them (tracked as a product gap).
pub fn climate_tiles(details: &WeatherDetails) -> Vec<ClimateTile> {
    vec![
        tile("Temperature", "\u{1f321}", metric(details.temperature, "\u{b0}C", "--")),
        tile("Humidity", "\u{1f4a7}", metric(details.humidity, "%", "--")),
        tile("Wind Speed", "\u{1f32c}", metric(details.wind_speed, " km/h", "0")),
        tile("Rainfall", "\u{1f327}", metric(details.rainfall, " mm", "0")),
        tile("Air Quality", "\u{1f343}", "Good".to_string()),
        tile("Pressure", "\u{1f4df}", metric(details.pressure, " hPa", "--")),
        tile("UV Index", "\u{2600}", "Good".to_string()),
        tile("Visibility", "\u{1f32b}", metric(details.visibility, " km", "--")),
    ]
}

fn tile(title: &'static str, icon: &'static str, display_value: String) -> ClimateTile {
    ClimateTile {
        title,
        display_value,
        icon,
    }
}

fn metric(value: Option<f64>, unit: &str, placeholder: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => format!("{placeholder}{unit}"),
    }
}
