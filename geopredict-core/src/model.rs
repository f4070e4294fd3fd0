use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reconciled location query: a city name XOR a coordinate pair.
///
/// The two variants are mutually exclusive by construction; `InputForm`
/// guarantees exactly one of them is populated before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationQuery {
    City { city: String },
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationQuery {
    /// Short human-readable form for logs and headers.
    pub fn describe(&self) -> String {
        match self {
            LocationQuery::City { city } => city.clone(),
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => format!("{latitude:.4}, {longitude:.4}"),
        }
    }
}

/// Auxiliary climate readings attached to a prediction.
///
/// Every field is optional; the backend omits readings it could not source
/// and the result view substitutes a field-specific placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherDetails {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub rainfall: Option<f64>,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
}

/// Immutable outcome of one submission to the prediction service.
///
/// `confidence` is canonical 0-100; the service boundary scales the wire
/// value exactly once (see `service::canonical_confidence`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status_label: String,
    pub confidence: f64,
    pub details: WeatherDetails,
    pub requested_at: DateTime<Utc>,
}

/// Read-only display projection of one climate reading.
///
/// Regenerated on every render pass, never stored or mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateTile {
    pub title: &'static str,
    pub display_value: String,
    pub icon: &'static str,
}
