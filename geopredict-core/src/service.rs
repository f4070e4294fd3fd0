//! Prediction-service boundary.
//!
//! The service is a black box behind `POST {base}/predict`: it accepts a
//! city name or a coordinate pair and answers with a status label, a
//! confidence fraction and whatever climate readings it could source.
//! Everything crossing this boundary is normalized here, including the
//! confidence scale.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ServiceError;
use crate::model::{LocationQuery, PredictionResult, WeatherDetails};

#[async_trait]
pub trait PredictionService: Send + Sync + Debug {
    async fn predict(&self, query: &LocationQuery) -> Result<PredictionResult, ServiceError>;
}

/// HTTP client for the prediction backend.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    base_url: String,
    timeout_secs: u64,
    http: Client,
}

impl HttpPredictionService {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.service_url.clone(), config.request_timeout_secs)
    }

    fn classify(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout_secs)
        } else {
            ServiceError::Network(err)
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, query: &LocationQuery) -> Result<PredictionResult, ServiceError> {
        let url = format!("{}/predict", self.base_url.trim_end_matches('/'));
        debug!(%url, location = %query.describe(), "submitting prediction request");

        let res = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&PredictRequest::from(query))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            warn!(%status, "prediction service returned non-success");
            return Err(ServiceError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: PredictResponse =
            serde_json::from_str(&body).map_err(ServiceError::Decode)?;

        into_result(parsed)
    }
}

/// Request body for `POST /predict`; only the populated variant is sent.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
}

impl<'a> From<&'a LocationQuery> for PredictRequest<'a> {
    fn from(query: &'a LocationQuery) -> Self {
        match query {
            LocationQuery::City { city } => Self {
                city: Some(city),
                latitude: None,
                longitude: None,
            },
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => Self {
                city: None,
                latitude: Some(*latitude),
                longitude: Some(*longitude),
            },
        }
    }
}

/// Wire shape of a successful prediction.
///
/// The backend also sends `air_quality` and `uv_index`, but the result view
/// does not consume them yet, so they are not decoded.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    status: String,
    confidence: f64,
    temperature: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    rainfall: Option<f64>,
    pressure: Option<f64>,
    visibility: Option<f64>,
}

/// The wire carries confidence as a 0-1 fraction; the rest of the app uses
/// a canonical 0-100 scale. The value is scaled exactly once, here.
fn canonical_confidence(raw: f64) -> Result<f64, ServiceError> {
    if !raw.is_finite() || !(0.0..=1.0).contains(&raw) {
        return Err(ServiceError::ConfidenceOutOfRange(raw));
    }
    Ok(raw * 100.0)
}

fn into_result(parsed: PredictResponse) -> Result<PredictionResult, ServiceError> {
    Ok(PredictionResult {
        status_label: parsed.status,
        confidence: canonical_confidence(parsed.confidence)?,
        details: WeatherDetails {
            temperature: parsed.temperature,
            humidity: parsed.humidity,
            wind_speed: parsed.wind_speed,
            rainfall: parsed.rainfall,
            pressure: parsed.pressure,
            visibility: parsed.visibility,
        },
        requested_at: Utc::now(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so multibyte payloads can't split.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
