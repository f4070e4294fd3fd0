use thiserror::Error;

/// Validation failures for the location form.
///
/// All of these are recovered locally: submission stays blocked and the
/// message is shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Please enter either a city name or latitude and longitude, not both.")]
    MixedMode,

    #[error("Please enter a city name, or both latitude and longitude.")]
    Incomplete,

    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} {value} is outside the valid range {min} to {max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Failures at the prediction-service boundary.
///
/// A timeout is reported separately from other transport failures so the
/// user can tell "service is slow" from "service is unreachable".
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Could not reach the prediction service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("The prediction service did not answer within {0} seconds.")]
    Timeout(u64),

    #[error("Prediction request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Could not decode the prediction response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Prediction service returned confidence {0}, expected a fraction in 0..=1")]
    ConfidenceOutOfRange(f64),
}

/// Failures when handing a result across the input → result navigation.
///
/// `MissingResult` is the expected outcome of visiting the result view
/// without a prior submission; the view renders a placeholder for it.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("No prediction result has been transferred yet.")]
    MissingResult,

    #[error("Could not encode the prediction result: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Stored prediction payload is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}
