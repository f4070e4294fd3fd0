//! Transfer slot bridging the submission step and the result view.
//!
//! The two views share no in-memory state; the slot is the single handoff
//! point, injected into both sides. The payload is stored structured
//! (serialized JSON, the session-storage analogue) rather than flattened
//! into stringly navigation parameters, so nothing loses precision on the
//! way across.

use tracing::debug;

use crate::error::TransferError;
use crate::model::PredictionResult;

/// Short-lived store carrying one `PredictionResult` across the
/// input → result navigation.
///
/// Lifecycle: written once per submission, read any number of times while
/// the result view is alive, cleared when the user returns to input. A
/// later visit to the result view then reliably reports `MissingResult`.
#[derive(Debug, Default)]
pub struct ResultSlot {
    payload: Option<String>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and store one result, replacing whatever was there.
    pub fn store(&mut self, result: &PredictionResult) -> Result<(), TransferError> {
        let json = serde_json::to_string(result).map_err(TransferError::Encode)?;
        self.payload = Some(json);
        debug!(status = %result.status_label, "prediction result stored for handoff");
        Ok(())
    }

    /// Decode the stored result. Reading does not consume the slot.
    pub fn load(&self) -> Result<PredictionResult, TransferError> {
        let json = self
            .payload
            .as_deref()
            .ok_or(TransferError::MissingResult)?;
        serde_json::from_str(json).map_err(TransferError::Corrupt)
    }

    /// Drop the payload; called when the user returns to the input view.
    pub fn clear(&mut self) {
        if self.payload.take().is_some() {
            debug!("prediction result cleared");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherDetails;
    use chrono::Utc;

    fn sample_result() -> PredictionResult {
        PredictionResult {
            status_label: "No Landslide".to_string(),
            confidence: 72.5,
            details: WeatherDetails {
                temperature: Some(24.0),
                humidity: Some(60.0),
                wind_speed: Some(12.5),
                rainfall: None,
                pressure: Some(1013.25),
                visibility: Some(10.0),
            },
            requested_at: Utc::now(),
        }
    }

    #[test]
    fn round_trip_reproduces_every_field_exactly() {
        let mut slot = ResultSlot::new();
        let result = sample_result();

        slot.store(&result).expect("store should succeed");
        let loaded = slot.load().expect("load should succeed");

        assert_eq!(loaded, result);
        assert_eq!(loaded.confidence, 72.5, "no drift on the confidence scalar");
    }

    #[test]
    fn empty_slot_reports_missing_result() {
        let slot = ResultSlot::new();
        assert!(slot.is_empty());
        assert!(matches!(slot.load(), Err(TransferError::MissingResult)));
    }

    #[test]
    fn slot_can_be_read_more_than_once() {
        let mut slot = ResultSlot::new();
        slot.store(&sample_result()).expect("store should succeed");

        let first = slot.load().expect("first read");
        let second = slot.load().expect("second read");
        assert_eq!(first, second);
    }

    #[test]
    fn clear_empties_the_slot() {
        let mut slot = ResultSlot::new();
        slot.store(&sample_result()).expect("store should succeed");
        assert!(!slot.is_empty());

        slot.clear();

        assert!(slot.is_empty());
        assert!(matches!(slot.load(), Err(TransferError::MissingResult)));
    }

    #[test]
    fn store_replaces_previous_payload() {
        let mut slot = ResultSlot::new();
        slot.store(&sample_result()).expect("store should succeed");

        let mut second = sample_result();
        second.status_label = "Landslide".to_string();
        second.confidence = 91.0;
        slot.store(&second).expect("second store should succeed");

        let loaded = slot.load().expect("load should succeed");
        assert_eq!(loaded.status_label, "Landslide");
        assert_eq!(loaded.confidence, 91.0);
    }
}
