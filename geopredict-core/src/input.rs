//! Input reconciliation for the location form.
//!
//! The form owns three text fields (city, latitude, longitude) and enforces
//! the mutual-exclusion rule: a location is specified by city name XOR by a
//! coordinate pair, never both.

use crate::error::InputError;
use crate::model::LocationQuery;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// The location form.
///
/// The fields stay public: the clearing rule in the setters is a UI
/// convenience, and `validate` must hold even when a caller writes the
/// fields directly.
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    pub city: String,
    pub latitude: String,
    pub longitude: String,
    last_error: Option<InputError>,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setting a non-empty city clears both coordinate fields.
    pub fn set_city(&mut self, text: impl Into<String>) {
        self.city = text.into();
        if !self.city.trim().is_empty() {
            self.latitude.clear();
            self.longitude.clear();
        }
        self.revalidate();
    }

    /// Setting a non-empty latitude clears the city field.
    pub fn set_latitude(&mut self, text: impl Into<String>) {
        self.latitude = text.into();
        if !self.latitude.trim().is_empty() {
            self.city.clear();
        }
        self.revalidate();
    }

    /// Setting a non-empty longitude clears the city field.
    pub fn set_longitude(&mut self, text: impl Into<String>) {
        self.longitude = text.into();
        if !self.longitude.trim().is_empty() {
            self.city.clear();
        }
        self.revalidate();
    }

    /// Latest validation outcome, refreshed synchronously on every edit.
    pub fn last_error(&self) -> Option<&InputError> {
        self.last_error.as_ref()
    }

    /// Mixed-mode check, enforced independently of the setter clearing rule.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.has_city() && (self.has_latitude() || self.has_longitude()) {
            return Err(InputError::MixedMode);
        }
        Ok(())
    }

    /// True iff exactly one variant is fully populated and validation passes.
    pub fn is_submit_ready(&self) -> bool {
        if self.validate().is_err() {
            return false;
        }
        (self.has_city() && !self.has_latitude() && !self.has_longitude())
            || (!self.has_city() && self.has_latitude() && self.has_longitude())
    }

    /// Build the submit-ready query, parsing and range-checking coordinates.
    pub fn build_query(&self) -> Result<LocationQuery, InputError> {
        self.validate()?;

        if self.has_city() {
            return Ok(LocationQuery::City {
                city: self.city.trim().to_string(),
            });
        }

        if !self.has_latitude() || !self.has_longitude() {
            return Err(InputError::Incomplete);
        }

        let latitude = parse_coordinate("latitude", &self.latitude, LATITUDE_RANGE)?;
        let longitude = parse_coordinate("longitude", &self.longitude, LONGITUDE_RANGE)?;

        Ok(LocationQuery::Coordinates {
            latitude,
            longitude,
        })
    }

    fn revalidate(&mut self) {
        self.last_error = self.validate().err();
    }

    fn has_city(&self) -> bool {
        !self.city.trim().is_empty()
    }

    fn has_latitude(&self) -> bool {
        !self.latitude.trim().is_empty()
    }

    fn has_longitude(&self) -> bool {
        !self.longitude.trim().is_empty()
    }
}

fn parse_coordinate(
    field: &'static str,
    text: &str,
    (min, max): (f64, f64),
) -> Result<f64, InputError> {
    let value: f64 = text.trim().parse().map_err(|_| InputError::NotANumber {
        field,
        value: text.trim().to_string(),
    })?;

    if !(min..=max).contains(&value) {
        return Err(InputError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(value)
}
