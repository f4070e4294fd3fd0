//! Core library for the GeoPredict terminal client.
//!
//! This crate defines:
//! - Input reconciliation for the city / coordinate form
//! - The prediction-service boundary and its error taxonomy
//! - The transfer slot carrying one result between views
//! - Gauge geometry and climate-tile derivation for the result view
//!
//! It is used by `geopredict-tui`, but can also be reused by other binaries
//! or services.

pub mod config;
pub mod error;
pub mod gauge;
pub mod input;
pub mod model;
pub mod service;
pub mod transfer;

pub use config::Config;
pub use error::{InputError, ServiceError, TransferError};
pub use gauge::{ArcSegment, Band, GaugeGeometry};
pub use input::InputForm;
pub use model::{ClimateTile, LocationQuery, PredictionResult, WeatherDetails};
pub use service::{HttpPredictionService, PredictionService};
pub use transfer::ResultSlot;
