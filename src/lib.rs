//! Crop Yield Prediction and Suitability API
//!
//! A small agronomy service with four concerns:
//! - `data` / `estimator`: load the historical CSV and fit a gradient-boosted
//!   yield regressor once at startup
//! - `suitability`: static per-crop growing envelopes with a verdict string
//! - `regions`: range-containment lookups against an embedded SQLite table
//! - `weather`: thin gateway over the OpenWeatherMap current-weather endpoint
//!
//! `api_server` wires everything into an Axum router; the fitted estimator is
//! constructed once and injected into handlers through `AppState`.

pub mod api_server;
pub mod data;
pub mod error;
pub mod estimator;
pub mod regions;
pub mod suitability;
pub mod weather;

// Re-export commonly used types
pub use api_server::{create_router, AppState, ServerConfig};
pub use error::AppError;
pub use estimator::YieldEstimator;
