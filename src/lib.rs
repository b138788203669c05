//! `AQPulse` - Real-time air quality for Indian cities
//!
//! This library fetches readings from the World Air Quality Index feed,
//! classifies them into health categories and derives a rough estimate for
//! tomorrow's AQI.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod report;
pub mod waqi;

// Re-export core types for public API
pub use config::AqPulseConfig;
pub use dashboard::{Dashboard, FetchPhase, RefreshTicket};
pub use error::AqPulseError;
pub use fetch::{fetch_reading, fetch_reading_on};
pub use forecast::{Forecast, derive_forecast};
pub use models::{AqiCategory, AqiReading, City, ForecastSource, classify};
pub use waqi::{FeedSource, WaqiClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AqPulseError>;
