//! Air quality reading model

use super::category::{AqiCategory, classify};
use serde::{Deserialize, Serialize};

/// Where a reading's next-day value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSource {
    /// Picked from the provider's daily PM2.5 forecast
    Provider,
    /// Estimated from the current AQI
    Heuristic,
}

/// A single air quality reading for one city.
///
/// Readings are never merged: every fetch produces a new one that replaces
/// whatever was shown before.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiReading {
    /// Overall AQI
    pub aqi: Option<i32>,
    /// PM2.5 sub-index
    pub pm25: Option<f64>,
    /// PM10 sub-index
    pub pm10: Option<f64>,
    /// Sulfur dioxide sub-index
    pub so2: Option<f64>,
    /// Carbon monoxide sub-index
    pub co: Option<f64>,
    /// Expected AQI for tomorrow (an approximation, see [`crate::forecast`])
    #[serde(rename = "forecastAQI")]
    pub forecast_aqi: Option<i32>,
    /// Origin of `forecast_aqi`
    pub forecast_source: Option<ForecastSource>,
}

impl AqiReading {
    /// Category of the overall AQI
    #[must_use]
    pub fn category(&self) -> AqiCategory {
        classify(self.aqi.map(f64::from))
    }

    /// Category of tomorrow's expected AQI
    #[must_use]
    pub fn forecast_category(&self) -> AqiCategory {
        classify(self.forecast_aqi.map(f64::from))
    }
}
