//! Data models for the AQPulse application
//!
//! This module contains the core domain models organized by concern:
//! - Category: AQI health categories and breakpoints
//! - City: The cities offered by the dashboard
//! - Reading: A single fetched air quality reading

pub mod category;
pub mod city;
pub mod reading;

// Re-export all public types for convenient access
pub use category::{AqiCategory, classify};
pub use city::City;
pub use reading::{AqiReading, ForecastSource};
