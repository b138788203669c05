//! End-to-end fetch tests against canned provider payloads

use aqpulse::waqi::FeedEnvelope;
use aqpulse::{
    AqPulseError, AqiCategory, AqiReading, FeedSource, ForecastSource, Result, fetch_reading,
    fetch_reading_on,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde_json::{Value, json};
use std::sync::Mutex;

/// Replays a fixed payload and records which cities were requested
struct FakeFeed {
    payload: Value,
    requests: Mutex<Vec<String>>,
}

impl FakeFeed {
    fn new(payload: Value) -> Self {
        Self {
            payload,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FeedSource for FakeFeed {
    async fn fetch_feed(&self, city: &str) -> Result<FeedEnvelope> {
        self.requests.lock().unwrap().push(city.to_string());
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

struct OfflineFeed;

#[async_trait]
impl FeedSource for OfflineFeed {
    async fn fetch_feed(&self, _city: &str) -> Result<FeedEnvelope> {
        Err(AqPulseError::network("connection refused"))
    }
}

#[tokio::test]
async fn test_reading_with_heuristic_forecast() {
    let feed = FakeFeed::new(json!({
        "status": "ok",
        "data": {"aqi": 180, "iaqi": {"pm25": {"v": 120}}}
    }));

    let reading = fetch_reading(&feed, "Delhi").await.unwrap();

    assert_eq!(
        reading,
        AqiReading {
            aqi: Some(180),
            pm25: Some(120.0),
            pm10: None,
            so2: None,
            co: None,
            forecast_aqi: Some(181),
            forecast_source: Some(ForecastSource::Heuristic),
        }
    );
    assert_eq!(reading.category(), AqiCategory::Unhealthy);
    assert_eq!(*feed.requests.lock().unwrap(), vec!["Delhi".to_string()]);
}

#[tokio::test]
async fn test_reading_uses_tomorrows_provider_forecast() {
    let tomorrow = Local::now().date_naive().succ_opt().unwrap();
    let feed = FakeFeed::new(json!({
        "status": "ok",
        "data": {
            "aqi": 180,
            "forecast": {"daily": {"pm25": [
                {"day": "2000-01-01", "avg": 400},
                {"day": tomorrow.format("%Y-%m-%d").to_string(), "avg": 95, "max": 150, "min": 40},
                {"day": "2999-12-31", "avg": 12}
            ]}}
        }
    }));

    let reading = fetch_reading(&feed, "Mumbai").await.unwrap();

    assert_eq!(reading.forecast_aqi, Some(95));
    assert_eq!(reading.forecast_source, Some(ForecastSource::Provider));
}

#[tokio::test]
async fn test_reading_falls_back_to_last_forecast_entry() {
    let feed = FakeFeed::new(json!({
        "status": "ok",
        "data": {
            "aqi": 42,
            "forecast": {"daily": {"pm25": [
                {"day": "2024-02-01", "avg": 70},
                {"day": "2024-02-02", "max": 88.4}
            ]}}
        }
    }));
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let reading = fetch_reading_on(&feed, "Jaipur", today).await.unwrap();

    assert_eq!(reading.forecast_aqi, Some(88));
}

#[tokio::test]
async fn test_provider_error_surfaces_its_message() {
    let feed = FakeFeed::new(json!({"status": "error", "data": "Invalid city"}));

    let err = fetch_reading(&feed, "Nowhere").await.unwrap_err();

    assert!(matches!(err, AqPulseError::Provider { .. }));
    assert_eq!(err.to_string(), "Invalid city");
    assert_eq!(err.user_message(), "Invalid city");
}

#[tokio::test]
async fn test_network_error_propagates() {
    let err = fetch_reading(&OfflineFeed, "Delhi").await.unwrap_err();

    assert!(matches!(err, AqPulseError::Network { .. }));
    assert!(err.user_message().contains("connection refused"));
}

#[tokio::test]
async fn test_station_without_data() {
    let feed = FakeFeed::new(json!({"status": "ok", "data": {"aqi": "-"}}));

    let reading = fetch_reading(&feed, "Patna").await.unwrap();

    assert_eq!(reading, AqiReading::default());
    assert_eq!(reading.category(), AqiCategory::NoData);
}
