//! WAQI feed response structures
//!
//! The feed is loosely typed: numbers sometimes arrive as strings, the
//! overall AQI is `"-"` for stations without data, and optional blocks come
//! and go. Everything below `data` deserialises leniently so that an odd
//! field degrades to `None` instead of failing the whole reading.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Top-level `{ status, data }` envelope
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default)]
    pub status: String,
    /// A [`FeedData`] object when `status` is `"ok"`, usually an error
    /// string otherwise
    #[serde(default)]
    pub data: Value,
}

impl FeedEnvelope {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Provider's explanation when the status is not ok
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.data.as_str().filter(|message| !message.is_empty())
    }
}

/// Payload of a successful feed response
#[derive(Debug, Default, Deserialize)]
pub struct FeedData {
    #[serde(default)]
    pub aqi: LooseNumber,
    #[serde(default, deserialize_with = "lenient")]
    pub iaqi: Option<HashMap<String, IaqiValue>>,
    #[serde(default, deserialize_with = "lenient")]
    pub forecast: Option<ForecastBlock>,
}

impl FeedData {
    /// Individual sub-index for a pollutant key such as `pm25`
    #[must_use]
    pub fn sub_index(&self, pollutant: &str) -> Option<f64> {
        self.iaqi.as_ref()?.get(pollutant)?.v.value()
    }

    /// The `forecast.daily.pm25` series, if the station publishes one
    #[must_use]
    pub fn daily_pm25(&self) -> Option<&[ForecastDailyEntry]> {
        self.forecast.as_ref()?.daily.as_ref()?.pm25.as_deref()
    }
}

/// One `iaqi` entry, `{ "v": 42 }`.
///
/// Entries of any other shape read as having no value, so one odd sibling
/// never hides the others.
#[derive(Debug, Default)]
pub struct IaqiValue {
    pub v: LooseNumber,
}

impl<'de> Deserialize<'de> for IaqiValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let v = value
            .get("v")
            .map_or(LooseNumber(None), |v| LooseNumber(number_from_value(v)));
        Ok(IaqiValue { v })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastBlock {
    #[serde(default, deserialize_with = "lenient")]
    pub daily: Option<DailyForecast>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailyForecast {
    #[serde(default, deserialize_with = "lenient_series")]
    pub pm25: Option<Vec<ForecastDailyEntry>>,
}

/// A single day of the provider's forecast
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastDailyEntry {
    /// Calendar day, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient")]
    pub day: Option<String>,
    #[serde(default)]
    pub avg: LooseNumber,
    #[serde(default)]
    pub max: LooseNumber,
    #[serde(default)]
    pub min: LooseNumber,
}

/// A JSON value read as a finite number when it looks like one.
///
/// Accepts numbers and numeric strings; anything else is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LooseNumber(pub Option<f64>);

impl LooseNumber {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        self.0
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber(Some(value).filter(|v| v.is_finite()))
    }
}

impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(LooseNumber(number_from_value(&value)))
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Deserialize into `T`, or `None` when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an array element by element, skipping elements that do not
/// fit. A value that is not an array gives `None`.
fn lenient_series<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}
