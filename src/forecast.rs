//! Next-day AQI estimate
//!
//! This is a best-effort approximation, not a forecasting model. When the
//! station publishes a daily PM2.5 forecast we take tomorrow's entry (or the
//! last one available); otherwise we nudge the current AQI with a fixed
//! multiplier and offset.

use crate::models::ForecastSource;
use crate::waqi::ForecastDailyEntry;
use chrono::NaiveDate;

/// Multiplier applied to the current AQI when the provider has no forecast
pub const HEURISTIC_FACTOR: f64 = 0.95;
/// Offset added after the multiplier
pub const HEURISTIC_OFFSET: f64 = 10.0;
/// Top of the AQI scale; heuristic values are clamped to `[0, AQI_SCALE_MAX]`
pub const AQI_SCALE_MAX: f64 = 500.0;

/// A derived next-day value and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    pub aqi: i32,
    pub source: ForecastSource,
}

/// Derive tomorrow's AQI. Never fails: missing inputs give `None`.
///
/// `today` is the caller's local calendar date.
#[must_use]
pub fn derive_forecast(
    entries: Option<&[ForecastDailyEntry]>,
    current_aqi: Option<i32>,
    today: NaiveDate,
) -> Option<Forecast> {
    if let Some(entry) = entries.and_then(|entries| pick_entry(entries, today)) {
        return Some(Forecast {
            aqi: entry_value(entry, current_aqi),
            source: ForecastSource::Provider,
        });
    }

    current_aqi.map(|aqi| Forecast {
        aqi: heuristic(aqi),
        source: ForecastSource::Heuristic,
    })
}

/// Tomorrow's entry, or the last entry when tomorrow is not listed.
fn pick_entry(entries: &[ForecastDailyEntry], today: NaiveDate) -> Option<&ForecastDailyEntry> {
    let tomorrow = today
        .succ_opt()
        .map(|date| date.format("%Y-%m-%d").to_string());

    tomorrow
        .and_then(|key| entries.iter().find(|entry| entry.day.as_deref() == Some(key.as_str())))
        .or_else(|| entries.last())
}

/// First numeric of avg, max, min, then the current AQI, then zero.
fn entry_value(entry: &ForecastDailyEntry, current_aqi: Option<i32>) -> i32 {
    let value = entry
        .avg
        .value()
        .or(entry.max.value())
        .or(entry.min.value())
        .or(current_aqi.map(f64::from))
        .unwrap_or(0.0);
    round_half_up(value)
}

fn heuristic(aqi: i32) -> i32 {
    let estimate = round_half_up(f64::from(aqi) * HEURISTIC_FACTOR + HEURISTIC_OFFSET);
    estimate.clamp(0, AQI_SCALE_MAX as i32)
}

/// Round to the nearest integer, halves towards positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waqi::LooseNumber;
    use rstest::rstest;

    fn entry(day: &str, avg: Option<f64>, max: Option<f64>, min: Option<f64>) -> ForecastDailyEntry {
        ForecastDailyEntry {
            day: Some(day.to_string()),
            avg: LooseNumber(avg),
            max: LooseNumber(max),
            min: LooseNumber(min),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 14).unwrap()
    }

    #[test]
    fn test_picks_tomorrow() {
        let entries = vec![
            entry("2024-11-13", Some(150.0), None, None),
            entry("2024-11-14", Some(140.0), None, None),
            entry("2024-11-15", Some(95.0), Some(130.0), Some(60.0)),
            entry("2024-11-16", Some(80.0), None, None),
        ];
        let forecast = derive_forecast(Some(&entries), Some(180), today()).unwrap();
        assert_eq!(forecast.aqi, 95);
        assert_eq!(forecast.source, ForecastSource::Provider);
    }

    #[test]
    fn test_falls_back_to_last_entry() {
        let entries = vec![
            entry("2024-11-10", Some(150.0), None, None),
            entry("2024-11-11", Some(121.6), None, None),
        ];
        let forecast = derive_forecast(Some(&entries), Some(180), today()).unwrap();
        assert_eq!(forecast.aqi, 122);
    }

    #[test]
    fn test_month_rollover() {
        let entries = vec![
            entry("2024-12-01", Some(77.0), None, None),
            entry("2024-12-02", Some(10.0), None, None),
        ];
        let end_of_month = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        let forecast = derive_forecast(Some(&entries), None, end_of_month).unwrap();
        assert_eq!(forecast.aqi, 77);
    }

    #[rstest]
    #[case(None, Some(130.0), Some(60.0), Some(180), 130)]
    #[case(None, None, Some(60.0), Some(180), 60)]
    #[case(None, None, None, Some(180), 180)]
    #[case(None, None, None, None, 0)]
    #[case(Some(0.0), Some(130.0), None, Some(180), 0)]
    #[case(Some(94.5), None, None, None, 95)]
    fn test_entry_value_fallbacks(
        #[case] avg: Option<f64>,
        #[case] max: Option<f64>,
        #[case] min: Option<f64>,
        #[case] aqi: Option<i32>,
        #[case] expected: i32,
    ) {
        let entries = vec![entry("2024-11-15", avg, max, min)];
        let forecast = derive_forecast(Some(&entries), aqi, today()).unwrap();
        assert_eq!(forecast.aqi, expected);
        assert_eq!(forecast.source, ForecastSource::Provider);
    }

    #[rstest]
    #[case(180, 181)]
    #[case(0, 10)]
    #[case(100, 105)]
    #[case(530, 500)]
    #[case(900, 500)]
    #[case(-50, 0)]
    fn test_heuristic(#[case] aqi: i32, #[case] expected: i32) {
        let forecast = derive_forecast(None, Some(aqi), today()).unwrap();
        assert_eq!(forecast.aqi, expected);
        assert_eq!(forecast.source, ForecastSource::Heuristic);
    }

    #[test]
    fn test_empty_series_uses_heuristic() {
        let forecast = derive_forecast(Some(&[]), Some(180), today()).unwrap();
        assert_eq!(forecast.aqi, 181);
        assert_eq!(forecast.source, ForecastSource::Heuristic);
    }

    #[test]
    fn test_nothing_to_go_on() {
        assert_eq!(derive_forecast(None, None, today()), None);
        assert_eq!(derive_forecast(Some(&[]), None, today()), None);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(181.0), 181);
        assert_eq!(round_half_up(180.99), 181);
    }
}
