//! Turning a feed response into an [`AqiReading`]

use crate::error::GENERIC_PROVIDER_MESSAGE;
use crate::forecast::{derive_forecast, round_half_up};
use crate::models::AqiReading;
use crate::waqi::{FeedData, FeedEnvelope, FeedSource};
use crate::{AqPulseError, Result};
use chrono::{Local, NaiveDate};
use tracing::{debug, instrument, warn};

/// Fetch the current reading for a city.
///
/// Stateless apart from the single request made through `source`. The
/// forecast is derived against today's local date.
#[instrument(skip(source))]
pub async fn fetch_reading<S: FeedSource + ?Sized>(source: &S, city: &str) -> Result<AqiReading> {
    fetch_reading_on(source, city, Local::now().date_naive()).await
}

/// [`fetch_reading`] with an explicit "today", for deterministic forecasts.
pub async fn fetch_reading_on<S: FeedSource + ?Sized>(
    source: &S,
    city: &str,
    today: NaiveDate,
) -> Result<AqiReading> {
    let envelope = source.fetch_feed(city).await?;
    reading_from_envelope(envelope, today)
}

/// Check the provider status and assemble the reading.
pub fn reading_from_envelope(envelope: FeedEnvelope, today: NaiveDate) -> Result<AqiReading> {
    if !envelope.is_ok() {
        let message = envelope
            .error_message()
            .unwrap_or(GENERIC_PROVIDER_MESSAGE)
            .to_string();
        warn!("Provider rejected request: {}", message);
        return Err(AqPulseError::provider(message));
    }

    if !envelope.data.is_object() {
        return Err(AqPulseError::malformed("feed data is not an object"));
    }
    let data: FeedData = serde_json::from_value(envelope.data)?;

    Ok(reading_from_data(&data, today))
}

fn reading_from_data(data: &FeedData, today: NaiveDate) -> AqiReading {
    let aqi = data.aqi.value().map(round_half_up);
    let forecast = derive_forecast(data.daily_pm25(), aqi, today);

    debug!(
        "Reading: aqi={:?}, forecast={:?}",
        aqi,
        forecast.map(|f| f.aqi)
    );

    AqiReading {
        aqi,
        pm25: data.sub_index("pm25"),
        pm10: data.sub_index("pm10"),
        so2: data.sub_index("so2"),
        co: data.sub_index("co"),
        forecast_aqi: forecast.map(|f| f.aqi),
        forecast_source: forecast.map(|f| f.source),
    }
}
