//! World Air Quality Index (WAQI) feed client
//!
//! The per-city feed lives at `{base_url}/feed/{city}/?token={token}` and
//! answers with a `{ status, data }` envelope. A single GET is made per
//! call: no retries, no caching.

use crate::config::ProviderConfig;
use crate::{AqPulseError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

pub mod feed;

pub use feed::{FeedData, FeedEnvelope, ForecastDailyEntry, LooseNumber};

/// Anything that can produce the raw feed envelope for a city
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, city: &str) -> Result<FeedEnvelope>;
}

/// reqwest-backed WAQI client
pub struct WaqiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl WaqiClient {
    /// Create a new client from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("AQPulse/", env!("CARGO_PKG_VERSION")));

        // Without a configured timeout the transport default applies.
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds.into()));
        }

        let client = builder
            .build()
            .map_err(|e| AqPulseError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Use an already configured HTTP client
    #[must_use]
    pub fn with_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Feed URL for a city, with the token in place
    #[must_use]
    pub fn feed_url(&self, city: &str) -> String {
        format!(
            "{}/feed/{}/?token={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.token)
        )
    }
}

#[async_trait]
impl FeedSource for WaqiClient {
    #[instrument(skip(self))]
    async fn fetch_feed(&self, city: &str) -> Result<FeedEnvelope> {
        let url = self.feed_url(city);
        debug!("WAQI request URL: {}", without_token(&url));
        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("WAQI request for '{}' failed: {}", city, e);
            AqPulseError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("WAQI answered HTTP {} for '{}'", status, city);
            return Err(AqPulseError::network(format!(
                "request failed with status: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let envelope: FeedEnvelope = response.json().await?;

        info!(
            "Fetched WAQI feed for '{}' in {:.3}s (status: {})",
            city,
            start_time.elapsed().as_secs_f64(),
            envelope.status
        );

        Ok(envelope)
    }
}

/// The URL up to its token parameter, for logging
fn without_token(url: &str) -> &str {
    url.split("token=").next().unwrap_or(url)
}
