//! Caller-owned dashboard state
//!
//! `fetch_reading` itself keeps no state. The dashboard holds the selected
//! city and the outcome of the latest refresh, and moves through
//! `Idle -> Loading -> (Success | Failed)` on every refresh.
//!
//! Overlapping refreshes are settled with generation tickets: only the
//! result of the most recently started refresh is applied, so a slow
//! response for a previous city can never overwrite a newer one.

use crate::fetch::fetch_reading;
use crate::models::{AqiCategory, AqiReading};
use crate::waqi::FeedSource;
use crate::Result;
use tracing::{debug, warn};

/// Where the dashboard is in its refresh cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success(AqiReading),
    /// User-facing message of the failed refresh
    Failed(String),
}

/// Handle for one refresh, returned by [`Dashboard::begin_refresh`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    city: String,
}

impl RefreshTicket {
    /// City this refresh was started for
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    city: String,
    phase: FetchPhase,
    generation: u64,
}

impl Dashboard {
    #[must_use]
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            phase: FetchPhase::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading)
    }

    /// Latest successful reading; `None` while loading or after a failure
    #[must_use]
    pub fn reading(&self) -> Option<&AqiReading> {
        match &self.phase {
            FetchPhase::Success(reading) => Some(reading),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            FetchPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Category of the current reading, `NoData` when there is none
    #[must_use]
    pub fn category(&self) -> AqiCategory {
        self.reading()
            .map_or(AqiCategory::NoData, AqiReading::category)
    }

    /// Start a refresh for the current city
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.phase = FetchPhase::Loading;
        debug!("Refresh #{} started for '{}'", self.generation, self.city);
        RefreshTicket {
            generation: self.generation,
            city: self.city.clone(),
        }
    }

    /// Switch city and start a refresh for it
    pub fn select_city(&mut self, city: impl Into<String>) -> RefreshTicket {
        self.city = city.into();
        self.begin_refresh()
    }

    /// Apply the outcome of a refresh.
    ///
    /// Returns `false` and leaves the state untouched when a newer refresh
    /// has been started since `ticket` was issued.
    pub fn complete(&mut self, ticket: RefreshTicket, result: Result<AqiReading>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale refresh #{} for '{}' (latest is #{})",
                ticket.generation, ticket.city, self.generation
            );
            return false;
        }

        self.phase = match result {
            Ok(reading) => FetchPhase::Success(reading),
            Err(e) => {
                warn!("Refresh for '{}' failed: {}", ticket.city, e);
                FetchPhase::Failed(e.user_message())
            }
        };
        true
    }

    /// Fetch and apply a fresh reading for the current city
    pub async fn refresh<S: FeedSource + ?Sized>(&mut self, source: &S) -> &FetchPhase {
        let ticket = self.begin_refresh();
        let result = fetch_reading(source, ticket.city()).await;
        self.complete(ticket, result);
        &self.phase
    }
}
