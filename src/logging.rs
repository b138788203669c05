//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::{AqPulseError, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `verbose` forces `debug`.
/// Output goes to stderr so that stdout only carries the report.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| AqPulseError::config(format!("Failed to initialise logging: {e}")))
}

fn default_directive(level: &str) -> String {
    format!("aqpulse={level},warn")
}
