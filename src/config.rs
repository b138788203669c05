//! Configuration management for `AQPulse`
//!
//! Handles loading configuration from a TOML file and environment
//! variables, and validates every setting before use.

use crate::models::City;
use crate::{AqPulseError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Placeholder token accepted by WAQI for light testing only
pub const DEMO_TOKEN: &str = "demo";

/// Accepted watch intervals, in seconds
pub const WATCH_INTERVAL_RANGE: RangeInclusive<u64> = 10..=86_400;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AqPulseConfig {
    /// Air quality provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default dashboard settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// WAQI API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the WAQI API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// API token
    #[serde(default = "default_provider_token")]
    pub token: String,
    /// Request timeout in seconds; the transport default applies when unset
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// City shown when none is given
    #[serde(default = "default_city")]
    pub city: String,
    /// Seconds between refreshes in watch mode
    #[serde(default = "default_watch_interval")]
    pub watch_interval_seconds: u64,
}

fn default_provider_base_url() -> String {
    "https://api.waqi.info".to_string()
}

fn default_provider_token() -> String {
    DEMO_TOKEN.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    City::default().to_string()
}

fn default_watch_interval() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            token: default_provider_token(),
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            watch_interval_seconds: default_watch_interval(),
        }
    }
}

impl AqPulseConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path.
    ///
    /// Environment variables prefixed with `AQPULSE_` override the file,
    /// with `__` between nested keys, e.g. `AQPULSE_PROVIDER__TOKEN`.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("aqpulse.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("AQPULSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AqPulseError::config(format!("Failed to build configuration: {e}")))?;

        let mut config: AqPulseConfig = settings.try_deserialize().map_err(|e| {
            AqPulseError::config(format!("Failed to deserialize configuration: {e}"))
        })?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aqpulse").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.provider.base_url.is_empty() {
            self.provider.base_url = default_provider_base_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.city.is_empty() {
            self.defaults.city = default_city();
        }
        if self.defaults.watch_interval_seconds == 0 {
            self.defaults.watch_interval_seconds = default_watch_interval();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_provider()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Whether the placeholder token is still in use
    #[must_use]
    pub fn uses_demo_token(&self) -> bool {
        self.provider.token == DEMO_TOKEN
    }

    /// The configured default city
    pub fn default_city(&self) -> Result<City> {
        self.defaults.city.parse()
    }

    fn validate_provider(&self) -> Result<()> {
        if self.provider.token.trim().is_empty() {
            return Err(AqPulseError::config(
                "Provider token cannot be empty. Set provider.token or AQPULSE_PROVIDER__TOKEN.",
            ));
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(AqPulseError::config(
                "Provider base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self
            .provider
            .timeout_seconds
            .is_some_and(|timeout| !(1..=300).contains(&timeout))
        {
            return Err(AqPulseError::config(
                "Provider timeout must be between 1 and 300 seconds",
            ));
        }

        if !WATCH_INTERVAL_RANGE.contains(&self.defaults.watch_interval_seconds) {
            return Err(AqPulseError::config(
                "Watch interval must be between 10 and 86400 seconds",
            ));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AqPulseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AqPulseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        self.default_city()
            .map_err(|e| AqPulseError::config(format!("Invalid default city: {e}")))?;

        Ok(())
    }
}

/// Check a watch interval against [`WATCH_INTERVAL_RANGE`].
pub fn check_watch_interval(seconds: u64) -> Result<u64> {
    if WATCH_INTERVAL_RANGE.contains(&seconds) {
        Ok(seconds)
    } else {
        Err(AqPulseError::validation(format!(
            "Watch interval must be between {} and {} seconds",
            WATCH_INTERVAL_RANGE.start(),
            WATCH_INTERVAL_RANGE.end()
        )))
    }
}
