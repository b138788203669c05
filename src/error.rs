//! Error types and handling for `AQPulse`

use thiserror::Error;

/// Fallback message when the provider rejects a request without saying why
pub const GENERIC_PROVIDER_MESSAGE: &str = "Unable to fetch AQI";

/// Main error type for the `AQPulse` library
#[derive(Error, Debug)]
pub enum AqPulseError {
    /// Transport failures and non-2xx HTTP responses
    #[error("Network error: {message}")]
    Network { message: String },

    /// The provider answered with a status other than `"ok"`
    #[error("{message}")]
    Provider { message: String },

    /// The response envelope could not be understood
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AqPulseError {
    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AqPulseError::Network { message } => {
                format!("Failed to fetch AQI: {message}. Please check your internet connection.")
            }
            AqPulseError::Provider { message } => message.clone(),
            AqPulseError::MalformedResponse { .. } => {
                "The air quality service returned data we could not read.".to_string()
            }
            AqPulseError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            AqPulseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AqPulseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for AqPulseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::malformed(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AqPulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}
