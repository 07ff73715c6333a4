//! Error handling for buoy observation runs.
//!
//! Every failure except a rejected status update is fatal: it is returned
//! up to the entry point, which logs it and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuoyError {
    #[error("Configuration not found: {message}")]
    ConfigMissing { message: String },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Could not establish connection with the database: {message}")]
    Connection {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error fetching feed from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Malformed feed: {reason}")]
    MalformedFeed { reason: String },

    #[error("Could not parse {field} from '{value}'")]
    Parse { field: &'static str, value: String },

    #[error("Invalid angle: {degrees} degrees is outside 0..=360")]
    InvalidAngle { degrees: i64 },

    #[error("Error saving observation: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Status update failed: {reason}")]
    Publish { reason: String },
}

impl BuoyError {
    /// Create a missing configuration error
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection error with context
    pub fn connection(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a feed fetch error
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a malformed feed error
    pub fn malformed_feed(reason: impl Into<String>) -> Self {
        Self::MalformedFeed {
            reason: reason.into(),
        }
    }

    /// Create a field parse error
    pub fn parse(field: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            field,
            value: value.into(),
        }
    }

    /// Create a publish error
    pub fn publish(reason: impl ToString) -> Self {
        Self::Publish {
            reason: reason.to_string(),
        }
    }

    /// Whether this error should terminate the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Publish { .. })
    }
}

pub type Result<T> = std::result::Result<T, BuoyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_publish_errors_are_non_fatal() {
        assert!(!BuoyError::publish("rejected").is_fatal());
        assert!(BuoyError::malformed_feed("short").is_fatal());
        assert!(BuoyError::parse("average_period", "MM").is_fatal());
        assert!(BuoyError::InvalidAngle { degrees: 361 }.is_fatal());
        assert!(BuoyError::config_missing("CONFIGPATH").is_fatal());
    }

    #[test]
    fn test_parse_error_names_field() {
        let err = BuoyError::parse("water_temperature", "MM");
        assert_eq!(
            err.to_string(),
            "Could not parse water_temperature from 'MM'"
        );
    }
}
