//! Configuration loading and validation.
//!
//! The configuration is a JSON document whose location is given by the
//! `CONFIGPATH` environment variable. Keys use the PascalCase names of the
//! existing deployment files:
//!
//! ```json
//! {
//!   "UserName": "sfbuoy",
//!   "ConsumerKey": "...",
//!   "ConsumerSecret": "...",
//!   "Token": "...",
//!   "TokenSecret": "...",
//!   "DatabaseFile": "/var/lib/buoybot/observations.db",
//!   "BuoyId": "46026"
//! }
//! ```

use crate::constants::{
    DEFAULT_DATABASE_DIR, DEFAULT_DATABASE_FILE, DEFAULT_FEED_URL, STATION_PLACEHOLDER,
};
use crate::error::{BuoyError, Result};
use crate::feed::FeedLayout;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the configuration file path
pub const CONFIG_PATH_ENV: &str = "CONFIGPATH";

/// Publishing credentials, station and storage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Account name, only used for log output
    #[serde(default)]
    pub user_name: String,

    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,

    /// SQLite database file (defaults to the user data directory)
    #[serde(default)]
    pub database_file: Option<PathBuf>,

    /// NDBC station identifier
    pub buoy_id: String,

    /// Feed URL template containing `{station}`
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default)]
    pub feed_layout: FeedLayout,
}

/// OAuth 1.0a credentials for the status publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

impl Config {
    /// Load the configuration from the file named by `CONFIGPATH`
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var_os(CONFIG_PATH_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Result<Self> {
        let path = value
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                BuoyError::config_missing(format!(
                    "{} environment variable not specified",
                    CONFIG_PATH_ENV
                ))
            })?;

        Self::load(Path::new(&path))
    }

    /// Load and validate the configuration at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BuoyError::config_missing(format!("could not read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| BuoyError::config_invalid(path, e.to_string()))?;

        config.validate(path)?;
        debug!(
            "Loaded configuration from {} for station {}",
            path.display(),
            config.buoy_id
        );
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        validate_station(&self.buoy_id)
            .map_err(|reason| BuoyError::config_invalid(path, reason))?;

        if !self.feed_url.contains(STATION_PLACEHOLDER) {
            return Err(BuoyError::config_invalid(
                path,
                format!("FeedUrl must contain {}", STATION_PLACEHOLDER),
            ));
        }

        Ok(())
    }

    /// Replace the configured station
    pub fn with_station(mut self, station: impl Into<String>) -> Result<Self> {
        let station = station.into();
        validate_station(&station)
            .map_err(|reason| BuoyError::config_invalid("--station", reason))?;
        self.buoy_id = station;
        Ok(self)
    }

    /// Replace the configured database file
    pub fn with_database_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_file = Some(path.into());
        self
    }

    /// Database file to open, falling back to the user data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_file {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().ok_or_else(|| {
            BuoyError::config_missing("DatabaseFile not set and no user data directory found")
        })?;
        Ok(data_dir
            .join(DEFAULT_DATABASE_DIR)
            .join(DEFAULT_DATABASE_FILE))
    }

    /// Feed URL for the configured station
    pub fn station_feed_url(&self) -> String {
        self.feed_url.replace(STATION_PLACEHOLDER, &self.buoy_id)
    }

    pub fn credentials(&self) -> PublishCredentials {
        PublishCredentials {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            token: self.token.clone(),
            token_secret: self.token_secret.clone(),
        }
    }
}

fn validate_station(station: &str) -> std::result::Result<(), String> {
    if station.is_empty() {
        return Err("BuoyId must not be empty".to_string());
    }
    if !station.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("BuoyId '{}' must be alphanumeric", station));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG_JSON: &str = r#"{
        "UserName": "sfbuoy",
        "ConsumerKey": "ck",
        "ConsumerSecret": "cs",
        "Token": "tk",
        "TokenSecret": "ts",
        "DatabaseFile": "/tmp/observations.db",
        "BuoyId": "46026"
    }"#;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_unset_config_path_is_missing() {
        let result = Config::from_env_value(None);
        assert!(matches!(result, Err(BuoyError::ConfigMissing { .. })));

        let result = Config::from_env_value(Some(OsString::new()));
        assert!(matches!(result, Err(BuoyError::ConfigMissing { .. })));
    }

    #[test]
    fn test_config_path_value_is_loaded() {
        let file = write_config(CONFIG_JSON);
        let config = Config::from_env_value(Some(file.path().as_os_str().to_owned())).unwrap();
        assert_eq!(config.buoy_id, "46026");
    }

    #[test]
    fn test_load_config() {
        let file = write_config(CONFIG_JSON);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.user_name, "sfbuoy");
        assert_eq!(config.buoy_id, "46026");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/observations.db")
        );
        assert_eq!(config.feed_layout, FeedLayout::Line);
        assert_eq!(
            config.station_feed_url(),
            "https://www.ndbc.noaa.gov/data/realtime2/46026.txt"
        );
        assert_eq!(
            config.credentials(),
            PublishCredentials {
                consumer_key: "ck".to_string(),
                consumer_secret: "cs".to_string(),
                token: "tk".to_string(),
                token_secret: "ts".to_string(),
            }
        );
    }

    #[test]
    fn test_load_optional_keys() {
        let file = write_config(
            r#"{
                "ConsumerKey": "ck", "ConsumerSecret": "cs",
                "Token": "tk", "TokenSecret": "ts", "BuoyId": "46012",
                "FeedUrl": "http://localhost:8080/{station}.txt",
                "FeedLayout": "LegacyOffset"
            }"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.user_name, "");
        assert!(config.database_file.is_none());
        assert_eq!(config.station_feed_url(), "http://localhost:8080/46012.txt");
        assert_eq!(config.feed_layout, FeedLayout::LegacyOffset);
    }

    #[test]
    fn test_missing_file_is_config_missing() {
        let result = Config::load(Path::new("/nonexistent/buoybot/config.json"));
        assert!(matches!(result, Err(BuoyError::ConfigMissing { .. })));
    }

    #[test]
    fn test_malformed_json_is_config_invalid() {
        let file = write_config("{ \"BuoyId\": ");
        let result = Config::load(file.path());
        assert!(matches!(result, Err(BuoyError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let file = write_config(r#"{ "BuoyId": "46026" }"#);
        let result = Config::load(file.path());
        assert!(matches!(result, Err(BuoyError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_station_must_be_alphanumeric() {
        let json = CONFIG_JSON.replace("46026", "../etc");
        let file = write_config(&json);
        let result = Config::load(file.path());
        assert!(matches!(result, Err(BuoyError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_overrides() {
        let file = write_config(CONFIG_JSON);
        let config = Config::load(file.path())
            .unwrap()
            .with_station("46012")
            .unwrap()
            .with_database_file("/data/buoy.db");

        assert_eq!(config.buoy_id, "46012");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/data/buoy.db"));
        assert!(
            Config::load(file.path())
                .unwrap()
                .with_station("")
                .is_err()
        );
    }
}
