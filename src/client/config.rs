use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

/// Environment variable overriding the API origin
pub const ENV_API_URL: &str = "RECIPEBOX_API_URL";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "RECIPEBOX_TIMEOUT_SECS";
/// Environment variable overriding the page size
pub const ENV_PAGE_SIZE: &str = "RECIPEBOX_PAGE_SIZE";
/// Environment variable overriding the session database location
pub const ENV_SESSION_DB: &str = "RECIPEBOX_SESSION_DB";

/// Client configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Configuration for a specific server, everything else default
    pub fn for_server(url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_builder(AppConfig::builder().server_url(url))
    }

    /// Apply environment overrides on top of `builder`
    pub fn env_builder(mut builder: AppConfigBuilder) -> Result<AppConfigBuilder, ConfigError> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            builder = builder.server_url(url);
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: format!("'{}' is not a number", raw),
            })?;
            builder = builder.timeout_secs(secs);
        }
        if let Ok(raw) = std::env::var(ENV_PAGE_SIZE) {
            let size = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("'{}' is not a number", raw),
            })?;
            builder = builder.page_size(size);
        }
        if let Ok(path) = std::env::var(ENV_SESSION_DB) {
            builder = builder.session_db_path(path);
        }
        Ok(builder)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_builder(Self::env_builder(AppConfig::builder())?)
    }

    /// Environment variables first, then the TOML file, then defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let file = FileConfig::from_toml_str(&raw)?;
        Self::with_builder(Self::env_builder(AppConfig::builder())?.merge_file(file))
    }

    /// Platform location of the optional config file
    pub fn default_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("recipebox").join("config.toml"))
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.app.timeout_secs)
    }

    pub fn page_size(&self) -> u32 {
        self.app.page_size
    }

    /// Session database location, falling back to the platform data directory
    pub fn session_db_path(&self) -> PathBuf {
        self.app.session_db_path.clone().unwrap_or_else(|| {
            let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
            path.push("recipebox");
            path.push("session.db");
            path
        })
    }
}
