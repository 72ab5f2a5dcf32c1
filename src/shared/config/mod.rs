//! Application configuration module
//!
//! Provides configuration types for the application.

use std::path::PathBuf;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Production API origin
pub const DEFAULT_SERVER_URL: &str = "https://recipe-app-api-yfor.onrender.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of recipes requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the client will ask for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Server URL, without trailing slash
    pub server_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Recipes requested per page
    pub page_size: u32,
    /// Location of the session database; `None` means the platform default
    pub session_db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            session_db_path: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.server_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        Ok(())
    }
}

/// On-disk configuration; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub session_db_path: Option<PathBuf>,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    timeout_secs: Option<u64>,
    page_size: Option<u32>,
    session_db_path: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the page size used for recipe listings
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the session database location
    pub fn session_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_db_path = Some(path.into());
        self
    }

    /// Fill any unset value from a parsed config file
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        self.server_url = self.server_url.or(file.server_url);
        self.timeout_secs = self.timeout_secs.or(file.timeout_secs);
        self.page_size = self.page_size.or(file.page_size);
        self.session_db_path = self.session_db_path.or(file.session_db_path);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let server_url = self
            .server_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.server_url);
        let config = AppConfig {
            server_url,
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            session_db_path: self.session_db_path,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}
