//! Configuration management for layerline
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Credentials for the monitor API are opaque: layerline passes them through
//! as headers and never inspects or validates their format.
//!
//! # Environment Variables
//!
//! - `LAYERLINE_SITE`: Monitor API site (e.g. "datadoghq.com", "datadoghq.eu") - default: "datadoghq.com"
//! - `LAYERLINE_API_KEY`: Monitor API key - required for monitor sync
//! - `LAYERLINE_APP_KEY`: Monitor application key - required for monitor sync
//! - `LAYERLINE_STACK_ID`: Cloud-stack identity used to scope monitor ownership - optional
//! - `LAYERLINE_REQUEST_TIMEOUT`: Monitor API timeout in seconds - default: "30"
//! - `LAYERLINE_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use layerline::LayerlineConfig;
//!
//! let config = LayerlineConfig::default();
//! let client = config.monitors_client().expect("monitor credentials missing");
//! ```

use crate::monitors::client::HttpMonitorsClient;
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SITE: &str = "datadoghq.com";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Monitor API key not provided
    #[error("Monitor API key not specified. Set the LAYERLINE_API_KEY environment variable")]
    MissingApiKey,

    /// Monitor application key not provided
    #[error("Monitor application key not specified. Set the LAYERLINE_APP_KEY environment variable")]
    MissingAppKey,

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for layerline
#[derive(Debug, Clone)]
pub struct LayerlineConfig {
    /// Monitor API site, forms the base URL `https://api.<site>`
    pub site: String,

    /// Monitor API key, passed through unmodified
    pub api_key: Option<String>,

    /// Monitor application key, passed through unmodified
    pub app_key: Option<String>,

    /// Cloud-stack identity for monitor ownership, empty when unknown
    pub stack_id: String,

    /// Monitor API request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for LayerlineConfig {
    /// Loads configuration from `LAYERLINE_*` environment variables with
    /// defaults for anything unset.
    fn default() -> Self {
        let site = env::var("LAYERLINE_SITE").unwrap_or_else(|_| DEFAULT_SITE.to_string());
        let api_key = env::var("LAYERLINE_API_KEY").ok().filter(|key| !key.is_empty());
        let app_key = env::var("LAYERLINE_APP_KEY").ok().filter(|key| !key.is_empty());
        let stack_id = env::var("LAYERLINE_STACK_ID").unwrap_or_default();

        let request_timeout_secs = env::var("LAYERLINE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_level = env::var("LAYERLINE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            site,
            api_key,
            app_key,
            stack_id,
            request_timeout_secs,
            log_level,
        }
    }
}

impl LayerlineConfig {
    /// Validates the configuration.
    ///
    /// Credential presence is checked separately by [`Self::monitors_client`]
    /// since layer instrumentation runs without any credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.is_empty() {
            return Err(ConfigError::ValidationFailed("site must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "request timeout must be at least 1 second".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            level => Err(ConfigError::ValidationFailed(format!(
                "invalid log level '{level}'"
            ))),
        }
    }

    /// Builds a monitor API client from the configured credentials.
    pub fn monitors_client(&self) -> Result<HttpMonitorsClient, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let app_key = self.app_key.clone().ok_or(ConfigError::MissingAppKey)?;

        Ok(HttpMonitorsClient::with_timeout(
            self.site.clone(),
            api_key,
            app_key,
            Duration::from_secs(self.request_timeout_secs),
        ))
    }
}
