//! HTTP client for the remote monitor API
//!
//! Thin wrapper over the monitor endpoints: create, update, delete, and a
//! tag-scoped search. Authentication is two opaque credential strings passed
//! through as headers; the client never inspects them. Non-2xx responses are
//! surfaced as typed errors carrying the status code and message, with
//! 401/403 singled out so callers can distinguish bad credentials from other
//! request failures.
//!
//! # Example
//!
//! ```no_run
//! use layerline::monitors::client::{HttpMonitorsClient, MonitorsApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpMonitorsClient::new(
//!     "datadoghq.com".to_string(),
//!     "api-key".to_string(),
//!     "app-key".to_string(),
//! );
//!
//! let owned = client
//!     .search("aws_cloudformation_stack-id:stack-123")
//!     .await?;
//! println!("{} monitors owned by this stack", owned.len());
//! # Ok(())
//! # }
//! ```

use super::types::{MonitorParams, QueriedMonitor};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default request timeout for monitor API calls
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_HEADER: &str = "DD-API-KEY";
const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// Errors from the remote monitor API
#[derive(Debug, Error)]
pub enum MonitorsError {
    /// Credentials were rejected by the remote side
    #[error("Invalid authentication: {message}")]
    InvalidAuthentication { message: String },

    /// Request was understood but failed with a non-success status
    #[error("Monitor API request failed. Status code: {status}. Message: {message}")]
    Request { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("Monitor API network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// The four operations the synchronizer needs from the remote side.
///
/// Implemented by [`HttpMonitorsClient`] for production and by
/// [`MockMonitorsClient`](super::mock::MockMonitorsClient) in tests.
#[async_trait]
pub trait MonitorsApi: Send + Sync {
    /// Creates a monitor; the remote side assigns its identity.
    async fn create(&self, params: &MonitorParams) -> Result<QueriedMonitor, MonitorsError>;

    /// Updates an existing monitor in place.
    async fn update(&self, id: u64, params: &MonitorParams) -> Result<QueriedMonitor, MonitorsError>;

    /// Deletes a monitor by its remote identity.
    async fn delete(&self, id: u64) -> Result<(), MonitorsError>;

    /// Returns all monitors carrying the given `key:value` tag.
    async fn search(&self, tag: &str) -> Result<Vec<QueriedMonitor>, MonitorsError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    monitors: Vec<QueriedMonitor>,
}

/// reqwest-backed monitor API client with connection pooling
pub struct HttpMonitorsClient {
    base_url: String,
    api_key: String,
    app_key: String,
    http_client: Client,
}

impl HttpMonitorsClient {
    /// Creates a client for `https://api.<site>` with the default timeout.
    pub fn new(site: String, api_key: String, app_key: String) -> Self {
        Self::with_timeout(site, api_key, app_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(site: String, api_key: String, app_key: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: format!("https://api.{site}"),
            api_key,
            app_key,
            http_client,
        }
    }

    fn monitor_url(&self, id: Option<u64>) -> String {
        match id {
            Some(id) => format!("{}/api/v1/monitor/{id}", self.base_url),
            None => format!("{}/api/v1/monitor", self.base_url),
        }
    }

    async fn check_status(response: Response) -> Result<Response, MonitorsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(MonitorsError::InvalidAuthentication { message });
        }
        Err(MonitorsError::Request {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl MonitorsApi for HttpMonitorsClient {
    async fn create(&self, params: &MonitorParams) -> Result<QueriedMonitor, MonitorsError> {
        debug!(name = %params.name, "Creating monitor");
        let response = self
            .http_client
            .post(self.monitor_url(None))
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_KEY_HEADER, &self.app_key)
            .json(params)
            .send()
            .await?;

        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn update(&self, id: u64, params: &MonitorParams) -> Result<QueriedMonitor, MonitorsError> {
        debug!(id, name = %params.name, "Updating monitor");
        let response = self
            .http_client
            .put(self.monitor_url(Some(id)))
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_KEY_HEADER, &self.app_key)
            .json(params)
            .send()
            .await?;

        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn delete(&self, id: u64) -> Result<(), MonitorsError> {
        debug!(id, "Deleting monitor");
        let response = self
            .http_client
            .delete(self.monitor_url(Some(id)))
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_KEY_HEADER, &self.app_key)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn search(&self, tag: &str) -> Result<Vec<QueriedMonitor>, MonitorsError> {
        debug!(tag, "Searching monitors");
        let response = self
            .http_client
            .get(format!("{}/api/v1/monitor/search", self.base_url))
            .query(&[("query", format!("tag:\"{tag}\""))])
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_KEY_HEADER, &self.app_key)
            .send()
            .await?;

        let parsed: SearchResponse = Self::check_status(response).await?.json().await?;
        Ok(parsed.monitors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_urls() {
        let client = HttpMonitorsClient::new(
            "datadoghq.eu".to_string(),
            "api".to_string(),
            "app".to_string(),
        );
        assert_eq!(client.monitor_url(None), "https://api.datadoghq.eu/api/v1/monitor");
        assert_eq!(
            client.monitor_url(Some(42)),
            "https://api.datadoghq.eu/api/v1/monitor/42"
        );
    }

    #[test]
    fn test_search_response_defaults_to_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.monitors.is_empty());

        let parsed: SearchResponse = serde_json::from_str(
            r#"{ "monitors": [ { "id": 1, "name": "m", "query": "q" } ], "metadata": {} }"#,
        )
        .unwrap();
        assert_eq!(parsed.monitors.len(), 1);
        assert_eq!(parsed.monitors[0].id, 1);
    }
}
