//! Client configuration loaded from the environment.

use std::time::Duration;

/// Default base URL of the regularization API, matching the backend's
/// development bind address.
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

/// Default per-request timeout for gateway and session-guard calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`crate::net::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are joined onto. Trailing slashes are
    /// trimmed on use.
    pub api_url: String,
    /// Previously stored session token, if any. Login captures a fresh one.
    pub session_token: Option<String>,
    /// Timeout applied to each request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            session_token: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load from `REG_API_URL`, `REG_SESSION_TOKEN` and
    /// `REG_REQUEST_TIMEOUT_SECS`, falling back to defaults for anything
    /// missing or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var("REG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let session_token = std::env::var("REG_SESSION_TOKEN").ok();
        let request_timeout = std::env::var("REG_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(
                Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                Duration::from_secs,
            );
        Self {
            api_url,
            session_token,
            request_timeout,
        }
    }

    /// Connect timeout for the underlying HTTP client.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
