// ABOUTME: API endpoint configuration with environment overrides and compiled defaults
// ABOUTME: Owns the shared pooled HTTP client used by the REST transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::errors::{ApiError, ApiResult};

/// Default Strava v3 API base URL.
pub const DEFAULT_API_BASE: &str = "https://www.strava.com/api/v3";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "STRAVA_API_BASE";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Global shared HTTP client with connection pooling
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get the shared HTTP client used for API calls.
///
/// The client uses connection pooling and default timeouts. All transports
/// created from any token share the same pool.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Endpoint configuration for the Strava API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the URL cannot be parsed.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url}: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `STRAVA_API_BASE` is set but not a valid URL.
    pub fn from_env() -> ApiResult<Self> {
        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.is_empty() => Self::new(base),
            _ => Ok(Self::default()),
        }
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ApiConfig::new("https://example.com/api/v3/").unwrap();
        assert_eq!(config.base_url(), "https://example.com/api/v3");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(ApiConfig::new("not a url").is_err());
    }
}
