//! Transport NSW HTTP client.
//!
//! Performs trip requests against the Open Data Trip Planner API and
//! returns the raw response body. Decoding is left to the parser.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::trip_client::Fetch;

use super::error::FetchError;
use super::request::TripRequest;

/// Default base URL for the Transport NSW Open Data API.
const DEFAULT_BASE_URL: &str = "https://api.transport.nsw.gov.au";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Transport NSW client.
#[derive(Debug, Clone)]
pub struct TnswConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TnswConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transport NSW Trip Planner client.
#[derive(Debug, Clone)]
pub struct TnswClient {
    http: reqwest::Client,
    base_url: String,
}

impl TnswClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TnswConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        // The API expects "Authorization: apikey <key>"
        let auth = HeaderValue::from_str(&format!("apikey {}", config.api_key))
            .map_err(|_| FetchError::NotConfigured("invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a request path.
    pub fn url(&self, request: &TripRequest) -> String {
        format!("{}{}", self.base_url, request.path)
    }

    async fn get(&self, request: &TripRequest) -> Result<String, FetchError> {
        let response = self
            .http
            .get(self.url(request))
            .query(&request.params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl Fetch for TnswClient {
    fn fetch(
        &self,
        request: &TripRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        self.get(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripSpec;
    use crate::tnsw::build_request;

    #[test]
    fn config_builder() {
        let config = TnswConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TnswConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        assert!(TnswClient::new(TnswConfig::new("test-key")).is_ok());
    }

    #[test]
    fn reject_unprintable_key() {
        let err = TnswClient::new(TnswConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, FetchError::NotConfigured(_)));
    }

    #[test]
    fn url_joins_base_and_path() {
        let client =
            TnswClient::new(TnswConfig::new("k").with_base_url("http://localhost:8080/")).unwrap();
        let request = build_request(&TripSpec::new("200070", "200060", 1).unwrap());
        assert_eq!(client.url(&request), "http://localhost:8080/v1/tp/trip");
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let client = TnswClient::new(
            TnswConfig::new("k")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(2),
        )
        .unwrap();
        let request = build_request(&TripSpec::new("200070", "200060", 1).unwrap());

        let err = client.fetch(&request).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
