//! Trip query error types.

/// Maximum number of response body characters kept in an error.
pub(crate) const BODY_SNIPPET_CHARS: usize = 500;

/// Transport-level failure reaching the provider.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized (check TNSW_API_KEY)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by Transport NSW API")]
    RateLimited,

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// No response is available for this request (mock fetchers)
    #[error("no response for request: {0}")]
    NotFound(String),

    /// Client could not be constructed
    #[error("not configured: {0}")]
    NotConfigured(String),
}

/// Failure of a whole trip query.
///
/// Either the provider could not be reached, or it answered with something
/// that is not a trip response at all. Sparse or short responses are not
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] FetchError),

    #[error("malformed response: {message}")]
    MalformedResponse {
        message: String,
        body: Option<String>,
    },
}

impl TripError {
    pub(crate) fn malformed(message: impl Into<String>, body: &str) -> Self {
        TripError::MalformedResponse {
            message: message.into(),
            body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
        }
    }

    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, TripError::UpstreamUnavailable(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, TripError::MalformedResponse { .. })
    }
}
