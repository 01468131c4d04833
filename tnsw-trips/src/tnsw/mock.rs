//! Mock fetcher for testing without API access.
//!
//! Serves canned trip responses, either registered in code or loaded from
//! JSON files, and records every request it receives.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::trip_client::Fetch;

use super::error::FetchError;
use super::request::TripRequest;

/// A canned outcome for a request.
#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Status { status: u16, message: String },
    Unauthorized,
    RateLimited,
    NotFound(String),
    NotConfigured(String),
}

impl Canned {
    fn from_error(err: FetchError) -> Self {
        match err {
            FetchError::Status { status, message } => Canned::Status { status, message },
            FetchError::Unauthorized => Canned::Unauthorized,
            FetchError::RateLimited => Canned::RateLimited,
            FetchError::NotFound(message) => Canned::NotFound(message),
            FetchError::NotConfigured(message) => Canned::NotConfigured(message),
            FetchError::Http(e) => Canned::Status {
                status: e.status().map_or(0, |s| s.as_u16()),
                message: e.to_string(),
            },
        }
    }

    fn replay(&self) -> Result<String, FetchError> {
        match self {
            Canned::Body(body) => Ok(body.clone()),
            Canned::Status { status, message } => Err(FetchError::Status {
                status: *status,
                message: message.clone(),
            }),
            Canned::Unauthorized => Err(FetchError::Unauthorized),
            Canned::RateLimited => Err(FetchError::RateLimited),
            Canned::NotFound(message) => Err(FetchError::NotFound(message.clone())),
            Canned::NotConfigured(message) => Err(FetchError::NotConfigured(message.clone())),
        }
    }
}

/// Fetcher that answers from canned responses.
///
/// Responses are chosen by the request's origin stop id, falling back to a
/// default response. Requests with neither fail with `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    routes: HashMap<String, Canned>,
    default: Option<Canned>,
    requests: Arc<Mutex<Vec<TripRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{origin}.json` files from a directory, one route per file.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FetchError::NotConfigured(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| FetchError::NotConfigured(format!("failed to read directory entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(origin) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let body = std::fs::read_to_string(&path)
                .map_err(|e| FetchError::NotConfigured(format!("failed to read {path:?}: {e}")))?;
            mock.routes.insert(origin.to_string(), Canned::Body(body));
        }

        if mock.routes.is_empty() {
            return Err(FetchError::NotConfigured(format!(
                "no mock trip files found in {data_dir:?}"
            )));
        }

        Ok(mock)
    }

    /// Answer every request without its own route with this body.
    pub fn with_response(mut self, body: impl Into<String>) -> Self {
        self.default = Some(Canned::Body(body.into()));
        self
    }

    /// Fail every request without its own route with this error.
    ///
    /// A `reqwest::Error` cannot be rebuilt, so `Http` replays as `Status`
    /// with the original status code (0 if none) and message.
    pub fn with_error(mut self, err: FetchError) -> Self {
        self.default = Some(Canned::from_error(err));
        self
    }

    /// Answer requests from `origin` with this body.
    pub fn with_route(mut self, origin: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes.insert(origin.into(), Canned::Body(body.into()));
        self
    }

    /// Origins with a route of their own.
    pub fn origins(&self) -> Vec<&str> {
        let mut origins: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        origins.sort_unstable();
        origins
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<TripRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn respond(&self, request: &TripRequest) -> Result<String, FetchError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }

        let origin = request.param("name_origin").unwrap_or_default();
        self.routes
            .get(origin)
            .or(self.default.as_ref())
            .ok_or_else(|| FetchError::NotFound(format!("no mock trip data for origin {origin}")))?
            .replay()
    }
}

impl Fetch for MockFetcher {
    fn fetch(
        &self,
        request: &TripRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let result = self.respond(request);
        async move { result }
    }
}
