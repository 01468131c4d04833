//! Trip query orchestration.
//!
//! One query is one upstream request: build the request, fetch it, parse
//! the body, select journeys. The first failure ends the query; nothing is
//! retried here and no partial result is returned.

use std::future::Future;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{JourneyRecord, TripSpec};
use crate::select::select;
use crate::tnsw::{FetchError, TripError, TripRequest, build_request, parse};

/// Something that can perform a trip request and return the raw body.
///
/// This abstraction allows the client to be tested with canned responses.
pub trait Fetch {
    fn fetch(
        &self,
        request: &TripRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Queries journeys for configured trips.
#[derive(Debug, Clone)]
pub struct TripClient<F> {
    fetcher: F,
}

impl<F: Fetch> TripClient<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch up to `spec.num_journeys()` upcoming journeys for a trip.
    ///
    /// Issues exactly one request. Returns fewer journeys (possibly none)
    /// when the provider has fewer qualifying options.
    pub async fn query(&self, spec: &TripSpec) -> Result<Vec<JourneyRecord>, TripError> {
        let request = build_request(spec);
        debug!(
            origin = %spec.origin(),
            destination = %spec.destination(),
            trips_hint = ?request.param("calcNumberOfTrips"),
            "requesting trip"
        );

        let body = self.fetcher.fetch(&request).await.map_err(|e| {
            warn!(origin = %spec.origin(), destination = %spec.destination(), error = %e, "trip request failed");
            TripError::from(e)
        })?;

        let candidates = parse(&body).inspect_err(|e| {
            warn!(origin = %spec.origin(), destination = %spec.destination(), error = %e, "unusable trip response");
        })?;

        let journeys = select(&candidates, spec);
        debug!(
            origin = %spec.origin(),
            destination = %spec.destination(),
            candidates = candidates.len(),
            selected = journeys.len(),
            "trip query done"
        );

        Ok(journeys)
    }

    /// Query several trips concurrently, one request each.
    ///
    /// Results are in the same order as `specs`; a failed trip does not
    /// affect the others.
    pub async fn query_all(
        &self,
        specs: &[TripSpec],
    ) -> Vec<Result<Vec<JourneyRecord>, TripError>> {
        join_all(specs.iter().map(|spec| self.query(spec))).await
    }
}
