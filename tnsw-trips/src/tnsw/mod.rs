//! Transport NSW Trip Planner API.
//!
//! This module builds trip requests, performs them over HTTP and decodes
//! the rapidJSON response into journey candidates.
//!
//! Key characteristics of the API:
//! - One trip request returns several alternative journeys, already ranked
//!   by departure; `calcNumberOfTrips` bounds how many
//! - Times are ISO 8601 UTC timestamps; real-time estimates are only
//!   present for real-time controlled services
//! - Fields are omitted rather than sent as null

mod client;
mod error;
mod mock;
mod parse;
mod request;
mod types;

pub use client::{TnswClient, TnswConfig};
pub use error::{FetchError, TripError};
pub use mock::MockFetcher;
pub use parse::{RawCandidate, convert_journey, parse};
pub use request::{
    MAX_TRIPS_HINT, OVERSUPPLY_FACTOR, TRIP_PATH, TripRequest, build as build_request, trips_hint,
};
pub use types::{FareDto, JourneyDto, LegDto, LegStopDto, ProductDto, TicketDto, TransportationDto};
