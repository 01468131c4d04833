//! Transport NSW trip queries.
//!
//! Answers "what are my next few journeys from here to there?" for a
//! configured trip, using one upstream request per trip no matter how many
//! journeys are wanted.

pub mod config;
pub mod domain;
pub mod select;
pub mod tnsw;
pub mod trip_client;

pub use trip_client::{Fetch, TripClient};
