//! Domain types for trip queries.
//!
//! This module contains the validated trip configuration and the journey
//! records produced for it. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod fare;
mod journey;
mod mode;
mod trip;

pub use error::InvalidTrip;
pub use fare::{FareTicket, FareType};
pub use journey::{JourneyRecord, LineSummary, StopSummary};
pub use mode::{ProductClass, TransportMode};
pub use trip::{StopId, TimeAnchor, TripSpec, TripSpecBuilder};
