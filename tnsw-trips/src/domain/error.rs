//! Trip configuration errors.
//!
//! These represent a trip that cannot be queried at all. They are raised
//! when the trip is built, never during a query.

/// Validation failures for a trip specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTrip {
    /// A stop id was empty or whitespace
    #[error("{0} stop id must not be empty")]
    EmptyStopId(&'static str),

    /// Origin and destination are the same stop
    #[error("origin and destination are the same stop: {0}")]
    SameStop(String),

    /// Journey count of zero
    #[error("num_journeys must be at least 1")]
    ZeroJourneys,

    /// An explicitly empty mode filter
    #[error("modes_of_transport must not be empty when given")]
    EmptyModes,

    /// Unrecognised transport mode name
    #[error("unknown mode of transport: {0}")]
    UnknownMode(String),

    /// Unrecognised fare type name
    #[error("unknown fare type: {0}")]
    UnknownFareType(String),

    /// Both depart-at and arrive-by were given
    #[error("cannot specify both depart_at and arrive_by")]
    ConflictingTimeAnchor,
}
