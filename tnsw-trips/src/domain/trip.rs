//! Trip specification.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroUsize;

use chrono::NaiveDateTime;

use super::error::InvalidTrip;
use super::fare::FareType;
use super::mode::TransportMode;

/// An opaque provider stop identifier (e.g. `200060`).
///
/// Guaranteed non-empty after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id. `role` names the stop in the error ("origin").
    pub fn parse(s: &str, role: &'static str) -> Result<Self, InvalidTrip> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTrip::EmptyStopId(role));
        }
        Ok(StopId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The instant a trip query is relative to.
///
/// Times are provider-local wall clock; no timezone conversion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeAnchor {
    /// Let the provider use its current time.
    #[default]
    Now,
    /// Journeys departing at or after this time.
    DepartAt(NaiveDateTime),
    /// Journeys arriving at or before this time.
    ArriveBy(NaiveDateTime),
}

/// A configured trip: what to ask the provider for and how to filter it.
///
/// Immutable once built. Construct with [`TripSpec::new`] or
/// [`TripSpec::builder`]; both enforce that origin and destination differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSpec {
    origin: StopId,
    destination: StopId,
    num_journeys: NonZeroUsize,
    fare_type: Option<FareType>,
    modes: Option<BTreeSet<TransportMode>>,
    time_anchor: TimeAnchor,
}

impl TripSpec {
    /// A trip with no filters, anchored at the provider's current time.
    pub fn new(origin: &str, destination: &str, num_journeys: usize) -> Result<Self, InvalidTrip> {
        Self::builder(origin, destination)
            .num_journeys(num_journeys)
            .build()
    }

    pub fn builder(origin: &str, destination: &str) -> TripSpecBuilder {
        TripSpecBuilder {
            origin: origin.to_string(),
            destination: destination.to_string(),
            num_journeys: 1,
            fare_type: None,
            modes: None,
            time_anchor: TimeAnchor::Now,
        }
    }

    pub fn origin(&self) -> &StopId {
        &self.origin
    }

    pub fn destination(&self) -> &StopId {
        &self.destination
    }

    pub fn num_journeys(&self) -> usize {
        self.num_journeys.get()
    }

    pub fn fare_type(&self) -> Option<FareType> {
        self.fare_type
    }

    /// The mode filter, if any. Never an empty set.
    pub fn modes(&self) -> Option<&BTreeSet<TransportMode>> {
        self.modes.as_ref()
    }

    pub fn time_anchor(&self) -> TimeAnchor {
        self.time_anchor
    }

    /// Whether any filter may discard provider candidates.
    pub fn is_filtered(&self) -> bool {
        self.fare_type.is_some() || self.modes.is_some()
    }
}

/// Builder for [`TripSpec`].
#[derive(Debug, Clone)]
pub struct TripSpecBuilder {
    origin: String,
    destination: String,
    num_journeys: usize,
    fare_type: Option<FareType>,
    modes: Option<BTreeSet<TransportMode>>,
    time_anchor: TimeAnchor,
}

impl TripSpecBuilder {
    pub fn num_journeys(mut self, n: usize) -> Self {
        self.num_journeys = n;
        self
    }

    pub fn fare_type(mut self, fare_type: FareType) -> Self {
        self.fare_type = Some(fare_type);
        self
    }

    pub fn modes(mut self, modes: impl IntoIterator<Item = TransportMode>) -> Self {
        self.modes = Some(modes.into_iter().collect());
        self
    }

    pub fn time_anchor(mut self, anchor: TimeAnchor) -> Self {
        self.time_anchor = anchor;
        self
    }

    pub fn build(self) -> Result<TripSpec, InvalidTrip> {
        let origin = StopId::parse(&self.origin, "origin")?;
        let destination = StopId::parse(&self.destination, "destination")?;
        if origin == destination {
            return Err(InvalidTrip::SameStop(origin.0));
        }

        let num_journeys = NonZeroUsize::new(self.num_journeys).ok_or(InvalidTrip::ZeroJourneys)?;

        if self.modes.as_ref().is_some_and(BTreeSet::is_empty) {
            return Err(InvalidTrip::EmptyModes);
        }

        Ok(TripSpec {
            origin,
            destination,
            num_journeys,
            fare_type: self.fare_type,
            modes: self.modes,
            time_anchor: self.time_anchor,
        })
    }
}
