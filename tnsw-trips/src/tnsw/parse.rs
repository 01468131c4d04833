//! Decoding of trip responses into candidates.
//!
//! The parser only decodes. It keeps every journey the provider sent, in
//! the provider's order, and leaves filtering to the selector. Only a
//! response without a `journeys` array is an error; anything wrong inside
//! a single journey just leaves fields absent on that candidate.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{FareTicket, FareType, LineSummary, ProductClass, StopSummary, TransportMode};

use super::error::TripError;
use super::types::{JourneyDto, LegDto, LegStopDto};

/// One journey option as reported by the provider, before any policy.
///
/// Every field may be absent. Absent means the provider did not say;
/// nothing is defaulted or inferred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidate {
    pub departure_planned: Option<DateTime<FixedOffset>>,
    pub departure_estimated: Option<DateTime<FixedOffset>>,
    pub arrival_planned: Option<DateTime<FixedOffset>>,
    pub arrival_estimated: Option<DateTime<FixedOffset>>,

    /// Mode of the first non-walking leg.
    pub mode: Option<TransportMode>,

    /// Product class of every leg, in order. `None` where the leg had none.
    pub leg_classes: Vec<Option<ProductClass>>,

    pub transfers: Option<u32>,

    pub origin: Option<StopSummary>,
    pub destination: Option<StopSummary>,
    pub line: Option<LineSummary>,
    pub occupancy: Option<String>,
    pub realtime_trip_id: Option<String>,

    /// `None` when the journey had no fare section at all.
    pub fares: Option<Vec<FareTicket>>,
}

impl RawCandidate {
    /// Product classes of the legs that are not known to be walks.
    pub fn riding_classes(&self) -> impl Iterator<Item = Option<ProductClass>> + '_ {
        self.leg_classes
            .iter()
            .copied()
            .filter(|c| !matches!(c, Some(class) if class.is_walking()))
    }
}

/// Decode a raw trip response body.
pub fn parse(body: &str) -> Result<Vec<RawCandidate>, TripError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| TripError::malformed(format!("invalid JSON: {e}"), body))?;

    let Some(root) = root.as_object() else {
        return Err(TripError::malformed("response is not a JSON object", body));
    };

    let journeys = match root.get("journeys") {
        Some(Value::Array(journeys)) => journeys,
        Some(Value::Null) | None => {
            return Err(TripError::malformed("missing journeys section", body));
        }
        Some(_) => return Err(TripError::malformed("journeys is not an array", body)),
    };

    let candidates = journeys
        .iter()
        .enumerate()
        .map(|(index, value)| match JourneyDto::deserialize(value) {
            Ok(dto) => convert_journey(&dto),
            Err(e) => {
                warn!(index, error = %e, "undecodable journey; keeping it as an empty candidate");
                RawCandidate::default()
            }
        })
        .collect();

    Ok(candidates)
}

/// Convert one decoded journey into a candidate.
pub fn convert_journey(journey: &JourneyDto) -> RawCandidate {
    let legs = &journey.legs;

    let leg_classes: Vec<Option<ProductClass>> = legs.iter().map(leg_class).collect();

    // Walk-only journeys fall back to their outermost legs.
    let first_ride = legs.iter().find(|l| !is_walk(l)).or(legs.first());
    let last_ride = legs.iter().rev().find(|l| !is_walk(l)).or(legs.last());

    let board = first_ride.and_then(|l| l.origin.as_ref());
    let alight = last_ride.and_then(|l| l.destination.as_ref());
    let transportation = first_ride.and_then(|l| l.transportation.as_ref());

    RawCandidate {
        departure_planned: board.and_then(|s| timestamp(s.departure_time_planned.as_deref())),
        departure_estimated: board.and_then(|s| timestamp(s.departure_time_estimated.as_deref())),
        arrival_planned: alight.and_then(|s| timestamp(s.arrival_time_planned.as_deref())),
        arrival_estimated: alight.and_then(|s| timestamp(s.arrival_time_estimated.as_deref())),
        mode: first_ride.and_then(leg_class).and_then(ProductClass::mode),
        transfers: count_transfers(&leg_classes),
        leg_classes,
        origin: board.and_then(stop_summary),
        destination: alight.and_then(stop_summary),
        line: transportation.and_then(|t| {
            let line = LineSummary {
                number: t.number.clone(),
                short_name: t.disassembled_name.clone(),
                description: t.description.clone(),
            };
            let empty =
                line.number.is_none() && line.short_name.is_none() && line.description.is_none();
            (!empty).then_some(line)
        }),
        // Reported on the stop where the first ride ends.
        occupancy: first_ride.and_then(|l| occupancy(l.destination.as_ref())),
        realtime_trip_id: transportation
            .and_then(|t| t.properties.as_ref())
            .and_then(|p| p.realtime_trip_id.clone()),
        fares: journey.fare.as_ref().map(|fare| {
            fare.tickets
                .iter()
                .filter_map(|t| {
                    let fare_type = t.person.as_deref()?.parse::<FareType>().ok()?;
                    Some(FareTicket {
                        fare_type,
                        price: t.price_brutto,
                    })
                })
                .collect()
        }),
    }
}

fn leg_class(leg: &LegDto) -> Option<ProductClass> {
    leg.transportation
        .as_ref()?
        .product
        .as_ref()?
        .class
        .map(ProductClass)
}

fn is_walk(leg: &LegDto) -> bool {
    leg_class(leg).is_some_and(ProductClass::is_walking)
}

/// Vehicles boarded minus one. Unknown when any leg's class is unknown.
fn count_transfers(classes: &[Option<ProductClass>]) -> Option<u32> {
    let mut rides: u32 = 0;
    for class in classes {
        if !(*class)?.is_walking() {
            rides += 1;
        }
    }
    match rides {
        0 if classes.is_empty() => None,
        0 => Some(0),
        n => Some(n - 1),
    }
}

fn timestamp(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => Some(t),
        Err(e) => {
            debug!(raw, error = %e, "ignoring unparseable timestamp");
            None
        }
    }
}

fn stop_summary(stop: &LegStopDto) -> Option<StopSummary> {
    Some(StopSummary {
        id: stop.id.clone()?,
        name: stop.name.clone().or_else(|| stop.disassembled_name.clone()),
    })
}

fn occupancy(stop: Option<&LegStopDto>) -> Option<String> {
    stop?.properties.as_ref()?.occupancy.clone()
}
