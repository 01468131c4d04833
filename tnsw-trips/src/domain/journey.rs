//! Selected journey records.
//!
//! A [`JourneyRecord`] is the normalized, owned view of one upcoming
//! journey. Every record has a departure time; everything else is
//! optional because the provider omits fields freely.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use super::fare::{FareTicket, FareType};
use super::mode::TransportMode;

/// A stop as reported on a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopSummary {
    pub id: String,
    pub name: Option<String>,
}

/// The line the journey boards first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    /// Full line name (e.g. `T1 North Shore & Western Line`).
    pub number: Option<String>,
    /// Short line name (e.g. `T1`).
    pub short_name: Option<String>,
    pub description: Option<String>,
}

/// One upcoming journey for a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyRecord {
    /// Real-time departure if known, else scheduled.
    pub departure: DateTime<FixedOffset>,
    pub departure_planned: Option<DateTime<FixedOffset>>,
    pub departure_estimated: Option<DateTime<FixedOffset>>,

    /// Real-time arrival if known, else scheduled.
    pub arrival: Option<DateTime<FixedOffset>>,
    pub arrival_planned: Option<DateTime<FixedOffset>>,

    /// Mode of the first non-walking leg.
    pub mode: Option<TransportMode>,

    /// Changes between vehicles; walking legs don't count.
    pub transfers: Option<u32>,

    pub origin: Option<StopSummary>,
    pub destination: Option<StopSummary>,
    pub line: Option<LineSummary>,
    pub occupancy: Option<String>,
    pub realtime_trip_id: Option<String>,

    /// Real-time minus scheduled departure. `None` unless both are known.
    #[serde(serialize_with = "serialize_delay_secs")]
    pub delay: Option<Duration>,

    /// Ticket for the trip's fare type (adult when none was configured).
    pub fare: Option<FareTicket>,
    pub fares: Vec<FareTicket>,
}

impl JourneyRecord {
    /// Whether the departure time came from real-time data.
    pub fn is_realtime(&self) -> bool {
        self.departure_estimated.is_some()
    }

    /// Whether the journey departs later than scheduled.
    pub fn is_delayed(&self) -> bool {
        self.delay.is_some_and(|d| d > Duration::zero())
    }

    /// Whole minutes until departure, floored and never negative.
    pub fn minutes_until_departure(&self, now: DateTime<FixedOffset>) -> i64 {
        (self.departure - now).num_minutes().max(0)
    }

    pub fn fare_for(&self, fare_type: FareType) -> Option<&FareTicket> {
        self.fares.iter().find(|t| t.fare_type == fare_type)
    }
}

fn serialize_delay_secs<S>(delay: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match delay {
        Some(d) => serializer.serialize_some(&d.num_seconds()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn record(delay: Option<Duration>) -> JourneyRecord {
        JourneyRecord {
            departure: at("2024-03-15T08:10:00+11:00"),
            departure_planned: Some(at("2024-03-15T08:08:00+11:00")),
            departure_estimated: delay.map(|_| at("2024-03-15T08:10:00+11:00")),
            arrival: None,
            arrival_planned: None,
            mode: Some(TransportMode::Train),
            transfers: Some(0),
            origin: None,
            destination: None,
            line: None,
            occupancy: None,
            realtime_trip_id: None,
            delay,
            fare: None,
            fares: vec![
                FareTicket {
                    fare_type: FareType::Adult,
                    price: Some(4.2),
                },
                FareTicket {
                    fare_type: FareType::Child,
                    price: Some(2.1),
                },
            ],
        }
    }

    #[test]
    fn realtime_and_delay_flags() {
        let scheduled_only = record(None);
        assert!(!scheduled_only.is_realtime());
        assert!(!scheduled_only.is_delayed());

        let on_time = record(Some(Duration::zero()));
        assert!(on_time.is_realtime());
        assert!(!on_time.is_delayed());

        let late = record(Some(Duration::minutes(2)));
        assert!(late.is_delayed());

        let early = record(Some(Duration::minutes(-1)));
        assert!(early.is_realtime());
        assert!(!early.is_delayed());

        let estimate_only = JourneyRecord {
            departure_planned: None,
            departure_estimated: Some(at("2024-03-15T08:10:00+11:00")),
            ..record(None)
        };
        assert!(estimate_only.is_realtime());
        assert!(!estimate_only.is_delayed());
    }

    #[test]
    fn minutes_until_departure_floors_and_clamps() {
        let r = record(None);
        assert_eq!(r.minutes_until_departure(at("2024-03-15T08:00:30+11:00")), 9);
        assert_eq!(r.minutes_until_departure(at("2024-03-15T08:10:00+11:00")), 0);
        assert_eq!(r.minutes_until_departure(at("2024-03-15T09:00:00+11:00")), 0);
        // Same instant expressed in UTC
        assert_eq!(r.minutes_until_departure(at("2024-03-14T21:05:00Z")), 5);
    }

    #[test]
    fn fare_lookup() {
        let r = record(None);
        assert_eq!(r.fare_for(FareType::Child).and_then(|t| t.price), Some(2.1));
        assert!(r.fare_for(FareType::Senior).is_none());
    }

    #[test]
    fn delay_serializes_as_seconds() {
        let json = serde_json::to_value(record(Some(Duration::minutes(2)))).unwrap();
        assert_eq!(json["delay"], 120);
        assert_eq!(json["mode"], "train");

        let json = serde_json::to_value(record(None)).unwrap();
        assert!(json["delay"].is_null());
    }
}
