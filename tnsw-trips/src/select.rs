//! Journey selection.
//!
//! Applies a trip's filters to parsed candidates and keeps the first
//! `num_journeys` survivors, in the provider's order. The provider already
//! ranks by departure, so nothing here re-sorts.
//!
//! Filters fail closed: a candidate whose mode or fare applicability is
//! unknown does not match.

use crate::domain::{FareTicket, FareType, JourneyRecord, TripSpec};
use crate::tnsw::RawCandidate;

/// Select and normalize up to `spec.num_journeys()` journeys.
///
/// Never fails. Fewer qualifying candidates than requested simply yields
/// a shorter result.
pub fn select(candidates: &[RawCandidate], spec: &TripSpec) -> Vec<JourneyRecord> {
    candidates
        .iter()
        .filter(|c| c.departure_estimated.is_some() || c.departure_planned.is_some())
        .filter(|c| matches_modes(c, spec))
        .filter(|c| matches_fare(c, spec))
        .take(spec.num_journeys())
        .filter_map(|c| to_record(c, spec))
        .collect()
}

/// Every non-walking leg must use an allowed mode, and there must be one.
fn matches_modes(candidate: &RawCandidate, spec: &TripSpec) -> bool {
    let Some(allowed) = spec.modes() else {
        return true;
    };

    let mut rides = candidate.riding_classes().peekable();
    if rides.peek().is_none() {
        return false;
    }
    rides.all(|class| {
        class
            .and_then(|c| c.mode())
            .is_some_and(|mode| allowed.contains(&mode))
    })
}

fn matches_fare(candidate: &RawCandidate, spec: &TripSpec) -> bool {
    match spec.fare_type() {
        None => true,
        Some(wanted) => find_ticket(candidate, wanted).is_some(),
    }
}

fn find_ticket(candidate: &RawCandidate, fare_type: FareType) -> Option<&FareTicket> {
    candidate
        .fares
        .as_deref()?
        .iter()
        .find(|t| t.fare_type == fare_type)
}

/// Build the output record. `None` only without any departure time, which
/// `select` has already filtered out.
fn to_record(c: &RawCandidate, spec: &TripSpec) -> Option<JourneyRecord> {
    let departure = c.departure_estimated.or(c.departure_planned)?;

    let delay = match (c.departure_estimated, c.departure_planned) {
        (Some(estimated), Some(planned)) => Some(estimated - planned),
        _ => None,
    };

    let fare_type = spec.fare_type().unwrap_or(FareType::Adult);

    Some(JourneyRecord {
        departure,
        departure_planned: c.departure_planned,
        departure_estimated: c.departure_estimated,
        arrival: c.arrival_estimated.or(c.arrival_planned),
        arrival_planned: c.arrival_planned,
        mode: c.mode,
        transfers: c.transfers,
        origin: c.origin.clone(),
        destination: c.destination.clone(),
        line: c.line.clone(),
        occupancy: c.occupancy.clone(),
        realtime_trip_id: c.realtime_trip_id.clone(),
        delay,
        fare: find_ticket(c, fare_type).cloned(),
        fares: c.fares.clone().unwrap_or_default(),
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ProductClass, TransportMode};
    use chrono::{DateTime, Duration};
    use proptest::prelude::*;

    /// Strategy for a candidate with an optional departure and one to three
    /// legs, walks and unknown classes included. The departure minute doubles
    /// as an identity tag for order checks.
    fn arb_candidate() -> impl Strategy<Value = RawCandidate> {
        let leg = proptest::option::weighted(
            0.9,
            prop_oneof![Just(1u16), Just(5), Just(9), Just(99), Just(100)].prop_map(ProductClass),
        );
        (
            proptest::option::weighted(0.9, 0u32..1440),
            proptest::collection::vec(leg, 1..=3),
        )
            .prop_map(|(minute, leg_classes)| {
                let base = DateTime::parse_from_rfc3339("2024-03-14T00:00:00Z").unwrap();
                let mode = leg_classes
                    .iter()
                    .copied()
                    .find(|c| !matches!(c, Some(class) if class.is_walking()))
                    .flatten()
                    .and_then(ProductClass::mode);
                RawCandidate {
                    departure_planned: minute.map(|m| base + Duration::minutes(i64::from(m))),
                    mode,
                    leg_classes,
                    ..RawCandidate::default()
                }
            })
    }

    fn arb_modes() -> impl Strategy<Value = Option<Vec<TransportMode>>> {
        proptest::option::of(proptest::sample::subsequence(
            vec![TransportMode::Train, TransportMode::Bus, TransportMode::Ferry],
            1..=3,
        ))
    }

    proptest! {
        /// Never more records than requested
        #[test]
        fn length_bounded(
            candidates in proptest::collection::vec(arb_candidate(), 0..30),
            n in 1usize..10,
            modes in arb_modes(),
        ) {
            let mut builder = TripSpec::builder("200070", "200060").num_journeys(n);
            if let Some(modes) = modes {
                builder = builder.modes(modes);
            }
            let spec = builder.build().unwrap();

            let records = select(&candidates, &spec);
            prop_assert!(records.len() <= n);
        }

        /// Unfiltered selection is exactly the first n candidates with a departure
        #[test]
        fn preserves_provider_order(
            candidates in proptest::collection::vec(arb_candidate(), 0..30),
            n in 1usize..10,
        ) {
            let spec = TripSpec::new("200070", "200060", n).unwrap();

            let expected: Vec<_> = candidates
                .iter()
                .filter_map(|c| c.departure_planned)
                .take(n)
                .collect();
            let actual: Vec<_> = select(&candidates, &spec)
                .iter()
                .map(|r| r.departure)
                .collect();

            prop_assert_eq!(actual, expected);
        }

        /// Every selected record satisfies the mode filter, multi-leg journeys included
        #[test]
        fn filtered_records_match(
            candidates in proptest::collection::vec(arb_candidate(), 0..30),
            modes in proptest::sample::subsequence(
                vec![TransportMode::Train, TransportMode::Bus, TransportMode::Ferry],
                1..=3,
            ),
        ) {
            let spec = TripSpec::builder("200070", "200060")
                .num_journeys(30)
                .modes(modes.clone())
                .build()
                .unwrap();

            let records = select(&candidates, &spec);
            for r in &records {
                prop_assert!(r.mode.is_some_and(|m| modes.contains(&m)));
            }

            // Every leg is either a walk or a ride in an allowed mode, and
            // at least one is a ride.
            let qualifying = candidates
                .iter()
                .filter(|c| c.departure_planned.is_some())
                .filter(|c| {
                    let rides: Vec<_> = c
                        .leg_classes
                        .iter()
                        .filter(|l| !l.is_some_and(|class| class.is_walking()))
                        .collect();
                    !rides.is_empty()
                        && rides.iter().all(|l| {
                            l.and_then(|class| class.mode()).is_some_and(|m| modes.contains(&m))
                        })
                })
                .count();
            prop_assert_eq!(records.len(), qualifying);
        }
    }
}
