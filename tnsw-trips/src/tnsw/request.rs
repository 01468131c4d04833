//! Trip request construction.
//!
//! Turns a [`TripSpec`] into the query parameters for one Trip Planner
//! call. When a filter is active the request asks for more journeys than
//! the trip needs, since filtering can only shrink the pool and a second
//! request is never made.

use crate::domain::{TimeAnchor, TransportMode, TripSpec};

/// Path of the trip endpoint, relative to the API base URL.
pub const TRIP_PATH: &str = "/v1/tp/trip";

/// Multiplier on `num_journeys` when a mode or fare filter is active.
pub const OVERSUPPLY_FACTOR: usize = 3;

/// Upper bound on the oversupplied journey count.
pub const MAX_TRIPS_HINT: usize = 50;

/// API version the response DTOs are written against.
const API_VERSION: &str = "10.2.1.42";

/// One outbound trip request: a path plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub path: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl TripRequest {
    /// Look up a parameter value by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// How many journeys to ask the provider for.
pub fn trips_hint(spec: &TripSpec) -> usize {
    let wanted = spec.num_journeys();
    if spec.is_filtered() {
        wanted.saturating_mul(OVERSUPPLY_FACTOR).min(MAX_TRIPS_HINT).max(wanted)
    } else {
        wanted
    }
}

/// Build the trip request for a spec. Pure; never fails.
pub fn build(spec: &TripSpec) -> TripRequest {
    let mut params: Vec<(&'static str, String)> = vec![
        ("outputFormat", "rapidJSON".to_string()),
        ("coordOutputFormat", "EPSG:4326".to_string()),
    ];

    let (macro_, when) = match spec.time_anchor() {
        TimeAnchor::Now => ("dep", None),
        TimeAnchor::DepartAt(t) => ("dep", Some(t)),
        TimeAnchor::ArriveBy(t) => ("arr", Some(t)),
    };
    params.push(("depArrMacro", macro_.to_string()));
    if let Some(t) = when {
        params.push(("itdDate", t.format("%Y%m%d").to_string()));
        params.push(("itdTime", t.format("%H%M").to_string()));
    }

    params.extend([
        ("type_origin", "any".to_string()),
        ("name_origin", spec.origin().as_str().to_string()),
        ("type_destination", "any".to_string()),
        ("name_destination", spec.destination().as_str().to_string()),
        ("calcNumberOfTrips", trips_hint(spec).to_string()),
        ("TfNSWTR", "true".to_string()),
        ("version", API_VERSION.to_string()),
    ]);

    if let Some(modes) = spec.modes() {
        params.push(("excludedMeans", "checkbox".to_string()));
        for mode in TransportMode::ALL.into_iter().filter(|m| !modes.contains(m)) {
            params.push((exclusion_param(mode), "1".to_string()));
        }
    }

    TripRequest {
        path: TRIP_PATH,
        params,
    }
}

/// Parameter name that excludes a mode from the provider's search.
fn exclusion_param(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Train => "exclMOT_1",
        TransportMode::LightRail => "exclMOT_4",
        TransportMode::Bus => "exclMOT_5",
        TransportMode::Coach => "exclMOT_7",
        TransportMode::Ferry => "exclMOT_9",
        TransportMode::SchoolBus => "exclMOT_11",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FareType;
    use chrono::NaiveDate;

    fn excluded(req: &TripRequest) -> Vec<&'static str> {
        req.params
            .iter()
            .filter(|(k, _)| k.starts_with("exclMOT_"))
            .map(|(k, _)| *k)
            .collect()
    }

    #[test]
    fn unfiltered_request() {
        let spec = TripSpec::new("200070", "200060", 3).unwrap();
        let req = build(&spec);

        assert_eq!(req.path, TRIP_PATH);
        assert_eq!(req.param("outputFormat"), Some("rapidJSON"));
        assert_eq!(req.param("name_origin"), Some("200070"));
        assert_eq!(req.param("name_destination"), Some("200060"));
        assert_eq!(req.param("type_origin"), Some("any"));
        assert_eq!(req.param("calcNumberOfTrips"), Some("3"));
        assert_eq!(req.param("depArrMacro"), Some("dep"));
        assert_eq!(req.param("TfNSWTR"), Some("true"));
        assert_eq!(req.param("itdDate"), None);
        assert_eq!(req.param("excludedMeans"), None);
        assert!(excluded(&req).is_empty());
    }

    #[test]
    fn mode_filter_excludes_complement() {
        let spec = TripSpec::builder("200070", "200060")
            .modes([TransportMode::Bus, TransportMode::Ferry])
            .build()
            .unwrap();
        let req = build(&spec);

        assert_eq!(req.param("excludedMeans"), Some("checkbox"));
        assert_eq!(
            excluded(&req),
            vec!["exclMOT_1", "exclMOT_4", "exclMOT_7", "exclMOT_11"]
        );
    }

    #[test]
    fn filters_oversupply() {
        let by_mode = TripSpec::builder("200070", "200060")
            .num_journeys(2)
            .modes([TransportMode::Train])
            .build()
            .unwrap();
        assert_eq!(build(&by_mode).param("calcNumberOfTrips"), Some("6"));

        let by_fare = TripSpec::builder("200070", "200060")
            .num_journeys(4)
            .fare_type(FareType::Senior)
            .build()
            .unwrap();
        assert_eq!(trips_hint(&by_fare), 12);
    }

    #[test]
    fn oversupply_is_capped_but_never_below_wanted() {
        let many = TripSpec::builder("200070", "200060")
            .num_journeys(20)
            .fare_type(FareType::Adult)
            .build()
            .unwrap();
        assert_eq!(trips_hint(&many), MAX_TRIPS_HINT);

        let huge = TripSpec::builder("200070", "200060")
            .num_journeys(80)
            .fare_type(FareType::Adult)
            .build()
            .unwrap();
        assert_eq!(trips_hint(&huge), 80);
    }

    #[test]
    fn time_anchors() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();

        let depart = TripSpec::builder("200070", "200060")
            .time_anchor(TimeAnchor::DepartAt(t))
            .build()
            .unwrap();
        let req = build(&depart);
        assert_eq!(req.param("depArrMacro"), Some("dep"));
        assert_eq!(req.param("itdDate"), Some("20240315"));
        assert_eq!(req.param("itdTime"), Some("0705"));

        let arrive = TripSpec::builder("200070", "200060")
            .time_anchor(TimeAnchor::ArriveBy(t))
            .build()
            .unwrap();
        assert_eq!(build(&arrive).param("depArrMacro"), Some("arr"));
    }
}
