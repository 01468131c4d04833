//! Trip configuration.
//!
//! Trip definitions as a host would configure them, deserialised with
//! serde and validated into [`TripSpec`] values. Only the JSON form is
//! read here.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::{FareType, InvalidTrip, TimeAnchor, TransportMode, TripSpec};

/// Errors loading or validating trip configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trip {name:?}: {source}")]
    InvalidTrip {
        name: String,
        #[source]
        source: InvalidTrip,
    },
}

fn default_num_journeys() -> usize {
    1
}

/// One configured trip.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripConfig {
    /// Display label; opaque to the query logic.
    pub name: String,

    pub stop_id: String,

    pub destination_stop_id: String,

    #[serde(default = "default_num_journeys")]
    pub num_journeys: usize,

    #[serde(default)]
    pub fare_type: Option<FareType>,

    #[serde(default)]
    pub modes_of_transport: Option<Vec<TransportMode>>,

    /// Provider-local time, e.g. `2024-03-15T07:30:00`.
    #[serde(default)]
    pub depart_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub arrive_by: Option<NaiveDateTime>,
}

impl TripConfig {
    /// Validate into a trip spec.
    pub fn to_spec(&self) -> Result<TripSpec, InvalidTrip> {
        let anchor = match (self.depart_at, self.arrive_by) {
            (Some(_), Some(_)) => return Err(InvalidTrip::ConflictingTimeAnchor),
            (Some(t), None) => TimeAnchor::DepartAt(t),
            (None, Some(t)) => TimeAnchor::ArriveBy(t),
            (None, None) => TimeAnchor::Now,
        };

        let mut builder = TripSpec::builder(&self.stop_id, &self.destination_stop_id)
            .num_journeys(self.num_journeys)
            .time_anchor(anchor);
        if let Some(fare_type) = self.fare_type {
            builder = builder.fare_type(fare_type);
        }
        if let Some(modes) = &self.modes_of_transport {
            builder = builder.modes(modes.iter().copied());
        }
        builder.build()
    }
}

/// A validated trip with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredTrip {
    pub name: String,
    pub spec: TripSpec,
}

/// Top-level configuration: a list of trips.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripsConfig {
    pub trips: Vec<TripConfig>,
}

impl TripsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Validate every trip. Fails on the first invalid one.
    pub fn to_trips(&self) -> Result<Vec<ConfiguredTrip>, ConfigError> {
        self.trips
            .iter()
            .map(|trip| {
                let spec = trip.to_spec().map_err(|source| ConfigError::InvalidTrip {
                    name: trip.name.clone(),
                    source,
                })?;
                Ok(ConfiguredTrip {
                    name: trip.name.clone(),
                    spec,
                })
            })
            .collect()
    }
}
