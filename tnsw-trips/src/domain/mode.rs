//! Transport modes and provider product classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InvalidTrip;

/// A public transport mode that a trip can be filtered on.
///
/// The declaration order matches the provider's product class numbering,
/// which keeps derived `Ord` (and therefore `BTreeSet` iteration) stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Train,
    LightRail,
    Bus,
    Coach,
    Ferry,
    SchoolBus,
}

impl TransportMode {
    /// Every filterable mode, in product class order.
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Train,
        TransportMode::LightRail,
        TransportMode::Bus,
        TransportMode::Coach,
        TransportMode::Ferry,
        TransportMode::SchoolBus,
    ];

    /// The provider product class that carries this mode.
    pub fn product_class(self) -> ProductClass {
        match self {
            TransportMode::Train => ProductClass::TRAIN,
            TransportMode::LightRail => ProductClass::LIGHT_RAIL,
            TransportMode::Bus => ProductClass::BUS,
            TransportMode::Coach => ProductClass::COACH,
            TransportMode::Ferry => ProductClass::FERRY,
            TransportMode::SchoolBus => ProductClass::SCHOOL_BUS,
        }
    }

    /// The configuration name of this mode (e.g. `light_rail`).
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Train => "train",
            TransportMode::LightRail => "light_rail",
            TransportMode::Bus => "bus",
            TransportMode::Coach => "coach",
            TransportMode::Ferry => "ferry",
            TransportMode::SchoolBus => "school_bus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTrip;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| InvalidTrip::UnknownMode(s.to_string()))
    }
}

/// The provider's numeric product class for a leg.
///
/// Classes 1 to 11 are public transport; 99 and 100 are walking; 101 and
/// above are individual transport (bicycle, park & ride, taxi, car...).
/// Unknown values are kept as-is rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductClass(pub u16);

impl ProductClass {
    pub const TRAIN: ProductClass = ProductClass(1);
    pub const LIGHT_RAIL: ProductClass = ProductClass(4);
    pub const BUS: ProductClass = ProductClass(5);
    pub const COACH: ProductClass = ProductClass(7);
    pub const FERRY: ProductClass = ProductClass(9);
    pub const SCHOOL_BUS: ProductClass = ProductClass(11);
    pub const WALKING: ProductClass = ProductClass(99);
    pub const WALKING_FOOTPATH: ProductClass = ProductClass(100);

    /// Whether this leg is on foot.
    pub fn is_walking(self) -> bool {
        self == Self::WALKING || self == Self::WALKING_FOOTPATH
    }

    /// The filterable transport mode for this class, if it is one.
    pub fn mode(self) -> Option<TransportMode> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.product_class() == self)
    }
}

impl fmt::Display for ProductClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
