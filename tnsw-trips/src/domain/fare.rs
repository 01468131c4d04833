//! Fare types and tickets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InvalidTrip;

/// A rider category the provider prices tickets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FareType {
    Adult,
    Child,
    Scholar,
    Senior,
}

impl FareType {
    pub const ALL: [FareType; 4] = [
        FareType::Adult,
        FareType::Child,
        FareType::Scholar,
        FareType::Senior,
    ];

    /// The provider's name for this category (e.g. `ADULT`).
    pub fn as_str(self) -> &'static str {
        match self {
            FareType::Adult => "ADULT",
            FareType::Child => "CHILD",
            FareType::Scholar => "SCHOLAR",
            FareType::Senior => "SENIOR",
        }
    }
}

impl fmt::Display for FareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FareType {
    type Err = InvalidTrip;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FareType::ALL
            .into_iter()
            .find(|fare| fare.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidTrip::UnknownFareType(s.to_string()))
    }
}

/// One priced ticket for a journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareTicket {
    pub fare_type: FareType,

    /// Gross price in dollars, when the provider quoted one.
    pub price: Option<f64>,
}

impl FareTicket {
    /// Price formatted to cents, e.g. `"4.20"`.
    pub fn price_display(&self) -> Option<String> {
        self.price.map(|p| format!("{p:.2}"))
    }
}
