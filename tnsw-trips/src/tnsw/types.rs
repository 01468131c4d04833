//! Trip Planner API response DTOs.
//!
//! These types map directly to the rapidJSON trip response. They use
//! `Option` for nearly everything because the provider omits fields
//! rather than sending nulls, and a missing field must never fail a
//! whole journey. Fields we do not use are not modelled; serde ignores
//! them.

use serde::Deserialize;

/// One journey option (`journeys[]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    #[serde(default)]
    pub legs: Vec<LegDto>,

    pub fare: Option<FareDto>,
}

/// A single leg of a journey.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub origin: Option<LegStopDto>,

    pub destination: Option<LegStopDto>,

    pub transportation: Option<TransportationDto>,
}

/// A stop at either end of a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegStopDto {
    pub id: Option<String>,

    pub name: Option<String>,

    pub disassembled_name: Option<String>,

    /// ISO 8601 timestamps, e.g. `2024-03-14T21:10:00Z`.
    pub departure_time_estimated: Option<String>,
    pub departure_time_planned: Option<String>,
    pub arrival_time_estimated: Option<String>,
    pub arrival_time_planned: Option<String>,

    pub properties: Option<LegStopPropertiesDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegStopPropertiesDto {
    pub occupancy: Option<String>,
}

/// The vehicle serving a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationDto {
    /// Short line name, e.g. `T1`.
    pub disassembled_name: Option<String>,

    pub number: Option<String>,

    pub description: Option<String>,

    pub product: Option<ProductDto>,

    pub properties: Option<TransportationPropertiesDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDto {
    /// Product class (1 train, 5 bus, 99 walking, ...).
    pub class: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportationPropertiesDto {
    #[serde(rename = "RealtimeTripId")]
    pub realtime_trip_id: Option<String>,
}

/// Fare section of a journey.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FareDto {
    #[serde(default)]
    pub tickets: Vec<TicketDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    /// Rider category: `ADULT`, `CHILD`, `SCHOLAR` or `SENIOR`.
    pub person: Option<String>,

    /// Gross price in dollars.
    pub price_brutto: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_sparse_leg() {
        let json = r#"{
            "duration": "ten minutes",
            "isRealtimeControlled": 1,
            "origin": { "id": "200070", "name": "Town Hall Station" },
            "transportation": { "product": { "class": 1 } },
            "unexpected": [1, 2, 3]
        }"#;

        let leg: LegDto = serde_json::from_str(json).unwrap();
        assert!(leg.destination.is_none());

        let origin = leg.origin.unwrap();
        assert_eq!(origin.id.as_deref(), Some("200070"));
        assert!(origin.departure_time_planned.is_none());

        let class = leg.transportation.and_then(|t| t.product).and_then(|p| p.class);
        assert_eq!(class, Some(1));
    }

    #[test]
    fn deserialize_ticket() {
        let json = r#"{
            "id": "ANY",
            "name": "Opal tariff",
            "person": "ADULT",
            "priceLevel": "1",
            "priceBrutto": 4.2
        }"#;

        let ticket: TicketDto = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.person.as_deref(), Some("ADULT"));
        assert_eq!(ticket.price_brutto, Some(4.2));
    }

    #[test]
    fn realtime_trip_id_uses_provider_casing() {
        let json = r#"{ "properties": { "RealtimeTripId": "123.T1.1-AB" } }"#;
        let t: TransportationDto = serde_json::from_str(json).unwrap();
        assert_eq!(
            t.properties.and_then(|p| p.realtime_trip_id).as_deref(),
            Some("123.T1.1-AB")
        );
    }
}
