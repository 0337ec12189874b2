//! Discovery domain types
//!
//! Wire names follow the JSON the model is asked to emit and the envelope the
//! caller receives (`distanceFromUser`, `usedFallback` is never serialised).

use serde::{Deserialize, Deserializer, Serialize};

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Hazard level of a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

/// Whether a place can currently be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessStatus {
    Accessible,
    Caution,
    Dangerous,
}

/// A single discovered point of interest
///
/// Unique by `id` within one response batch only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOfInterest {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Free text with unit, e.g. "2,350 m"
    pub elevation: String,
    pub coordinates: Coordinates,
    pub description: String,
    pub risk: Risk,
    pub status: AccessStatus,
    /// Free text with unit, e.g. "2.8 km"; inspected by the geofence
    pub distance_from_user: String,
}

/// Models occasionally emit numeric ids
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Envelope returned by `find_places`
///
/// `success` is false only when the upstream call or parsing failed; the
/// no-API-key degradation reports `success: true` with no `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub success: bool,
    pub places: Vec<PlaceOfInterest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// True when `places` is the synthetic fallback set
    #[serde(skip)]
    pub used_fallback: bool,
}

impl DiscoveryResponse {
    pub fn live(places: Vec<PlaceOfInterest>) -> Self {
        Self {
            success: true,
            places,
            error: None,
            used_fallback: false,
        }
    }

    /// Expected degradation: fallback data, no diagnostic
    pub fn silent_fallback(places: Vec<PlaceOfInterest>) -> Self {
        Self {
            success: true,
            places,
            error: None,
            used_fallback: true,
        }
    }

    /// Upstream or parse failure: fallback data plus a diagnostic
    pub fn failed_fallback(places: Vec<PlaceOfInterest>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            places,
            error: Some(error.into()),
            used_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_place_uses_camel_case_wire_names() {
        let place = PlaceOfInterest {
            id: "1".to_string(),
            name: "Kedarkantha Summit".to_string(),
            elevation: "3,810 m".to_string(),
            coordinates: Coordinates { lat: 31.02, lng: 78.17 },
            description: "Snow-covered summit with panoramic views.".to_string(),
            risk: Risk::Medium,
            status: AccessStatus::Caution,
            distance_from_user: "4.2 km".to_string(),
        };

        let value = serde_json::to_value(&place).unwrap();
        assert_eq!(value["distanceFromUser"], "4.2 km");
        assert_eq!(value["risk"], "Medium");
        assert_eq!(value["status"], "Caution");
        assert_eq!(value["coordinates"]["lng"], 78.17);
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let place: PlaceOfInterest = serde_json::from_value(json!({
            "id": 7,
            "name": "Lake",
            "elevation": "1,200 m",
            "coordinates": {"lat": 1.0, "lng": 2.0},
            "description": "A lake.",
            "risk": "Low",
            "status": "Accessible",
            "distanceFromUser": "1 km"
        }))
        .unwrap();
        assert_eq!(place.id, "7");
    }

    #[test]
    fn test_unknown_risk_is_rejected() {
        let result: Result<PlaceOfInterest, _> = serde_json::from_value(json!({
            "id": "1",
            "name": "Lake",
            "elevation": "1,200 m",
            "coordinates": {"lat": 1.0, "lng": 2.0},
            "description": "A lake.",
            "risk": "Extreme",
            "status": "Accessible",
            "distanceFromUser": "1 km"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_omits_absent_error() {
        let value = serde_json::to_value(DiscoveryResponse::silent_fallback(vec![])).unwrap();
        assert_eq!(value, json!({"success": true, "places": []}));
    }
}
