//! Prompt construction for place discovery
//!
//! The prompt pins the coordinates, the radius, the record count and the exact
//! record shape, and asks for a bare JSON array. It is sent as a JSON string
//! field, so request-body encoding is the only escaping needed.

use super::geofence::MAX_DISTANCE_KM;
use super::MAX_PLACES;

/// Build the discovery instruction for a coordinate pair
pub fn build_discovery_prompt(lat: f64, lng: f64) -> String {
    format!(
        r#"You are a mountain and outdoor safety assistant.

Find exactly {count} real points of interest (peaks, passes, trails, lakes, viewpoints, shelters) near the coordinates latitude {lat}, longitude {lng}.

HARD CONSTRAINT: every point of interest MUST be within a {radius} km radius of latitude {lat}, longitude {lng}. NEVER include any place farther than {radius} km from these coordinates. If you are unsure of a distance, leave the place out.

Return exactly {count} objects. Each object MUST have exactly these fields:
- "id": string, unique within this response
- "name": string, name of the place
- "elevation": string, elevation with unit (e.g. "2,350 m")
- "coordinates": object {{ "lat": number, "lng": number }}
- "description": string, 1-2 sentences
- "risk": one of "Low", "Medium", "High"
- "status": one of "Accessible", "Caution", "Dangerous"
- "distanceFromUser": string, distance from the given coordinates with unit (e.g. "2.8 km"), at most {radius} km

Respond ONLY with a JSON array of these objects. No markdown, no code fences, no explanatory text before or after the array."#,
        count = MAX_PLACES,
        lat = lat,
        lng = lng,
        radius = MAX_DISTANCE_KM,
    )
}
