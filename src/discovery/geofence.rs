//! Distance geofence for discovered places
//!
//! Reads the first decimal number out of `distanceFromUser` and keeps the
//! place when it is within [`MAX_DISTANCE_KM`]. The unit is not interpreted.
//! Never fails; it only prunes.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::types::PlaceOfInterest;

/// Search radius in kilometres
pub const MAX_DISTANCE_KM: f64 = 5.0;

/// What to do with a place whose distance string has no number in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnparseableDistance {
    Keep,
    Drop,
}

/// Fail-open: unreadable distances pass through unfiltered
pub const ON_UNPARSEABLE_DISTANCE: UnparseableDistance = UnparseableDistance::Keep;

static DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Counts from one filter pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeofenceStats {
    pub kept: usize,
    pub dropped: usize,
    /// Places whose distance could not be read (kept or dropped per policy)
    pub unparseable: usize,
}

/// First decimal number in a distance string, e.g. "2.8 km" → 2.8
pub fn parse_distance(distance: &str) -> Option<f64> {
    DISTANCE_RE
        .find(distance)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Filter with the default unparseable-distance policy
pub fn filter_within_radius(places: Vec<PlaceOfInterest>) -> (Vec<PlaceOfInterest>, GeofenceStats) {
    filter_within_radius_with_policy(places, ON_UNPARSEABLE_DISTANCE)
}

pub fn filter_within_radius_with_policy(
    places: Vec<PlaceOfInterest>,
    on_unparseable: UnparseableDistance,
) -> (Vec<PlaceOfInterest>, GeofenceStats) {
    let mut stats = GeofenceStats::default();
    let mut kept = Vec::with_capacity(places.len());

    for place in places {
        let keep = match parse_distance(&place.distance_from_user) {
            Some(km) => km <= MAX_DISTANCE_KM,
            None => {
                stats.unparseable += 1;
                debug!(
                    id = %place.id,
                    distance = %place.distance_from_user,
                    policy = ?on_unparseable,
                    "Distance not parseable"
                );
                on_unparseable == UnparseableDistance::Keep
            }
        };

        if keep {
            kept.push(place);
        } else {
            stats.dropped += 1;
            info!(
                id = %place.id,
                name = %place.name,
                distance = %place.distance_from_user,
                "Dropped place outside geofence"
            );
        }
    }

    stats.kept = kept.len();
    (kept, stats)
}
