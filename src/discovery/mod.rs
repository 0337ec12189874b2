//! Points-of-interest discovery pipeline

pub mod fallback;
pub mod gemini;
pub mod geofence;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod types;

/// Upper bound on places returned in one batch
pub const MAX_PLACES: usize = 3;

pub use fallback::fallback_places;
pub use gemini::{GeminiClient, GenerativeClient};
pub use geofence::{
    filter_within_radius, GeofenceStats, UnparseableDistance, MAX_DISTANCE_KM,
    ON_UNPARSEABLE_DISTANCE,
};
pub use orchestrator::PlaceDiscovery;
pub use parser::{parse_places, STRATEGIES};
pub use prompt::build_discovery_prompt;
pub use types::{AccessStatus, Coordinates, DiscoveryResponse, PlaceOfInterest, Risk};
