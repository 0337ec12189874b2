//! Place discovery orchestration
//!
//! Prompt → client → parser cascade → geofence, with the fallback set as the
//! terminal state of every failure. `find_places` never returns an error.

use tracing::{info, warn};

use super::fallback::fallback_places;
use super::gemini::GenerativeClient;
use super::geofence::filter_within_radius;
use super::parser::parse_places;
use super::prompt::build_discovery_prompt;
use super::types::{DiscoveryResponse, PlaceOfInterest};
use super::MAX_PLACES;
use crate::error::{ClientError, DiscoveryError};
use crate::invalidation::ViewInvalidator;

/// Stateless discovery pipeline; safe to share across concurrent requests
pub struct PlaceDiscovery<C, I> {
    client: C,
    invalidator: I,
    revalidate_path: String,
}

impl<C, I> PlaceDiscovery<C, I>
where
    C: GenerativeClient,
    I: ViewInvalidator,
{
    pub fn new(client: C, invalidator: I, revalidate_path: impl Into<String>) -> Self {
        Self {
            client,
            invalidator,
            revalidate_path: revalidate_path.into(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Discover places near `(lat, lng)`
    ///
    /// Coordinates are not range-checked here; that is the caller's job.
    pub async fn find_places(&self, lat: f64, lng: f64) -> DiscoveryResponse {
        match self.discover(lat, lng).await {
            Ok(places) => {
                info!(lat, lng, count = places.len(), "Discovered places");
                self.invalidator.invalidate(&self.revalidate_path);
                DiscoveryResponse::live(places)
            }
            Err(DiscoveryError::Client(ClientError::Configuration)) => {
                info!(lat, lng, "No API key configured, serving fallback places");
                DiscoveryResponse::silent_fallback(fallback_places(lat, lng))
            }
            Err(e) => {
                warn!(lat, lng, error = %e, "Discovery failed, serving fallback places");
                DiscoveryResponse::failed_fallback(fallback_places(lat, lng), e.to_string())
            }
        }
    }

    async fn discover(&self, lat: f64, lng: f64) -> Result<Vec<PlaceOfInterest>, DiscoveryError> {
        let prompt = build_discovery_prompt(lat, lng);
        let text = self.client.generate(&prompt).await?;
        let parsed = parse_places(&text).ok_or(DiscoveryError::Parse)?;

        // An empty list after filtering is returned as-is, not replaced by fallback
        let (mut places, stats) = filter_within_radius(parsed);
        info!(
            model = self.client.model_name(),
            kept = stats.kept,
            dropped = stats.dropped,
            unparseable = stats.unparseable,
            "Applied geofence"
        );

        places.truncate(MAX_PLACES);
        Ok(places)
    }
}
