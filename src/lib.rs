//! Constrained points-of-interest discovery
//!
//! Asks a generative text model for points of interest near a coordinate,
//! recovers structured records from its free-form answer, drops anything
//! outside the search radius, and degrades to a deterministic synthetic set
//! whenever the live pipeline cannot produce a validated result.
//!
//! ## Architecture
//!
//! ```text
//! (lat, lng) → Prompt → GenerativeClient → Parser cascade → Geofence → envelope
//!                             │                  │
//!                             └──── failure ─────┴──→ Fallback set
//! ```
//!
//! The caller always receives a `{ success, places, error? }` envelope; no
//! error crosses [`discovery::PlaceDiscovery::find_places`].

pub mod config;
pub mod discovery;
pub mod error;
pub mod invalidation;

#[cfg(feature = "server")]
pub mod api;

// Re-exports for convenience
pub use config::DiscoveryConfig;
pub use discovery::{
    DiscoveryResponse, GeminiClient, GenerativeClient, PlaceDiscovery, PlaceOfInterest,
};
pub use error::{ClientError, DiscoveryError};
pub use invalidation::{BroadcastInvalidator, NoopInvalidator, ViewInvalidator};
