//! REST API for place discovery
//!
//! Range validation of caller coordinates happens here, at the boundary;
//! the discovery pipeline itself accepts any `f64`.

pub mod places_routes;

pub use places_routes::{create_places_router, PlacesState};
