//! Place discovery endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::config::DiscoveryConfig;
use crate::discovery::{DiscoveryResponse, GeminiClient, GenerativeClient, PlaceDiscovery};
use crate::invalidation::ViewInvalidator;

pub type SharedDiscovery =
    Arc<PlaceDiscovery<Arc<dyn GenerativeClient>, Arc<dyn ViewInvalidator>>>;

#[derive(Clone)]
pub struct PlacesState {
    discovery: SharedDiscovery,
    api_key_configured: bool,
}

impl PlacesState {
    pub fn new(discovery: SharedDiscovery, api_key_configured: bool) -> Self {
        Self {
            discovery,
            api_key_configured,
        }
    }

    /// Wire the production Gemini client to `invalidator`
    pub fn from_config(config: &DiscoveryConfig, invalidator: Arc<dyn ViewInvalidator>) -> Self {
        let client: Arc<dyn GenerativeClient> = Arc::new(GeminiClient::new(config));
        let discovery = PlaceDiscovery::new(client, invalidator, config.revalidate_path.clone());
        Self::new(Arc::new(discovery), config.has_api_key())
    }
}

// Request/response types
#[derive(Debug, Deserialize)]
pub struct FindPlacesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub api_key_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn validate_coordinates(lat: f64, lng: f64) -> Result<(), String> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Invalid latitude {}: must be between -90 and 90", lat));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(format!(
            "Invalid longitude {}: must be between -180 and 180",
            lng
        ));
    }
    Ok(())
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

async fn discover(
    state: &PlacesState,
    lat: f64,
    lng: f64,
) -> Result<Json<DiscoveryResponse>, ApiError> {
    if let Err(error) = validate_coordinates(lat, lng) {
        tracing::debug!(lat, lng, "Rejected out-of-range coordinates");
        return Err(reject(StatusCode::BAD_REQUEST, error));
    }
    Ok(Json(state.discovery.find_places(lat, lng).await))
}

/// POST /api/places
async fn find_places(
    State(state): State<PlacesState>,
    payload: Result<Json<FindPlacesRequest>, JsonRejection>,
) -> Result<Json<DiscoveryResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected malformed request body");
        reject(rejection.status(), rejection.body_text())
    })?;
    discover(&state, req.latitude, req.longitude).await
}

/// GET /api/places?lat=..&lng=..
async fn find_places_query(
    State(state): State<PlacesState>,
    query: Result<Query<PlacesQuery>, QueryRejection>,
) -> Result<Json<DiscoveryResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected malformed query");
        reject(rejection.status(), rejection.body_text())
    })?;
    discover(&state, query.lat, query.lng).await
}

/// GET /api/health
async fn health(State(state): State<PlacesState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.discovery.client().model_name().to_string(),
        api_key_configured: state.api_key_configured,
    })
}

/// Create router for place discovery endpoints
pub fn create_places_router(state: PlacesState) -> Router {
    Router::new()
        .route("/api/places", post(find_places).get(find_places_query))
        .route("/api/health", get(health))
        .with_state(state)
}
