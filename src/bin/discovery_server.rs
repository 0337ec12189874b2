//! Place discovery HTTP server
//!
//! ## Usage
//!
//! ```bash
//! GEMINI_API_KEY=... SERVER_PORT=3000 cargo run --bin discovery_server
//!
//! curl -X POST http://localhost:3000/api/places \
//!   -H "Content-Type: application/json" \
//!   -d '{"latitude": 28.6139, "longitude": 77.209}'
//!
//! curl "http://localhost:3000/api/places?lat=28.6139&lng=77.209"
//! curl http://localhost:3000/api/health
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poi_discovery::api::{create_places_router, PlacesState};
use poi_discovery::{BroadcastInvalidator, DiscoveryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poi_discovery=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DiscoveryConfig::from_env();
    tracing::info!(?config, "Starting place discovery server");
    if !config.has_api_key() {
        tracing::warn!("GEMINI_API_KEY not set; every request will be served fallback places");
    }

    let invalidator = BroadcastInvalidator::default();
    let mut invalidations = invalidator.subscribe();
    tokio::spawn(async move {
        loop {
            match invalidations.recv().await {
                Ok(path) => tracing::info!(path = %path, "View cache invalidated"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Invalidation listener lagged")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let state = PlacesState::from_config(&config, Arc::new(invalidator));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_places_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let port: u16 = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Place discovery server running on http://{}", addr);
    tracing::info!("  POST /api/places   - Discover places");
    tracing::info!("  GET  /api/places   - Discover places (query string)");
    tracing::info!("  GET  /api/health   - Health check");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
