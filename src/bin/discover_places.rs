//! One-shot place discovery
//!
//! # Usage
//!
//! ```bash
//! # Live discovery (needs GEMINI_API_KEY in the environment or .env)
//! discover_places --lat 28.6139 --lng 77.209 --pretty
//!
//! # Without a key the deterministic fallback set is printed
//! GEMINI_API_KEY= discover_places --lat -33.86 --lng 151.21
//! ```

use anyhow::Result;
use clap::Parser;

use poi_discovery::{DiscoveryConfig, GeminiClient, NoopInvalidator, PlaceDiscovery};

#[derive(Parser)]
#[command(name = "discover_places")]
#[command(version = "0.1.0")]
#[command(about = "Discover points of interest within 5 km of a coordinate")]
struct Cli {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,

    /// Pretty-print the JSON envelope
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poi_discovery=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DiscoveryConfig::from_env();
    tracing::debug!(?config, "Loaded discovery config");

    let discovery = PlaceDiscovery::new(
        GeminiClient::new(&config),
        NoopInvalidator,
        config.revalidate_path.clone(),
    );
    let response = discovery.find_places(cli.lat, cli.lng).await;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", rendered);

    Ok(())
}
