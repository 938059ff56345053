// API server binary entry point.
//
// Usage: cargo run --bin api_server
// Configuration is read from environment variables; see ServerConfig.

use cropcast::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cropcast=info,tower_http=debug,axum=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  TRAINING_DATA: {}", config.training_data);
    tracing::info!("  REGIONS_DB: {}", config.regions_db);
    tracing::info!("  WEATHER_BASE_URL: {}", config.weather_base_url);
    tracing::info!("  PORT: {}", config.port);
    if config.weather_api_key.is_empty() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; /weather requests will fail upstream");
    }

    // Load the dataset, fit the estimator, open the region store.
    // A failure here is fatal: the service must not start without a model.
    tracing::info!("Initializing application state...");
    let state = AppState::new(&config).await?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
