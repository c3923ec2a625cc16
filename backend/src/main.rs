//! Farm Dashboard - Backend Server

use std::net::SocketAddr;
use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farm_dashboard_backend::{
    config::Config,
    create_app,
    services::WeatherService,
    storage::{mapping, Latency, RecordStore},
    AppError, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "farm_server=debug,farm_dashboard_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Farm Dashboard Server");
    tracing::info!("Environment: {}", config.environment);

    mapping::validate_all().map_err(AppError::Configuration)?;

    tracing::info!("Opening {} record store...", config.storage.backend);
    let store = RecordStore::from_config(&config).await?;

    let weather = WeatherService::from_fixture(
        Path::new(&config.storage.fixtures_dir).join("weather.json"),
        Latency::new(config.storage.latency_min_ms, config.storage.latency_max_ms),
    )
    .await?;

    // Create application state
    let state = AppState::new(store, weather);

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
