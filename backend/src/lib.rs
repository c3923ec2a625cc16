//! Farm Dashboard backend
//!
//! CRUD for farms, crops, tasks and transactions over a pluggable record
//! store, plus the page endpoints the dashboard renders from.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{PageService, WeatherService};
use storage::RecordStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub weather: WeatherService,
}

impl AppState {
    pub fn new(store: RecordStore, weather: WeatherService) -> Self {
        Self { store, weather }
    }

    pub fn pages(&self) -> PageService {
        PageService::new(self.store.clone(), self.weather.clone())
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Farm Dashboard API v1"
}
