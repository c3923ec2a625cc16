//! Route definitions for the Farm Dashboard API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/farms", farm_routes())
        .nest("/crops", crop_routes())
        .nest("/tasks", task_routes())
        .nest("/transactions", transaction_routes())
        .route(
            "/finances/summary",
            get(handlers::finance::get_finance_summary),
        )
        .nest("/weather", weather_routes())
}

/// Farm routes
fn farm_routes() -> Router<AppState> {
    use crate::handlers::farm::*;

    Router::new()
        .route("/", get(list_farms).post(create_farm))
        .route("/overview", get(list_farm_overviews))
        .route("/:id", get(get_farm).put(update_farm).delete(delete_farm))
}

/// Crop routes
fn crop_routes() -> Router<AppState> {
    use crate::handlers::crop::*;

    Router::new()
        .route("/", get(list_crops).post(create_crop))
        .route("/:id", get(get_crop).put(update_crop).delete(delete_crop))
        .route("/:id/detail", get(get_crop_detail))
}

/// Task routes
fn task_routes() -> Router<AppState> {
    use crate::handlers::task::*;

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/board", get(get_task_board))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
        .route("/:id/complete", post(complete_task))
}

/// Transaction routes
fn transaction_routes() -> Router<AppState> {
    use crate::handlers::transaction::*;

    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    use crate::handlers::weather::*;

    Router::new()
        .route("/", get(get_current_weather))
        .route("/forecast", get(get_forecast))
        .route("/location/:location", get(get_weather_by_location))
        .route("/farm/:farm_id", get(get_farm_weather))
}
