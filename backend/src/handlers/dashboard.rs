//! Dashboard handler

use axum::{extract::State, Json};
use chrono::Local;

use crate::error::AppResult;
use crate::services::pages::DashboardPage;
use crate::AppState;

/// Aggregate figures for today plus the weather card
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardPage>> {
    let today = Local::now().date_naive();
    Ok(Json(state.pages().dashboard(today).await?))
}
