//! Farm management HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{FarmPatch, NewFarm};

use crate::error::AppError;
use crate::services::FarmService;
use crate::AppState;

/// List all farms
pub async fn list_farms(State(state): State<AppState>) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.get_all().await {
        Ok(farms) => (StatusCode::OK, Json(farms)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Farm cards with active crop counts
pub async fn list_farm_overviews(State(state): State<AppState>) -> impl IntoResponse {
    match state.pages().farm_cards().await {
        Ok(cards) => (StatusCode::OK, Json(cards)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific farm
pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.get_by_id(&farm_id).await {
        Ok(farm) => (StatusCode::OK, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new farm
pub async fn create_farm(
    State(state): State<AppState>,
    payload: Result<Json<NewFarm>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match payload {
        Ok(input) => input,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let service = FarmService::new(state.store.clone());

    match service.create(input).await {
        Ok(farm) => (StatusCode::CREATED, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a farm
pub async fn update_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
    payload: Result<Json<FarmPatch>, JsonRejection>,
) -> impl IntoResponse {
    let Json(patch) = match payload {
        Ok(patch) => patch,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let service = FarmService::new(state.store.clone());

    match service.update(&farm_id, patch).await {
        Ok(farm) => (StatusCode::OK, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a farm
pub async fn delete_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.delete(&farm_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
