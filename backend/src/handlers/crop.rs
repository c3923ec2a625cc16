//! HTTP handlers for crop endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use shared::timeline::CropDetail;
use shared::{Crop, CropPatch, NewCrop};

use crate::error::AppResult;
use crate::services::pages::CropRow;
use crate::services::CropService;
use crate::AppState;

/// List crops with their farm names
pub async fn list_crops(State(state): State<AppState>) -> AppResult<Json<Vec<CropRow>>> {
    let rows = state.pages().crop_rows().await?;
    Ok(Json(rows))
}

pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<Crop>> {
    let service = CropService::new(state.store);
    Ok(Json(service.get_by_id(&crop_id).await?))
}

/// Crop with growth timeline, progress and yield history
pub async fn get_crop_detail(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<CropDetail>> {
    let service = CropService::new(state.store);
    Ok(Json(service.get_detail(&crop_id).await?))
}

pub async fn create_crop(
    State(state): State<AppState>,
    payload: Result<Json<NewCrop>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Crop>)> {
    let Json(input) = payload?;
    let service = CropService::new(state.store);
    let crop = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(crop)))
}

pub async fn update_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
    payload: Result<Json<CropPatch>, JsonRejection>,
) -> AppResult<Json<Crop>> {
    let Json(patch) = payload?;
    let service = CropService::new(state.store);
    Ok(Json(service.update(&crop_id, patch).await?))
}

pub async fn delete_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = CropService::new(state.store);
    service.delete(&crop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
