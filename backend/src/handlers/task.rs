//! HTTP handlers for task endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use shared::tasks::{TaskBoard, TaskFilter};
use shared::{NewTask, Task, TaskPatch};

use crate::error::{AppError, AppResult};
use crate::services::TaskService;
use crate::AppState;

pub async fn list_tasks(State(state): State<AppState>) -> AppResult<Json<Vec<Task>>> {
    let service = TaskService::new(state.store);
    Ok(Json(service.get_all().await?))
}

/// Query parameters for the task board
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub filter: Option<String>,
}

/// Filtered, grouped task board as of today
pub async fn get_task_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> AppResult<Json<TaskBoard>> {
    let filter = match query.filter.as_deref() {
        None | Some("") => TaskFilter::default(),
        Some(raw) => raw
            .parse::<TaskFilter>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
    };
    let today = Local::now().date_naive();
    Ok(Json(state.pages().task_board(filter, today).await?))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.store);
    Ok(Json(service.get_by_id(&task_id).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let Json(input) = payload?;
    let service = TaskService::new(state.store);
    let task = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> AppResult<Json<Task>> {
    let Json(patch) = payload?;
    let service = TaskService::new(state.store);
    Ok(Json(service.update(&task_id, patch).await?))
}

/// Mark a task complete
pub async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.store);
    Ok(Json(service.complete(&task_id).await?))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = TaskService::new(state.store);
    service.delete(&task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
