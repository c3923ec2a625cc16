//! HTTP handlers for transaction endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use shared::{NewTransaction, Transaction, TransactionPatch};

use crate::error::AppResult;
use crate::services::TransactionService;
use crate::AppState;

pub async fn list_transactions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Transaction>>> {
    let service = TransactionService::new(state.store);
    Ok(Json(service.get_all().await?))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let service = TransactionService::new(state.store);
    Ok(Json(service.get_by_id(&transaction_id).await?))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let Json(input) = payload?;
    let service = TransactionService::new(state.store);
    let transaction = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    payload: Result<Json<TransactionPatch>, JsonRejection>,
) -> AppResult<Json<Transaction>> {
    let Json(patch) = payload?;
    let service = TransactionService::new(state.store);
    Ok(Json(service.update(&transaction_id, patch).await?))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = TransactionService::new(state.store);
    service.delete(&transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
