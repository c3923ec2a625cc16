//! HTTP handlers for the finances page

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::finance::{FinanceOverview, TransactionFilter};
use shared::{parse_record_id, TransactionType};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for the finance summary. Empty values mean "all".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceQuery {
    pub farm_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl FinanceQuery {
    fn into_filter(self) -> AppResult<TransactionFilter> {
        let farm_id = match self.farm_id.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                parse_record_id(raw)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid farmId: {}", raw)))?,
            ),
        };
        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                raw.parse::<TransactionType>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            ),
        };
        Ok(TransactionFilter { farm_id, kind })
    }
}

/// Totals, monthly chart series and the filtered transaction list
pub async fn get_finance_summary(
    State(state): State<AppState>,
    Query(query): Query<FinanceQuery>,
) -> AppResult<Json<FinanceOverview>> {
    let filter = query.into_filter()?;
    Ok(Json(state.pages().finances(filter).await?))
}
