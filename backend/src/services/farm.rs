//! Farm management service

use chrono::Utc;
use serde_json::Value;
use shared::{validate_input, Farm, FarmPatch, NewFarm};

use crate::error::AppResult;
use crate::services::records::{to_object, Records};
use crate::storage::{mapping, RecordStore};

/// Farm service for managing farm properties
#[derive(Clone)]
pub struct FarmService {
    store: RecordStore,
}

impl FarmService {
    /// Create a new FarmService instance
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    fn records(&self) -> Records<'_> {
        Records::new(&self.store, &mapping::FARM)
    }

    /// All farms, newest first
    pub async fn get_all(&self) -> AppResult<Vec<Farm>> {
        self.records().list().await
    }

    pub async fn get_by_id(&self, raw_id: &str) -> AppResult<Farm> {
        self.records().get(raw_id).await
    }

    /// Create a farm, stamping its creation time
    pub async fn create(&self, input: NewFarm) -> AppResult<Farm> {
        validate_input(&input)?;

        let mut ui = to_object(&input)?;
        ui.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        self.records().create(&ui).await
    }

    /// Partial update; `createdAt` is never touched
    pub async fn update(&self, raw_id: &str, patch: FarmPatch) -> AppResult<Farm> {
        validate_input(&patch)?;

        self.records().update(raw_id, &to_object(&patch)?).await
    }

    /// Delete a farm. Crops, tasks and transactions that reference it are
    /// left in place.
    pub async fn delete(&self, raw_id: &str) -> AppResult<bool> {
        self.records().delete(raw_id).await
    }
}
