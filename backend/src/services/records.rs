//! Typed CRUD over one mapped table
//!
//! Entity services delegate here for the storage round trip: serialize the
//! UI-shape input, map it to storage columns, call the store, and map the
//! returned record back into the model type.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use shared::RecordId;

use crate::error::{AppError, AppResult};
use crate::storage::{record_id, FieldMap, Record, RecordStore};

pub struct Records<'a> {
    store: &'a RecordStore,
    map: &'static FieldMap,
}

/// Serialize an input DTO into a UI-shape object
pub fn to_object<T: Serialize>(value: &T) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::Internal(format!(
            "Expected an object, serialized {}",
            other
        ))),
        Err(e) => Err(AppError::Internal(format!("Failed to serialize input: {}", e))),
    }
}

impl<'a> Records<'a> {
    pub fn new(store: &'a RecordStore, map: &'static FieldMap) -> Self {
        Self { store, map }
    }

    fn decode<T: DeserializeOwned>(&self, record: &Record) -> AppResult<T> {
        let ui = self.map.to_ui(record);
        serde_json::from_value(Value::Object(ui)).map_err(|e| {
            AppError::Upstream(format!(
                "Malformed {} record {:?}: {}",
                self.map.entity,
                record_id(record),
                e
            ))
        })
    }

    /// Every record, newest first. Records that do not fit the model are
    /// logged and left out rather than failing the whole page.
    pub async fn list<T: DeserializeOwned>(&self) -> AppResult<Vec<T>> {
        let records = self.store.fetch_records(self.map).await?;
        Ok(records
            .iter()
            .filter_map(|record| match self.decode(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping record: {}", e);
                    None
                }
            })
            .collect())
    }

    pub fn coerce_id(&self, raw_id: &str) -> AppResult<RecordId> {
        self.store.coerce_id(self.map, raw_id)
    }

    pub async fn get<T: DeserializeOwned>(&self, raw_id: &str) -> AppResult<T> {
        let id = self.coerce_id(raw_id)?;
        let record = self.store.get_record(self.map, id).await?;
        self.decode(&record)
    }

    pub async fn create<T: DeserializeOwned>(&self, ui: &Map<String, Value>) -> AppResult<T> {
        let record = self.map.to_storage(ui);
        let created = self.store.create_record(self.map, record).await?;
        tracing::info!(
            "Created {} {:?}",
            self.map.entity,
            record_id(&created)
        );
        self.decode(&created)
    }

    pub async fn update<T: DeserializeOwned>(
        &self,
        raw_id: &str,
        ui: &Map<String, Value>,
    ) -> AppResult<T> {
        let id = self.coerce_id(raw_id)?;
        let record = self.map.to_storage(ui);
        let updated = self.store.update_record(self.map, id, record).await?;
        tracing::info!("Updated {} {}", self.map.entity, id);
        self.decode(&updated)
    }

    pub async fn delete(&self, raw_id: &str) -> AppResult<bool> {
        let id = self.coerce_id(raw_id)?;
        let deleted = self.store.delete_record(self.map, id).await?;
        tracing::info!("Deleted {} {}", self.map.entity, id);
        Ok(deleted)
    }
}
