//! In-memory record store
//!
//! Tables live behind one `RwLock` and are seeded from UI-shape JSON
//! fixtures at startup. Every call sleeps for a random delay inside the
//! configured bounds so the UI sees realistic loading states.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde_json::{Map, Value};
use shared::RecordId;
use tokio::sync::RwLock;

use super::mapping::{self, FieldMap};
use super::{record_id, Record};
use crate::error::{AppError, AppResult};

/// Fixture file per table
fn fixtures() -> [(&'static FieldMap, &'static str); 4] {
    [
        (&mapping::FARM, "farms.json"),
        (&mapping::CROP, "crops.json"),
        (&mapping::TASK, "tasks.json"),
        (&mapping::TRANSACTION, "transactions.json"),
    ]
}

/// Simulated response time, drawn uniformly per call
#[derive(Debug, Clone, Copy, Default)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms,
            max_ms: max_ms.max(min_ms),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    fn pick(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    pub async fn wait(&self) {
        let delay = self.pick();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// One table's rows and the next id it will mint. `next_id` only grows,
/// so ids freed by deletes are never handed out again.
#[derive(Debug, Default)]
struct Table {
    rows: Vec<Record>,
    next_id: RecordId,
}

impl Table {
    fn mint(&mut self) -> RecordId {
        let floor = self.rows.iter().filter_map(record_id).max().unwrap_or(0) + 1;
        let id = self.next_id.max(floor);
        self.next_id = id + 1;
        id
    }
}

#[derive(Clone)]
pub struct MockStore {
    tables: Arc<RwLock<HashMap<&'static str, Table>>>,
    latency: Latency,
}

impl MockStore {
    pub fn new(latency_min_ms: u64, latency_max_ms: u64) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            latency: Latency::new(latency_min_ms, latency_max_ms),
        }
    }

    /// Store without simulated latency
    pub fn instant() -> Self {
        Self::new(0, 0)
    }

    /// Seed every table from `dir`. Missing fixture files leave the table empty.
    pub async fn load_fixtures(&self, dir: impl AsRef<Path>) -> AppResult<()> {
        let dir = dir.as_ref();
        for (map, file) in fixtures() {
            let path = dir.join(file);
            if !path.exists() {
                tracing::warn!("Fixture {} not found, {} starts empty", path.display(), map.table);
                continue;
            }

            let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AppError::Configuration(format!("Cannot read {}: {}", path.display(), e))
            })?;
            let rows: Vec<Map<String, Value>> = serde_json::from_str(&raw).map_err(|e| {
                AppError::Configuration(format!("Malformed fixture {}: {}", path.display(), e))
            })?;

            let count = rows.len();
            self.seed(map, rows).await;
            tracing::info!("Seeded {} with {} records", map.table, count);
        }
        Ok(())
    }

    /// Replace a table with UI-shape rows, keeping their ids
    pub async fn seed(&self, map: &FieldMap, rows: Vec<Map<String, Value>>) {
        let records: Vec<Record> = rows
            .into_iter()
            .map(|row| {
                let mut record = map.to_storage(&row);
                if let Some(id) = row.get(mapping::ID) {
                    record.insert(mapping::ID.to_string(), id.clone());
                }
                record
            })
            .collect();
        let next_id = records.iter().filter_map(record_id).max().unwrap_or(0) + 1;
        self.tables.write().await.insert(
            map.table,
            Table {
                rows: records,
                next_id,
            },
        );
    }

    pub async fn fetch_records(&self, map: &FieldMap) -> AppResult<Vec<Record>> {
        self.latency.wait().await;
        let tables = self.tables.read().await;
        let mut records = tables
            .get(map.table)
            .map(|t| t.rows.clone())
            .unwrap_or_default();
        records.sort_by_key(|r| std::cmp::Reverse(record_id(r)));
        Ok(records)
    }

    pub async fn get_record(&self, map: &FieldMap, id: RecordId) -> AppResult<Record> {
        self.latency.wait().await;
        let tables = self.tables.read().await;
        tables
            .get(map.table)
            .and_then(|t| t.rows.iter().find(|r| record_id(r) == Some(id)))
            .cloned()
            .ok_or_else(|| AppError::not_found(map.entity, id))
    }

    pub async fn create_record(&self, map: &FieldMap, mut record: Record) -> AppResult<Record> {
        self.latency.wait().await;
        let mut tables = self.tables.write().await;
        let table = tables.entry(map.table).or_default();

        let next_id = table.mint();
        record.insert(mapping::ID.to_string(), Value::from(next_id));
        table.rows.push(record.clone());

        tracing::debug!("Created {} {}", map.entity, next_id);
        Ok(record)
    }

    /// Shallow merge of the supplied columns
    pub async fn update_record(
        &self,
        map: &FieldMap,
        id: RecordId,
        changes: Record,
    ) -> AppResult<Record> {
        self.latency.wait().await;
        let mut tables = self.tables.write().await;
        let existing = tables
            .get_mut(map.table)
            .and_then(|t| t.rows.iter_mut().find(|r| record_id(r) == Some(id)))
            .ok_or_else(|| AppError::not_found(map.entity, id))?;

        for (column, value) in changes {
            if column != mapping::ID {
                existing.insert(column, value);
            }
        }
        Ok(existing.clone())
    }

    pub async fn delete_record(&self, map: &FieldMap, id: RecordId) -> AppResult<bool> {
        self.latency.wait().await;
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(map.table)
            .ok_or_else(|| AppError::not_found(map.entity, id))?;
        let index = table
            .rows
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or_else(|| AppError::not_found(map.entity, id))?;
        table.rows.remove(index);
        Ok(true)
    }
}
