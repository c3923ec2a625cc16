//! Record storage boundary
//!
//! Entity services talk to one of two interchangeable stores: in-memory
//! tables seeded from fixtures, or the hosted data platform. Both speak
//! storage-shape records (`*_c` columns) keyed by table name.

use serde_json::{Map, Value};
use shared::{parse_record_id, RecordId};

use crate::config::{Config, StorageBackend};
use crate::error::{AppError, AppResult};

pub mod mapping;
pub mod mock;
pub mod platform;

pub use mapping::FieldMap;
pub use mock::{Latency, MockStore};
pub use platform::PlatformClient;

/// A record in storage shape
pub type Record = Map<String, Value>;

/// Read the identity column of a storage record
pub fn record_id(record: &Record) -> Option<RecordId> {
    record.get(mapping::ID).and_then(Value::as_i64)
}

/// The configured record store
#[derive(Clone)]
pub enum RecordStore {
    Mock(MockStore),
    Platform(PlatformClient),
}

impl RecordStore {
    /// Build the store selected by configuration
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        match config.storage.backend {
            StorageBackend::Mock => {
                let store = MockStore::new(
                    config.storage.latency_min_ms,
                    config.storage.latency_max_ms,
                );
                store.load_fixtures(&config.storage.fixtures_dir).await?;
                Ok(RecordStore::Mock(store))
            }
            StorageBackend::Platform => {
                Ok(RecordStore::Platform(PlatformClient::new(&config.platform)))
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            RecordStore::Mock(_) => StorageBackend::Mock,
            RecordStore::Platform(_) => StorageBackend::Platform,
        }
    }

    /// Coerce a raw id. An unparseable id is simply absent from the mock
    /// tables, while the platform rejects the request outright.
    pub fn coerce_id(&self, map: &FieldMap, raw: &str) -> AppResult<RecordId> {
        parse_record_id(raw).ok_or_else(|| match self {
            RecordStore::Mock(_) => AppError::not_found(map.entity, raw),
            RecordStore::Platform(_) => {
                AppError::Upstream(format!("Invalid {} id: {}", map.entity, raw))
            }
        })
    }

    /// All records, newest (highest id) first
    pub async fn fetch_records(&self, map: &FieldMap) -> AppResult<Vec<Record>> {
        match self {
            RecordStore::Mock(store) => store.fetch_records(map).await,
            RecordStore::Platform(client) => client.fetch_records(map).await,
        }
    }

    pub async fn get_record(&self, map: &FieldMap, id: RecordId) -> AppResult<Record> {
        match self {
            RecordStore::Mock(store) => store.get_record(map, id).await,
            RecordStore::Platform(client) => client.get_record(map, id).await,
        }
    }

    pub async fn create_record(&self, map: &FieldMap, record: Record) -> AppResult<Record> {
        match self {
            RecordStore::Mock(store) => store.create_record(map, record).await,
            RecordStore::Platform(client) => client.create_record(map, record).await,
        }
    }

    /// Partial update: only the columns present in `record` change
    pub async fn update_record(
        &self,
        map: &FieldMap,
        id: RecordId,
        record: Record,
    ) -> AppResult<Record> {
        match self {
            RecordStore::Mock(store) => store.update_record(map, id, record).await,
            RecordStore::Platform(client) => client.update_record(map, id, record).await,
        }
    }

    pub async fn delete_record(&self, map: &FieldMap, id: RecordId) -> AppResult<bool> {
        match self {
            RecordStore::Mock(store) => store.delete_record(map, id).await,
            RecordStore::Platform(client) => client.delete_record(map, id).await,
        }
    }
}
