//! Hosted data platform client
//!
//! One fresh HTTP round trip per call, no caching and no retries. Responses
//! arrive in a common envelope; interpreting it is kept in plain functions
//! so the failure rules can be tested without a server.

use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{FieldError, RecordId};

use super::mapping::{FieldMap, ID};
use super::Record;
use crate::config::PlatformConfig;
use crate::error::{AppError, AppResult};

const PROJECT_HEADER: &str = "X-Project-Id";
const PUBLIC_KEY_HEADER: &str = "X-Public-Key";

/// Data platform API client
#[derive(Clone)]
pub struct PlatformClient {
    client: Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

/// Response envelope shared by every platform operation
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,
}

/// Per-record outcome of a write
#[derive(Debug, Default, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Record>,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PlatformClient {
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        }
    }

    fn table_url(&self, map: &FieldMap, suffix: &str) -> String {
        format!("{}/tables/{}/records{}", self.base_url, map.table, suffix)
    }

    async fn send(&self, method: Method, url: String, body: Value) -> AppResult<Envelope> {
        let response = self
            .client
            .request(method, &url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Platform request to {} failed: {}", url, e);
                AppError::Upstream(format!("Data platform request failed: {}", e))
            })?;

        let status = response.status();
        let envelope = response.json::<Envelope>().await.map_err(|e| {
            tracing::error!("Unreadable platform response ({}) from {}: {}", status, url, e);
            AppError::Upstream(format!("Failed to parse data platform response: {}", e))
        })?;

        if !status.is_success() && envelope.success {
            return Err(AppError::Upstream(format!("Data platform error: {}", status)));
        }
        Ok(envelope)
    }

    fn field_params(map: &FieldMap) -> Vec<Value> {
        map.columns()
            .into_iter()
            .map(|name| json!({ "field": { "Name": name } }))
            .collect()
    }

    pub async fn fetch_records(&self, map: &FieldMap) -> AppResult<Vec<Record>> {
        let body = json!({
            "fields": Self::field_params(map),
            "orderBy": [{ "fieldName": ID, "sorttype": "DESC" }],
        });
        let envelope = self
            .send(Method::POST, self.table_url(map, "/query"), body)
            .await?;
        interpret_list(map, envelope)
    }

    pub async fn get_record(&self, map: &FieldMap, id: RecordId) -> AppResult<Record> {
        let body = json!({ "fields": Self::field_params(map) });
        let envelope = self
            .send(Method::POST, self.table_url(map, &format!("/{}/query", id)), body)
            .await?;
        interpret_single(map, id, envelope)
    }

    pub async fn create_record(&self, map: &FieldMap, record: Record) -> AppResult<Record> {
        let body = json!({ "records": [record] });
        let envelope = self.send(Method::POST, self.table_url(map, ""), body).await?;
        interpret_write(map, "create", envelope)
    }

    pub async fn update_record(
        &self,
        map: &FieldMap,
        id: RecordId,
        mut record: Record,
    ) -> AppResult<Record> {
        record.insert(ID.to_string(), Value::from(id));
        let body = json!({ "records": [record] });
        let envelope = self.send(Method::PUT, self.table_url(map, ""), body).await?;
        interpret_write(map, "update", envelope)
    }

    pub async fn delete_record(&self, map: &FieldMap, id: RecordId) -> AppResult<bool> {
        let body = json!({ "RecordIds": [id] });
        let envelope = self.send(Method::DELETE, self.table_url(map, ""), body).await?;
        interpret_delete(map, envelope)
    }
}

fn envelope_failure(map: &FieldMap, action: &str, message: Option<String>) -> AppError {
    let message =
        message.unwrap_or_else(|| format!("Failed to {} {} records", action, map.entity));
    tracing::error!("Error during {} on {}: {}", action, map.table, message);
    AppError::Upstream(message)
}

/// List response: `data` holds the records
pub fn interpret_list(map: &FieldMap, envelope: Envelope) -> AppResult<Vec<Record>> {
    if !envelope.success {
        return Err(envelope_failure(map, "fetch", envelope.message));
    }
    match envelope.data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rows)) => rows
            .into_iter()
            .map(|row| match row {
                Value::Object(record) => Ok(record),
                other => Err(AppError::Upstream(format!(
                    "Unexpected {} record: {}",
                    map.entity, other
                ))),
            })
            .collect(),
        Some(other) => Err(AppError::Upstream(format!(
            "Unexpected {} list payload: {}",
            map.entity, other
        ))),
    }
}

/// Single-record response; an empty `data` means the id does not exist
pub fn interpret_single(map: &FieldMap, id: RecordId, envelope: Envelope) -> AppResult<Record> {
    if !envelope.success {
        return Err(envelope_failure(map, "fetch", envelope.message));
    }
    match envelope.data {
        Some(Value::Object(record)) => Ok(record),
        _ => Err(AppError::not_found(map.entity, id)),
    }
}

/// Create/update response. The first failed result decides the error:
/// field errors become a validation failure, anything else is upstream.
pub fn interpret_write(map: &FieldMap, action: &str, envelope: Envelope) -> AppResult<Record> {
    if !envelope.success {
        return Err(envelope_failure(map, action, envelope.message));
    }

    let results = envelope.results.unwrap_or_default();
    let (succeeded, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.success);

    if let Some(failure) = failed.into_iter().next() {
        tracing::error!(
            "Failed to {} {} record: {:?}",
            action,
            map.entity,
            failure.errors
        );
        return match failure.errors {
            Some(errors) if !errors.is_empty() => Err(AppError::Validation(errors)),
            _ => Err(envelope_failure(map, action, failure.message)),
        };
    }

    succeeded
        .into_iter()
        .find_map(|r| r.data)
        .ok_or_else(|| {
            AppError::Upstream(format!(
                "Data platform returned no {} record after {}",
                map.entity, action
            ))
        })
}

/// Delete response; succeeds only when exactly one record went away
pub fn interpret_delete(map: &FieldMap, envelope: Envelope) -> AppResult<bool> {
    if !envelope.success {
        return Err(envelope_failure(map, "delete", envelope.message));
    }

    let Some(results) = envelope.results else {
        return Ok(true);
    };

    if let Some(failure) = results.iter().find(|r| !r.success) {
        return Err(envelope_failure(map, "delete", failure.message.clone()));
    }
    Ok(results.iter().filter(|r| r.success).count() == 1)
}
