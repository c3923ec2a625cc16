//! Task scheduling service

use shared::{validate_input, NewTask, Task, TaskPatch};

use crate::error::AppResult;
use crate::services::records::{to_object, Records};
use crate::storage::{mapping, RecordStore};

/// Task service for scheduled farm work
#[derive(Clone)]
pub struct TaskService {
    store: RecordStore,
}

impl TaskService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    fn records(&self) -> Records<'_> {
        Records::new(&self.store, &mapping::TASK)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Task>> {
        self.records().list().await
    }

    pub async fn get_by_id(&self, raw_id: &str) -> AppResult<Task> {
        self.records().get(raw_id).await
    }

    /// Create a task; the due date is stored date-only
    pub async fn create(&self, input: NewTask) -> AppResult<Task> {
        validate_input(&input)?;
        self.records().create(&to_object(&input)?).await
    }

    pub async fn update(&self, raw_id: &str, patch: TaskPatch) -> AppResult<Task> {
        validate_input(&patch)?;
        self.records().update(raw_id, &to_object(&patch)?).await
    }

    /// Mark a task done. Sends only the `completed` flag.
    pub async fn complete(&self, raw_id: &str) -> AppResult<Task> {
        self.update(raw_id, TaskPatch::completion()).await
    }

    pub async fn delete(&self, raw_id: &str) -> AppResult<bool> {
        self.records().delete(raw_id).await
    }
}
