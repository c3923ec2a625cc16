//! Financial transaction service

use shared::{check_new_transaction, check_transaction_patch};
use shared::{NewTransaction, Transaction, TransactionPatch};

use crate::error::AppResult;
use crate::services::records::{to_object, Records};
use crate::storage::{mapping, RecordStore};

#[derive(Clone)]
pub struct TransactionService {
    store: RecordStore,
}

impl TransactionService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    fn records(&self) -> Records<'_> {
        Records::new(&self.store, &mapping::TRANSACTION)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Transaction>> {
        self.records().list().await
    }

    pub async fn get_by_id(&self, raw_id: &str) -> AppResult<Transaction> {
        self.records().get(raw_id).await
    }

    /// Record a transaction. Category and amount sign must agree with the
    /// transaction type.
    pub async fn create(&self, input: NewTransaction) -> AppResult<Transaction> {
        check_new_transaction(&input)?;
        self.records().create(&to_object(&input)?).await
    }

    /// Partial update, validated against the stored transaction so the
    /// merged type, category and amount stay consistent
    pub async fn update(&self, raw_id: &str, patch: TransactionPatch) -> AppResult<Transaction> {
        let current = self.get_by_id(raw_id).await?;
        check_transaction_patch(&current, &patch)?;
        self.records().update(raw_id, &to_object(&patch)?).await
    }

    pub async fn delete(&self, raw_id: &str) -> AppResult<bool> {
        self.records().delete(raw_id).await
    }
}
