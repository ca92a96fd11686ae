//! Record operations
//!
//! Runs single-key commands against the store and classifies the outcome.
//! Classification happens here exactly once: an absent key becomes
//! `KvError::RecordNotFound`, everything else the store reports becomes
//! `KvError::Store`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::{Operation, Record};
use crate::error::{KvError, Result, StoreError};
use crate::store::{Store, StoreResult};

/// Record operations over a shared store handle
///
/// Holds no record state; every call goes to the store.
#[derive(Clone)]
pub struct Records {
    /// Backing store (shared by every request)
    store: Arc<dyn Store>,

    /// Upper bound on each store command
    timeout: Duration,
}

impl Records {
    pub fn new(store: Arc<dyn Store>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Upsert `record`: unconditional SET, no expiry
    pub async fn insert(&self, record: &Record) -> Result<()> {
        let value = record.value.to_string();
        self.bounded(self.store.set(&record.key, &value)).await?;

        tracing::debug!(key = %record.key, value = record.value, "record stored");
        Ok(())
    }

    /// Fetch the current value of `key`
    pub async fn get(&self, key: &str) -> Result<Record> {
        let raw = self
            .bounded(self.store.get(key))
            .await?
            .ok_or(KvError::RecordNotFound)?;

        let value = raw.parse::<i64>().map_err(|_| StoreError::Malformed {
            key: key.to_string(),
            value: raw.clone(),
        })?;

        Ok(Record::new(key, value))
    }

    /// Remove `key`; zero keys removed means it never existed
    pub async fn delete(&self, key: &str) -> Result<()> {
        let removed = self.bounded(self.store.del(key)).await?;
        if removed == 0 {
            return Err(KvError::RecordNotFound);
        }

        tracing::debug!(key, "record deleted");
        Ok(())
    }

    /// Atomically add or subtract `term` using the store's counter commands
    ///
    /// Returns the record with the value the store reports after the update.
    /// Redis creates missing counters at zero, so absence has to be checked
    /// with `get` beforehand.
    pub async fn update(&self, record: &Record, operation: Operation, term: i64) -> Result<Record> {
        let value = match operation {
            Operation::Increase => self.bounded(self.store.incr_by(&record.key, term)).await?,
            Operation::Decrease => self.bounded(self.store.decr_by(&record.key, term)).await?,
        };

        tracing::debug!(
            key = %record.key,
            ?operation,
            term,
            value,
            "record updated"
        );
        Ok(Record::new(record.key.clone(), value))
    }

    /// Run one store command under the configured timeout
    async fn bounded<T, F>(&self, command: F) -> Result<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StoreError::Timeout(self.timeout).into()),
        }
    }
}
