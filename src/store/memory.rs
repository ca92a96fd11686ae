//! In-memory store
//!
//! HashMap wrapped in a parking_lot RwLock. Reads share the lock, every
//! mutation (counters included) takes the write lock, so INCRBY/DECRBY are
//! atomic the same way they are inside Redis.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Store, StoreResult};
use crate::error::StoreError;

/// In-process store with Redis command semantics
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Apply `delta` to the counter at `key`, creating it at 0 when missing
    fn apply_delta(&self, key: &str, delta: i64, op: &str) -> StoreResult<i64> {
        let mut data = self.data.write();

        let current = match data.get(key) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                StoreError::Backend("value is not an integer or out of range".to_string())
            })?,
            None => 0,
        };

        let next = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::Backend(format!("{op} would overflow")))?;

        data.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<u64> {
        Ok(u64::from(self.data.write().remove(key).is_some()))
    }

    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.apply_delta(key, delta, "increment")
    }

    async fn decr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        let delta = delta
            .checked_neg()
            .ok_or_else(|| StoreError::Backend("decrement would overflow".to_string()))?;
        self.apply_delta(key, delta, "decrement")
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
