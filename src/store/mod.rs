//! Store Module
//!
//! The key-value engine the record model talks to.
//!
//! ## Responsibilities
//! - Single-key commands only: GET, SET, DEL, INCRBY, DECRBY
//! - Values are stored as decimal text, the way Redis keeps counters
//! - Counter commands are atomic inside the store
//!
//! ## Implementations
//! - `RedisStore`: production backend over a shared connection manager
//! - `MemoryStore`: in-process map with the same command semantics

mod memory;
mod redis_store;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Result of a single store command
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Single-key command surface of the backing store
///
/// Object-safe, so handlers hold it as `Arc<dyn Store>`.
#[async_trait]
pub trait Store: Send + Sync {
    /// GET: raw stored text, `None` when the key does not exist
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// SET without expiry, overwriting any existing value
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// DEL: number of keys removed
    async fn del(&self, key: &str) -> StoreResult<u64>;

    /// INCRBY: value after the increment
    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64>;

    /// DECRBY: value after the decrement
    async fn decr_by(&self, key: &str, delta: i64) -> StoreResult<i64>;

    /// PING, used as a startup health check
    async fn ping(&self) -> StoreResult<()>;
}
