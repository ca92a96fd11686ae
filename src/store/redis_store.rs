//! Redis-backed store
//!
//! One `ConnectionManager` is opened at startup and cloned per command. The
//! manager multiplexes commands over a single connection and reconnects on
//! failure, so there is no per-request connection lifecycle.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, IntoConnectionInfo};

use super::{Store, StoreResult};
use crate::config::Config;
use crate::error::StoreError;

/// Store backed by a Redis server
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect using the store settings from `config`
    ///
    /// Does not PING; callers decide how long to wait for the server.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let mut info = format!("redis://{}", config.store_addr).into_connection_info()?;
        info.redis.db = config.store_db;
        if !config.store_password.is_empty() {
            info.redis.password = Some(config.store_password.clone());
        }

        let client = Client::open(info)?;
        let manager = ConnectionManager::new(client).await?;

        tracing::debug!(
            addr = %config.store_addr,
            db = config.store_db,
            "Redis connection manager ready"
        );

        Ok(Self { manager })
    }

    fn conn(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = self.conn().get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _: () = self.conn().set(key, value).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<u64> {
        let removed: u64 = self.conn().del(key).await?;
        Ok(removed)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        // AsyncCommands::incr issues INCRBY
        let value: i64 = self.conn().incr(key, delta).await?;
        Ok(value)
    }

    async fn decr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        // AsyncCommands::decr issues DECRBY
        let value: i64 = self.conn().decr(key, delta).await?;
        Ok(value)
    }

    async fn ping(&self) -> StoreResult<()> {
        let reply: String = redis::cmd("PING").query_async(&mut self.conn()).await?;
        if reply != "PONG" {
            return Err(StoreError::Backend(format!(
                "unexpected PING reply: {reply}"
            )));
        }
        Ok(())
    }
}
