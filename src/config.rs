//! Configuration for recordkv
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{KvError, Result};

/// Main configuration for a recordkv instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // HTTP Configuration
    // -------------------------------------------------------------------------
    /// Host to bind the HTTP listener to
    pub host: String,

    /// HTTP listen port
    pub port: u16,

    /// Upper bound on a whole request, body read included (milliseconds)
    pub request_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Redis address (host:port)
    pub store_addr: String,

    /// Redis password
    pub store_password: String,

    /// Redis logical database index
    pub store_db: i64,

    /// Upper bound on a single store command (milliseconds)
    pub store_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_ms: 10_000,
            store_addr: "127.0.0.1:6379".to_string(),
            store_password: String::new(),
            store_db: 0,
            store_timeout_ms: 1_000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Address the HTTP listener binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.store_addr.trim().is_empty() {
            return Err(KvError::Config("store address must be set".to_string()));
        }
        if self.store_password.is_empty() {
            return Err(KvError::Config("store password must be set".to_string()));
        }
        if self.store_timeout_ms == 0 {
            return Err(KvError::Config(
                "store timeout must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(KvError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the host the HTTP listener binds to
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the HTTP listen port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the whole-request timeout (in milliseconds)
    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.config.request_timeout_ms = ms;
        self
    }

    /// Set the Redis address (host:port)
    pub fn store_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.store_addr = addr.into();
        self
    }

    /// Set the Redis password
    pub fn store_password(mut self, password: impl Into<String>) -> Self {
        self.config.store_password = password.into();
        self
    }

    /// Set the Redis logical database index
    pub fn store_db(mut self, db: i64) -> Self {
        self.config.store_db = db;
        self
    }

    /// Set the per-command store timeout (in milliseconds)
    pub fn store_timeout_ms(mut self, ms: u64) -> Self {
        self.config.store_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
