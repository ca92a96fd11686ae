//! Error types for recordkv
//!
//! Provides a unified error type for all operations.

use std::time::Duration;

use thiserror::Error;

use crate::validator::ValidationErrors;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for recordkv operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("failed validation: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("record not found")]
    RecordNotFound,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures reported by (or while talking to) the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("stored value for key {key:?} is not an integer: {value:?}")]
    Malformed { key: String, value: String },

    #[error("{0}")]
    Backend(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}
