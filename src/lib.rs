//! # recordkv
//!
//! An HTTP record store with:
//! - Integer records addressed by short string keys
//! - Atomic increment/decrement through the store's counter commands
//! - Redis as the system of record (in-memory store for tests)
//! - Bounded store calls and per-request panic containment
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │                (one task per request)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   API Layer                                  │
//! │     decode → validate → call model → envelope / error        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Record Model                                │
//! │    bounded store calls, not-found vs store error             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RedisStore  │          │ MemoryStore │
//!   │ (conn mgr)  │          │  (RwLock)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod validator;

pub mod store;
pub mod record;
pub mod api;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result, StoreError};
pub use config::Config;
pub use record::{Operation, Record, Records};
pub use store::{MemoryStore, RedisStore, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of recordkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
