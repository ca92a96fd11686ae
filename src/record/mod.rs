//! Record Module
//!
//! The record entity, its validation rules, and the model that runs record
//! operations against a store.
//!
//! ## Record Rules
//! - `key`: non-empty, at most 28 bytes
//! - `value`: signed 64-bit integer, always supplied explicitly (zero is a
//!   real value, not "unset")

mod model;

use serde::{Deserialize, Serialize};

use crate::validator::{ValidationErrors, Validator};

pub use model::Records;

/// Longest accepted key, in bytes
pub const MAX_KEY_LEN: usize = 28;

/// A key/integer-value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: i64,
}

impl Record {
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A record as submitted by a client, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordInput {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub value: Option<i64>,
}

impl RecordInput {
    /// Validate and convert into a `Record`
    pub fn into_record(self) -> Result<Record, ValidationErrors> {
        let mut v = Validator::new();
        validate_record(&mut v, &self.key, self.value);

        match self.value {
            Some(value) if v.valid() => Ok(Record::new(self.key, value)),
            _ => Err(v.into_errors()),
        }
    }
}

/// Direction of an atomic counter update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Increase,
    Decrease,
}

impl Operation {
    /// Past-tense verb used in response messages
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Increase => "incremented",
            Operation::Decrease => "decremented",
        }
    }
}

/// Check a candidate record
///
/// `value` is an `Option` so that a missing value can be told apart from an
/// explicit zero.
pub fn validate_record(v: &mut Validator, key: &str, value: Option<i64>) {
    v.check(!key.is_empty(), "key", "must be provided");
    v.check(
        key.len() <= MAX_KEY_LEN,
        "key",
        "must not be more than 28 bytes long",
    );
    v.check(value.is_some(), "value", "must be provided");
}
