//! Request handlers
//!
//! One handler per route. Each decodes and validates its input, calls the
//! record model, and wraps the outcome in the envelope. Store errors reach
//! the client only as a generic 500.

use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::Method;
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;

use super::body::read_json;
use super::response::{ApiError, Envelope};
use super::AppState;
use crate::error::KvError;
use crate::record::{Operation, RecordInput};
use crate::validator::Validator;

type ApiResult = Result<Json<Envelope>, ApiError>;

/// Body of increment-by / decrement-by
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TermInput {
    #[serde(default)]
    term: Option<i64>,
}

/// A key that fails to extract from the path is treated as an unknown route
fn read_key(key: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    key.map(|Path(key)| key).map_err(|_| ApiError::NotFound)
}

// =============================================================================
// Create / Show / Delete
// =============================================================================

/// POST /record, POST /set
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let input: RecordInput = read_json(body)?;
    let record = input.into_record().map_err(KvError::Validation)?;

    state.records.insert(&record).await?;

    Ok(Json(Envelope::message("record successfully created")))
}

/// GET /record/{key}, GET /get/{key}
pub async fn show_record(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let key = read_key(key)?;
    let record = state.records.get(&key).await?;

    Ok(Json(Envelope::Record(record)))
}

/// DELETE /record/{key}
pub async fn delete_record(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let key = read_key(key)?;
    state.records.delete(&key).await?;

    Ok(Json(Envelope::message("record successfully deleted")))
}

// =============================================================================
// Counters
// =============================================================================

/// PUT /record/{key}/increment
pub async fn increment_record(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let key = read_key(key)?;
    change_record(&state, &key, Operation::Increase, None).await
}

/// PUT /record/{key}/decrement
pub async fn decrement_record(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let key = read_key(key)?;
    change_record(&state, &key, Operation::Decrease, None).await
}

/// PUT /record/{key}/increment-by
pub async fn increment_record_by(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let key = read_key(key)?;
    change_record(&state, &key, Operation::Increase, Some(body)).await
}

/// PUT /record/{key}/decrement-by
pub async fn decrement_record_by(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let key = read_key(key)?;
    change_record(&state, &key, Operation::Decrease, Some(body)).await
}

/// Shared counter flow
///
/// The record must exist before the atomic update runs. A concurrent delete
/// between the two calls can still slip through; the store then recreates
/// the key from zero. Without a body the term is 1, with one the body must
/// carry an explicit `term`.
async fn change_record(
    state: &AppState,
    key: &str,
    operation: Operation,
    body: Option<Result<Bytes, BytesRejection>>,
) -> ApiResult {
    let record = state.records.get(key).await?;

    let term = match body {
        None => 1,
        Some(body) => {
            let input: TermInput = read_json(body)?;

            let Some(term) = input.term else {
                let mut v = Validator::new();
                v.add_error("term", "must be provided");
                return Err(KvError::Validation(v.into_errors()).into());
            };
            term
        }
    };

    state.records.update(&record, operation, term).await?;

    Ok(Json(Envelope::message(format!(
        "record {} by {term}",
        operation.verb()
    ))))
}

// =============================================================================
// Fallbacks
// =============================================================================

/// Any path outside the routing table
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known path, method without a handler
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
