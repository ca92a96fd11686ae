//! API Module
//!
//! HTTP surface over the record model.
//!
//! ## Routing Table
//! ```text
//! POST    /record                      create (also POST /set)
//! GET     /record/{key}                show   (also GET /get/{key})
//! DELETE  /record/{key}                delete
//! PUT     /record/{key}/increment      +1
//! PUT     /record/{key}/decrement      -1
//! PUT     /record/{key}/increment-by   +term  body: {"term": int64}
//! PUT     /record/{key}/decrement-by   -term  body: {"term": int64}
//! ```
//!
//! ## Status Codes
//! - 200: success envelope
//! - 400: undecodable body or failed validation
//! - 404: unknown route or absent record
//! - 405: known path, wrong method
//! - 500: store failure or handler panic

mod body;
mod handlers;
mod response;
mod server;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::record::Records;
use crate::store::Store;

pub use body::{read_json, MAX_BODY_BYTES};
pub use response::{panic_response, ApiError, Envelope};
pub use server::Server;

/// State shared by every handler
///
/// Cheap to clone; the store behind it is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub records: Records,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, store_timeout: Duration) -> Self {
        Self {
            records: Records::new(store, store_timeout),
        }
    }
}

/// Build the router with the fixed routing table
///
/// Panics inside a handler are caught and answered with a 500; the
/// process keeps serving other requests.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/record", post(handlers::create_record))
        .route("/set", post(handlers::create_record))
        .route(
            "/record/{key}",
            get(handlers::show_record).delete(handlers::delete_record),
        )
        .route("/get/{key}", get(handlers::show_record))
        .route("/record/{key}/increment", put(handlers::increment_record))
        .route("/record/{key}/decrement", put(handlers::decrement_record))
        .route(
            "/record/{key}/increment-by",
            put(handlers::increment_record_by),
        )
        .route(
            "/record/{key}/decrement-by",
            put(handlers::decrement_record_by),
        )
        // Must follow the routes it applies to
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
