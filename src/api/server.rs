//! HTTP Server
//!
//! Binds the listener, serves the router, and drains in-flight requests on
//! shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::{routes, ApiError, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// HTTP server for recordkv
///
/// Clones share the shutdown signal, so one clone can stop another.
#[derive(Clone)]
pub struct Server {
    config: Config,
    store: Arc<dyn Store>,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        Self {
            config,
            store,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Full router, request timeout included
    pub fn router(&self) -> Router {
        let state = AppState::new(Arc::clone(&self.store), self.config.store_timeout());
        routes(state).layer(middleware::from_fn_with_state(
            self.config.request_timeout(),
            request_deadline,
        ))
    }

    /// Bind the configured address and serve until `shutdown` is called
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.listen_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        tracing::info!("Listening on {}", listener.local_addr()?);

        let shutdown = Arc::clone(&self.shutdown);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await?;

        tracing::info!("Server drained");
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    ///
    /// Safe to call before `serve` starts waiting; the signal is kept.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Answer with the generic 500 when a request outlives `limit`
///
/// The handler future is dropped, which also cancels its pending store call.
async fn request_deadline(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!(%method, %uri, ?limit, "request timed out");
            ApiError::ServerError.into_response()
        }
    }
}
