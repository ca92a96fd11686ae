//! recordkv Server Binary
//!
//! Connects to Redis and serves the record API over HTTP.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use recordkv::api::Server;
use recordkv::{Config, RedisStore, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// How long startup waits for the store to answer PING
const STORE_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// recordkv Server
#[derive(Parser, Debug)]
#[command(name = "recordkv-server")]
#[command(about = "HTTP record store with atomic counters on Redis")]
#[command(version)]
struct Args {
    /// Host to bind
    #[arg(long, env = "API_SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "API_SERVER_PORT", default_value = "8080")]
    port: u16,

    /// Redis address (host:port)
    #[arg(long, env = "REDIS_ADDR")]
    redis_addr: String,

    /// Redis password
    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    redis_password: String,

    /// Redis logical database index
    #[arg(long, env = "REDIS_DB", default_value = "0")]
    redis_db: i64,

    /// Per-command store timeout in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value = "1000")]
    store_timeout_ms: u64,

    /// Whole-request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "10000")]
    request_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,recordkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    // A missing .env file is fine; real env vars still apply
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    tracing::info!("recordkv Server v{}", recordkv::VERSION);

    // Build config from args
    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .request_timeout_ms(args.request_timeout_ms)
        .store_addr(&args.redis_addr)
        .store_password(&args.redis_password)
        .store_db(args.redis_db)
        .store_timeout_ms(args.store_timeout_ms)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Listen address: {}", config.listen_addr());
    tracing::info!("Redis address: {} (db {})", config.store_addr, config.store_db);

    // Open the shared store connection
    let store = match connect_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to connect to Redis: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Redis connection established");

    let server = Server::new(config, store);

    // Ctrl+C drains in-flight requests before exiting
    let handle = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, initiating shutdown...");
            handle.shutdown();
        }
    });

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

/// Connect and PING, giving up after `STORE_PING_TIMEOUT`
async fn connect_store(config: &Config) -> recordkv::Result<Arc<dyn Store>> {
    let ping = async {
        let store = RedisStore::connect(config).await?;
        store.ping().await?;
        Ok::<_, recordkv::StoreError>(store)
    };

    match tokio::time::timeout(STORE_PING_TIMEOUT, ping).await {
        Ok(store) => {
            let store: Arc<dyn Store> = Arc::new(store?);
            Ok(store)
        }
        Err(_) => Err(recordkv::StoreError::Timeout(STORE_PING_TIMEOUT).into()),
    }
}
