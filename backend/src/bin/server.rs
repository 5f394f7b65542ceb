//! Device API HTTP Server Binary
//!
//! Loads configuration, selects the repository backend and serves the REST
//! API until the process is stopped.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin device-server
//!
//! # Run with the durable redb repository
//! REPOSITORY_TYPE=kv KV_PATH=data/devices.redb KV_TABLE=devices \
//!   cargo run --bin device-server
//! ```
//!
//! # Environment Variables
//!
//! - `RUNNING_MODE`: `local` or `server` (default: local)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `memory` or `kv` (default: memory)
//! - `KV_PATH`, `KV_TABLE`: durable database file and table (required for kv)
//! - `REPOSITORY_CONFIG`: path to a `repository.toml`, overrides the above
//! - `RUST_LOG`: Log filter directives, e.g. `debug` or `device_api=debug` (default: info)
//!
//! Variables may also be placed in a `.env` file in the working directory.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use device_api::config::AppConfig;
use device_api::db::RepositoryFactory;
use device_api::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = AppConfig::from_env().context("invalid server configuration")?;
    info!("Starting device API server in {} mode", config.run_mode);

    let repository = RepositoryFactory::from_env().context("failed to initialize repository")?;
    info!("Repository initialized successfully");

    let app = create_router(AppState::new(repository));

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
