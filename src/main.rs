//! growby - order-management REST service
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │   HTTP   │───▶│ Handlers │───▶│ Services │───▶│  Store   │
//! │  (axum)  │    │(validate)│    │ (rules)  │    │(pg / mem)│
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `growby [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;

use growby::config::AppConfig;
use growby::db::Database;
use growby::gateway::{self, state::AppState};
use growby::store::{Repositories, schema};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

/// PostgreSQL when configured, otherwise the in-memory store
async fn open_store(config: &AppConfig) -> anyhow::Result<Repositories> {
    let Some(url) = config.postgres_url.as_deref() else {
        tracing::warn!("⚠️  No postgres_url configured, using in-memory store (data is not persisted)");
        return Ok(Repositories::in_memory());
    };

    let db = Database::connect(url, config.max_connections)
        .await
        .context("Failed to connect to PostgreSQL")?;
    schema::init_schema(db.pool())
        .await
        .context("Failed to initialize schema")?;
    Ok(Repositories::postgres(db.into_pool()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let _log_guard = growby::logging::init_logging(&app_config);

    tracing::info!(
        "Starting growby {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    let repos = open_store(&app_config).await?;
    let state = Arc::new(AppState::new(repos));

    gateway::run_server(&app_config.gateway, state)
        .await
        .context("Server error")?;
    Ok(())
}
