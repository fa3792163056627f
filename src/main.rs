//! techsnacc-server entry point.
//!
//! Loads configuration, connects to PostgreSQL, and only then starts the
//! Axum HTTP server. Any startup failure exits with status 1.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use techsnacc_server::config::ServerConfig;
use techsnacc_server::domain::Lifecycle;
use techsnacc_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = ServerConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
    })?;
    tracing::info!(
        addr = %config.listen_addr(),
        origins = config.cors.allowed_origins.len(),
        "starting techsnacc-server"
    );

    let connect = server::connect_postgres(config.database.clone());
    server::run(config, Lifecycle::new(), connect, server::shutdown_signal())
        .await
        .context("techsnacc-server terminated")?;

    Ok(())
}
