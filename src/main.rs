//! nomadircd - runs one IRC session over stdin/stdout.
//!
//! Usage: `nomadircd [config.toml]`. Pair it with a socket activator
//! (inetd, systemd, socat) to serve network clients.

use std::sync::Arc;

use anyhow::Context as _;
use nomad_ircd::config::Config;
use nomad_ircd::handlers::Registry;
use nomad_ircd::network::Connection;
use nomad_ircd::state::Matrix;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the IRC stream, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        server = %config.server.name,
        network = %config.server.network,
        version = %config.server.version,
        "Starting nomadircd"
    );

    let matrix = Arc::new(Matrix::from_config(&config));
    let registry = Arc::new(Registry::new());

    Connection::new(
        matrix,
        registry,
        "stdio",
        tokio::io::stdin(),
        tokio::io::stdout(),
    )
    .run()
    .await
    .context("session I/O failed")?;

    info!("Session ended");
    Ok(())
}
