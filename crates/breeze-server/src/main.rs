//! breeze server binary
//!
//! Binds the default address, prints the startup lines, and serves
//! until the process is interrupted. Diagnostics go to stderr through
//! tracing; stdout carries only the startup lines and the per-request
//! access log.

use breeze_core::{Server, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::default();
    let server = Server::bind(&config)?;
    info!(hostname = %config.hostname, port = config.port, "listener bound");

    println!("Server running on http://localhost:{}", config.port);
    println!("Press Ctrl+C to stop the server");

    server.serve().await?;
    Ok(())
}
