//! post-relay
//!
//! Relays create/delete post requests to a microblogging API.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──▶ http::handlers ──▶ upstream::client ──▶ Upstream API
//!                 │                   │                   │
//!          request id, trace,   decode / echo,     OAuth 1.0a signing,
//!          timeout, body limit  error → status     timeout, status check
//! ```

use std::path::PathBuf;

use clap::Parser;

use post_relay::config::{self, RelayConfig};
use post_relay::lifecycle;
use post_relay::observability::init_logging;
use post_relay::upstream::Credentials;

#[derive(Parser)]
#[command(name = "post-relay")]
#[command(about = "Relay create/delete post requests to the upstream API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    init_logging(&config.observability);
    tracing::info!("post-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let credentials = Credentials::from_env();
    lifecycle::run(config, credentials).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
