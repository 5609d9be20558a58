//! HTTP event log service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ trace ─▶ reference_id ─▶ recover ─▶ router
//!                                                          │
//!                                                          ▼
//!                                                  capture_transaction
//!                                                          │
//!                                                          ▼
//!                                          handler ─▶ OutboundClient ─▶ Downstream
//!                                                          │
//!                                                          ▼
//!                                                    EventLogger ─▶ Sink (stdout / file)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_event_log::config::{load_config, ServiceConfig};
use http_event_log::observability::logging::init_diagnostics;
use http_event_log::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "http-event-log")]
#[command(about = "HTTP service with structured JSON event logging", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_diagnostics();
    let cli = Cli::parse();

    tracing::info!("http-event-log v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        sink = ?config.event_log.sink,
        downstream = %config.downstream.url,
        "Configuration loaded"
    );

    let logger = config.event_log.build_logger()?;
    let server = HttpServer::new(config, logger)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
