//! Microservices dashboard frontend (v1)
//!
//! Renders the dashboard pages, proxies the user API to the backend and
//! serves the supply-chain security widgets.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               DASHBOARD FRONTEND             │
//!   Browser          │  ┌─────────┐   ┌────────────┐   ┌─────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│  handlers  │──▶│upstream │──┼──▶ Backend API
//!                    │  │ server  │   │pages / api │   │ client  │  │
//!                    │  └─────────┘   └─────┬──────┘   └─────────┘  │
//!                    │                      │                       │
//!                    │                      ▼                       │
//!                    │               ┌──────────────┐               │
//!                    │               │ supply_chain │ (mocked data) │
//!                    │               └──────────────┘               │
//!                    │  config · observability · security · views   │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dashboard_frontend::config::resolve_config;
use dashboard_frontend::lifecycle::{wait_for_signal, Shutdown};
use dashboard_frontend::observability::{logging, metrics};
use dashboard_frontend::HttpServer;

#[derive(Parser)]
#[command(name = "dashboard-frontend")]
#[command(about = "Frontend server for the microservices dashboard", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    logging::init_tracing(&config.observability)?;

    tracing::info!("dashboard-frontend v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        backend = %config.backend.base_url,
        environment = %config.server.environment,
        entities = config.catalog.entities.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
