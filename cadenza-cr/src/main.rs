//! Composer Registry (cadenza-cr) - Main entry point
//!
//! Serves the composer and piece catalog over HTTP. Records are loaded from
//! JSON seed files at startup and held in memory; edits are never written
//! back to disk.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cadenza_common::config::{ensure_data_folder, Config};
use cadenza_cr::{build_router, store, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for cadenza-cr
#[derive(Parser, Debug)]
#[command(name = "cadenza-cr")]
#[command(about = "Composer Registry microservice for Cadenza")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "CADENZA_CR_PORT")]
    port: Option<u16>,

    /// Folder containing composers.json and pieces.json (overrides config file)
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Path to TOML config file
    #[arg(short, long, env = "CADENZA_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Resolve configuration before tracing init so the configured log level
    // can seed the subscriber; RUST_LOG still takes precedence
    let config = Config::resolve(args.data_folder, args.port, args.config.as_deref())
        .context("Failed to resolve configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Cadenza Composer Registry (cadenza-cr) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Data folder holds the JSON seed files
    ensure_data_folder(&config.data_folder).context("Failed to create data folder")?;
    info!("Data folder: {}", config.data_folder.display());

    // Load the catalog; missing seed files start empty, malformed ones are fatal
    let registry = match store::load_registry(&config.data_folder) {
        Ok(registry) => {
            info!(
                "✓ Catalog ready ({} composers, {} pieces)",
                registry.composer_count(),
                registry.piece_count()
            );
            registry
        }
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            return Err(e.into());
        }
    };

    // Create application state and router
    let state = AppState::new(registry);
    let app = build_router(state);

    // Start server on the configured port
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("cadenza-cr listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
