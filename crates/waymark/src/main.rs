//! # Waymark - Scavenger Hunt Server
//!
//! Serves a fixed chain of password-gated locations. Each location has a QR
//! code linking to its page; admins can download every code as a zip.
//!
//! ## Architecture
//! ```text
//! Browser → Waymark (axum)
//!              ├─ Registry      (immutable catalog)
//!              ├─ Evaluator     (stateless unlock gate)
//!              └─ QrStore       (codes rendered once at startup)
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod auth;
mod config;
mod export;
mod hunt;
mod routes;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;
use waymark_common::constants::DEFAULT_CONFIG_PATH;

/// Waymark - Scavenger Hunt Server
#[derive(Parser, Debug)]
#[command(name = "waymark")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Listen port, applied to the configured address when --listen is unset
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Externally visible base URL encoded into QR codes (overrides config)
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Admin password for the QR export (overrides config)
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real env vars still apply
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("🗺️ Starting Waymark v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    info!(
        locations = config.hunt.locations.len(),
        credential_rule = ?config.hunt.credential_rule,
        "📋 Configuration loaded"
    );

    // Build catalog and render QR codes
    let state = AppState::new(config.clone())?;
    info!(
        entry = %state.registry.entry_id(),
        codes = state.qr_store.len(),
        base_url = %config.public_base_url(),
        "✅ Hunt ready"
    );

    if let Err(e) = state.ensure_rendered().await {
        let reason = format!("{e:#}");
        tracing::warn!(
            error = %reason,
            "QR codes not written to disk; export still served from memory"
        );
    }

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("🚀 Waymark listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Waymark shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
