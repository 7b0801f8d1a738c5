//! Application entry point for the `codemetal-socialpulse` dashboard service.
//!
//! This binary orchestrates the full startup sequence for the dashboard API,
//! including:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Creating the in-memory dataset session store
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `DASHBOARD_BIND_ADDR` (optional) – listen address (default: `0.0.0.0:8080`)
//! - `MAX_UPLOAD_BYTES` (optional) – upload size limit (default: 10 MiB)
//! - `MAX_SESSIONS` (optional) – datasets kept in memory (default: 64)
//! - `DASHBOARD_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `DASHBOARD_SPAN_EVENTS` (optional) – span event mode for tracing
use std::env;

use anyhow::{Context, Result};
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;

use socialpulse::{config, routes, SessionStore};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let store = SessionStore::new(cfg.max_sessions);
    let addr = cfg.bind_addr;

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(store, cfg);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `DASHBOARD_LOG_LEVEL` picks the level.
/// `DASHBOARD_SPAN_EVENTS` and `FORCE_COLOR` are read through the helpers in
/// [`config`]. Must run before the first log line.
fn init_tracing() {
    // ---
    let var = |name: &str| env::var(name).ok();

    let env_filter = match var("RUST_LOG") {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(config::log_directive(var("DASHBOARD_LOG_LEVEL").as_deref())),
    };
    let use_color = config::color_override(var("FORCE_COLOR").as_deref())
        .unwrap_or_else(|| std::io::stdout().is_terminal());

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(config::span_events(var("DASHBOARD_SPAN_EVENTS").as_deref()))
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
