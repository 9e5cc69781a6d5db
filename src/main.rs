//! MusicJungle user service main entry point.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging
//! 2. Load and validate configuration
//! 3. Establish the database pool and apply migrations
//! 4. Build the HTTP application with routes and middleware
//! 5. Start the HTTP server with graceful shutdown handling

use std::{env, net::SocketAddr, sync::Arc};

use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::app::{build_app, AppState};
use crate::config::database::{get_connection, init_pool, run_migrations};
use crate::db::store::PgUserStore;

mod app;
mod config;
mod db;
mod enums;
mod flash;
mod handlers;
mod session;
mod utils;

/// Default port if not specified in environment.
const DEFAULT_PORT: u16 = 3000;

/// Default host address if not specified in environment.
const DEFAULT_HOST: &str = "127.0.0.1";

/// Required environment variables that must be present for the service to start.
const REQUIRED_ENV_VARS: &[&str] = &["DATABASE_URL"];

/// Optional environment variables that tune the service if present.
const OPTIONAL_ENV_VARS: &[&str] = &["HOST", "PORT", "DB_MAX_POOL_SIZE"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The guard must stay alive for the non-blocking writer to flush.
    let _log_guard = setup_logging();
    info!(
        service = "musicjungle",
        version = env!("CARGO_PKG_VERSION"),
        "Server initialization: logging configured"
    );

    // Load environment variables from .env file if present
    dotenv().ok();
    info!("Server initialization: environment loaded");

    check_required_env_vars();

    // Database pool, connectivity check, and migrations
    let pool = init_pool()?;
    get_connection(&pool).map_err(|e| {
        error!(error = %e, "Database connection failed");
        e
    })?;
    run_migrations(&pool)?;
    info!("Server initialization: database ready");

    let state = AppState::new(Arc::new(PgUserStore::new(pool)));
    let app = build_app(state);
    info!("Server initialization: application built");

    let addr = get_server_address()?;
    info!(address = %addr, "Server startup: listening");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown: complete");
    Ok(())
}

/// Sets up structured JSON logging with an async non-blocking writer.
fn setup_logging() -> WorkerGuard {
    let (writer, guard) = non_blocking(std::io::stdout());

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default().with(filter).with(fmt_layer).init();

    guard
}

/// Validate required and optional environment variables.
///
/// Required variables only log here; startup fails later when the pool is
/// built without them. Optional variables warn when missing.
fn check_required_env_vars() {
    for &var in REQUIRED_ENV_VARS {
        if env::var(var).is_err() {
            error!(variable = var, "Missing required environment variable");
        }
    }

    let missing: Vec<_> = OPTIONAL_ENV_VARS
        .iter()
        .filter(|&&var| env::var(var).is_err())
        .collect();

    if missing.is_empty() {
        info!("Server initialization: all optional environment variables present");
    } else {
        warn!(
            missing = ?missing,
            "Server initialization: some optional environment variables missing, using defaults"
        );
    }
}

/// Determine server binding address from HOST/PORT or defaults.
fn get_server_address() -> Result<SocketAddr, Box<dyn std::error::Error>> {
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

    let addr = format!("{}:{}", host, port).parse()?;

    Ok(addr)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received: Ctrl+C");
    };

    #[cfg(unix)]
    let sigterm = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        info!("Shutdown signal received: SIGTERM");
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = sigterm => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_server_address_default() {
        env::remove_var("HOST");
        env::remove_var("PORT");

        let addr = get_server_address().unwrap();
        assert_eq!(
            addr.to_string(),
            format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT)
        );
    }

    #[test]
    fn test_required_env_vars_are_consistent() {
        assert!(
            REQUIRED_ENV_VARS.contains(&"DATABASE_URL"),
            "DATABASE_URL should be in REQUIRED_ENV_VARS"
        );
    }
}
