//! Database configuration and connection pool management.
//!
//! Provides PostgreSQL connectivity with connection pooling and automatic
//! embedded migrations.

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::PgConnection;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};

use crate::utils::errors::ServiceError;

/// Database connection pool type.
pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled database connection type.
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Helper to parse an environment variable with a default value.
fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Initializes the database connection pool with configurable settings.
///
/// # Configuration (from environment variables with defaults)
/// - `DATABASE_URL`: The connection string (required).
/// - `DB_MAX_POOL_SIZE`: Max connections (default: 10).
/// - `DB_CONNECTION_TIMEOUT_SECS`: Connection timeout (default: 10).
///
/// # Errors
/// Returns a configuration error if `DATABASE_URL` is missing or the pool
/// cannot be created; startup fails fast on either.
pub fn init_pool() -> Result<DbPool, ServiceError> {
    let database_url = env::var(DATABASE_URL_ENV).map_err(|_| {
        error!("Missing {} environment variable", DATABASE_URL_ENV);
        ServiceError::configuration("DATABASE_URL must be set")
    })?;

    let max_size = get_env_var("DB_MAX_POOL_SIZE", 10u32);
    let connection_timeout = get_env_var("DB_CONNECTION_TIMEOUT_SECS", 10u64);

    info!("Initializing PostgreSQL connection pool");

    let manager = ConnectionManager::<PgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(connection_timeout))
        .test_on_check_out(true)
        .build(manager)
        .map_err(|e| {
            error!("Failed to create PostgreSQL connection pool: {}", e);
            ServiceError::pool(format!("Failed to create connection pool: {}", e))
        })?;

    info!(
        "PostgreSQL pool initialized (max={}, timeout={}s)",
        max_size, connection_timeout
    );

    Ok(pool)
}

/// Acquires a database connection from the pool.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, ServiceError> {
    pool.get().map_err(|e| {
        error!("Failed to acquire database connection: {}", e);
        ServiceError::pool("Failed to acquire database connection")
    })
}

/// Runs pending database migrations.
///
/// Migrations are embedded in the binary and run automatically on startup so
/// the schema is always up to date.
pub fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    info!("Checking for pending database migrations");
    let mut conn = get_connection(pool)?;

    match conn.run_pending_migrations(MIGRATIONS) {
        Ok(applied) => {
            if applied.is_empty() {
                info!("Database schema is up to date");
            } else {
                info!("Applied {} migration(s)", applied.len());
            }
            Ok(())
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            Err(ServiceError::database("Failed to run database migrations"))
        }
    }
}
