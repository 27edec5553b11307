//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Connecting eagerly
//! verifies the server is reachable before any service is built.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use wms_core::PostgresConfig;

/// Create a PostgreSQL connection pool from service configuration.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let config = wms_core::Config::from_env()?;
/// let pool = create_pool(&config.postgres).await?;
/// ```
#[tracing::instrument(skip(config), fields(host = %config.host, db = %config.db_name))]
pub async fn create_pool(config: &PostgresConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(config)?)
        .await?;

    tracing::info!(max_connections = config.max_connections, "database pool created");
    Ok(pool)
}

/// Connection options built field by field, so credentials never pass
/// through URL parsing.
///
/// # Errors
///
/// Returns [`sqlx::Error::Configuration`] for an unknown `ssl_mode`.
pub fn connect_options(config: &PostgresConfig) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.db_name)
        .ssl_mode(PgSslMode::from_str(&config.ssl_mode)?))
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
#[tracing::instrument(skip(database_url))]
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "database pool created");
    Ok(pool)
}
