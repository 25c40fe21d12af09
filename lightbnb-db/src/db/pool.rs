//! Database connection pool management
//!
//! The pool is created once by the caller and handed to `PgStore`; every
//! operation checks a connection out and returns it when the query finishes.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size used when the caller does not configure one
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect to the LightBnB database with the default pool size.
///
/// ```ignore
/// let store = PgStore::new(create_pool("postgres://localhost/lightbnb").await?);
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Pool settings: at least one connection, otherwise sqlx defaults.
pub(crate) fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new().max_connections(max_connections.max(1))
}

/// Create a PostgreSQL connection pool holding at most `max_connections`
/// connections (zero is treated as one).
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to database");
    pool_options(max_connections).connect(database_url).await
}
