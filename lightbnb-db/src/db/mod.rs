//! Database layer - connection pool, migrations, and repositories
//!
//! - Pool is created by the caller and injected, never a global
//! - All list operations are a single JOIN query (no N+1)
//! - Rely on DB constraints for uniqueness and references (no check-then-insert)

pub mod pool;
pub mod repos;

use sqlx::PgPool;

use crate::error::DbError;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;

/// Embedded schema migrations from `migrations/`
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");

/// Apply any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("database schema up to date");
    Ok(())
}
