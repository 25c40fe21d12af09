//! Error types for lightbnb-db
//!
//! Lookups that find nothing return `Ok(None)` and empty searches return an
//! empty `Vec`; only genuine failures become a `DbError`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Data access error
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A unique constraint rejected the write (e.g. a duplicate email)
    #[error("conflict: {resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },

    /// A foreign key points at a row that does not exist
    #[error("invalid reference to {resource}: {detail}")]
    InvalidReference { resource: &'static str, detail: String },

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid fixture file {path:?}: {source}")]
    Fixture {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for data access operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Create a fixture parse error
    pub fn fixture(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Fixture {
            path: path.into(),
            source,
        }
    }

    /// Classify a failed write.
    ///
    /// Unique and foreign-key violations get their own variants so callers
    /// can tell "already exists" and "dangling owner" apart from outages.
    pub(crate) fn from_write(
        err: sqlx::Error,
        resource: &'static str,
        key: impl Into<String>,
    ) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::Conflict {
                    resource,
                    key: key.into(),
                };
            }
            if db_err.is_foreign_key_violation() {
                return Self::InvalidReference {
                    resource: "user",
                    detail: db_err.message().to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }

    /// True when the error is a unique-constraint conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
