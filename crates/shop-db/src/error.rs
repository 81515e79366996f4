//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                         │
//! │                                                              │
//! │  SQLite error (sqlx::Error)                                  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  StoreError (this module)                                    │
//! │       ├── UniqueViolation   → "phone already registered"     │
//! │       ├── ForeignKeyViolation → rolled-back sale             │
//! │       ├── Unavailable       → abort, do not retry            │
//! │       └── QueryFailed       → abort, do not retry            │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  Caller presents a user-facing message                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never retries on its own; retry/backoff is caller policy.

use shop_core::ValidationError;
use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Payload rejected before touching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Unique constraint violation (duplicate barcode, duplicate phone).
    ///
    /// Surfaced distinctly so callers can show a specific message instead
    /// of a generic storage failure.
    #[error("duplicate value for {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation (e.g. a sale line referencing a
    /// product that does not exist).
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// The underlying store file is inaccessible or locked by another
    /// process. Fatal to the attempted operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Any other query execution failure.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Filesystem failure during backup or purge.
    #[error("backup I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// True when the error is a uniqueness violation, the one storage
    /// failure callers commonly branch on.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database + "UNIQUE constraint failed"      → UniqueViolation
/// sqlx::Error::Database + "FOREIGN KEY constraint failed" → ForeignKeyViolation
/// sqlx::Error::Database + "database is locked"            → Unavailable
/// sqlx::Error::PoolTimedOut / PoolClosed                  → Unavailable
/// other                                                   → QueryFailed
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite phrases constraint failures as
                // "UNIQUE constraint failed: <table>.<column>".
                if let Some(constraint) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    StoreError::UniqueViolation {
                        constraint: constraint.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    StoreError::ForeignKeyViolation(msg.to_string())
                } else if msg.contains("database is locked") || msg.contains("unable to open") {
                    StoreError::Unavailable(msg.to_string())
                } else {
                    StoreError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::Unavailable("pool is closed".to_string()),

            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
