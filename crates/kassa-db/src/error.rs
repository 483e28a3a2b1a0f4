//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► Startup (Database::new) ──► ApiError in the CLI             │
//! │       │                                                                 │
//! │       └──► SlotStore calls ──► StoreError ──► logged by kassa-core     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kassa_core::StoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Disk full or database locked
    /// - Runtime SQL error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Storage port view of a database failure.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Failed(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_unavailable() {
        let store_err: StoreError = DbError::from(sqlx::Error::PoolClosed).into();
        assert!(matches!(store_err, StoreError::Unavailable(_)));

        let store_err: StoreError = DbError::PoolExhausted.into();
        assert!(matches!(store_err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_query_errors_map_to_failed() {
        let store_err: StoreError = DbError::QueryFailed("disk I/O error".into()).into();
        assert!(matches!(store_err, StoreError::Failed(_)));
        assert!(store_err.to_string().contains("disk I/O error"));
    }
}
