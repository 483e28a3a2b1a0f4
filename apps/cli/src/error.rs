//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Svensk Kassa                           │
//! │                                                                         │
//! │  Terminal                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  kassa import dag.json                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<(), ApiError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::ConnectionFailed ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Import Error? ─── CoreError::InvalidFormat ───── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "Importfel: Invalid file format: missing `counts` object"      │
//! │  exit code 1                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures during load/save never reach this type; kassa-core logs
//! them and keeps working in memory.

use kassa_core::{CoreError, ValidationError};
use kassa_db::DbError;
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json-errors` this is what gets printed on stderr:
/// ```json
/// {
///   "code": "IMPORT_ERROR",
///   "message": "Invalid file format: missing `counts` object"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Import document malformed or file unreadable
    ImportError,

    /// Command argument failed validation
    ValidationError,

    /// Database could not be opened
    DatabaseError,

    /// Report could not be written ("copy" failed)
    CopyFailed,

    /// Export file could not be written
    ExportFailed,

    /// config.toml unreadable or invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Swedish headline shown before the message, mirroring the app's notices.
    pub fn headline(&self) -> &'static str {
        match self {
            ErrorCode::ImportError => "Importfel",
            ErrorCode::ValidationError => "Ogiltigt värde",
            ErrorCode::DatabaseError => "Databasfel",
            ErrorCode::CopyFailed => "Kopiering misslyckades",
            ErrorCode::ExportFailed => "Export misslyckades",
            ErrorCode::ConfigError => "Konfigurationsfel",
            ErrorCode::Internal => "Ett okänt fel uppstod",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a copy (report output) error.
    pub fn copy_failed(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CopyFailed, message)
    }

    /// Creates an export error.
    pub fn export_failed(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ExportFailed, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Renders the error as one JSON line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        // Every core failure is an import failure.
        ApiError::new(ErrorCode::ImportError, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.headline(), self.message)
    }
}

impl std::error::Error for ApiError {}
