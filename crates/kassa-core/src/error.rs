//! # Error Types
//!
//! Domain-specific error types for kassa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kassa-core errors (this file)                                         │
//! │  ├── CoreError        - Import / decode failures                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - What a SlotStore backend may report            │
//! │                                                                         │
//! │  kassa-db errors (separate crate)                                      │
//! │  └── DbError          - SQLite failures, converted into StoreError     │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: CoreError / ValidationError → ApiError → terminal               │
//! │        DbError → StoreError → logged only (never surfaced)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by session operations.
///
/// Every variant leaves the current session untouched; the controller only
/// swaps state after a fully decoded import.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document parsed as JSON but does not have the export shape.
    ///
    /// ## When This Occurs
    /// - Root is not an object
    /// - `counts` is missing or not an object
    #[error("Invalid file format: {reason}")]
    InvalidFormat { reason: String },

    /// The text is not JSON at all.
    #[error("Invalid file format: {0}")]
    Json(#[from] serde_json::Error),

    /// The file could not be read as text.
    #[error("Could not read file: {0}")]
    UnreadableFile(String),
}

impl CoreError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        CoreError::InvalidFormat {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the front-end boundary before a value reaches the session.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by a [`SlotStore`](crate::persistence::SlotStore).
///
/// The persistence adapter logs these and degrades; they never reach the user.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached (closed pool, missing file, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backend was reachable but the read or write failed.
    #[error("Storage operation failed: {0}")]
    Failed(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
