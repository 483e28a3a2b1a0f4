//! # kassa-db: Durable Slot Storage for Svensk Kassa
//!
//! This crate persists the session in a local SQLite file. It implements the
//! [`SlotStore`](kassa_core::SlotStore) port from kassa-core, so the
//! controller never sees SQL.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Svensk Kassa Data Flow                           │
//! │                                                                         │
//! │  SessionController::set_count()                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistenceAdapter::save() ── JSON blob ──┐                           │
//! │                                             │ SlotStore::write()        │
//! │  ┌──────────────────────────────────────────▼──────────────────────┐   │
//! │  │                     kassa-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ SlotRepository│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│   kv_store    │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/svensk-kassa/kassa.db                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The kv_store repository and its `SlotStore` impl
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kassa_core::SessionController;
//! use kassa_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("kassa.db")).await?;
//! let mut controller = SessionController::new(db.slots());
//! controller.load().await;
//! controller.set_count(500, 2).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::slot::SlotRepository;
