//! # Database State
//!
//! Wraps the `Database` connection and hands out loaded controllers.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! let db = DbState::open(&config).await?;
//! let mut controller = db.controller().await;
//! commands::session::set(&mut controller, "500", "2", &mut out).await?;
//! db.close().await;
//! ```

use kassa_core::SessionController;
use kassa_db::{Database, DbConfig, SlotRepository};
use tracing::info;

use crate::error::ApiError;
use crate::state::ConfigState;

/// Wrapper around `Database` for the CLI.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (and migrates) the database named by the configuration.
    pub async fn open(config: &ConfigState) -> Result<Self, ApiError> {
        info!(db_path = %config.database_path.display(), "Opening session database");
        let db = Database::new(DbConfig::new(&config.database_path)).await?;
        Ok(DbState::new(db))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Builds a controller over the session slot and loads it.
    pub async fn controller(&self) -> SessionController<SlotRepository> {
        let mut controller = SessionController::new(self.db.slots());
        controller.load().await;
        controller
    }

    /// Closes the pool, flushing WAL to the main file.
    pub async fn close(self) {
        self.db.close().await;
    }
}
