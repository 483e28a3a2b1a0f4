//! # State Module
//!
//! Startup state for one CLI invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐          ┌──────────────────────────────────┐    │
//! │  │   ConfigState    │ ───────► │            DbState               │    │
//! │  │                  │  path    │                                  │    │
//! │  │  database_path   │          │  Database (SQLite pool)          │    │
//! │  │  export_dir      │          │  controller() ─► SessionController│   │
//! │  └──────────────────┘          └──────────────────────────────────┘    │
//! │                                                                         │
//! │  Both are read-only once built; the controller owns the session.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{ConfigError, ConfigOverrides, ConfigState, EnvConfig, FileConfig};
pub use db::DbState;
