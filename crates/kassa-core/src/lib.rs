//! # kassa-core: Pure Domain Logic for Svensk Kassa
//!
//! This crate is the **heart** of Svensk Kassa, a cash-drawer reconciliation
//! calculator. It holds the denomination registry, the tally math, the
//! session model, the import/export codec and the report renderer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Svensk Kassa Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI (apps/cli)                               │   │
//! │  │    show ──► set ──► export / import ──► report                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kassa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────┐   │   │
//! │  │   │denomination│ │  tally   │ │ transfer  │ │  controller  │   │   │
//! │  │   │  registry  │ │  totals  │ │  report   │ │ SlotStore ◄──┼───┼───┼── port
//! │  │   └────────────┘ └──────────┘ └───────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO FILES • NO WALL CLOCK (injected Clock)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kassa-db (SQLite key-value slot)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`denomination`] - The fixed coin/note registry
//! - [`money`] - Whole-kronor amounts with Swedish formatting
//! - [`tally`] - Counts per denomination and derived totals
//! - [`input`] - Free-text count parsing
//! - [`session`] - Title, date, comment and tally
//! - [`persistence`] - Load/save of the session through a [`SlotStore`]
//! - [`transfer`] - JSON export document and import schema check
//! - [`report`] - Plain-text report for the clipboard
//! - [`clock`] - Injected "today" and "now"
//! - [`controller`] - The session state container a front end talks to
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kassa_core::denomination::Registry;
//! use kassa_core::tally::Tally;
//!
//! let mut tally = Tally::new();
//! tally.set_count(10, 3);
//! tally.set_count(500, 1);
//! tally.set_count(100, 2);
//!
//! let totals = tally.compute_totals(Registry::swedish());
//! assert_eq!(totals.coin_total.kronor(), 30);
//! assert_eq!(totals.note_total.kronor(), 700);
//! assert_eq!(totals.grand_total.kronor(), 730);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod controller;
pub mod denomination;
pub mod error;
pub mod input;
pub mod money;
pub mod persistence;
pub mod report;
pub mod session;
pub mod tally;
pub mod transfer;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::SessionController;
pub use denomination::{Category, Denomination, Registry};
pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use money::Kronor;
pub use persistence::{MemorySlotStore, PersistenceAdapter, SlotStore};
pub use session::Session;
pub use tally::{Tally, Totals};
pub use transfer::{ExportBundle, ExportDocument};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the single durable slot holding the persisted session.
pub const SESSION_SLOT_KEY: &str = "svensk-kassa-session";

/// Schema version written into every export document.
pub const EXPORT_VERSION: u32 = 1;

/// Prefix of suggested export filenames.
pub const EXPORT_FILE_PREFIX: &str = "svensk-kassa";
