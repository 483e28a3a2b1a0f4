//! # Session Controller
//!
//! The single state container a front end talks to.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Controller                                   │
//! │                                                                         │
//! │  Front-end Action         Operation                Side Effect          │
//! │  ────────────────         ─────────                ───────────          │
//! │                                                                         │
//! │  App start ─────────────► load() ────────────────► opens save gate      │
//! │                                                                         │
//! │  Edit count/title/… ────► set_*() ───────────────► save                 │
//! │                                                                         │
//! │  "Nollställ" ───────────► reset() ───────────────► save (fresh session) │
//! │                                                                         │
//! │  "Importera" ───────────► import_from(text) ─────► save on success      │
//! │                                    └── Err ──────► session untouched    │
//! │                                                                         │
//! │  "Exportera" ───────────► export_to() ───────────► (read only)          │
//! │                                                                         │
//! │  "Kopiera" ─────────────► report() ──────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: save() is a no-op until load() has run, so the blank startup    │
//! │        session can never overwrite what is already stored.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::denomination::{Category, Registry};
use crate::error::{CoreError, CoreResult};
use crate::persistence::{PersistenceAdapter, SlotStore};
use crate::report;
use crate::session::Session;
use crate::tally::{TallyLine, Totals};
use crate::transfer::{self, ExportBundle, ExportDocument};

/// Owns the one session, its storage port and its clock.
#[derive(Debug)]
pub struct SessionController<S, C = SystemClock> {
    adapter: PersistenceAdapter<S>,
    clock: C,
    registry: &'static Registry,
    session: Session,
    loaded: bool,
}

impl<S: SlotStore> SessionController<S, SystemClock> {
    /// Creates a controller on the wall clock. Call [`load`](Self::load) next.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: SlotStore, C: Clock> SessionController<S, C> {
    /// Creates a controller with an explicit clock.
    pub fn with_clock(store: S, clock: C) -> Self {
        let session = Session::new(clock.today());
        SessionController {
            adapter: PersistenceAdapter::new(store),
            clock,
            registry: Registry::swedish(),
            session,
            loaded: false,
        }
    }

    /// Loads the stored session, if any, and opens the save gate.
    ///
    /// Nothing stored (or nothing readable) keeps the fresh default session.
    pub async fn load(&mut self) -> &Session {
        match self.adapter.load(&self.clock).await {
            Some(session) => {
                let unknown = session.tally.unknown_values(self.registry);
                if !unknown.is_empty() {
                    debug!(?unknown, "Stored counts include values outside the registry");
                }
                info!(date = %session.date, "Restored stored session");
                self.session = session;
            }
            None => debug!("Starting with a fresh session"),
        }
        self.loaded = true;
        &self.session
    }

    /// Whether [`load`](Self::load) has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The registry totals are computed over.
    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// The storage port.
    pub fn store(&self) -> &S {
        self.adapter.store()
    }

    /// Derived totals for the current session.
    pub fn totals(&self) -> Totals {
        self.session.totals(self.registry)
    }

    /// Per-denomination rows for one category.
    pub fn lines(&self, category: Category) -> Vec<TallyLine> {
        self.session.tally.lines(self.registry, category)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Sets a count (negative floors to 0) and saves.
    pub async fn set_count(&mut self, value: u32, count: i64) {
        if !self.registry.contains(value) {
            debug!(value, "Setting count for a value outside the registry");
        }
        self.session.tally.set_count(value, count);
        self.persist().await;
    }

    /// Sets the title and saves.
    pub async fn set_title(&mut self, title: impl Into<String>) {
        self.session.title = title.into();
        self.persist().await;
    }

    /// Sets the date and saves.
    pub async fn set_date(&mut self, date: NaiveDate) {
        self.session.date = date;
        self.persist().await;
    }

    /// Sets the comment and saves.
    pub async fn set_comment(&mut self, comment: impl Into<String>) {
        self.session.comment = comment.into();
        self.persist().await;
    }

    /// Replaces the session with a fresh one dated today, then saves.
    ///
    /// No confirmation and no undo; only an earlier export brings it back.
    pub async fn reset(&mut self) {
        self.session = Session::new(self.clock.today());
        info!("Session reset");
        self.persist().await;
    }

    /// Replaces the session with an imported document.
    ///
    /// On any error the current session is left exactly as it was.
    pub async fn import_from(&mut self, raw: &str) -> CoreResult<()> {
        let imported = match transfer::decode_document(raw, self.clock.today()) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Import rejected");
                return Err(e);
            }
        };

        let unknown = imported.tally.unknown_values(self.registry);
        if !unknown.is_empty() {
            debug!(?unknown, "Imported counts include values outside the registry");
        }

        info!(title = %imported.title, date = %imported.date, "Session imported");
        self.session = imported;
        self.persist().await;
        Ok(())
    }

    /// Like [`import_from`](Self::import_from) for raw file contents.
    ///
    /// Contents that are not UTF-8 text fail with [`CoreError::UnreadableFile`].
    pub async fn import_bytes(&mut self, bytes: &[u8]) -> CoreResult<()> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            warn!(error = %e, "Import file is not UTF-8 text");
            CoreError::UnreadableFile(e.to_string())
        })?;
        self.import_from(text).await
    }

    // =========================================================================
    // Read-only outputs
    // =========================================================================

    /// The export document and a suggested filename.
    pub fn export_to(&self) -> ExportBundle {
        let document = ExportDocument::from_session(&self.session, self.registry, self.clock.now());
        let filename = transfer::suggest_filename(&self.session.title, self.clock.today());
        ExportBundle { filename, document }
    }

    /// The plain-text report.
    pub fn report(&self) -> String {
        report::render(&self.session, &self.totals(), self.registry)
    }

    async fn persist(&self) {
        if !self.loaded {
            debug!("Save skipped: session not loaded yet");
            return;
        }
        self.adapter.save(&self.session).await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
