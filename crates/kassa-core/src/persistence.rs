//! # Persistence Adapter
//!
//! Loads and saves the session through an injected durable key-value slot.
//!
//! ## Save/Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persistence Adapter                                  │
//! │                                                                         │
//! │  Startup                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  load() ──► store.read(SESSION_SLOT_KEY)                               │
//! │     │          ├── Ok(None)        → absent                            │
//! │     │          ├── Err(_)          → absent  + warn!                   │
//! │     │          ├── corrupt JSON    → absent  + warn!                   │
//! │     │          └── Ok(Some(blob))  → Session (missing fields default)  │
//! │     ▼                                                                   │
//! │  Every state change                                                    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  save() ──► store.write(SESSION_SLOT_KEY, {counts,comment,title,date}) │
//! │                └── Err(_)          → error! only, memory untouched     │
//! │                                                                         │
//! │  The adapter NEVER returns an error to its caller.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::session::Session;
use crate::tally::Tally;
use crate::transfer::decode_counts;
use crate::SESSION_SLOT_KEY;

// =============================================================================
// Slot Store Port
// =============================================================================

/// A durable key-value capability.
///
/// Implemented by `kassa-db` over SQLite and by [`MemorySlotStore`] for tests.
#[allow(async_fn_in_trait)]
pub trait SlotStore {
    /// Reads the value stored under `key`, `None` when never written.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// =============================================================================
// Stored Blob
// =============================================================================

/// On-disk shape of the slot value. No `version`, no `totals`.
#[derive(Debug, Serialize)]
struct StoredSession<'a> {
    counts: &'a Tally,
    comment: &'a str,
    title: &'a str,
    date: String,
}

// =============================================================================
// Adapter
// =============================================================================

/// Session load/save over a [`SlotStore`].
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    store: S,
    key: String,
}

impl<S: SlotStore> PersistenceAdapter<S> {
    /// Creates an adapter bound to [`SESSION_SLOT_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, SESSION_SLOT_KEY)
    }

    /// Creates an adapter bound to a custom slot key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        PersistenceAdapter {
            store,
            key: key.into(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored session, or `None` if nothing usable is stored.
    pub async fn load(&self, clock: &impl Clock) -> Option<Session> {
        let blob = match self.store.read(&self.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key = %self.key, "No stored session");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored session");
                return None;
            }
        };

        let root = match serde_json::from_str::<Value>(&blob) {
            Ok(Value::Object(root)) => root,
            Ok(_) => {
                warn!(key = %self.key, "Stored session is not an object, ignoring");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored session is corrupt, ignoring");
                return None;
            }
        };

        // Field by field: a bad field falls back to its default alone.
        let text_field = |name: &str| root.get(name).and_then(|v| v.as_str());
        let counts = match root.get("counts") {
            Some(Value::Object(counts)) => decode_counts(counts),
            _ => Tally::new(),
        };

        debug!(key = %self.key, "Stored session loaded");
        Some(Session::from_fields(
            text_field("title"),
            text_field("date"),
            text_field("comment"),
            counts,
            clock.today(),
        ))
    }

    /// Saves the session, overwriting the slot. Failures are only logged.
    pub async fn save(&self, session: &Session) {
        let stored = StoredSession {
            counts: &session.tally,
            comment: &session.comment,
            title: &session.title,
            date: session.date_string(),
        };

        let blob = match serde_json::to_string(&stored) {
            Ok(blob) => blob,
            Err(e) => {
                error!(error = %e, "Failed to serialize session");
                return;
            }
        };

        match self.store.write(&self.key, &blob).await {
            Ok(()) => debug!(key = %self.key, bytes = blob.len(), "Session saved"),
            Err(e) => error!(key = %self.key, error = %e, "Failed to save session"),
        }
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A [`SlotStore`] backed by a `HashMap`, for tests and ephemeral runs.
///
/// Can be told to fail reads or writes to exercise the degrade paths.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: RefCell<usize>,
}

impl MemorySlotStore {
    /// An empty store.
    pub fn new() -> Self {
        MemorySlotStore::default()
    }

    /// A store pre-seeded with one slot.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = MemorySlotStore::new();
        store
            .slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Makes every read fail.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Makes every write fail.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current raw value of a slot.
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl SlotStore for MemorySlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("memory store read disabled".into()));
        }
        Ok(self.get(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Failed("quota exceeded".into()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(2026, 10, 19).unwrap()
    }

    fn sample_session() -> Session {
        let mut session = Session::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        session.title = "Dagskassa".to_string();
        session.comment = "Stämmer".to_string();
        session.tally.set_count(10, 3);
        session.tally.set_count(500, 1);
        session
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let adapter = PersistenceAdapter::new(MemorySlotStore::new());
        let session = sample_session();

        adapter.save(&session).await;
        let loaded = adapter.load(&clock()).await.unwrap();

        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn test_stored_blob_has_no_version_or_totals() {
        let adapter = PersistenceAdapter::new(MemorySlotStore::new());
        adapter.save(&sample_session()).await;

        let blob = adapter.store().get(SESSION_SLOT_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["comment", "counts", "date", "title"]);
        assert_eq!(object["counts"]["10"], 3);
    }

    #[tokio::test]
    async fn test_missing_slot_is_absent() {
        let adapter = PersistenceAdapter::new(MemorySlotStore::new());
        assert!(adapter.load(&clock()).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_absent() {
        let store = MemorySlotStore::with_slot(SESSION_SLOT_KEY, "{not json");
        let adapter = PersistenceAdapter::new(store);
        assert!(adapter.load(&clock()).await.is_none());
    }

    #[tokio::test]
    async fn test_read_failure_is_absent() {
        let adapter = PersistenceAdapter::new(MemorySlotStore::new().failing_reads());
        assert!(adapter.load(&clock()).await.is_none());
    }

    #[tokio::test]
    async fn test_partial_blob_falls_back_to_defaults() {
        let store = MemorySlotStore::with_slot(SESSION_SLOT_KEY, r#"{"title":"Kväll"}"#);
        let adapter = PersistenceAdapter::new(store);

        let loaded = adapter.load(&clock()).await.unwrap();
        assert_eq!(loaded.title, "Kväll");
        assert_eq!(loaded.comment, "");
        assert!(loaded.tally.is_empty());
        assert_eq!(loaded.date, clock().today());
    }

    #[tokio::test]
    async fn test_bad_count_entry_keeps_other_fields() {
        let store = MemorySlotStore::with_slot(
            SESSION_SLOT_KEY,
            r#"{"title":"Kväll","comment":"viktigt","date":"2026-03-01","counts":{"10":"3","5":"fem","x":1}}"#,
        );
        let adapter = PersistenceAdapter::new(store);

        let loaded = adapter.load(&clock()).await.unwrap();
        assert_eq!(loaded.title, "Kväll");
        assert_eq!(loaded.comment, "viktigt");
        assert_eq!(loaded.date_string(), "2026-03-01");
        assert_eq!(loaded.tally.len(), 1);
        assert_eq!(loaded.tally.get_count(10), 3);
    }

    #[tokio::test]
    async fn test_wrongly_typed_fields_fall_back_individually() {
        let store = MemorySlotStore::with_slot(
            SESSION_SLOT_KEY,
            r#"{"title":7,"comment":"ok","counts":[1,2]}"#,
        );
        let adapter = PersistenceAdapter::new(store);

        let loaded = adapter.load(&clock()).await.unwrap();
        assert_eq!(loaded.title, "");
        assert_eq!(loaded.comment, "ok");
        assert!(loaded.tally.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_blob_is_absent() {
        let store = MemorySlotStore::with_slot(SESSION_SLOT_KEY, "[1, 2]");
        let adapter = PersistenceAdapter::new(store);
        assert!(adapter.load(&clock()).await.is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let adapter = PersistenceAdapter::new(MemorySlotStore::new().failing_writes());
        adapter.save(&sample_session()).await;
        assert!(adapter.store().get(SESSION_SLOT_KEY).is_none());
    }

    #[tokio::test]
    async fn test_custom_key() {
        let adapter = PersistenceAdapter::with_key(MemorySlotStore::new(), "other");
        adapter.save(&sample_session()).await;
        assert!(adapter.store().get("other").is_some());
        assert!(adapter.store().get(SESSION_SLOT_KEY).is_none());
    }
}
