//! # Repository Module
//!
//! Database repository implementations for Svensk Kassa.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PersistenceAdapter (kassa-core)                                       │
//! │       │                                                                 │
//! │       │  store.write("svensk-kassa-session", blob)                      │
//! │       ▼                                                                 │
//! │  SlotRepository (implements SlotStore)                                 │
//! │  ├── get(&self, key)                                                   │
//! │  └── put(&self, key, value)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  kv_store table                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SlotRepository`](slot::SlotRepository) - Key-value slots

pub mod slot;
