//! # Commands Module
//!
//! One function per subcommand, generic over the storage port and clock so
//! tests can drive them with `MemorySlotStore` and `FixedClock`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── session.rs   ◄─── show, denominations, set, title, date, comment, reset
//! └── transfer.rs  ◄─── export, import, report
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kassa set 500 2                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Cli::run ─► ConfigState::load ─► DbState::open ─► controller().load() │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::session::set(&mut controller, "500", "2", &mut stdout)      │
//! │      -> Result<(), ApiError>                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout: "500 kr: 2 st"        stderr: logs, or "<Rubrik>: <fel>"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod session;
pub mod transfer;
