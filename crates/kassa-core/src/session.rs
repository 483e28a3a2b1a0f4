//! # Session
//!
//! The unit a user edits, persists and exports: title, date, comment and tally.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────────┐  load()   ┌──────────────┐  set_*/import  ┌──────────────┐
//! │ Session::new │ ────────► │   Loaded     │ ─────────────► │   Mutated    │
//! │ (today, {})  │           │  (or fresh)  │ ◄───────────── │              │
//! └──────────────┘           └──────────────┘     reset()    └──────────────┘
//! ```
//!
//! Totals are derived on demand and never stored on the session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::denomination::Registry;
use crate::tally::{Tally, Totals};

/// Date format used in storage, export documents and reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Title, date, comment and counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub title: String,
    pub date: NaiveDate,
    pub comment: String,
    pub tally: Tally,
}

impl Session {
    /// A fresh session: empty tally, empty title and comment, the given date.
    pub fn new(today: NaiveDate) -> Self {
        Session {
            title: String::new(),
            date: today,
            comment: String::new(),
            tally: Tally::new(),
        }
    }

    /// Builds a session from loosely typed fields, defaulting each one.
    ///
    /// ## Defaults
    /// - `title`, `comment`: empty when absent or empty
    /// - `date`: `today` when absent, empty, or not `YYYY-MM-DD`
    ///
    /// Shared by the persistence adapter and the import codec so both apply
    /// the same fallbacks.
    pub fn from_fields(
        title: Option<&str>,
        date: Option<&str>,
        comment: Option<&str>,
        tally: Tally,
        today: NaiveDate,
    ) -> Self {
        Session {
            title: title.unwrap_or_default().to_string(),
            date: date
                .filter(|d| !d.is_empty())
                .and_then(|d| match parse_date(d) {
                    Some(parsed) => Some(parsed),
                    None => {
                        debug!(date = %d, "Unparsable session date, using today");
                        None
                    }
                })
                .unwrap_or(today),
            comment: comment.unwrap_or_default().to_string(),
            tally,
        }
    }

    /// Derived totals over the registry.
    pub fn totals(&self, registry: &Registry) -> Totals {
        self.tally.compute_totals(registry)
    }

    /// The date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_new_session_is_blank() {
        let session = Session::new(today());
        assert_eq!(session.title, "");
        assert_eq!(session.comment, "");
        assert!(session.tally.is_empty());
        assert_eq!(session.date_string(), "2026-10-19");
    }

    #[test]
    fn test_from_fields_keeps_present_values() {
        let session = Session::from_fields(
            Some("Dagskassa"),
            Some("2026-01-02"),
            Some("Kontrollräknad"),
            Tally::new(),
            today(),
        );
        assert_eq!(session.title, "Dagskassa");
        assert_eq!(session.date_string(), "2026-01-02");
        assert_eq!(session.comment, "Kontrollräknad");
    }

    #[test]
    fn test_from_fields_defaults_missing_values() {
        let session = Session::from_fields(None, None, None, Tally::new(), today());
        assert_eq!(session, Session::new(today()));
    }

    #[test]
    fn test_from_fields_defaults_empty_or_bad_date() {
        let empty = Session::from_fields(None, Some(""), None, Tally::new(), today());
        assert_eq!(empty.date, today());

        let bad = Session::from_fields(None, Some("igår"), None, Tally::new(), today());
        assert_eq!(bad.date, today());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2026-10-19 "), Some(today()));
        assert_eq!(parse_date("19/10/2026"), None);
    }
}
