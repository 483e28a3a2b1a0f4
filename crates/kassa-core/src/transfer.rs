//! # Transfer Codec
//!
//! JSON export documents and the import schema check.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "version": 1,                     ← written, never checked           │
//! │    "createdAt": "2026-10-19T...Z",   ← written, never checked           │
//! │    "title": "Dagskassa",             ← optional on import ("")          │
//! │    "date": "2026-10-19",             ← optional on import (today)       │
//! │    "counts": { "10": 3, "500": 1 },  ← REQUIRED, must be an object      │
//! │    "totals": { ... },                ← snapshot, ignored on import      │
//! │    "comment": ""                     ← optional on import ("")          │
//! │  }                                                                      │
//! │                                                                         │
//! │  Older exports have no "totals"; both shapes import the same way.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::denomination::Registry;
use crate::error::{CoreError, CoreResult};
use crate::session::Session;
use crate::tally::{Tally, Totals};
use crate::{EXPORT_FILE_PREFIX, EXPORT_VERSION};

// =============================================================================
// Export Document
// =============================================================================

/// The JSON interchange format for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub date: String,
    pub counts: Tally,
    pub totals: Totals,
    pub comment: String,
}

impl ExportDocument {
    /// Snapshots a session, including its totals at this instant.
    pub fn from_session(session: &Session, registry: &Registry, now: DateTime<Utc>) -> Self {
        ExportDocument {
            version: EXPORT_VERSION,
            created_at: now,
            title: session.title.clone(),
            date: session.date_string(),
            counts: session.tally.clone(),
            totals: session.totals(registry),
            comment: session.comment.clone(),
        }
    }

    /// Pretty-printed JSON, two-space indent.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An export document with the filename a front end should offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub filename: String,
    pub document: ExportDocument,
}

// =============================================================================
// Import
// =============================================================================

/// Decodes an export document into a session.
///
/// ## Schema Check
/// 1. Text must be JSON
/// 2. Root must be an object with an object-valued `counts`
/// 3. `counts` entries are read leniently; unreadable ones are skipped
/// 4. `title`, `date`, `comment` default individually when absent or empty
///
/// `version`, `createdAt` and `totals` are not read.
pub fn decode_document(text: &str, today: NaiveDate) -> CoreResult<Session> {
    let root: Value = serde_json::from_str(text)?;

    let Some(object) = root.as_object() else {
        return Err(CoreError::invalid_format("document is not a JSON object"));
    };

    let counts = match object.get("counts") {
        Some(Value::Object(counts)) => decode_counts(counts),
        Some(_) => return Err(CoreError::invalid_format("counts must be an object")),
        None => return Err(CoreError::invalid_format("counts is missing")),
    };

    let text_field = |name: &str| object.get(name).and_then(|v| v.as_str());

    debug!(
        version = ?object.get("version").and_then(|v| v.as_u64()),
        has_totals = object.contains_key("totals"),
        entries = counts.len(),
        "Decoded export document"
    );

    Ok(Session::from_fields(
        text_field("title"),
        text_field("date"),
        text_field("comment"),
        counts,
        today,
    ))
}

/// Reads a `counts` object into a tally, skipping what it cannot represent.
///
/// ```text
/// "10": 3        → 3
/// "10": 3.0      → 3        (whole-number float)
/// "10": " 3 "    → 3        (integer text)
/// "10": -2       → 0        (floors like a typed-in count)
/// "10": 2.5      → skipped
/// "note": 1      → skipped  (key is not a face value)
/// ```
///
/// Skipped entries are logged, never an error.
pub(crate) fn decode_counts(counts: &Map<String, Value>) -> Tally {
    let mut tally = Tally::new();

    for (key, raw) in counts {
        let Ok(value) = key.trim().parse::<u32>() else {
            warn!(key = %key, "Skipping count with a non-numeric key");
            continue;
        };

        let Some(count) = count_from_json(raw) else {
            warn!(key = %key, count = %raw, "Skipping count that is not a whole number");
            continue;
        };

        tally.set_count(value, count);
    }

    tally
}

fn count_from_json(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => {
            if let Some(count) = n.as_i64() {
                Some(count)
            } else if n.as_u64().is_some() {
                Some(i64::MAX)
            } else {
                // `as` saturates at the i64 bounds.
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Filename
// =============================================================================

/// Suggests `svensk-kassa-<title-or-date>.json`.
///
/// The title is trimmed, whitespace runs become `-`, and characters that are
/// unsafe in file names are dropped. If nothing is left, `today` is used.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use kassa_core::transfer::suggest_filename;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(suggest_filename("Kväll kassa 2", today), "svensk-kassa-Kväll-kassa-2.json");
/// assert_eq!(suggest_filename("  ", today), "svensk-kassa-2026-10-19.json");
/// ```
pub fn suggest_filename(title: &str, today: NaiveDate) -> String {
    let stem = title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !is_unsafe_filename_char(*c))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let stem = if stem.is_empty() {
        today.format(crate::session::DATE_FORMAT).to_string()
    } else {
        stem
    };

    format!("{EXPORT_FILE_PREFIX}-{stem}.json")
}

fn is_unsafe_filename_char(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.') || c.is_control()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};

    fn clock() -> FixedClock {
        FixedClock::on(2026, 10, 19).unwrap()
    }

    fn sample_session() -> Session {
        let mut session = Session::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        session.title = "Dagskassa".to_string();
        session.comment = "Räknad två gånger".to_string();
        session.tally.set_count(10, 3);
        session.tally.set_count(500, 1);
        session.tally.set_count(100, 2);
        session
    }

    #[test]
    fn test_export_document_fields() {
        let doc = ExportDocument::from_session(&sample_session(), Registry::swedish(), clock().now());
        let json: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["createdAt"], "2026-10-19T12:00:00Z");
        assert_eq!(json["title"], "Dagskassa");
        assert_eq!(json["date"], "2026-03-01");
        assert_eq!(json["counts"]["500"], 1);
        assert_eq!(json["totals"]["coinTotal"], 30);
        assert_eq!(json["totals"]["noteTotal"], 700);
        assert_eq!(json["totals"]["grandTotal"], 730);
        assert_eq!(json["comment"], "Räknad två gånger");
    }

    #[test]
    fn test_export_then_import_reproduces_session() {
        let session = sample_session();
        let doc = ExportDocument::from_session(&session, Registry::swedish(), clock().now());

        let imported = decode_document(&doc.to_json().unwrap(), clock().today()).unwrap();
        assert_eq!(imported, session);
    }

    #[test]
    fn test_import_counts_only_uses_defaults() {
        let session = decode_document(r#"{"counts": {"20": 4}}"#, clock().today()).unwrap();
        assert_eq!(session.title, "");
        assert_eq!(session.comment, "");
        assert_eq!(session.date, clock().today());
        assert_eq!(session.tally.get_count(20), 4);
    }

    #[test]
    fn test_import_older_document_without_totals() {
        let text = r#"{
            "version": 1,
            "createdAt": "2025-06-01T08:00:00.000Z",
            "title": "Gammal",
            "date": "2025-06-01",
            "counts": {"50": 2},
            "comment": ""
        }"#;
        let session = decode_document(text, clock().today()).unwrap();
        assert_eq!(session.title, "Gammal");
        assert_eq!(session.date_string(), "2025-06-01");
        assert_eq!(session.tally.get_count(50), 2);
    }

    #[test]
    fn test_import_ignores_stale_totals() {
        let text = r#"{"counts": {"10": 1}, "totals": {"coinTotal": 999, "noteTotal": 0, "grandTotal": 999}}"#;
        let session = decode_document(text, clock().today()).unwrap();
        assert_eq!(session.totals(Registry::swedish()).grand_total.kronor(), 10);
    }

    #[test]
    fn test_import_missing_counts_fails() {
        let err = decode_document(r#"{"title": "x"}"#, clock().today()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat { .. }));
    }

    #[test]
    fn test_import_non_object_counts_fails() {
        for text in [r#"{"counts": [1, 2]}"#, r#"{"counts": null}"#, r#"{"counts": "10"}"#] {
            let err = decode_document(text, clock().today()).unwrap_err();
            assert!(matches!(err, CoreError::InvalidFormat { .. }), "{text}");
        }
    }

    #[test]
    fn test_import_non_object_root_fails() {
        let err = decode_document("[]", clock().today()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat { .. }));
    }

    #[test]
    fn test_import_not_json_fails() {
        let err = decode_document("hello", clock().today()).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn test_import_skips_entries_it_cannot_read() {
        let session = decode_document(
            r#"{"counts": {"10": 3, "note": 1, "5": 2.5, "2": [1], "1": null}, "title": "Dag"}"#,
            clock().today(),
        )
        .unwrap();

        assert_eq!(session.title, "Dag");
        assert_eq!(session.tally.len(), 1);
        assert_eq!(session.tally.get_count(10), 3);
    }

    #[test]
    fn test_import_accepts_whole_floats_and_integer_text() {
        let session = decode_document(
            r#"{"counts": {"10": 3.0, "500": "2", "20": 1e2}}"#,
            clock().today(),
        )
        .unwrap();

        assert_eq!(session.tally.get_count(10), 3);
        assert_eq!(session.tally.get_count(500), 2);
        assert_eq!(session.tally.get_count(20), 100);
        assert_eq!(session.totals(Registry::swedish()).grand_total.kronor(), 3030);
    }

    #[test]
    fn test_import_floors_negative_counts_and_keeps_unknown_keys() {
        let session =
            decode_document(r#"{"counts": {"5": -2, "1000": 3}}"#, clock().today()).unwrap();
        assert_eq!(session.tally.get_count(5), 0);
        assert_eq!(session.tally.get_count(1000), 3);
        assert!(session.totals(Registry::swedish()).grand_total.is_zero());
    }

    #[test]
    fn test_import_treats_empty_and_null_fields_as_absent() {
        let text = r#"{"counts": {}, "title": null, "date": "", "comment": null}"#;
        let session = decode_document(text, clock().today()).unwrap();
        assert_eq!(session, Session::new(clock().today()));
    }

    #[test]
    fn test_suggest_filename() {
        let today = clock().today();
        assert_eq!(suggest_filename("Dagskassa", today), "svensk-kassa-Dagskassa.json");
        assert_eq!(
            suggest_filename("  Fredag   kväll ", today),
            "svensk-kassa-Fredag-kväll.json"
        );
        assert_eq!(suggest_filename("a/b: c", today), "svensk-kassa-ab-c.json");
        assert_eq!(suggest_filename("", today), "svensk-kassa-2026-10-19.json");
        assert_eq!(suggest_filename("///", today), "svensk-kassa-2026-10-19.json");
    }
}
