//! # Report Rendering
//!
//! Plain-text summary of a session, meant for the clipboard.
//!
//! ## Layout
//! ```text
//! Kassaräkning - 2026-10-19
//!
//! Mynt
//! 10-krona: 3 st = 30 kr
//! Summa mynt: 30 kr
//!
//! Sedlar
//! 500-lapp: 1 st = 500 kr
//! 100-lapp: 2 st = 200 kr
//! Summa sedlar: 700 kr
//!
//! ----------------------------------------
//! Totalsumma: 730 kr
//!
//! Kommentar:
//! Räknad två gånger
//! ```
//!
//! Zero-count rows are omitted. The comment block only appears when the
//! comment is non-empty. The output is never parsed back.

use std::fmt::Write;

use crate::denomination::{Category, Registry};
use crate::session::Session;
use crate::tally::Totals;

/// Heading used when the session has no title.
pub const DEFAULT_TITLE: &str = "Kassaräkning";

const SEPARATOR_WIDTH: usize = 40;

/// Renders the report for a session and its totals.
pub fn render(session: &Session, totals: &Totals, registry: &Registry) -> String {
    let mut out = String::new();

    let title = session.title.trim();
    let title = if title.is_empty() { DEFAULT_TITLE } else { title };
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{title} - {}", session.date_string());

    for category in Category::ALL {
        out.push('\n');
        let _ = writeln!(out, "{}", category.display_name());

        for line in session.tally.lines(registry, category) {
            if line.count == 0 {
                continue;
            }
            let _ = writeln!(
                out,
                "{}: {} st = {}",
                line.denomination.label, line.count, line.subtotal
            );
        }

        let _ = writeln!(
            out,
            "Summa {}: {}",
            category.display_name().to_lowercase(),
            totals.for_category(category)
        );
    }

    out.push('\n');
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');
    let _ = writeln!(out, "Totalsumma: {}", totals.grand_total);

    if !session.comment.is_empty() {
        out.push('\n');
        out.push_str("Kommentar:\n");
        out.push_str(&session.comment);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn render_session(session: &Session) -> String {
        let registry = Registry::swedish();
        render(session, &session.totals(registry), registry)
    }

    #[test]
    fn test_empty_session_report() {
        let report = render_session(&Session::new(date()));
        let expected = "\
Kassaräkning - 2026-10-19

Mynt
Summa mynt: 0 kr

Sedlar
Summa sedlar: 0 kr

----------------------------------------
Totalsumma: 0 kr
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_full_report() {
        let mut session = Session::new(date());
        session.title = "Dagskassa".to_string();
        session.comment = "Räknad två gånger".to_string();
        session.tally.set_count(10, 3);
        session.tally.set_count(500, 1);
        session.tally.set_count(100, 2);
        session.tally.set_count(5, 0);

        let report = render_session(&session);
        let expected = "\
Dagskassa - 2026-10-19

Mynt
10-krona: 3 st = 30 kr
Summa mynt: 30 kr

Sedlar
500-lapp: 1 st = 500 kr
100-lapp: 2 st = 200 kr
Summa sedlar: 700 kr

----------------------------------------
Totalsumma: 730 kr

Kommentar:
Räknad två gånger
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_unknown_values_never_shown() {
        let mut session = Session::new(date());
        session.tally.set_count(1000, 2);

        let report = render_session(&session);
        assert!(!report.contains("1000"));
        assert!(report.contains("Totalsumma: 0 kr"));
    }

    #[test]
    fn test_large_amounts_are_grouped() {
        let mut session = Session::new(date());
        session.tally.set_count(500, 30);

        let report = render_session(&session);
        assert!(report.contains("500-lapp: 30 st = 15 000 kr"));
        assert!(report.contains("Totalsumma: 15 000 kr"));
    }
}
