//! # Session Commands
//!
//! Viewing and editing the persisted session.
//!
//! ## Screen Layout (`kassa show`)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dagskassa                                           2026-10-19        │
//! │                                                                         │
//! │  Mynt                                                                  │
//! │    10-krona          3 st            30 kr                             │
//! │    5-krona           0 st             0 kr                             │
//! │    ...                                                                  │
//! │    Summa mynt                        30 kr                             │
//! │                                                                         │
//! │  Sedlar                                                                │
//! │    ...                                                                  │
//! │  ──────────────────────────────────────────                            │
//! │  Totalsumma                         730 kr                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit saves through the controller before the command returns.

use std::io::Write;

use kassa_core::input::parse_count;
use kassa_core::report::DEFAULT_TITLE;
use kassa_core::session::parse_date;
use kassa_core::{Category, Clock, SessionController, SlotStore, ValidationError};
use tracing::debug;

use crate::error::ApiError;

const LABEL_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 8;
const AMOUNT_WIDTH: usize = 14;

/// Prints every denomination row, category totals and the grand total.
pub fn show<S: SlotStore, C: Clock>(
    controller: &SessionController<S, C>,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    let session = controller.session();
    let totals = controller.totals();

    let title = session.title.trim();
    let title = if title.is_empty() { DEFAULT_TITLE } else { title };
    writeln!(out, "{title}    {}", session.date_string()).map_err(stdout_error)?;

    for category in Category::ALL {
        writeln!(out).map_err(stdout_error)?;
        writeln!(out, "{}", category.display_name()).map_err(stdout_error)?;

        for line in controller.lines(category) {
            writeln!(
                out,
                "  {:<LABEL_WIDTH$}{:>COUNT_WIDTH$} st{:>AMOUNT_WIDTH$}",
                line.denomination.label,
                line.count,
                line.subtotal.to_string()
            )
            .map_err(stdout_error)?;
        }

        writeln!(
            out,
            "  {:<width$}{:>AMOUNT_WIDTH$}",
            format!("Summa {}", category.display_name().to_lowercase()),
            totals.for_category(category).to_string(),
            width = LABEL_WIDTH + COUNT_WIDTH + 3
        )
        .map_err(stdout_error)?;
    }

    writeln!(out).map_err(stdout_error)?;
    writeln!(
        out,
        "{:<width$}{:>AMOUNT_WIDTH$}",
        "Totalsumma",
        totals.grand_total.to_string(),
        width = LABEL_WIDTH + COUNT_WIDTH + 5
    )
    .map_err(stdout_error)?;

    if !session.comment.is_empty() {
        writeln!(out).map_err(stdout_error)?;
        writeln!(out, "Kommentar: {}", session.comment).map_err(stdout_error)?;
    }

    Ok(())
}

/// Lists the registry, coins first.
pub fn denominations<S: SlotStore, C: Clock>(
    controller: &SessionController<S, C>,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    for category in Category::ALL {
        writeln!(out, "{}", category.display_name()).map_err(stdout_error)?;
        for denomination in controller.registry().list(Some(category)) {
            writeln!(out, "  {:>4}  {}", denomination.value, denomination.label)
                .map_err(stdout_error)?;
        }
    }
    Ok(())
}

/// Sets the count for one denomination.
///
/// `value` must name a registry denomination. `count` is free text and is
/// read the way a count field is: leading digits, anything else is zero,
/// negatives become zero.
pub async fn set<S: SlotStore, C: Clock>(
    controller: &mut SessionController<S, C>,
    value: &str,
    count: &str,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    let value = parse_denomination(controller, value)?;
    let count = parse_count(count);
    debug!(value, count, "set command");

    controller.set_count(value, count).await;

    let stored = controller.session().tally.get_count(value);
    let totals = controller.totals();
    writeln!(out, "{value} kr: {stored} st").map_err(stdout_error)?;
    writeln!(out, "Totalsumma: {}", totals.grand_total).map_err(stdout_error)?;
    Ok(())
}

/// Sets the title. An empty title falls back to the default heading.
pub async fn title<S: SlotStore, C: Clock>(
    controller: &mut SessionController<S, C>,
    text: &str,
) -> Result<(), ApiError> {
    controller.set_title(text).await;
    Ok(())
}

/// Sets the date from `YYYY-MM-DD`.
pub async fn date<S: SlotStore, C: Clock>(
    controller: &mut SessionController<S, C>,
    text: &str,
) -> Result<(), ApiError> {
    let date = parse_date(text).ok_or_else(|| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: format!("expected YYYY-MM-DD, got {text:?}"),
    })?;
    controller.set_date(date).await;
    Ok(())
}

/// Sets the free-text comment.
pub async fn comment<S: SlotStore, C: Clock>(
    controller: &mut SessionController<S, C>,
    text: &str,
) -> Result<(), ApiError> {
    controller.set_comment(text).await;
    Ok(())
}

/// Clears everything and dates the session today. No undo.
pub async fn reset<S: SlotStore, C: Clock>(
    controller: &mut SessionController<S, C>,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    controller.reset().await;
    writeln!(out, "Återställd: Alla fält har rensats.").map_err(stdout_error)?;
    Ok(())
}

fn parse_denomination<S: SlotStore, C: Clock>(
    controller: &SessionController<S, C>,
    text: &str,
) -> Result<u32, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "value".to_string(),
        });
    }

    let value: u32 = text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "value".to_string(),
        reason: format!("{text:?} is not a whole number of kronor"),
    })?;

    if !controller.registry().contains(value) {
        return Err(ValidationError::InvalidFormat {
            field: "value".to_string(),
            reason: format!("{value} is not a Swedish coin or note"),
        });
    }

    Ok(value)
}

pub(crate) fn stdout_error(err: std::io::Error) -> ApiError {
    ApiError::internal(format!("Could not write output: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kassa_core::{FixedClock, MemorySlotStore};

    async fn loaded() -> SessionController<MemorySlotStore, FixedClock> {
        let clock = FixedClock::on(2026, 10, 19).unwrap();
        let mut controller = SessionController::with_clock(MemorySlotStore::new(), clock);
        controller.load().await;
        controller
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_set_accepts_free_text_counts() {
        let mut controller = loaded().await;
        let mut out = Vec::new();

        set(&mut controller, "500", "2 st", &mut out).await.unwrap();
        set(&mut controller, "10", "-4", &mut out).await.unwrap();
        set(&mut controller, "20", "tjugo", &mut out).await.unwrap();

        let tally = &controller.session().tally;
        assert_eq!(tally.get_count(500), 2);
        assert_eq!(tally.get_count(10), 0);
        assert_eq!(tally.get_count(20), 0);
        assert!(text(out).contains("Totalsumma: 1 000 kr"));
    }

    #[tokio::test]
    async fn test_set_rejects_unknown_values() {
        let mut controller = loaded().await;
        let mut out = Vec::new();

        let err = set(&mut controller, "25", "1", &mut out).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set(&mut controller, "tio", "1", &mut out).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set(&mut controller, " ", "1", &mut out).await.unwrap_err();
        assert!(err.message.contains("value is required"));

        assert!(controller.session().tally.is_empty());
        assert_eq!(controller.store().write_count(), 0);
    }

    #[tokio::test]
    async fn test_date_validation() {
        let mut controller = loaded().await;

        date(&mut controller, "2026-12-24").await.unwrap();
        assert_eq!(controller.session().date_string(), "2026-12-24");

        let err = date(&mut controller, "24/12/2026").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(controller.session().date_string(), "2026-12-24");
    }

    #[tokio::test]
    async fn test_show_lists_all_rows() {
        let mut controller = loaded().await;
        controller.set_count(10, 3).await;
        controller.set_count(500, 1).await;
        controller.set_count(100, 2).await;
        controller.set_comment("Stämmer").await;

        let mut out = Vec::new();
        show(&controller, &mut out).unwrap();
        let screen = text(out);

        assert!(screen.starts_with("Kassaräkning    2026-10-19\n"));
        assert!(screen.contains("5-krona"));
        assert!(screen.contains("Summa mynt"));
        assert!(screen.contains("30 kr"));
        assert!(screen.contains("700 kr"));
        assert!(screen.contains("730 kr"));
        assert!(screen.ends_with("Kommentar: Stämmer\n"));
        assert_eq!(screen.matches(" st ").count(), 9);
    }

    #[tokio::test]
    async fn test_denominations_in_registry_order() {
        let controller = loaded().await;
        let mut out = Vec::new();
        denominations(&controller, &mut out).unwrap();

        let listing = text(out);
        let coins = listing.find("Mynt").unwrap();
        let notes = listing.find("Sedlar").unwrap();
        assert!(coins < notes);
        assert!(listing.contains("500  500-lapp"));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut controller = loaded().await;
        title(&mut controller, "Dagskassa").await.unwrap();
        comment(&mut controller, "Saknas 5 kr").await.unwrap();
        controller.set_count(50, 4).await;

        let mut out = Vec::new();
        reset(&mut controller, &mut out).await.unwrap();

        let session = controller.session();
        assert!(session.title.is_empty());
        assert!(session.comment.is_empty());
        assert!(session.tally.is_empty());
        assert_eq!(text(out), "Återställd: Alla fält har rensats.\n");
    }
}
