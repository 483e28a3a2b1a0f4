//! # Transfer Commands
//!
//! Moving a session in and out of the app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kassa export ──► export_to() ──► svensk-kassa-<title|date>.json       │
//! │                                                                         │
//! │  kassa import f ─► read bytes ──► import_bytes() ──► session replaced  │
//! │                                        └── Err ──► IMPORT_ERROR,       │
//! │                                                    session untouched   │
//! │                                                                         │
//! │  kassa report ──► report() ──► stdout, or --output FILE                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use kassa_core::{Clock, CoreError, SessionController, SlotStore};
use tracing::{info, warn};

use crate::error::ApiError;

use super::session::stdout_error;

/// Writes the export document and returns the path written.
///
/// `target` may be a file path or an existing directory; without it the
/// suggested filename is placed in `export_dir`.
pub fn export<S: SlotStore, C: Clock>(
    controller: &SessionController<S, C>,
    target: Option<&Path>,
    export_dir: &Path,
    out: &mut impl Write,
) -> Result<PathBuf, ApiError> {
    let bundle = controller.export_to();
    let json = bundle
        .document
        .to_json()
        .map_err(|e| ApiError::export_failed(e.to_string()))?;

    let path = match target {
        Some(target) if target.is_dir() => target.join(&bundle.filename),
        Some(target) => target.to_path_buf(),
        None => export_dir.join(&bundle.filename),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                warn!(error = %e, dir = %parent.display(), "Export directory not writable");
                ApiError::export_failed(format!("{}: {e}", parent.display()))
            })?;
        }
    }

    std::fs::write(&path, json).map_err(|e| {
        warn!(error = %e, path = %path.display(), "Export write failed");
        ApiError::export_failed(format!("{}: {e}", path.display()))
    })?;

    info!(path = %path.display(), "Session exported");
    writeln!(out, "Exporterad! Din kassaberäkning har sparats i {}", path.display())
        .map_err(stdout_error)?;
    Ok(path)
}

/// Replaces the session with the contents of an export file.
pub async fn import<S: SlotStore, C: Clock>(
    controller: &mut SessionController<S, C>,
    file: &Path,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    let bytes = std::fs::read(file).map_err(|e| {
        warn!(error = %e, path = %file.display(), "Import file unreadable");
        CoreError::UnreadableFile(format!("{}: {e}", file.display()))
    })?;

    controller.import_bytes(&bytes).await?;

    writeln!(out, "Importerad! Kassaberäkning har laddats.").map_err(stdout_error)?;
    Ok(())
}

/// Emits the plain-text report, to `output` when given.
///
/// Stands in for the clipboard; any write failure is `COPY_FAILED`.
pub fn report<S: SlotStore, C: Clock>(
    controller: &SessionController<S, C>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    let text = controller.report();

    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|e| {
                warn!(error = %e, path = %path.display(), "Report write failed");
                ApiError::copy_failed(format!("{}: {e}", path.display()))
            })?;
            info!(path = %path.display(), "Report written");
            writeln!(out, "Kopierad! Rapporten har sparats i {}", path.display())
                .map_err(stdout_error)?;
        }
        None => {
            out.write_all(text.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|e| ApiError::copy_failed(e.to_string()))?;
        }
    }

    Ok(())
}
