use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::Result;
use crate::types::EventId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Single CSV, narrowed by the selected event when there is one.
    Filtered(Option<EventId>),
    /// ZIP with one CSV per event.
    AllEvents,
}

impl ExportKind {
    pub fn filename(self, date: NaiveDate) -> String {
        let day = date.format("%Y-%m-%d");
        match self {
            ExportKind::Filtered(Some(event)) => format!("teams_export_{event}_{day}.csv"),
            ExportKind::Filtered(None) => format!("teams_export_{day}.csv"),
            ExportKind::AllEvents => format!("TEXPERIA_all_events_{day}.zip"),
        }
    }
}

/// Write an export payload into `dir` under its dated name. The date is the
/// UTC calendar day, as the web dashboard names its downloads.
pub fn save(dir: &Path, kind: ExportKind, bytes: &[u8]) -> Result<PathBuf> {
    save_dated(dir, kind, bytes, Utc::now().date_naive())
}

pub fn save_dated(dir: &Path, kind: ExportKind, bytes: &[u8], date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(kind.filename(date));
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "export saved");
    Ok(path)
}
