//! Report persistence seam.
//!
//! The orchestrator and the `reports` commands only see [`ReportStore`], so
//! analyses can be exercised against [`MemoryReportStore`](super::MemoryReportStore)
//! without touching disk.

use crate::core::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one persisted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub size: u64,
}

/// Flat, named storage for JSON reports.
///
/// Implementations must be thread-safe (`Send + Sync`) and reject names that
/// could escape the store, see [`validate_report_name`].
pub trait ReportStore: Send + Sync {
    /// Write `json` under `filename`, replacing any existing report.
    ///
    /// # Errors
    ///
    /// `Error::InvalidReportName` for unsafe names, `Error::FileSystem` when
    /// the write fails.
    fn save(&self, filename: &str, json: &str) -> Result<()>;

    /// All `.json` reports, newest first.
    fn list(&self) -> Result<Vec<ReportEntry>>;

    /// Read a report back.
    ///
    /// # Errors
    ///
    /// `Error::ReportNotFound` when no report has that name.
    fn load(&self, filename: &str) -> Result<String>;
}

/// Reject empty names, path separators and parent-directory references.
pub fn validate_report_name(filename: &str) -> Result<()> {
    let unsafe_name = filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename.contains("..")
        || filename.contains('\0');
    if unsafe_name {
        return Err(Error::InvalidReportName(filename.to_string()));
    }
    Ok(())
}

/// Newest first; equal timestamps fall back to reverse name order, which for
/// timestamped names is also newest first.
pub(crate) fn sort_newest_first(entries: &mut [ReportEntry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.filename.cmp(&a.filename))
    });
}
