use crate::core::{Error, Result};
use crate::io::traits::{validate_report_name, ReportEntry, ReportStore};
use chrono::Utc;
use std::sync::RwLock;

/// In-memory report store for tests and dry runs.
///
/// Reports are kept in save order; re-saving a name moves it to the end.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<(ReportEntry, String)>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of stored reports in save order.
    pub fn filenames(&self) -> Vec<String> {
        self.reports
            .read()
            .map(|reports| reports.iter().map(|(e, _)| e.filename.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> Error {
    Error::Io(std::io::Error::other(format!(
        "report store lock failed: {}",
        e
    )))
}

impl ReportStore for MemoryReportStore {
    fn save(&self, filename: &str, json: &str) -> Result<()> {
        validate_report_name(filename)?;
        let mut reports = self.reports.write().map_err(lock_error)?;
        reports.retain(|(entry, _)| entry.filename != filename);
        reports.push((
            ReportEntry {
                filename: filename.to_string(),
                created_at: Utc::now(),
                size: json.len() as u64,
            },
            json.to_string(),
        ));
        Ok(())
    }

    /// Newest first is reverse save order.
    fn list(&self) -> Result<Vec<ReportEntry>> {
        let reports = self.reports.read().map_err(lock_error)?;
        Ok(reports
            .iter()
            .rev()
            .filter(|(entry, _)| entry.filename.ends_with(".json"))
            .map(|(entry, _)| entry.clone())
            .collect())
    }

    fn load(&self, filename: &str) -> Result<String> {
        validate_report_name(filename)?;
        let reports = self.reports.read().map_err(lock_error)?;
        reports
            .iter()
            .find(|(entry, _)| entry.filename == filename)
            .map(|(_, json)| json.clone())
            .ok_or_else(|| Error::ReportNotFound(filename.to_string()))
    }
}
