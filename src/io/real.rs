//! Directory-backed report store.

use crate::core::{Error, Result};
use crate::io::traits::{sort_newest_first, validate_report_name, ReportEntry, ReportStore};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each report as `<dir>/<filename>`.
///
/// The directory is created on first save, so listing a store that has never
/// been written to yields an empty list rather than an error.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    dir: PathBuf,
}

impl FsReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf> {
        validate_report_name(filename)?;
        Ok(self.dir.join(filename))
    }

    fn entry_for(path: &Path) -> Option<ReportEntry> {
        let filename = path.file_name()?.to_str()?.to_string();
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        let created_at: DateTime<Utc> = metadata
            .created()
            .or_else(|_| metadata.modified())
            .ok()
            .map(DateTime::from)
            .unwrap_or_default();
        Some(ReportEntry {
            filename,
            created_at,
            size: metadata.len(),
        })
    }
}

impl ReportStore for FsReportStore {
    fn save(&self, filename: &str, json: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        fs::create_dir_all(&self.dir).map_err(|e| Error::file_system(&self.dir, e))?;
        fs::write(&path, json).map_err(|e| Error::file_system(&path, e))?;
        tracing::debug!("Saved report to {}", path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<ReportEntry>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::file_system(&self.dir, e)),
        };

        let mut entries: Vec<ReportEntry> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| Self::entry_for(&path))
            .collect();

        sort_newest_first(&mut entries);
        Ok(entries)
    }

    fn load(&self, filename: &str) -> Result<String> {
        let path = self.path_for(filename)?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ReportNotFound(filename.to_string()),
            _ => Error::file_system(&path, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let store = FsReportStore::new(temp.path().join("reports"));

        store.save("report-a.json", "{}").unwrap();

        assert!(temp.path().join("reports").join("report-a.json").is_file());
        assert_eq!(store.load("report-a.json").unwrap(), "{}");
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FsReportStore::new(temp.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_ignores_non_json_files() {
        let temp = TempDir::new().unwrap();
        let store = FsReportStore::new(temp.path());
        store.save("report-a.json", r#"{"a":1}"#).unwrap();
        fs::write(temp.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir(temp.path().join("nested.json")).unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "report-a.json");
        assert_eq!(entries[0].size, 7);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = FsReportStore::new(temp.path());
        assert!(matches!(
            store.load("report-missing.json"),
            Err(Error::ReportNotFound(_))
        ));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let temp = TempDir::new().unwrap();
        let store = FsReportStore::new(temp.path().join("reports"));
        assert!(matches!(
            store.save("../escape.json", "{}"),
            Err(Error::InvalidReportName(_))
        ));
        assert!(!temp.path().join("escape.json").exists());
    }
}
