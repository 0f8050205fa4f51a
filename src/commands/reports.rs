use crate::cli::OutputFormat;
use crate::formatting::FormattingConfig;
use crate::io::ReportStore;
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// `ecolabel reports list`
pub fn list_reports<S: ReportStore>(
    store: &S,
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    let entries = store.list().context("Failed to list reports")?;
    output::output_report_list(&entries, format, output_file, formatting)
}

/// `ecolabel reports show <FILENAME>`: print the stored JSON as is.
pub fn show_report<S: ReportStore>(
    store: &S,
    filename: &str,
    output_file: Option<&Path>,
) -> Result<()> {
    let json = store
        .load(filename)
        .with_context(|| format!("Failed to load report {}", filename))?;
    output::write_output(&json, output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::io::MemoryReportStore;
    use tempfile::TempDir;

    #[test]
    fn test_show_report_writes_stored_json() {
        let store = MemoryReportStore::new();
        store.save("report-a.json", "{\"ecoScore\":71}").unwrap();
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("copy.json");

        show_report(&store, "report-a.json", Some(out.as_path())).unwrap();

        assert_eq!(std::fs::read_to_string(out).unwrap(), "{\"ecoScore\":71}");
    }

    #[test]
    fn test_show_missing_report() {
        let err = show_report(&MemoryReportStore::new(), "report-x.json", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ReportNotFound(_))
        ));
    }

    #[test]
    fn test_list_reports_as_json() {
        let store = MemoryReportStore::new();
        store.save("report-a.json", "{}").unwrap();
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("list.json");

        list_reports(&store, OutputFormat::Json, Some(out.as_path()), FormattingConfig::plain()).unwrap();

        let listed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(listed[0]["filename"], "report-a.json");
        assert_eq!(listed[0]["size"], 2);
    }
}
