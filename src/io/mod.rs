pub mod memory;
pub mod naming;
pub mod real;
pub mod traits;

pub use memory::MemoryReportStore;
pub use naming::{numbered_filename, report_filename, sanitize_host, website_report_filename};
pub use real::FsReportStore;
pub use traits::{validate_report_name, ReportEntry, ReportStore};

use crate::core::{Error, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system(path, e))
}

/// Write `content`, creating missing parent directories first.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| Error::file_system(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::file_system(path, e))?;
    }
    Ok(())
}
