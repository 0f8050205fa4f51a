//! Shared error types for the application

use crate::core::PageResult;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for ecolabel operations
#[derive(Debug, Error)]
pub enum Error {
    /// The composite score came out NaN or outside [0, 100].
    ///
    /// This is a logic defect, never corrected silently.
    #[error("Invalid EcoScore: {value} is outside [0, 100]")]
    InvalidScore { value: f64 },

    /// The CO2 estimator was handed unusable inputs
    #[error("Invalid CO2 input: {0}")]
    InvalidInput(String),

    /// Aggregation was asked to combine zero pages
    #[error("Cannot aggregate an empty set of pages")]
    EmptyInput,

    /// A single page audit failed
    #[error("Audit of {url} failed: {source}")]
    Audit {
        url: String,
        #[source]
        source: AuditFailure,
    },

    /// The auditor could not be prepared, so no page can be audited
    #[error("Auditor unavailable: {0}")]
    AuditorUnavailable(#[source] AuditFailure),

    /// Aggregation failed after some pages were analysed successfully
    #[error("Aggregation failed after {} successful page(s): {source}", .pages.len())]
    AggregationFailed {
        #[source]
        source: Box<Error>,
        pages: Vec<PageResult>,
    },

    /// Every URL in a batch failed
    #[error("All {count} page analyses failed")]
    NoSuccessfulAnalyses {
        count: usize,
        errors: Vec<crate::core::PageError>,
    },

    /// Batch exceeds the configured URL limit
    #[error("Too many URLs: {count} submitted, at most {max} allowed")]
    BatchTooLarge { count: usize, max: usize },

    /// Batch contained no URLs
    #[error("At least one URL is required")]
    EmptyBatch,

    /// URL could not be parsed or has no host
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Requested report does not exist in the store
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    /// Report name would escape the store
    #[error("Invalid report name: {0}")]
    InvalidReportName(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system related errors
    #[error("File system error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure is confined to one page of a batch.
    pub fn is_page_level(&self) -> bool {
        matches!(self, Self::Audit { .. } | Self::InvalidScore { .. })
    }
}

/// Failure reported by an [`Auditor`](crate::audit::Auditor) for one URL.
#[derive(Debug, Error)]
pub enum AuditFailure {
    /// The audit tool could not be located or started
    #[error("could not launch auditor: {0}")]
    Launch(String),

    /// The page did not finish loading and auditing in time
    #[error("audit timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The audit tool ran but reported failure
    #[error("auditor exited with {status}: {stderr}")]
    Process { status: String, stderr: String },

    /// The audit tool produced output that is not a usable report
    #[error("unreadable audit report: {0}")]
    Parse(String),

    /// The page could not be audited (unreachable, no content painted, ...)
    #[error("page could not be audited ({code}): {message}")]
    Runtime { code: String, message: String },
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
