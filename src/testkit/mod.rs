//! Test doubles and fixtures for ecolabel.
//!
//! - **[`ScriptedAuditor`]**: [`Auditor`](crate::audit::Auditor) that replays
//!   per-URL outcomes without starting a browser
//! - **Fixtures**: canned audit reports and an [`EcoDataBuilder`]
//!
//! Pair the auditor with [`MemoryReportStore`](crate::io::MemoryReportStore)
//! to run full page and site analyses in memory.
//!
//! ```
//! use ecolabel::analysis::Orchestrator;
//! use ecolabel::io::MemoryReportStore;
//! use ecolabel::testkit::{heavy_report, sample_report, ScriptedAuditor};
//!
//! let auditor = ScriptedAuditor::new()
//!     .succeed("https://example.com/", sample_report())
//!     .succeed("https://example.com/blog", heavy_report());
//! let mut orchestrator = Orchestrator::new(auditor, MemoryReportStore::new());
//!
//! let site = orchestrator
//!     .analyze_site(&["https://example.com/", "https://example.com/blog"])
//!     .unwrap();
//! assert_eq!(site.report.successful_analyses, 2);
//! ```

pub mod helpers;
pub mod scripted_auditor;

pub use helpers::{
    heavy_report, sample_report, vitals_only_report, EcoDataBuilder, SAMPLE_LHR_JSON,
};
pub use scripted_auditor::ScriptedAuditor;
