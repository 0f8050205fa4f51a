// Export modules for library usage
pub mod analysis;
pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod output;
pub mod scoring;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{
    AggregatedEcoData, AuditFailure, Co2Estimate, EcoData, Error, PageError, PageReport,
    PageResult, PerformanceSource, RawAuditReport, Result, WebVitals, WebsiteReport,
};

pub use crate::scoring::{
    aggregate, compute_eco_score, estimate_co2, normalize, recommendations, EcoLabel,
    EcoScoreCalculator, Grade, GradeScale, Recommendation,
};

pub use crate::analysis::{Orchestrator, PageAnalysis, SiteAnalysis};
pub use crate::audit::{Auditor, LighthouseAuditor};
pub use crate::config::EcolabelConfig;
pub use crate::io::{FsReportStore, MemoryReportStore, ReportStore};
pub use crate::observability::{ScoringEvent, ScoringSink};
