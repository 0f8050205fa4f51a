//! Page and site analysis orchestration.

pub mod orchestrator;

pub use orchestrator::{
    build_page_report, parse_url, Clock, Orchestrator, PageAnalysis, SiteAnalysis,
};
