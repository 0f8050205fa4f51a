//! CLI command implementations.
//!
//! Available commands:
//! - **analyze**: audit and grade a single page
//! - **site**: audit up to 10 pages and grade the site
//! - **score**: grade a saved Lighthouse result offline
//! - **reports**: list and show saved reports
//! - **init**: write a default `.ecolabel.toml`
//!
//! Handlers are generic over the auditor and report store where they touch
//! them, so the binary wires in Lighthouse and the filesystem while tests use
//! the in-memory doubles.

pub mod analyze;
pub mod init;
pub mod reports;
pub mod score;
pub mod site;

use crate::audit::LighthouseAuditor;
use crate::cli::OutputArgs;
use crate::config::{self, EcolabelConfig};
use crate::formatting::FormattingConfig;
use crate::io::FsReportStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use analyze::handle_analyze;
pub use init::init_config;
pub use reports::{list_reports, show_report};
pub use score::handle_score;
pub use site::{collect_urls, handle_site};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: EcolabelConfig,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    /// Load the explicit config file, or discover `.ecolabel.toml`.
    pub fn load(config_path: Option<&Path>, plain: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::load_config_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => config::load_config(),
        };
        let formatting = if plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        Ok(Self { config, formatting })
    }

    pub fn auditor(&self) -> LighthouseAuditor {
        LighthouseAuditor::new(self.config.auditor.clone())
    }

    pub fn store(&self) -> FsReportStore {
        FsReportStore::new(self.config.reports.dir.clone())
    }
}

/// Output destination, borrowed from parsed arguments.
pub(crate) fn output_path(args: &OutputArgs) -> Option<&Path> {
    args.output.as_deref()
}

/// `.ecolabel.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(config::CONFIG_FILE_NAME)
}
