use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::GradeScale;

/// Upper bound on URLs in one site analysis, whatever the config says.
pub const MAX_URLS_HARD_CAP: usize = 10;

/// Root configuration structure for ecolabel
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EcolabelConfig {
    /// Batch limits for site analysis
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Lighthouse invocation settings
    #[serde(default)]
    pub auditor: AuditorConfig,

    /// Where reports are written
    #[serde(default)]
    pub reports: ReportsConfig,

    /// Grade threshold table
    #[serde(default)]
    pub grading: GradingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Maximum URLs accepted by `site` (default: 10, at most 10)
    #[serde(default = "default_max_urls")]
    pub max_urls: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_urls: default_max_urls(),
        }
    }
}

fn default_max_urls() -> usize {
    MAX_URLS_HARD_CAP
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditorConfig {
    /// Explicit path to the `lighthouse` executable; `PATH` is searched otherwise
    #[serde(default)]
    pub lighthouse_path: Option<PathBuf>,

    /// Chrome/Chromium binary handed to Lighthouse via `CHROME_PATH`
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Per-page audit timeout in seconds (default: 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Flags passed to the headless browser
    #[serde(default = "default_chrome_flags")]
    pub chrome_flags: Vec<String>,
}

impl AuditorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            lighthouse_path: None,
            chrome_path: None,
            timeout_secs: default_timeout_secs(),
            chrome_flags: default_chrome_flags(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_chrome_flags() -> Vec<String> {
    ["--headless=new", "--no-sandbox", "--disable-gpu", "--disable-dev-shm-usage"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportsConfig {
    /// Report directory, relative to the working directory (default: "reports")
    #[serde(default = "default_reports_dir")]
    pub dir: PathBuf,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            dir: default_reports_dir(),
        }
    }
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GradingConfig {
    #[serde(default)]
    pub scale: GradeScale,
}

impl EcolabelConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_URLS_HARD_CAP).contains(&self.analysis.max_urls) {
            return Err(format!(
                "analysis.max_urls must be between 1 and {}, got {}",
                MAX_URLS_HARD_CAP, self.analysis.max_urls
            ));
        }
        if self.auditor.timeout_secs == 0 {
            return Err("auditor.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Commented default configuration written by `ecolabel init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# ecolabel configuration

[analysis]
# Maximum number of URLs analysed by `ecolabel site` (1-10)
max_urls = 10

[auditor]
# Path to the lighthouse executable; searched on PATH when unset
# lighthouse_path = "/usr/local/bin/lighthouse"
# Chrome or Chromium binary used by lighthouse
# chrome_path = "/usr/bin/chromium"
# Seconds allowed for a single page audit
timeout_secs = 120
chrome_flags = ["--headless=new", "--no-sandbox", "--disable-gpu", "--disable-dev-shm-usage"]

[reports]
dir = "reports"

[grading]
# "six-band" (A >= 80, B >= 65, C >= 50, D >= 35, E >= 20) or
# "legacy" (A >= 80, B >= 60, C >= 40, D >= 20)
scale = "six-band"
"#;
