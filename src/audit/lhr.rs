//! Lighthouse result (LHR) JSON parsing.
//!
//! Only the handful of fields the scoring core needs are modelled; everything
//! else in the report is ignored.

use crate::core::{AuditFailure, RawAuditReport};
use serde::Deserialize;
use std::collections::HashMap;

pub const TOTAL_BYTE_WEIGHT: &str = "total-byte-weight";
pub const BOOTUP_TIME: &str = "bootup-time";
pub const USES_GREEN_HOSTING: &str = "uses-green-hosting";
pub const USES_OPTIMIZED_IMAGES: &str = "uses-optimized-images";
pub const CUMULATIVE_LAYOUT_SHIFT: &str = "cumulative-layout-shift";
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";
pub const LARGEST_CONTENTFUL_PAINT: &str = "largest-contentful-paint";
pub const MAX_POTENTIAL_FID: &str = "max-potential-fid";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseResult {
    #[serde(default)]
    pub requested_url: Option<String>,
    #[serde(default)]
    pub final_url: Option<String>,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
    #[serde(default)]
    pub runtime_error: Option<RuntimeError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<Category>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RuntimeError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl LighthouseResult {
    fn numeric(&self, id: &str) -> Option<f64> {
        self.audits.get(id).and_then(|audit| audit.numeric_value)
    }

    /// A pass/fail audit passes only with a score of exactly 1.
    fn passed(&self, id: &str) -> Option<bool> {
        self.audits
            .get(id)
            .and_then(|audit| audit.score)
            .map(|score| score == 1.0)
    }

    pub fn to_raw_report(&self) -> RawAuditReport {
        RawAuditReport {
            performance_score: self.categories.performance.as_ref().and_then(|c| c.score),
            total_byte_weight: self.numeric(TOTAL_BYTE_WEIGHT),
            bootup_time_ms: self.numeric(BOOTUP_TIME),
            uses_green_hosting: self.passed(USES_GREEN_HOSTING),
            uses_optimized_images: self.passed(USES_OPTIMIZED_IMAGES),
            cumulative_layout_shift: self.numeric(CUMULATIVE_LAYOUT_SHIFT),
            first_contentful_paint_ms: self.numeric(FIRST_CONTENTFUL_PAINT),
            largest_contentful_paint_ms: self.numeric(LARGEST_CONTENTFUL_PAINT),
            max_potential_fid_ms: self.numeric(MAX_POTENTIAL_FID),
        }
    }
}

/// Parse Lighthouse JSON output.
///
/// A report carrying a `runtimeError` is a failed audit, not an empty one.
pub fn parse_lighthouse_result(json: &str) -> Result<LighthouseResult, AuditFailure> {
    let mut lhr: LighthouseResult =
        serde_json::from_str(json).map_err(|e| AuditFailure::Parse(e.to_string()))?;

    match lhr.runtime_error.take() {
        Some(err) => Err(AuditFailure::Runtime {
            code: err.code,
            message: err.message,
        }),
        None => Ok(lhr),
    }
}

/// Parse Lighthouse JSON output straight into a raw audit report.
pub fn parse_lighthouse_json(json: &str) -> Result<RawAuditReport, AuditFailure> {
    parse_lighthouse_result(json).map(|lhr| lhr.to_raw_report())
}

impl LighthouseResult {
    /// The URL Lighthouse ended up auditing, after redirects.
    pub fn audited_url(&self) -> Option<&str> {
        self.final_url
            .as_deref()
            .or(self.requested_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
