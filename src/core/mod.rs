pub mod errors;

use crate::scoring::grade::EcoLabel;
use crate::scoring::recommendations::Recommendation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use errors::{AuditFailure, Error, Result};

/// Metrics extracted from one page audit.
///
/// Every field is optional: audit tools omit audits that did not run,
/// and scoring has an explicit fallback for each absence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAuditReport {
    /// Performance category score in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<f64>,
    /// Bytes transferred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_byte_weight: Option<f64>,
    /// Main-thread script execution time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootup_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_green_hosting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_optimized_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_layout_shift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_contentful_paint_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_contentful_paint_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_potential_fid_ms: Option<f64>,
}

/// Core Web Vitals available for estimating a missing performance score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WebVitals {
    pub fcp_ms: Option<f64>,
    pub lcp_ms: Option<f64>,
    pub fid_ms: Option<f64>,
    pub cls: Option<f64>,
}

impl WebVitals {
    pub fn is_empty(&self) -> bool {
        self.fcp_ms.is_none()
            && self.lcp_ms.is_none()
            && self.fid_ms.is_none()
            && self.cls.is_none()
    }
}

/// Where the performance score of a report comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PerformanceSource {
    /// The audit reported a score directly
    Direct(f64),
    /// No score, but vitals are present to estimate one
    Estimated(WebVitals),
    /// Neither score nor vitals
    Unavailable,
}

impl RawAuditReport {
    pub fn performance_source(&self) -> PerformanceSource {
        if let Some(score) = self.performance_score.filter(|s| s.is_finite()) {
            return PerformanceSource::Direct(score);
        }

        let vitals = WebVitals {
            fcp_ms: finite(self.first_contentful_paint_ms),
            lcp_ms: finite(self.largest_contentful_paint_ms),
            fid_ms: finite(self.max_potential_fid_ms),
            cls: finite(self.cumulative_layout_shift),
        };

        if vitals.is_empty() {
            PerformanceSource::Unavailable
        } else {
            PerformanceSource::Estimated(vitals)
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Estimated carbon footprint of one page visit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Co2Estimate {
    #[serde(rename = "totalCO2_kg")]
    pub total_co2_kg: f64,
    #[serde(rename = "dataCO2_kg")]
    pub data_co2_kg: f64,
    #[serde(rename = "bootupCO2_kg")]
    pub bootup_co2_kg: f64,
    #[serde(rename = "dataSizeMB")]
    pub data_size_mb: f64,
    #[serde(rename = "equivalentTrees")]
    pub equivalent_trees: f64,
    #[serde(rename = "equivalentCarsKm")]
    pub equivalent_cars_km: f64,
    #[serde(rename = "perVisit_kg")]
    pub per_visit_kg: f64,
}

/// Derived eco metrics of one page, or of a whole site after aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoData {
    pub eco_score: u8,
    /// Performance score scaled to [0, 100]
    pub performance: f64,
    pub total_bytes: f64,
    /// Milliseconds
    pub bootup_time: f64,
    /// 0 or 100
    pub hosting_green: u8,
    /// 0 or 100
    pub image_optimization: u8,
    pub cls: f64,
    pub co2: Option<Co2Estimate>,
}

/// Aggregated records share the per-page shape.
pub type AggregatedEcoData = EcoData;

/// Score value of a pass/fail audit.
pub const FLAG_PASS: u8 = 100;
pub const FLAG_FAIL: u8 = 0;

pub fn flag_score(passed: bool) -> u8 {
    if passed {
        FLAG_PASS
    } else {
        FLAG_FAIL
    }
}

/// Persisted result of a single-page analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    pub eco_data: EcoData,
    pub eco_label: EcoLabel,
    pub recommendations: Vec<Recommendation>,
    pub audit: RawAuditReport,
}

/// One successfully analysed page inside a website report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub url: String,
    pub eco_data: EcoData,
    pub eco_label: EcoLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// One failed page inside a website report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    pub url: String,
    pub error: String,
}

/// Result of a multi-page analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteReport {
    pub success: bool,
    pub domain: String,
    pub analyzed_at: DateTime<Utc>,
    pub analyzed_pages: usize,
    pub successful_analyses: usize,
    pub failed_analyses: usize,
    pub aggregated_eco_data: AggregatedEcoData,
    pub eco_label: EcoLabel,
    pub recommendations: Vec<Recommendation>,
    pub pages: Vec<PageResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<PageError>,
}
