//! Fixture factories for audit reports and eco data.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`sample_report`] | Healthy green page scoring 82 (grade A) |
//! | [`heavy_report`] | Slow, heavy, non-green page |
//! | [`vitals_only_report`] | No performance score, only Web Vitals |
//! | [`EcoDataBuilder`] | Build `EcoData` fluently for aggregation tests |
//! | [`SAMPLE_LHR_JSON`] | Minimal Lighthouse JSON for [`sample_report`] |

use crate::core::{flag_score, EcoData, RawAuditReport, FLAG_PASS};

/// Performance 0.9, 500 kB, 200 ms bootup, green, optimized images, CLS 0.05.
pub fn sample_report() -> RawAuditReport {
    RawAuditReport {
        performance_score: Some(0.9),
        total_byte_weight: Some(500_000.0),
        bootup_time_ms: Some(200.0),
        uses_green_hosting: Some(true),
        uses_optimized_images: Some(true),
        cumulative_layout_shift: Some(0.05),
        ..Default::default()
    }
}

/// Performance 0.3, 2.5 MB, 1.8 s bootup, grey hosting, unoptimized images.
pub fn heavy_report() -> RawAuditReport {
    RawAuditReport {
        performance_score: Some(0.3),
        total_byte_weight: Some(2_500_000.0),
        bootup_time_ms: Some(1800.0),
        uses_green_hosting: Some(false),
        uses_optimized_images: Some(false),
        cumulative_layout_shift: Some(0.3),
        ..Default::default()
    }
}

/// FCP 1500 ms, LCP 2000 ms, CLS 0.05; estimates to a performance of 0.9.
pub fn vitals_only_report() -> RawAuditReport {
    RawAuditReport {
        first_contentful_paint_ms: Some(1500.0),
        largest_contentful_paint_ms: Some(2000.0),
        cumulative_layout_shift: Some(0.05),
        ..Default::default()
    }
}

/// Lighthouse output equivalent to [`sample_report`].
pub const SAMPLE_LHR_JSON: &str = r#"{
  "requestedUrl": "https://example.com/",
  "finalUrl": "https://example.com/",
  "categories": { "performance": { "score": 0.9 } },
  "audits": {
    "total-byte-weight": { "score": 0.8, "numericValue": 500000 },
    "bootup-time": { "score": 1, "numericValue": 200 },
    "uses-green-hosting": { "score": 1 },
    "uses-optimized-images": { "score": 1 },
    "cumulative-layout-shift": { "score": 0.9, "numericValue": 0.05 }
  }
}"#;

/// Fluent builder for [`EcoData`] with healthy defaults.
#[derive(Debug, Clone)]
pub struct EcoDataBuilder {
    data: EcoData,
}

impl Default for EcoDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EcoDataBuilder {
    pub fn new() -> Self {
        Self {
            data: EcoData {
                eco_score: 80,
                performance: 90.0,
                total_bytes: 500_000.0,
                bootup_time: 200.0,
                hosting_green: FLAG_PASS,
                image_optimization: FLAG_PASS,
                cls: 0.05,
                co2: None,
            },
        }
    }

    pub fn eco_score(mut self, score: u8) -> Self {
        self.data.eco_score = score;
        self
    }

    pub fn performance(mut self, performance: f64) -> Self {
        self.data.performance = performance;
        self
    }

    pub fn total_bytes(mut self, bytes: f64) -> Self {
        self.data.total_bytes = bytes;
        self
    }

    pub fn bootup_time(mut self, ms: f64) -> Self {
        self.data.bootup_time = ms;
        self
    }

    pub fn green(mut self, green: bool) -> Self {
        self.data.hosting_green = flag_score(green);
        self
    }

    pub fn optimized_images(mut self, optimized: bool) -> Self {
        self.data.image_optimization = flag_score(optimized);
        self
    }

    pub fn cls(mut self, cls: f64) -> Self {
        self.data.cls = cls;
        self
    }

    pub fn build(self) -> EcoData {
        self.data
    }
}
