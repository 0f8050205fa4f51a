//! EcoScore calculation from a raw audit report.
//!
//! The score blends six components with fixed weights:
//!
//! | component            | weight | source                                 |
//! |----------------------|--------|----------------------------------------|
//! | performance          | 0.40   | performance score x 100                |
//! | byte weight          | 0.20   | normalized over 0..1,000,000 bytes     |
//! | bootup time          | 0.15   | normalized over 0..1000 ms             |
//! | green hosting        | 0.10   | 0 or 100                               |
//! | image optimization   | 0.10   | 0 or 100                               |
//! | cumulative shift     | 0.05   | normalized over 0..0.25                |
//!
//! Only intermediate components are clamped. The final rounded score is
//! checked, and anything outside [0, 100] is an error.

use super::co2::estimate_co2_observed;
use super::normalizer::{normalize_checked, Band, NormalizeWarning};
use crate::core::{
    flag_score, Co2Estimate, EcoData, Error, PerformanceSource, RawAuditReport, Result, WebVitals,
};
use crate::observability::{ScoringEvent, ScoringSink, TracingSink};

pub const PERFORMANCE_WEIGHT: f64 = 0.4;
pub const BYTES_WEIGHT: f64 = 0.2;
pub const BOOTUP_WEIGHT: f64 = 0.15;
pub const HOSTING_WEIGHT: f64 = 0.1;
pub const IMAGES_WEIGHT: f64 = 0.1;
pub const CLS_WEIGHT: f64 = 0.05;

pub const BYTES_BAND: Band = Band::new(0.0, 1_000_000.0);
pub const BOOTUP_BAND: Band = Band::new(0.0, 1000.0);
pub const CLS_BAND: Band = Band::new(0.0, 0.25);

/// Assumed performance score when nothing can be measured or estimated
pub const DEFAULT_PERFORMANCE_SCORE: f64 = 0.5;

/// Estimate a performance score in [0, 1] from web vitals.
///
/// Starts from 0.5 and adds credit for each fast vital:
/// FCP < 1.8s (+0.15) or < 3s (+0.10), LCP < 2.5s (+0.15) or < 4s (+0.10),
/// FID < 100ms (+0.10), CLS < 0.1 (+0.10).
pub fn estimate_performance(vitals: &WebVitals) -> f64 {
    let mut score = DEFAULT_PERFORMANCE_SCORE;

    score += match vitals.fcp_ms {
        Some(fcp) if fcp < 1800.0 => 0.15,
        Some(fcp) if fcp < 3000.0 => 0.10,
        _ => 0.0,
    };
    score += match vitals.lcp_ms {
        Some(lcp) if lcp < 2500.0 => 0.15,
        Some(lcp) if lcp < 4000.0 => 0.10,
        _ => 0.0,
    };
    if vitals.fid_ms.is_some_and(|fid| fid < 100.0) {
        score += 0.10;
    }
    if vitals.cls.is_some_and(|cls| cls < 0.1) {
        score += 0.10;
    }

    score.clamp(0.0, 1.0)
}

/// Round a raw weighted sum into a valid EcoScore.
pub(crate) fn checked_score(raw: f64) -> Result<u8> {
    let rounded = raw.round();
    if !rounded.is_finite() || !(0.0..=100.0).contains(&rounded) {
        return Err(Error::InvalidScore { value: raw });
    }
    Ok(rounded as u8)
}

/// Computes [`EcoData`] from audit reports, reporting fallbacks to a sink.
pub struct EcoScoreCalculator<'a> {
    sink: &'a dyn ScoringSink,
}

impl<'a> EcoScoreCalculator<'a> {
    pub fn new(sink: &'a dyn ScoringSink) -> Self {
        Self { sink }
    }

    pub fn compute(&self, report: &RawAuditReport) -> Result<EcoData> {
        let performance = self.resolve_performance(report) * 100.0;

        let total_bytes = report.total_byte_weight.unwrap_or(0.0);
        let bootup_time = report.bootup_time_ms.unwrap_or(0.0);
        let cls = report.cumulative_layout_shift.unwrap_or(0.0);
        let hosting_green = flag_score(report.uses_green_hosting.unwrap_or(false));
        let image_optimization = flag_score(report.uses_optimized_images.unwrap_or(false));

        let norm_bytes = self.normalize("totalBytes", total_bytes, BYTES_BAND);
        let norm_bootup = self.normalize("bootupTime", bootup_time, BOOTUP_BAND);
        let norm_cls = self.normalize("cls", cls, CLS_BAND);

        let raw = performance * PERFORMANCE_WEIGHT
            + norm_bytes * BYTES_WEIGHT
            + norm_bootup * BOOTUP_WEIGHT
            + f64::from(hosting_green) * HOSTING_WEIGHT
            + f64::from(image_optimization) * IMAGES_WEIGHT
            + norm_cls * CLS_WEIGHT;
        let eco_score = checked_score(raw)?;

        let mut eco = EcoData {
            eco_score,
            performance,
            total_bytes: zero_if_nan(total_bytes),
            bootup_time: zero_if_nan(bootup_time),
            hosting_green,
            image_optimization,
            cls: zero_if_nan(cls),
            co2: None,
        };
        eco.co2 = self.co2_or_none(&eco);

        Ok(eco)
    }

    fn resolve_performance(&self, report: &RawAuditReport) -> f64 {
        match report.performance_source() {
            PerformanceSource::Direct(score) => score,
            PerformanceSource::Estimated(vitals) => {
                let score = estimate_performance(&vitals);
                self.sink.record(ScoringEvent::PerformanceEstimated { score });
                score
            }
            PerformanceSource::Unavailable => {
                self.sink.record(ScoringEvent::PerformanceDefaulted);
                DEFAULT_PERFORMANCE_SCORE
            }
        }
    }

    fn normalize(&self, metric: &'static str, value: f64, band: Band) -> f64 {
        let (score, warning) = normalize_checked(value, band);
        let event = match warning {
            Some(NormalizeWarning::NonFinite) => ScoringEvent::NonFiniteMetric { metric },
            Some(NormalizeWarning::DegenerateBand) => ScoringEvent::DegenerateBand {
                metric,
                bound: band.min,
            },
            None => return score,
        };
        self.sink.record(event);
        score
    }

    pub(crate) fn co2_or_none(&self, eco: &EcoData) -> Option<Co2Estimate> {
        match estimate_co2_observed(eco, self.sink) {
            Ok(estimate) => Some(estimate),
            Err(err) => {
                self.sink.record(ScoringEvent::Co2Unavailable {
                    reason: err.to_string(),
                });
                None
            }
        }
    }
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Compute [`EcoData`] for a report, logging fallbacks through `tracing`.
pub fn compute_eco_score(report: &RawAuditReport) -> Result<EcoData> {
    EcoScoreCalculator::new(&TracingSink).compute(report)
}
