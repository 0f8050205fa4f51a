//! Site-level aggregation of per-page eco data.
//!
//! Numeric metrics are averaged. Pass/fail flags are conjunctive: a site is
//! green-hosted (or image-optimized) only if every page is. CO2 is recomputed
//! from the aggregated inputs, never averaged, so the aggregate keeps
//! `total == data + bootup`.

use super::co2::estimate_co2_observed;
use super::eco_score::checked_score;
use crate::core::{AggregatedEcoData, EcoData, Error, Result, FLAG_FAIL, FLAG_PASS};
use crate::observability::{ScoringEvent, ScoringSink, TracingSink};

/// Aggregate pages, logging through `tracing`.
pub fn aggregate(pages: &[EcoData]) -> Result<AggregatedEcoData> {
    aggregate_observed(pages, &TracingSink)
}

pub fn aggregate_observed(
    pages: &[EcoData],
    sink: &dyn ScoringSink,
) -> Result<AggregatedEcoData> {
    if pages.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mean = |metric: fn(&EcoData) -> f64| -> f64 {
        pages.iter().map(metric).sum::<f64>() / pages.len() as f64
    };
    let all_pass = |flag: fn(&EcoData) -> u8| -> u8 {
        if pages.iter().all(|page| flag(page) == FLAG_PASS) {
            FLAG_PASS
        } else {
            FLAG_FAIL
        }
    };

    let mut aggregated = EcoData {
        eco_score: checked_score(mean(|p| f64::from(p.eco_score)))?,
        performance: mean(|p| p.performance),
        total_bytes: mean(|p| p.total_bytes),
        bootup_time: mean(|p| p.bootup_time),
        hosting_green: all_pass(|p| p.hosting_green),
        image_optimization: all_pass(|p| p.image_optimization),
        cls: mean(|p| p.cls),
        co2: None,
    };

    aggregated.co2 = match estimate_co2_observed(&aggregated, sink) {
        Ok(estimate) => Some(estimate),
        Err(err) => {
            sink.record(ScoringEvent::Co2Unavailable {
                reason: err.to_string(),
            });
            None
        }
    };

    Ok(aggregated)
}
