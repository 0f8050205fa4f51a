//! Carbon estimate for one page visit.
//!
//! Transfer energy follows the widely used 0.81 kWh/GB figure, priced at an
//! average grid intensity of 475 gCO2/kWh. Green hosting keeps only a
//! residual fraction of the transfer emissions. Script execution adds a
//! processing term proportional to payload size and bootup time.

use crate::core::{Co2Estimate, EcoData, Error, Result};
use crate::observability::{ScoringEvent, ScoringSink, TracingSink};

pub const BYTES_PER_MB: f64 = 1_048_576.0;
pub const KWH_PER_GB_TRANSFER: f64 = 0.81;
pub const CO2_G_PER_KWH: f64 = 475.0;
/// Residual grid fraction for renewable-backed hosting
pub const GREEN_HOSTING_FACTOR: f64 = 0.05;
pub const CPU_MULTIPLIER: f64 = 1.5;
pub const PROCESSING_KWH_PER_GB: f64 = 0.1;

/// gCO2 per MB transferred from regular hosting
pub const CO2_G_PER_MB: f64 = KWH_PER_GB_TRANSFER / 1024.0 * CO2_G_PER_KWH;
/// gCO2 per MB processed per second of bootup, before the CPU multiplier
pub const PROCESSING_CO2_G_PER_MB: f64 = PROCESSING_KWH_PER_GB * CO2_G_PER_KWH / 1024.0;

/// Pages lighter than this are costed as this
pub const MIN_TOTAL_BYTES: f64 = 1000.0;
/// Bootup shorter than this is costed as this
pub const MIN_BOOTUP_MS: f64 = 10.0;

/// kg CO2 one tree absorbs per year
pub const KG_CO2_PER_TREE_YEAR: f64 = 0.021;
/// g CO2 emitted per km by an average car
pub const G_CO2_PER_CAR_KM: f64 = 120.0;

/// Reported instead of an exact zero total
pub const CO2_FLOOR_KG: f64 = 1e-10;

/// Estimate the CO2 of one visit, reporting floors through `tracing`.
pub fn estimate_co2(eco: &EcoData) -> Result<Co2Estimate> {
    estimate_co2_observed(eco, &TracingSink)
}

/// Estimate the CO2 of one visit.
///
/// Only `total_bytes`, `bootup_time` and `hosting_green` are read. NaN and
/// negative values fall under the minimum floors like any other small value;
/// infinite values are rejected with [`Error::InvalidInput`].
pub fn estimate_co2_observed(eco: &EcoData, sink: &dyn ScoringSink) -> Result<Co2Estimate> {
    let total_bytes = coerce("totalBytes", eco.total_bytes)?.max(MIN_TOTAL_BYTES);
    let bootup_ms = coerce("bootupTime", eco.bootup_time)?.max(MIN_BOOTUP_MS);

    let co2_per_mb = if eco.hosting_green > 0 {
        CO2_G_PER_MB * GREEN_HOSTING_FACTOR
    } else {
        CO2_G_PER_MB
    };

    let data_size_mb = total_bytes / BYTES_PER_MB;
    let data_g = data_size_mb * co2_per_mb;
    let bootup_g = data_size_mb * PROCESSING_CO2_G_PER_MB * (bootup_ms / 1000.0) * CPU_MULTIPLIER;
    let total_g = data_g + bootup_g;

    let mut total_kg = (total_g / 1000.0).max(0.0);
    if total_kg == 0.0 && total_g > 0.0 {
        sink.record(ScoringEvent::Co2Floored {
            floor_kg: CO2_FLOOR_KG,
        });
        total_kg = CO2_FLOOR_KG;
    }

    Ok(Co2Estimate {
        total_co2_kg: total_kg,
        data_co2_kg: (data_g / 1000.0).max(0.0),
        bootup_co2_kg: (bootup_g / 1000.0).max(0.0),
        data_size_mb: data_size_mb.max(0.0),
        equivalent_trees: (total_kg / KG_CO2_PER_TREE_YEAR).max(0.0),
        equivalent_cars_km: (total_g / G_CO2_PER_CAR_KM).max(0.0),
        per_visit_kg: total_kg,
    })
}

fn coerce(field: &str, value: f64) -> Result<f64> {
    if value.is_nan() {
        return Ok(0.0);
    }
    if value.is_infinite() {
        return Err(Error::InvalidInput(format!(
            "{field} must be finite (got {value})"
        )));
    }
    Ok(value)
}
