pub mod aggregation;
pub mod co2;
pub mod eco_score;
pub mod grade;
pub mod normalizer;
pub mod recommendations;

pub use aggregation::{aggregate, aggregate_observed};
pub use co2::{estimate_co2, estimate_co2_observed};
pub use eco_score::{compute_eco_score, estimate_performance, EcoScoreCalculator};
pub use grade::{EcoLabel, Grade, GradeScale};
pub use normalizer::{normalize, normalize_checked, Band, NormalizeWarning};
pub use recommendations::{recommendations, Recommendation};
