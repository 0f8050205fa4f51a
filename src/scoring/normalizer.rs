/// Score assigned when a band has no width.
pub const DEGENERATE_BAND_SCORE: f64 = 50.0;

/// Cost range mapped onto 100 (at `min`) down to 0 (at `max`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Reason a normalized score is a substitute rather than a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeWarning {
    /// Value was NaN; scored as worst case
    NonFinite,
    /// `min == max`; scored as average
    DegenerateBand,
}

/// Normalize a "lower is better" cost into [0, 100].
///
/// NaN scores 0 and a zero-width band scores 50.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    normalize_checked(value, Band::new(min, max)).0
}

/// Same as [`normalize`], also reporting when the result is a substitute.
pub fn normalize_checked(value: f64, band: Band) -> (f64, Option<NormalizeWarning>) {
    if value.is_nan() {
        return (0.0, Some(NormalizeWarning::NonFinite));
    }
    if band.is_degenerate() {
        return (DEGENERATE_BAND_SCORE, Some(NormalizeWarning::DegenerateBand));
    }

    let score = (band.max - value) / (band.max - band.min) * 100.0;
    (score.clamp(0.0, 100.0), None)
}
