use crate::core::{EcoData, FLAG_PASS};
use serde::{Deserialize, Serialize};

/// Improvement advice derived from eco data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    ImprovePerformance,
    ReducePageWeight,
    ReduceScriptExecution,
    SwitchToGreenHosting,
    OptimizeImages,
    StabilizeLayout,
    CacheStaticAssets,
    MinimizeRequests,
    UseCdn,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ImprovePerformance => "Improve page performance: minify CSS and JavaScript",
            Self::ReducePageWeight => {
                "Reduce page weight: optimize images and remove unused resources"
            }
            Self::ReduceScriptExecution => {
                "Shorten JavaScript execution: use lazy loading and code splitting"
            }
            Self::SwitchToGreenHosting => {
                "Consider moving to green hosting powered by renewable energy"
            }
            Self::OptimizeImages => "Optimize images: use modern formats (WebP, AVIF) and compression",
            Self::StabilizeLayout => {
                "Reduce Cumulative Layout Shift: set explicit dimensions for images and ads"
            }
            Self::CacheStaticAssets => "Cache static assets",
            Self::MinimizeRequests => "Minimize the number of HTTP requests",
            Self::UseCdn => "Use a CDN for faster content delivery",
        }
    }

    /// Whether the advice is triggered by a measurement, as opposed to general
    pub fn is_targeted(&self) -> bool {
        !matches!(
            self,
            Self::CacheStaticAssets | Self::MinimizeRequests | Self::UseCdn
        )
    }
}

const GENERAL: [Recommendation; 3] = [
    Recommendation::CacheStaticAssets,
    Recommendation::MinimizeRequests,
    Recommendation::UseCdn,
];

/// Targeted advice for weak metrics, followed by general advice.
pub fn recommendations(eco: &EcoData) -> Vec<Recommendation> {
    let checks = [
        (eco.performance < 50.0, Recommendation::ImprovePerformance),
        (eco.total_bytes > 1_000_000.0, Recommendation::ReducePageWeight),
        (eco.bootup_time > 1000.0, Recommendation::ReduceScriptExecution),
        (eco.hosting_green != FLAG_PASS, Recommendation::SwitchToGreenHosting),
        (eco.image_optimization != FLAG_PASS, Recommendation::OptimizeImages),
        (eco.cls > 0.1, Recommendation::StabilizeLayout),
    ];

    checks
        .into_iter()
        .filter_map(|(triggered, advice)| triggered.then_some(advice))
        .chain(GENERAL)
        .collect()
}
