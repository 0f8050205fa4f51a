//! Scoring events and the sinks that receive them.

use std::fmt;
use std::sync::Mutex;

/// Something the scoring core wants an operator to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringEvent {
    /// A cost metric was NaN; it was scored as worst case (0).
    NonFiniteMetric { metric: &'static str },
    /// A normalization band had `min == max`; it was scored as 50.
    DegenerateBand { metric: &'static str, bound: f64 },
    /// The audit lacked a performance score; it was estimated from vitals.
    PerformanceEstimated { score: f64 },
    /// Neither a performance score nor vitals were present; 0.5 assumed.
    PerformanceDefaulted,
    /// CO2 estimation failed; the record carries no estimate.
    Co2Unavailable { reason: String },
    /// The total CO2 underflowed to zero and was floored.
    Co2Floored { floor_kg: f64 },
}

impl fmt::Display for ScoringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteMetric { metric } => {
                write!(f, "{metric} is not a number; scoring it as 0")
            }
            Self::DegenerateBand { metric, bound } => {
                write!(f, "{metric} band collapses at {bound}; scoring it as 50")
            }
            Self::PerformanceEstimated { score } => {
                write!(f, "performance score missing; estimated {score:.2} from web vitals")
            }
            Self::PerformanceDefaulted => {
                write!(f, "performance score and web vitals missing; assuming 0.50")
            }
            Self::Co2Unavailable { reason } => write!(f, "CO2 estimate unavailable: {reason}"),
            Self::Co2Floored { floor_kg } => {
                write!(f, "CO2 total underflowed to zero; reporting {floor_kg:e} kg")
            }
        }
    }
}

impl ScoringEvent {
    /// Warnings signal degraded input; everything else is informational.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteMetric { .. }
                | Self::DegenerateBand { .. }
                | Self::PerformanceDefaulted
                | Self::Co2Unavailable { .. }
        )
    }
}

/// Receiver for scoring events.
///
/// Implementations should be cheap; they are called inline from the
/// scoring functions.
pub trait ScoringSink: Send + Sync {
    fn record(&self, event: ScoringEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ScoringSink for TracingSink {
    fn record(&self, event: ScoringEvent) {
        if event.is_warning() {
            tracing::warn!(target: "ecolabel::scoring", "{event}");
        } else {
            tracing::debug!(target: "ecolabel::scoring", "{event}");
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ScoringSink for NullSink {
    fn record(&self, _event: ScoringEvent) {}
}

/// Keeps events in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ScoringEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScoringEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<ScoringEvent> {
        self.events().into_iter().filter(|e| e.is_warning()).collect()
    }
}

impl ScoringSink for RecordingSink {
    fn record(&self, event: ScoringEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_preserves_order() {
        let sink = RecordingSink::new();
        sink.record(ScoringEvent::PerformanceDefaulted);
        sink.record(ScoringEvent::Co2Floored { floor_kg: 1e-10 });

        assert_eq!(
            sink.events(),
            vec![
                ScoringEvent::PerformanceDefaulted,
                ScoringEvent::Co2Floored { floor_kg: 1e-10 }
            ]
        );
        assert_eq!(sink.warnings(), vec![ScoringEvent::PerformanceDefaulted]);
    }

    #[test]
    fn test_event_display() {
        let event = ScoringEvent::NonFiniteMetric {
            metric: "totalBytes",
        };
        assert_eq!(event.to_string(), "totalBytes is not a number; scoring it as 0");
    }
}
