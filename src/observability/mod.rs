//! Observability for the scoring core and the binary.
//!
//! The scoring functions never log directly. They report noteworthy
//! situations (missing metrics, estimated scores, unavailable CO2) as
//! [`ScoringEvent`]s through an injected [`ScoringSink`], which keeps them
//! free of I/O and lets tests assert on exactly what was reported.
//!
//! ## Usage
//!
//! ```rust
//! use ecolabel::observability::{RecordingSink, ScoringEvent};
//! use ecolabel::scoring::EcoScoreCalculator;
//! use ecolabel::RawAuditReport;
//!
//! let sink = RecordingSink::new();
//! let calculator = EcoScoreCalculator::new(&sink);
//! let eco = calculator.compute(&RawAuditReport::default()).unwrap();
//!
//! assert_eq!(eco.performance, 50.0);
//! assert!(sink.events().contains(&ScoringEvent::PerformanceDefaulted));
//! ```
//!
//! The binary routes the same events to `tracing` with [`TracingSink`] and
//! installs a subscriber through [`init_tracing`].

pub mod events;
pub mod logging;

pub use events::{NullSink, RecordingSink, ScoringEvent, ScoringSink, TracingSink};
pub use logging::init_tracing;
