//! Auditor double that replays scripted outcomes per URL.
//!
//! [`ScriptedAuditor`] never starts a browser. Each URL is mapped to either a
//! [`RawAuditReport`] or an [`AuditFailure`]; URLs without a script fail with
//! a runtime error so a forgotten fixture shows up as a page error rather
//! than a silent success.

use crate::audit::Auditor;
use crate::core::{AuditFailure, RawAuditReport};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

enum Outcome {
    Report(RawAuditReport),
    Failure(fn() -> AuditFailure),
}

/// In-memory [`Auditor`] for orchestrator tests.
///
/// # Example
///
/// ```
/// use ecolabel::audit::Auditor;
/// use ecolabel::testkit::{sample_report, ScriptedAuditor};
/// use url::Url;
///
/// let mut auditor = ScriptedAuditor::new()
///     .succeed("https://example.com/", sample_report())
///     .timeout("https://slow.example/");
///
/// let ok = Url::parse("https://example.com/").unwrap();
/// let slow = Url::parse("https://slow.example/").unwrap();
/// assert!(auditor.audit(&ok).is_ok());
/// assert!(auditor.audit(&slow).is_err());
/// assert_eq!(auditor.audited().len(), 2);
/// ```
#[derive(Default)]
pub struct ScriptedAuditor {
    outcomes: HashMap<String, Outcome>,
    unavailable: bool,
    audited: Vec<String>,
    acquired: usize,
    released: usize,
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

impl ScriptedAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `report` when `url` is audited.
    pub fn succeed(mut self, url: &str, report: RawAuditReport) -> Self {
        self.outcomes.insert(normalize(url), Outcome::Report(report));
        self
    }

    /// Fail `url` with a timeout.
    pub fn timeout(mut self, url: &str) -> Self {
        self.outcomes.insert(
            normalize(url),
            Outcome::Failure(|| AuditFailure::Timeout(Duration::from_secs(120))),
        );
        self
    }

    /// Fail `url` as if the page could not be loaded.
    pub fn unreachable(mut self, url: &str) -> Self {
        self.outcomes.insert(
            normalize(url),
            Outcome::Failure(|| AuditFailure::Runtime {
                code: "FAILED_DOCUMENT_REQUEST".to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        );
        self
    }

    /// Make `acquire` fail, as when no browser can be launched.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// URLs audited so far, in call order.
    pub fn audited(&self) -> &[String] {
        &self.audited
    }

    pub fn acquired(&self) -> usize {
        self.acquired
    }

    pub fn released(&self) -> usize {
        self.released
    }
}

impl Auditor for ScriptedAuditor {
    fn acquire(&mut self) -> Result<(), AuditFailure> {
        if self.unavailable {
            return Err(AuditFailure::Launch("scripted auditor unavailable".to_string()));
        }
        self.acquired += 1;
        Ok(())
    }

    fn audit(&mut self, url: &Url) -> Result<RawAuditReport, AuditFailure> {
        self.audited.push(url.to_string());
        match self.outcomes.get(url.as_str()) {
            Some(Outcome::Report(report)) => Ok(report.clone()),
            Some(Outcome::Failure(failure)) => Err(failure()),
            None => Err(AuditFailure::Runtime {
                code: "UNSCRIPTED".to_string(),
                message: format!("no scripted outcome for {}", url),
            }),
        }
    }

    fn release(&mut self) {
        self.released += 1;
    }
}
