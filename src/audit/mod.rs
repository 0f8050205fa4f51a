//! The auditing seam.
//!
//! An [`Auditor`] loads a page and measures it. The scoring core never talks
//! to a browser; it only consumes the [`RawAuditReport`] an auditor returns.
//! The orchestrator owns its auditor and brackets a run with
//! [`Auditor::acquire`] and [`Auditor::release`], so browser lifetime is
//! explicit rather than a process-wide singleton.

pub mod lhr;
pub mod lighthouse;

use crate::core::{AuditFailure, RawAuditReport};
use url::Url;

pub use lhr::{parse_lighthouse_json, parse_lighthouse_result, LighthouseResult};
pub use lighthouse::LighthouseAuditor;

/// Loads and measures web pages, one at a time.
pub trait Auditor {
    /// Prepare the underlying browser or tool. Called once before a run.
    fn acquire(&mut self) -> Result<(), AuditFailure> {
        Ok(())
    }

    /// Audit a single page.
    ///
    /// Implementations enforce their own timeout and return
    /// [`AuditFailure::Timeout`] when it elapses.
    fn audit(&mut self, url: &Url) -> Result<RawAuditReport, AuditFailure>;

    /// Tear down whatever `acquire` set up. Called once after a run,
    /// whether or not the audits succeeded.
    fn release(&mut self) {}
}
