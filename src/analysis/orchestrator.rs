//! Page and site analysis.
//!
//! The orchestrator is the imperative shell around the scoring core: it owns
//! the [`Auditor`] and the [`ReportStore`], validates input, audits pages one
//! at a time in input order and persists what it produces. Everything it
//! computes goes through the pure functions in [`crate::scoring`].

use crate::audit::Auditor;
use crate::config::{EcolabelConfig, MAX_URLS_HARD_CAP};
use crate::core::{
    Error, PageError, PageReport, PageResult, RawAuditReport, Result, WebsiteReport,
};
use crate::io::{numbered_filename, report_filename, website_report_filename, ReportStore};
use crate::observability::{ScoringSink, TracingSink};
use crate::scoring::{aggregate_observed, recommendations, EcoScoreCalculator, GradeScale};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Source of "now" for report timestamps and filenames.
pub type Clock = fn() -> DateTime<Utc>;

/// A single-page analysis and where it was saved, if it was.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    pub report: PageReport,
    pub filename: Option<String>,
}

/// A site analysis and the name of its saved website report.
#[derive(Debug, Clone)]
pub struct SiteAnalysis {
    pub report: WebsiteReport,
    pub filename: String,
}

pub struct Orchestrator<A: Auditor, S: ReportStore> {
    auditor: A,
    store: S,
    max_urls: usize,
    scale: GradeScale,
    sink: Arc<dyn ScoringSink>,
    clock: Clock,
}

impl<A: Auditor, S: ReportStore> Orchestrator<A, S> {
    pub fn new(auditor: A, store: S) -> Self {
        Self {
            auditor,
            store,
            max_urls: MAX_URLS_HARD_CAP,
            scale: GradeScale::default(),
            sink: Arc::new(TracingSink),
            clock: Utc::now,
        }
    }

    pub fn from_config(auditor: A, store: S, config: &EcolabelConfig) -> Self {
        Self::new(auditor, store)
            .with_max_urls(config.analysis.max_urls)
            .with_scale(config.grading.scale)
    }

    /// Batch limit; never raised above the hard cap of 10.
    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls.clamp(1, MAX_URLS_HARD_CAP);
        self
    }

    pub fn with_scale(mut self, scale: GradeScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ScoringSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn auditor(&self) -> &A {
        &self.auditor
    }

    /// Audit, score and persist one page.
    ///
    /// Unlike a site analysis, an audit failure here is the caller's error.
    pub fn analyze_page(&mut self, url: &str) -> Result<PageAnalysis> {
        let url = parse_url(url)?;

        self.auditor.acquire().map_err(Error::AuditorUnavailable)?;
        let result = self.audit_page(&url);
        self.auditor.release();

        let report = result?;
        let filename = self.persist_page(&url, &report, &mut HashSet::new());
        Ok(PageAnalysis { report, filename })
    }

    /// Audit every URL in order, then aggregate the successful pages.
    ///
    /// The whole request is rejected before any audit when the list is empty,
    /// longer than the batch limit or contains an invalid URL. Page-level
    /// failures are collected into `errors` and do not stop the batch.
    pub fn analyze_site<U: AsRef<str>>(&mut self, urls: &[U]) -> Result<SiteAnalysis> {
        let urls = self.validate_urls(urls)?;
        let first = urls[0].clone();

        self.auditor.acquire().map_err(Error::AuditorUnavailable)?;
        let outcome = self.audit_all(&urls);
        self.auditor.release();
        let (pages, eco, errors) = outcome?;

        if pages.is_empty() {
            return Err(Error::NoSuccessfulAnalyses {
                count: urls.len(),
                errors,
            });
        }

        let aggregated = match aggregate_observed(&eco, self.sink.as_ref()) {
            Ok(aggregated) => aggregated,
            Err(e) => {
                return Err(Error::AggregationFailed {
                    source: Box::new(e),
                    pages,
                })
            }
        };

        let analyzed_at = (self.clock)();
        let report = WebsiteReport {
            success: true,
            domain: first.host_str().unwrap_or_default().to_string(),
            analyzed_at,
            analyzed_pages: urls.len(),
            successful_analyses: pages.len(),
            failed_analyses: errors.len(),
            eco_label: self.scale.label_for(aggregated.eco_score),
            recommendations: recommendations(&aggregated),
            aggregated_eco_data: aggregated,
            pages,
            errors,
        };

        let filename = website_report_filename(&first, analyzed_at);
        self.store.save(&filename, &to_json(&report)?)?;
        tracing::info!(
            "Site analysis of {} finished: {}/{} pages succeeded, saved to {}",
            report.domain,
            report.successful_analyses,
            report.analyzed_pages,
            filename
        );

        Ok(SiteAnalysis { report, filename })
    }

    /// Reject the request outright if it cannot be processed as a whole.
    pub fn validate_urls<U: AsRef<str>>(&self, urls: &[U]) -> Result<Vec<Url>> {
        if urls.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if urls.len() > self.max_urls {
            return Err(Error::BatchTooLarge {
                count: urls.len(),
                max: self.max_urls,
            });
        }
        urls.iter().map(|url| parse_url(url.as_ref())).collect()
    }

    fn audit_all(
        &mut self,
        urls: &[Url],
    ) -> Result<(Vec<PageResult>, Vec<crate::core::EcoData>, Vec<PageError>)> {
        let mut pages = Vec::with_capacity(urls.len());
        let mut eco = Vec::with_capacity(urls.len());
        let mut errors = Vec::new();
        let mut saved = HashSet::new();

        for (index, url) in urls.iter().enumerate() {
            tracing::info!("[{}/{}] Analyzing {}", index + 1, urls.len(), url);
            match self.audit_page(url) {
                Ok(report) => {
                    let filename = self.persist_page(url, &report, &mut saved);
                    eco.push(report.eco_data.clone());
                    pages.push(PageResult {
                        url: report.url,
                        eco_data: report.eco_data,
                        eco_label: report.eco_label,
                        filename,
                    });
                }
                Err(e) if e.is_page_level() => {
                    tracing::warn!("Analysis of {} failed: {}", url, e);
                    errors.push(PageError {
                        url: url.to_string(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok((pages, eco, errors))
    }

    fn audit_page(&mut self, url: &Url) -> Result<PageReport> {
        let raw = self.auditor.audit(url).map_err(|source| Error::Audit {
            url: url.to_string(),
            source,
        })?;
        build_page_report(url, raw, self.scale, self.sink.as_ref(), (self.clock)())
    }

    /// A page that cannot be saved is still a successful analysis.
    ///
    /// Pages of one host audited within the same millisecond would share a
    /// name, so names already in `saved` get a `-2`, `-3`, ... suffix.
    fn persist_page(
        &self,
        url: &Url,
        report: &PageReport,
        saved: &mut HashSet<String>,
    ) -> Option<String> {
        let base = report_filename(url, report.analyzed_at);
        let mut filename = base.clone();
        let mut n = 1;
        while saved.contains(&filename) {
            n += 1;
            filename = numbered_filename(&base, n);
        }

        let written = to_json(report).and_then(|json| self.store.save(&filename, &json));
        match written {
            Ok(()) => {
                saved.insert(filename.clone());
                Some(filename)
            }
            Err(e) => {
                tracing::warn!("Could not save report for {}: {}", url, e);
                None
            }
        }
    }
}

/// Score a raw audit report into a full page report.
pub fn build_page_report(
    url: &Url,
    raw: RawAuditReport,
    scale: GradeScale,
    sink: &dyn ScoringSink,
    analyzed_at: DateTime<Utc>,
) -> Result<PageReport> {
    let eco_data = EcoScoreCalculator::new(sink).compute(&raw)?;
    Ok(PageReport {
        url: url.to_string(),
        analyzed_at,
        eco_label: scale.label_for(eco_data.eco_score),
        recommendations: recommendations(&eco_data),
        eco_data,
        audit: raw,
    })
}

/// Parse an http(s) URL with a host.
pub fn parse_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| Error::invalid_url(trimmed, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(
            trimmed,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::invalid_url(trimmed, "missing host"));
    }
    Ok(url)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReportStore;
    use crate::testkit::{sample_report, ScriptedAuditor};

    fn orchestrator(auditor: ScriptedAuditor) -> Orchestrator<ScriptedAuditor, MemoryReportStore> {
        Orchestrator::new(auditor, MemoryReportStore::new())
    }

    #[test]
    fn test_parse_url_rejects_non_http() {
        assert!(parse_url("https://example.com").is_ok());
        assert!(matches!(
            parse_url("ftp://example.com"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(parse_url("not a url"), Err(Error::InvalidUrl { .. })));
    }

    #[test]
    fn test_validate_urls_limits() {
        let orch = orchestrator(ScriptedAuditor::new()).with_max_urls(2);
        let empty: [&str; 0] = [];
        assert!(matches!(orch.validate_urls(&empty), Err(Error::EmptyBatch)));
        assert!(matches!(
            orch.validate_urls(&["https://a.com", "https://b.com", "https://c.com"]),
            Err(Error::BatchTooLarge { count: 3, max: 2 })
        ));
    }

    #[test]
    fn test_max_urls_never_exceeds_hard_cap() {
        let orch = orchestrator(ScriptedAuditor::new()).with_max_urls(50);
        let urls: Vec<String> = (0..11).map(|i| format!("https://site{i}.com")).collect();
        assert!(matches!(
            orch.validate_urls(&urls),
            Err(Error::BatchTooLarge { count: 11, max: 10 })
        ));
    }

    #[test]
    fn test_analyze_page_saves_report() {
        let mut orch = orchestrator(ScriptedAuditor::new().succeed("https://example.com/", sample_report()));

        let analysis = orch.analyze_page("https://example.com/").unwrap();

        assert_eq!(analysis.report.eco_data.eco_score, 82);
        let filename = analysis.filename.unwrap();
        assert!(filename.starts_with("report-example-com-"));
        assert_eq!(orch.store().filenames(), vec![filename]);
        assert_eq!(orch.auditor().released(), 1);
    }

    #[test]
    fn test_analyze_page_audit_failure_is_error() {
        let mut orch = orchestrator(ScriptedAuditor::new().timeout("https://slow.example/"));
        let err = orch.analyze_page("https://slow.example/").unwrap_err();
        assert!(matches!(err, Error::Audit { .. }));
        assert_eq!(orch.auditor().released(), 1);
    }

    #[test]
    fn test_unavailable_auditor_fails_before_any_audit() {
        let mut orch = orchestrator(ScriptedAuditor::new().unavailable());
        let err = orch.analyze_site(&["https://example.com"]).unwrap_err();
        assert!(matches!(err, Error::AuditorUnavailable(_)));
        assert!(orch.auditor().audited().is_empty());
    }

    #[test]
    fn test_same_host_same_instant_gets_numbered_names() {
        fn frozen() -> DateTime<Utc> {
            DateTime::<Utc>::UNIX_EPOCH
        }
        let mut orch = orchestrator(
            ScriptedAuditor::new()
                .succeed("https://example.com/a", sample_report())
                .succeed("https://example.com/b", sample_report())
                .succeed("https://example.com/c", sample_report()),
        )
        .with_clock(frozen);

        let site = orch
            .analyze_site(&[
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
            ])
            .unwrap();

        let names: Vec<_> = site
            .report
            .pages
            .iter()
            .map(|p| p.filename.clone().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "report-example-com-1970-01-01T00-00-00-000Z.json",
                "report-example-com-1970-01-01T00-00-00-000Z-2.json",
                "report-example-com-1970-01-01T00-00-00-000Z-3.json",
            ]
        );
        assert_eq!(orch.store().len(), 4);
    }

    #[test]
    fn test_all_failures_is_no_successful_analyses() {
        let mut orch = orchestrator(
            ScriptedAuditor::new()
                .timeout("https://a.example/")
                .timeout("https://b.example/"),
        );
        match orch.analyze_site(&["https://a.example/", "https://b.example/"]) {
            Err(Error::NoSuccessfulAnalyses { count, errors }) => {
                assert_eq!(count, 2);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected NoSuccessfulAnalyses, got {other:?}"),
        }
        assert!(orch.store().is_empty());
    }
}
