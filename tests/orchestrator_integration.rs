//! End-to-end page and site analyses against scripted audits and real stores.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ecolabel::analysis::Orchestrator;
use ecolabel::core::{Error, WebsiteReport, FLAG_FAIL};
use ecolabel::io::{FsReportStore, MemoryReportStore, ReportStore};
use ecolabel::observability::{RecordingSink, ScoringEvent};
use ecolabel::scoring::{Grade, GradeScale};
use ecolabel::testkit::{heavy_report, sample_report, vitals_only_report, ScriptedAuditor};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 30).unwrap()
}

static TICKS: AtomicI64 = AtomicI64::new(0);

/// One millisecond later on every call.
fn ticking_clock() -> DateTime<Utc> {
    fixed_clock() + Duration::milliseconds(TICKS.fetch_add(1, Ordering::SeqCst))
}

fn three_page_auditor() -> ScriptedAuditor {
    ScriptedAuditor::new()
        .succeed("https://shop.example.com/", sample_report())
        .unreachable("https://shop.example.com/missing")
        .succeed("https://shop.example.com/catalog", heavy_report())
}

const THREE_PAGES: [&str; 3] = [
    "https://shop.example.com/",
    "https://shop.example.com/missing",
    "https://shop.example.com/catalog",
];

#[test]
fn partial_failure_is_reported_not_fatal() {
    let mut orch = Orchestrator::new(three_page_auditor(), MemoryReportStore::new())
        .with_clock(fixed_clock);

    let site = orch.analyze_site(&THREE_PAGES).unwrap();
    let report = &site.report;

    assert!(report.success);
    assert_eq!(report.domain, "shop.example.com");
    assert_eq!(report.analyzed_pages, 3);
    assert_eq!(report.successful_analyses, 2);
    assert_eq!(report.failed_analyses, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url, "https://shop.example.com/missing");

    let urls: Vec<_> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://shop.example.com/", "https://shop.example.com/catalog"]
    );

    let scores: Vec<_> = report.pages.iter().map(|p| p.eco_data.eco_score).collect();
    let mean = (f64::from(scores[0]) + f64::from(scores[1])) / 2.0;
    assert_eq!(f64::from(report.aggregated_eco_data.eco_score), mean.round());
    assert_eq!(report.aggregated_eco_data.hosting_green, FLAG_FAIL);
}

#[test]
fn audits_run_sequentially_in_input_order() {
    let mut orch = Orchestrator::new(three_page_auditor(), MemoryReportStore::new());
    orch.analyze_site(&THREE_PAGES).unwrap();

    assert_eq!(orch.auditor().audited(), &THREE_PAGES.map(String::from));
    assert_eq!(orch.auditor().acquired(), 1);
    assert_eq!(orch.auditor().released(), 1);
}

#[test]
fn every_page_and_the_site_are_persisted() {
    let mut orch = Orchestrator::new(three_page_auditor(), MemoryReportStore::new())
        .with_clock(fixed_clock);
    let site = orch.analyze_site(&THREE_PAGES).unwrap();

    assert_eq!(
        site.filename,
        "website-report-shop-example-com-2024-06-01T09-15-30-000Z.json"
    );
    let stored: WebsiteReport =
        serde_json::from_str(&orch.store().load(&site.filename).unwrap()).unwrap();
    assert_eq!(stored.successful_analyses, 2);

    let filenames: Vec<_> = site
        .report
        .pages
        .iter()
        .map(|p| p.filename.clone().unwrap())
        .collect();
    assert_eq!(
        filenames,
        vec![
            "report-shop-example-com-2024-06-01T09-15-30-000Z.json",
            "report-shop-example-com-2024-06-01T09-15-30-000Z-2.json",
        ]
    );
    assert_eq!(orch.store().len(), site.report.pages.len() + 1);

    for (page, filename) in site.report.pages.iter().zip(&filenames) {
        let stored: serde_json::Value =
            serde_json::from_str(&orch.store().load(filename).unwrap()).unwrap();
        assert_eq!(stored["url"], page.url.as_str());
    }
}

#[test]
fn page_reports_never_share_a_file() {
    let mut orch = Orchestrator::new(three_page_auditor(), MemoryReportStore::new())
        .with_clock(ticking_clock);
    let site = orch.analyze_site(&THREE_PAGES).unwrap();

    let filenames: HashSet<_> = site
        .report
        .pages
        .iter()
        .map(|p| p.filename.clone().unwrap())
        .collect();
    assert_eq!(filenames.len(), site.report.pages.len());
    assert_eq!(orch.store().len(), site.report.pages.len() + 1);
    for filename in &filenames {
        assert!(filename.starts_with("report-shop-example-com-2024-06-01T09-15-30-"));
    }
}

#[test]
fn oversized_batch_is_rejected_before_auditing() {
    let urls: Vec<String> = (0..11).map(|i| format!("https://example.com/{i}")).collect();
    let mut orch = Orchestrator::new(ScriptedAuditor::new(), MemoryReportStore::new());

    let err = orch.analyze_site(&urls).unwrap_err();

    assert!(matches!(err, Error::BatchTooLarge { count: 11, max: 10 }));
    assert!(orch.auditor().audited().is_empty());
    assert_eq!(orch.auditor().acquired(), 0);
}

#[test]
fn invalid_url_rejects_whole_batch() {
    let mut orch = Orchestrator::new(three_page_auditor(), MemoryReportStore::new());

    let err = orch
        .analyze_site(&["https://shop.example.com/", "notaurl"])
        .unwrap_err();

    assert!(matches!(err, Error::InvalidUrl { ref url, .. } if url == "notaurl"));
    assert!(orch.auditor().audited().is_empty());
}

#[test]
fn legacy_scale_and_sink_are_honoured() {
    let sink = Arc::new(RecordingSink::new());
    let mut orch = Orchestrator::new(
        ScriptedAuditor::new().succeed("https://example.org/", vitals_only_report()),
        MemoryReportStore::new(),
    )
    .with_scale(GradeScale::Legacy)
    .with_sink(sink.clone());

    let page = orch.analyze_page("https://example.org/").unwrap();

    assert_eq!(
        page.report.eco_label.grade,
        GradeScale::Legacy.classify(page.report.eco_data.eco_score)
    );
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, ScoringEvent::PerformanceEstimated { .. })));
}

#[test]
fn filesystem_store_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = FsReportStore::new(temp.path().join("reports"));
    let mut orch = Orchestrator::new(
        ScriptedAuditor::new().succeed("https://example.com/", sample_report()),
        store,
    )
    .with_clock(fixed_clock);

    let page = orch.analyze_page("https://example.com/").unwrap();
    assert_eq!(page.report.eco_label.grade, Grade::A);

    let entries = orch.store().list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].filename,
        "report-example-com-2024-06-01T09-15-30-000Z.json"
    );

    let json: serde_json::Value =
        serde_json::from_str(&orch.store().load(&entries[0].filename).unwrap()).unwrap();
    assert_eq!(json["ecoData"]["ecoScore"], 82);
    assert_eq!(json["ecoLabel"]["grade"], "A");
    assert_eq!(json["url"], "https://example.com/");
}

#[test]
fn unwritable_store_keeps_page_results() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("reports");
    std::fs::write(&blocker, "not a directory").unwrap();
    let mut orch = Orchestrator::new(
        ScriptedAuditor::new().succeed("https://example.com/", sample_report()),
        FsReportStore::new(&blocker),
    );

    let page = orch.analyze_page("https://example.com/").unwrap();
    assert!(page.filename.is_none());

    let err = orch.analyze_site(&["https://example.com/"]).unwrap_err();
    assert!(matches!(err, Error::FileSystem { .. }));
}
