//! Human-readable rendering of page reports, website reports and report
//! listings.

use crate::core::{EcoData, PageReport, WebsiteReport, FLAG_PASS};
use crate::formatting::OutputFormatter;
use crate::io::ReportEntry;
use crate::scoring::{EcoLabel, Recommendation};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

fn new_table(fmt: &dyn OutputFormatter) -> Table {
    let mut table = Table::new();
    table
        .load_preset(if fmt.uses_unicode() { UTF8_FULL } else { ASCII_FULL })
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    if bytes >= MB {
        format!("{:.2} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.0} B", bytes)
    }
}

fn yes_no(flag: u8) -> &'static str {
    if flag == FLAG_PASS {
        "yes"
    } else {
        "no"
    }
}

fn grade_line(label: &EcoLabel, score: u8, fmt: &dyn OutputFormatter) -> String {
    format!(
        "{}  {}  (EcoScore {}/100)",
        fmt.grade(label.grade, &format!(" {} ", label.grade)),
        fmt.bold(&label.label),
        score
    )
}

fn metrics_table(eco: &EcoData, fmt: &dyn OutputFormatter) -> Table {
    let mut table = new_table(fmt);
    table.set_header(vec!["Metric", "Value"]);
    let rows = [
        ("Performance", format!("{:.0}/100", eco.performance)),
        ("Page weight", format_bytes(eco.total_bytes)),
        ("JS bootup time", format!("{:.0} ms", eco.bootup_time)),
        ("Green hosting", yes_no(eco.hosting_green).to_string()),
        ("Optimized images", yes_no(eco.image_optimization).to_string()),
        ("Layout shift (CLS)", format!("{:.3}", eco.cls)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    if let Some(co2) = &eco.co2 {
        table.add_row(vec![
            Cell::new("CO2 per visit"),
            Cell::new(format!("{:.4} g", co2.per_visit_kg * 1000.0))
                .set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("  data / bootup"),
            Cell::new(format!(
                "{:.4} g / {:.4} g",
                co2.data_co2_kg * 1000.0,
                co2.bootup_co2_kg * 1000.0
            ))
            .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn write_recommendations(out: &mut String, recs: &[Recommendation], fmt: &dyn OutputFormatter) {
    out.push_str(&format!("\n{}\n", fmt.header("Recommendations")));
    let bullet = fmt.emoji("•", "-");
    for rec in recs {
        let text = if rec.is_targeted() {
            rec.message().to_string()
        } else {
            fmt.dim(rec.message())
        };
        out.push_str(&format!("  {} {}\n", bullet, text));
    }
}

fn write_saved(out: &mut String, filename: Option<&str>, fmt: &dyn OutputFormatter) {
    if let Some(filename) = filename {
        out.push_str(&format!("\n{} {}\n", fmt.dim("Report saved:"), filename));
    }
}

pub fn render_page(report: &PageReport, filename: Option<&str>, fmt: &dyn OutputFormatter) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        fmt.emoji("🌱", "*"),
        fmt.header(&format!("EcoLabel for {}", report.url))
    ));
    out.push_str(&format!("{}\n", fmt.dim(&report.analyzed_at.to_rfc3339())));
    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        grade_line(&report.eco_label, report.eco_data.eco_score, fmt)
    ));
    out.push_str(&format!("{}\n", report.eco_label.grade.description()));
    out.push('\n');
    out.push_str(&format!("{}\n", metrics_table(&report.eco_data, fmt)));
    write_recommendations(&mut out, &report.recommendations, fmt);
    write_saved(&mut out, filename, fmt);
    out
}

pub fn render_site(report: &WebsiteReport, filename: Option<&str>, fmt: &dyn OutputFormatter) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        fmt.emoji("🌍", "*"),
        fmt.header(&format!("EcoLabel for {}", report.domain))
    ));
    let summary = format!(
        "{} of {} pages analysed, {} failed",
        report.successful_analyses, report.analyzed_pages, report.failed_analyses
    );
    let summary = if report.failed_analyses == 0 {
        fmt.success(&summary)
    } else {
        fmt.warning(&summary)
    };
    out.push_str(&format!("{}\n", summary));
    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        grade_line(&report.eco_label, report.aggregated_eco_data.eco_score, fmt)
    ));
    out.push_str(&format!("{}\n", report.eco_label.grade.description()));
    out.push('\n');
    out.push_str(&format!("{}\n", metrics_table(&report.aggregated_eco_data, fmt)));

    let mut pages = new_table(fmt);
    pages.set_header(vec!["#", "URL", "Grade", "EcoScore", "Weight", "Report"]);
    for (index, page) in report.pages.iter().enumerate() {
        pages.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&page.url),
            Cell::new(page.eco_label.grade),
            Cell::new(page.eco_data.eco_score).set_alignment(CellAlignment::Right),
            Cell::new(format_bytes(page.eco_data.total_bytes)).set_alignment(CellAlignment::Right),
            Cell::new(page.filename.as_deref().unwrap_or("-")),
        ]);
    }
    out.push_str(&format!("\n{}\n{}\n", fmt.header("Pages"), pages));

    if !report.errors.is_empty() {
        out.push_str(&format!("\n{}\n", fmt.header("Failed pages")));
        for error in &report.errors {
            out.push_str(&format!(
                "  {} {}: {}\n",
                fmt.error(&fmt.emoji("✗", "[FAIL]")),
                error.url,
                error.error
            ));
        }
    }

    write_recommendations(&mut out, &report.recommendations, fmt);
    write_saved(&mut out, filename, fmt);
    out
}

pub fn render_report_list(entries: &[ReportEntry], fmt: &dyn OutputFormatter) -> String {
    if entries.is_empty() {
        return format!("{}\n", fmt.dim("No reports found."));
    }
    let mut table = new_table(fmt);
    table.set_header(vec!["Report", "Created", "Size"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.filename),
            Cell::new(entry.created_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(format_bytes(entry.size as f64)).set_alignment(CellAlignment::Right),
        ]);
    }
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;
    use crate::scoring::{recommendations, Grade};
    use crate::testkit::EcoDataBuilder;
    use chrono::{TimeZone, Utc};

    fn page() -> PageReport {
        let eco_data = EcoDataBuilder::new().eco_score(82).green(false).build();
        PageReport {
            url: "https://example.com/".to_string(),
            analyzed_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            eco_label: EcoLabel::from(Grade::A),
            recommendations: recommendations(&eco_data),
            eco_data,
            audit: Default::default(),
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512.0), "512 B");
        assert_eq!(format_bytes(2048.0), "2.0 KB");
        assert_eq!(format_bytes(3.5 * 1024.0 * 1024.0), "3.50 MB");
    }

    #[test]
    fn test_render_page_plain() {
        let out = render_page(&page(), Some("report-example-com.json"), &PlainFormatter);
        assert!(out.contains("EcoLabel for https://example.com/"));
        assert!(out.contains(" A   Excellent  (EcoScore 82/100)"));
        assert!(out.contains("Green hosting"));
        assert!(out.contains("Consider moving to green hosting"));
        assert!(out.contains("Report saved: report-example-com.json"));
        assert!(out.is_ascii());
    }

    #[test]
    fn test_render_site_lists_pages_and_failures() {
        let page = page();
        let report = WebsiteReport {
            success: true,
            domain: "example.com".to_string(),
            analyzed_at: page.analyzed_at,
            analyzed_pages: 2,
            successful_analyses: 1,
            failed_analyses: 1,
            aggregated_eco_data: page.eco_data.clone(),
            eco_label: page.eco_label.clone(),
            recommendations: page.recommendations.clone(),
            pages: vec![crate::core::PageResult {
                url: page.url.clone(),
                eco_data: page.eco_data.clone(),
                eco_label: page.eco_label.clone(),
                filename: Some("report-example-com-1.json".to_string()),
            }],
            errors: vec![crate::core::PageError {
                url: "https://example.com/missing".to_string(),
                error: "page could not be audited".to_string(),
            }],
        };

        let out = render_site(
            &report,
            Some("website-report-example-com.json"),
            &PlainFormatter,
        );

        assert!(out.contains("1 of 2 pages analysed, 1 failed"));
        assert!(out.contains("report-example-com-1.json"));
        assert!(out.contains(
            "Failed pages\n  [FAIL] https://example.com/missing: page could not be audited\n"
        ));
        assert!(out.ends_with("Report saved: website-report-example-com.json\n"));
    }

    #[test]
    fn test_render_empty_report_list() {
        assert_eq!(render_report_list(&[], &PlainFormatter), "No reports found.\n");
    }
}
