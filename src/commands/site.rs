use super::{output_path, CommandContext};
use crate::analysis::{Orchestrator, SiteAnalysis};
use crate::audit::Auditor;
use crate::cli::OutputArgs;
use crate::core::Error;
use crate::io::{self, ReportStore};
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// `ecolabel site <URL>... [--urls-file FILE]`
pub fn handle_site(
    ctx: &CommandContext,
    urls: Vec<String>,
    urls_file: Option<&Path>,
    args: &OutputArgs,
) -> Result<()> {
    let urls = collect_urls(urls, urls_file)?;
    let mut orchestrator = Orchestrator::from_config(ctx.auditor(), ctx.store(), &ctx.config);
    let analysis = analyze_site(&mut orchestrator, &urls)?;
    output::output_site(
        &analysis.report,
        Some(&analysis.filename),
        args.format,
        output_path(args),
        ctx.formatting,
    )
}

/// Command-line URLs followed by those in `urls_file`, trimmed, blanks dropped.
pub fn collect_urls(urls: Vec<String>, urls_file: Option<&Path>) -> Result<Vec<String>> {
    let from_file = match urls_file {
        Some(path) => io::read_file(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?
            .lines()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    Ok(urls
        .into_iter()
        .chain(from_file)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect())
}

pub fn analyze_site<A: Auditor, S: ReportStore>(
    orchestrator: &mut Orchestrator<A, S>,
    urls: &[String],
) -> Result<SiteAnalysis> {
    match orchestrator.analyze_site(urls) {
        Ok(analysis) => Ok(analysis),
        Err(Error::NoSuccessfulAnalyses { count, errors }) => {
            for error in &errors {
                tracing::error!("{}: {}", error.url, error.error);
            }
            Err(Error::NoSuccessfulAnalyses { count, errors }).context("Site analysis failed")
        }
        Err(Error::AggregationFailed { source, pages }) => {
            for page in &pages {
                tracing::warn!(
                    "Analyzed {} (EcoScore {}) before aggregation failed",
                    page.url,
                    page.eco_data.eco_score
                );
            }
            Err(Error::AggregationFailed { source, pages }).context("Site analysis failed")
        }
        Err(e) => Err(e).context("Site analysis failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReportStore;
    use crate::testkit::{sample_report, ScriptedAuditor};
    use indoc::indoc;
    use tempfile::NamedTempFile;

    #[test]
    fn test_collect_urls_merges_args_and_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            indoc! {"
                https://example.com/about

                  https://example.com/blog
            "},
        )
        .unwrap();

        let urls = collect_urls(vec!["https://example.com/".into()], Some(file.path())).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.com/about",
                "https://example.com/blog",
            ]
        );
    }

    #[test]
    fn test_collect_urls_missing_file() {
        let err = collect_urls(vec![], Some(Path::new("/nonexistent/urls.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read URL list"));
    }

    #[test]
    fn test_no_successes_keeps_typed_error() {
        let mut orch = Orchestrator::new(
            ScriptedAuditor::new().timeout("https://a.example/"),
            MemoryReportStore::new(),
        );
        let err = analyze_site(&mut orch, &["https://a.example/".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoSuccessfulAnalyses { count: 1, .. })
        ));
    }

    #[test]
    fn test_site_success() {
        let mut orch = Orchestrator::new(
            ScriptedAuditor::new().succeed("https://example.com/", sample_report()),
            MemoryReportStore::new(),
        );
        let analysis = analyze_site(&mut orch, &["https://example.com/".to_string()]).unwrap();
        assert!(analysis.filename.starts_with("website-report-example-com-"));
    }
}
