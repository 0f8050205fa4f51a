use super::{output_path, CommandContext};
use crate::analysis::{build_page_report, parse_url};
use crate::audit::parse_lighthouse_result;
use crate::cli::OutputArgs;
use crate::core::PageReport;
use crate::io;
use crate::observability::TracingSink;
use crate::output;
use crate::scoring::GradeScale;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

/// `ecolabel score <LHR_JSON>`: grade a saved Lighthouse result offline.
///
/// Nothing is audited and nothing is saved to the report store.
pub fn handle_score(
    ctx: &CommandContext,
    lhr_path: &Path,
    url: Option<&str>,
    args: &OutputArgs,
) -> Result<()> {
    let json = io::read_file(lhr_path)
        .with_context(|| format!("Failed to read {}", lhr_path.display()))?;
    let report = score_lighthouse_json(&json, url, ctx.config.grading.scale)
        .with_context(|| format!("Failed to score {}", lhr_path.display()))?;
    output::output_page(&report, None, args.format, output_path(args), ctx.formatting)
}

pub fn score_lighthouse_json(
    json: &str,
    url: Option<&str>,
    scale: GradeScale,
) -> Result<PageReport> {
    let lhr = parse_lighthouse_result(json)?;
    let url = url
        .or(lhr.audited_url())
        .context("Lighthouse result has no finalUrl; pass --url")?;
    let url = parse_url(url)?;
    Ok(build_page_report(
        &url,
        lhr.to_raw_report(),
        scale,
        &TracingSink,
        Utc::now(),
    )?)
}
