use super::{output_path, CommandContext};
use crate::analysis::{Orchestrator, PageAnalysis};
use crate::audit::Auditor;
use crate::cli::OutputArgs;
use crate::io::ReportStore;
use crate::output;
use anyhow::{Context, Result};

/// `ecolabel analyze <URL>`
pub fn handle_analyze(ctx: &CommandContext, url: &str, args: &OutputArgs) -> Result<()> {
    let mut orchestrator = Orchestrator::from_config(ctx.auditor(), ctx.store(), &ctx.config);
    let analysis = analyze_page(&mut orchestrator, url)?;
    output::output_page(
        &analysis.report,
        analysis.filename.as_deref(),
        args.format,
        output_path(args),
        ctx.formatting,
    )
}

pub fn analyze_page<A: Auditor, S: ReportStore>(
    orchestrator: &mut Orchestrator<A, S>,
    url: &str,
) -> Result<PageAnalysis> {
    orchestrator
        .analyze_page(url)
        .with_context(|| format!("Failed to analyze {}", url))
}
