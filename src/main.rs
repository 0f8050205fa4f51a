use anyhow::Result;
use clap::Parser;
use ecolabel::cli::{Cli, Commands, ReportsAction};
use ecolabel::commands::{self, CommandContext};
use ecolabel::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    if let Commands::Init { force } = cli.command {
        let path = cli.config.unwrap_or_else(commands::default_config_path);
        return commands::init_config(&path, force);
    }

    let ctx = CommandContext::load(cli.config.as_deref(), cli.plain)?;

    match cli.command {
        Commands::Analyze { url, output } => commands::handle_analyze(&ctx, &url, &output),
        Commands::Site {
            urls,
            urls_file,
            output,
        } => commands::handle_site(&ctx, urls, urls_file.as_deref(), &output),
        Commands::Score {
            lhr_json,
            url,
            output,
        } => commands::handle_score(&ctx, &lhr_json, url.as_deref(), &output),
        Commands::Reports { action } => match action {
            ReportsAction::List { output } => commands::list_reports(
                &ctx.store(),
                output.format,
                output.output.as_deref(),
                ctx.formatting,
            ),
            ReportsAction::Show { filename, output } => {
                commands::show_report(&ctx.store(), &filename, output.as_deref())
            }
        },
        Commands::Init { .. } => Ok(()),
    }
}
