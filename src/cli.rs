use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ecolabel")]
#[command(about = "Eco-efficiency scoring for web pages and sites", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .ecolabel.toml)
    #[arg(long, global = true, env = "ECOLABEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Plain output: ASCII only, no colors, no emoji
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how results are printed
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a single page and grade it
    Analyze {
        /// Page URL
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Audit up to 10 pages of a site and grade the site as a whole
    Site {
        /// Page URLs, audited in the order given
        urls: Vec<String>,

        /// File with one URL per line; blank lines are ignored
        #[arg(long = "urls-file")]
        urls_file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score a saved Lighthouse JSON result without running an audit
    Score {
        /// Lighthouse JSON file
        lhr_json: PathBuf,

        /// URL to attribute the result to (defaults to the report's finalUrl)
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Inspect saved reports
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportsAction {
    /// List saved reports, newest first
    List {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print a saved report
    Show {
        /// Report filename as shown by `reports list`
        filename: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
