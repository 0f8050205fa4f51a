pub mod json;
pub mod terminal;

use crate::cli::OutputFormat;
use crate::core::{PageReport, WebsiteReport};
use crate::formatting::FormattingConfig;
use crate::io::{self, ReportEntry};
use anyhow::{Context, Result};
use std::path::Path;

pub use json::{output_json, to_json};
pub use terminal::{format_bytes, render_page, render_report_list, render_site};

/// Print `content`, or write it to `output_file` creating parent directories.
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => io::write_file(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

pub fn output_page(
    report: &PageReport,
    filename: Option<&str>,
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report, output_file),
        OutputFormat::Terminal => write_output(
            &render_page(report, filename, formatter_for(formatting, output_file).as_ref()),
            output_file,
        ),
    }
}

pub fn output_site(
    report: &WebsiteReport,
    filename: Option<&str>,
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report, output_file),
        OutputFormat::Terminal => write_output(
            &render_site(report, filename, formatter_for(formatting, output_file).as_ref()),
            output_file,
        ),
    }
}

pub fn output_report_list(
    entries: &[ReportEntry],
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(entries, output_file),
        OutputFormat::Terminal => write_output(
            &render_report_list(entries, formatter_for(formatting, output_file).as_ref()),
            output_file,
        ),
    }
}

/// Files never get escape codes.
fn formatter_for(
    formatting: FormattingConfig,
    output_file: Option<&Path>,
) -> Box<dyn crate::formatting::OutputFormatter> {
    if output_file.is_some() {
        FormattingConfig::plain().formatter()
    } else {
        formatting.formatter()
    }
}
