//! Output formatting module

mod json;
mod text;

use miette::Result;
use teinote_core::BatchReport;

use crate::cli::OutputFormat;

pub fn output_report(report: &BatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(report)?,
        OutputFormat::Text => text::output_text(report),
    }

    Ok(())
}
