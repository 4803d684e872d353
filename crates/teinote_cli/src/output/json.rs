//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use teinote_core::BatchReport;

pub fn output_json(report: &BatchReport) -> Result<()> {
    let output = serde_json::json!({
        "input": report.input_dir.display().to_string(),
        "output": report.output_dir.display().to_string(),
        "successCount": report.success_count(),
        "errorCount": report.error_count(),
        "referencesInlined": report.references_inlined(),
        "documents": report.documents,
        "failures": report.failures,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
