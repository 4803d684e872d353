//! teinote CLI
//!
//! Converts the endnotes of TEI P5 documents into inline notes.

mod cli;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use teinote_core::{InlineConfig, NoteProcessor};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::output::output_report;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Per-document failures are part of the report and do not fail the run.
fn run(cli: Cli) -> Result<()> {
    let mut config = if let Some(ref path) = cli.config {
        InlineConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    if cli.recursive {
        config.recursive = true;
    }

    let processor = NoteProcessor::new(config).into_diagnostic()?;
    let report = processor
        .process_dir(&cli.input, &cli.output)
        .into_diagnostic()?;

    output_report(&report, cli.format)
}

fn find_config() -> Result<InlineConfig> {
    if let Some(path) = InlineConfig::discover(".") {
        info!("Using config: {}", path.display());
        return InlineConfig::from_file(&path).into_diagnostic();
    }

    Ok(InlineConfig::new())
}
