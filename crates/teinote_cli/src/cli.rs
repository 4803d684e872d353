//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// teinote - Inline TEI P5 endnotes at their references
#[derive(Parser)]
#[command(name = "teinote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the TEI documents to process
    pub input: PathBuf,

    /// Folder to write the transformed documents to (created if missing)
    pub output: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also process documents in sub-folders
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
