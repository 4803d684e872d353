//! Transformation error types.

use std::path::PathBuf;

use teinote_parser::ParseError;
use thiserror::Error;

/// Errors that can occur while inlining notes.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input directory is missing or is not a directory.
    #[error("Input folder '{}' does not exist or is not a directory", .0.display())]
    InputDir(PathBuf),

    /// The input directory holds no matching documents.
    #[error("No XML files found in {}", .0.display())]
    NoInput(PathBuf),

    /// File read error.
    #[error("File error: {0}")]
    File(String),

    /// Decode or parse error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Two endnotes share an identifier.
    #[error("Duplicate note id '{id}' in notes division")]
    DuplicateNoteId { id: String },

    /// Output could not be written.
    #[error("Write error: {0}")]
    Write(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransformError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write(message.into())
    }
}
