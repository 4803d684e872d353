//! Processing results.

use std::path::PathBuf;

use serde::Serialize;

use crate::{TransformError, TransformStats};

/// Result of processing a single document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Input path.
    pub path: PathBuf,
    /// Where the transformed document was written.
    pub output: PathBuf,
    /// Encoding the input was decoded from.
    pub encoding: String,
    #[serde(flatten)]
    pub stats: TransformStats,
}

impl DocumentReport {
    /// Returns true if the document had endnotes to inline.
    pub fn had_notes(&self) -> bool {
        self.stats.notes_found > 0
    }
}

/// A document that could not be processed.
#[derive(Debug, Serialize)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub message: String,
    #[serde(skip)]
    pub error: TransformError,
}

impl DocumentFailure {
    pub fn new(path: PathBuf, error: TransformError) -> Self {
        Self {
            path,
            message: error.to_string(),
            error,
        }
    }
}

/// Result of processing a directory.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Successfully processed documents, in path order.
    pub documents: Vec<DocumentReport>,
    /// Failed documents, in path order.
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.documents.len()
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// Total references inlined across the batch.
    pub fn references_inlined(&self) -> usize {
        self.documents
            .iter()
            .map(|doc| doc.stats.references_inlined)
            .sum()
    }
}
