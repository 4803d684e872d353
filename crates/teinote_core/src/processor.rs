//! Batch processing engine.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use teinote_parser::XmlParser;
use tracing::{info, warn};

use crate::file_finder::FileFinder;
use crate::file_processor::{process_file_internal, transform_bytes};
use crate::result::{BatchReport, DocumentFailure, DocumentReport};
use crate::{InlineConfig, TransformError};

/// Result type for [`NoteProcessor::process_files`].
///
/// Contains a tuple of:
/// - Successfully processed documents
/// - Failed files with their errors (path and error)
pub type ProcessFilesResult =
    Result<(Vec<DocumentReport>, Vec<(PathBuf, TransformError)>), TransformError>;

/// The batch engine.
///
/// Orchestrates discovery, per-document transformation and output. Each
/// document is processed independently; one failure never affects another.
pub struct NoteProcessor {
    config: InlineConfig,
    parser: XmlParser,
    finder: FileFinder,
}

impl NoteProcessor {
    /// Creates a processor with the given configuration.
    pub fn new(config: InlineConfig) -> Result<Self, TransformError> {
        let finder = FileFinder::new(&config.include, &config.exclude, config.recursive)?;

        Ok(Self {
            config,
            parser: XmlParser::new(),
            finder,
        })
    }

    /// Lists the documents to process in `input_dir`.
    ///
    /// Fails if `input_dir` is not a directory or holds no matching files.
    pub fn discover(&self, input_dir: &Path) -> Result<Vec<PathBuf>, TransformError> {
        if !input_dir.is_dir() {
            return Err(TransformError::InputDir(input_dir.to_path_buf()));
        }

        let files = self.finder.discover_files(input_dir, &self.parser)?;
        if files.is_empty() {
            return Err(TransformError::NoInput(input_dir.to_path_buf()));
        }

        Ok(files)
    }

    /// Processes every document in `input_dir`, writing results under
    /// `output_dir` at the same relative paths.
    pub fn process_dir(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<BatchReport, TransformError> {
        let files = self.discover(input_dir)?;

        fs::create_dir_all(output_dir).map_err(|e| {
            TransformError::write(format!("Failed to create {}: {}", output_dir.display(), e))
        })?;
        info!("Processing {} files into {}", files.len(), output_dir.display());

        let (documents, failures) = self.process_files(input_dir, &files, output_dir)?;

        Ok(BatchReport {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            documents,
            failures: failures
                .into_iter()
                .map(|(path, error)| DocumentFailure::new(path, error))
                .collect(),
        })
    }

    /// Processes a list of files in parallel using rayon.
    ///
    /// Returns a tuple of (successful reports, failed files with errors),
    /// each in the order of `paths`.
    pub fn process_files(
        &self,
        input_dir: &Path,
        paths: &[PathBuf],
        output_dir: &Path,
    ) -> ProcessFilesResult {
        let results: Vec<Result<DocumentReport, (PathBuf, TransformError)>> = paths
            .par_iter()
            .map(|path| {
                let output = output_path(input_dir, path, output_dir)
                    .map_err(|e| (path.clone(), e))?;
                process_file_internal(path, &output, &self.parser, &self.config)
                    .map_err(|e| (path.clone(), e))
            })
            .collect();

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(report) => successes.push(report),
                Err((path, error)) => {
                    warn!("Failed to process {}: {}", path.display(), error);
                    failures.push((path, error));
                }
            }
        }

        Ok((successes, failures))
    }

    /// Transforms a document held in memory.
    pub fn transform_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, TransformError> {
        transform_bytes(bytes, &self.parser, &self.config)
    }
}

/// Mirrors `path`'s position below `input_dir` under `output_dir`.
fn output_path(
    input_dir: &Path,
    path: &Path,
    output_dir: &Path,
) -> Result<PathBuf, TransformError> {
    match path.strip_prefix(input_dir) {
        Ok(relative) => Ok(output_dir.join(relative)),
        Err(_) => path
            .file_name()
            .map(|name| output_dir.join(name))
            .ok_or_else(|| TransformError::file(format!("Invalid file path: {}", path.display()))),
    }
}
