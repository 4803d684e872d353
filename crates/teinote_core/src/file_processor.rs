//! Single document processing.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use teinote_parser::{Parser, XmlParser, write_document};
use tracing::debug;

use crate::result::DocumentReport;
use crate::{InlineConfig, TransformError, transform_document};

pub const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Reads, transforms and writes one document.
///
/// The output is written to a temporary file next to `output` and only
/// renamed into place once complete, so a failure leaves no partial file.
pub fn process_file_internal(
    path: &Path,
    output: &Path,
    parser: &XmlParser,
    config: &InlineConfig,
) -> Result<DocumentReport, TransformError> {
    debug!("Processing {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| {
        TransformError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(TransformError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(TransformError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    let bytes = fs::read(path)
        .map_err(|e| TransformError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut doc = parser.parse_bytes(&bytes)?;
    let stats = transform_document(&mut doc, config)?;

    let dir = output
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|e| {
        TransformError::write(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        TransformError::write(format!("Failed to create temporary file in {}: {}", dir.display(), e))
    })?;
    write_document(&doc, &mut file)
        .and_then(|_| file.as_file_mut().sync_all())
        .map_err(|e| TransformError::write(format!("Failed to write {}: {}", output.display(), e)))?;
    file.persist(output).map_err(|e| {
        TransformError::write(format!("Failed to write {}: {}", output.display(), e.error))
    })?;

    debug!("Wrote {}", output.display());
    Ok(DocumentReport {
        path: path.to_path_buf(),
        output: output.to_path_buf(),
        encoding: doc.encoding().to_string(),
        stats,
    })
}

/// Transforms an in-memory document and returns the serialized UTF-8
/// output.
pub fn transform_bytes(
    bytes: &[u8],
    parser: &XmlParser,
    config: &InlineConfig,
) -> Result<Vec<u8>, TransformError> {
    let mut doc = parser.parse_bytes(bytes)?;
    transform_document(&mut doc, config)?;

    let mut out = Vec::with_capacity(bytes.len());
    write_document(&doc, &mut out)?;
    Ok(out)
}
