//! The per-document rewrite.

use serde::Serialize;
use teinote_ast::Document;
use tracing::debug;

use crate::{
    InlineConfig, TransformError, collect_notes, inline_references, remove_notes_divisions,
};

/// Counts describing one document's rewrite.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformStats {
    /// Endnotes collected from notes divisions.
    pub notes_found: usize,
    pub references_inlined: usize,
    /// References to collected notes left in place because they sit inside
    /// a notes division.
    pub references_skipped: usize,
    pub divisions_removed: usize,
    pub containers_removed: usize,
}

/// Inlines the endnotes of `doc` at their references and removes the
/// emptied back matter.
///
/// A document without collectable endnotes is left exactly as it was.
pub fn transform_document(
    doc: &mut Document,
    config: &InlineConfig,
) -> Result<TransformStats, TransformError> {
    let notes = collect_notes(doc, config)?;
    if notes.is_empty() {
        debug!("No endnotes found, leaving document unchanged");
        return Ok(TransformStats::default());
    }

    let inlined = inline_references(doc, &notes, config);
    let cleanup = remove_notes_divisions(doc, config);

    Ok(TransformStats {
        notes_found: notes.len(),
        references_inlined: inlined.inlined,
        references_skipped: inlined.skipped,
        divisions_removed: cleanup.divisions_removed,
        containers_removed: cleanup.containers_removed,
    })
}
