//! Removal of emptied back matter.

use teinote_ast::{Document, NodeId};
use tracing::debug;

use crate::InlineConfig;
use crate::tei;

/// What [`remove_notes_divisions`] removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub divisions_removed: usize,
    /// `back` elements removed because nothing but whitespace was left.
    pub containers_removed: usize,
}

/// Removes every notes division that is a direct child of a `back`
/// element, then removes each such `back` left with no child elements and
/// no non-whitespace text. Other back matter is kept.
pub fn remove_notes_divisions(doc: &mut Document, config: &InlineConfig) -> CleanupOutcome {
    let view: &Document = doc;
    let divisions: Vec<NodeId> = view
        .descendants(view.root())
        .filter(|&id| tei::is_notes_division(view, id, config))
        .collect();

    let mut outcome = CleanupOutcome::default();
    let mut containers = Vec::new();

    for division in divisions {
        let Some(back) = doc.parent(division) else {
            continue;
        };
        if doc.detach(division) {
            outcome.divisions_removed += 1;
            if !containers.contains(&back) {
                containers.push(back);
            }
        }
    }

    for back in containers {
        if !doc.has_significant_content(back) && doc.detach(back) {
            outcome.containers_removed += 1;
        }
    }

    debug!(
        "Removed {} notes divisions and {} back elements",
        outcome.divisions_removed, outcome.containers_removed
    );
    outcome
}
