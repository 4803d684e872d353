//! TEI element predicates.

use teinote_ast::{Document, NodeId};

use crate::InlineConfig;

pub(crate) const TEXT: &str = "text";
pub(crate) const BACK: &str = "back";
pub(crate) const DIV: &str = "div";
pub(crate) const NOTE: &str = "note";
pub(crate) const REF: &str = "ref";

/// Returns true if `id` is an element with local name `local` in the
/// configured namespace.
pub(crate) fn is(doc: &Document, id: NodeId, config: &InlineConfig, local: &str) -> bool {
    doc.element(id)
        .is_some_and(|element| element.is(&config.namespace, local))
}

/// A notes division: `div[@type = notesType]` whose parent is `back`.
pub(crate) fn is_notes_division(doc: &Document, id: NodeId, config: &InlineConfig) -> bool {
    is_division(doc, id, config)
        && doc
            .parent(id)
            .is_some_and(|parent| is(doc, parent, config, BACK))
}

/// Any `div[@type = notesType]`, wherever it sits.
pub(crate) fn is_division(doc: &Document, id: NodeId, config: &InlineConfig) -> bool {
    doc.element(id).is_some_and(|element| {
        element.is(&config.namespace, DIV)
            && element.attribute("type") == Some(config.notes_type.as_str())
    })
}

/// The note id a `ref` points at, if its target is a same-document
/// fragment pointer.
pub(crate) fn fragment_target<'a>(doc: &'a Document, id: NodeId) -> Option<&'a str> {
    doc.element(id)?
        .attribute("target")?
        .strip_prefix('#')
}
