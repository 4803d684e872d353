//! Endnote collection.

use std::collections::HashMap;
use std::ops::ControlFlow;

use teinote_ast::visitor::walk_node;
use teinote_ast::{Document, Element, NodeId, VisitResult, Visitor};
use tracing::{debug, warn};

use crate::tei::{self, NOTE};
use crate::{DuplicateIdPolicy, InlineConfig, TransformError};

/// Endnotes of one document, keyed by `xml:id`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteTable {
    notes: HashMap<String, NodeId>,
}

impl NoteTable {
    /// Returns the note registered under `id`.
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.notes.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Collects every `note` carrying an `xml:id` inside a notes division.
///
/// Only divisions that are direct children of a `back` element count; the
/// notes themselves may sit at any depth inside them. Notes without an id
/// are ignored and stay where they are. The document is not modified.
pub fn collect_notes(doc: &Document, config: &InlineConfig) -> Result<NoteTable, TransformError> {
    let mut collector = NoteCollector {
        config,
        depth: 0,
        table: NoteTable::default(),
        duplicate: None,
    };

    let _ = walk_node(&mut collector, doc, doc.root());

    if let Some(id) = collector.duplicate {
        return Err(TransformError::DuplicateNoteId { id });
    }

    debug!("Collected {} endnotes", collector.table.len());
    Ok(collector.table)
}

struct NoteCollector<'a> {
    config: &'a InlineConfig,
    /// Element depth relative to the enclosing notes division; 0 outside.
    depth: usize,
    table: NoteTable,
    duplicate: Option<String>,
}

impl NoteCollector<'_> {
    fn register(&mut self, id: &str, note: NodeId) -> VisitResult {
        if self.table.contains(id) {
            match self.config.duplicate_ids {
                DuplicateIdPolicy::Error => {
                    self.duplicate = Some(id.to_string());
                    return ControlFlow::Break(());
                }
                DuplicateIdPolicy::LastWins => {
                    warn!("Duplicate note id '{}', keeping the later note", id);
                }
            }
        }

        self.table.notes.insert(id.to_string(), note);
        ControlFlow::Continue(())
    }
}

impl Visitor for NoteCollector<'_> {
    fn enter_element(&mut self, doc: &Document, id: NodeId, element: &Element) -> VisitResult {
        if self.depth == 0 {
            if tei::is_notes_division(doc, id, self.config) {
                self.depth = 1;
            }
            return ControlFlow::Continue(());
        }

        self.depth += 1;

        if tei::is_division(doc, id, self.config) {
            warn!(
                "Nested notes division inside a notes division; its notes are collected with the outer one"
            );
        }

        if element.is(&self.config.namespace, NOTE)
            && let Some(note_id) = element.attribute("xml:id").filter(|v| !v.is_empty())
        {
            return self.register(note_id, id);
        }

        ControlFlow::Continue(())
    }

    fn exit_element(&mut self, _doc: &Document, _id: NodeId, _element: &Element) -> VisitResult {
        self.depth = self.depth.saturating_sub(1);
        ControlFlow::Continue(())
    }
}
