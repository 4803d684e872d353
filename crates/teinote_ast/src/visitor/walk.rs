//! Walk functions for document traversal.

use std::ops::ControlFlow;

use crate::{Document, NodeId, NodeKind};

use super::visit::{VisitResult, Visitor};

/// Walks a node by dispatching to the matching visitor method.
///
/// The document node walks its children; elements go through
/// `enter_element`, `visit_element` and `exit_element`; text nodes go to
/// `visit_text`. Comments, CDATA, processing instructions and doctypes are
/// skipped.
pub fn walk_node<V>(visitor: &mut V, doc: &Document, id: NodeId) -> VisitResult
where
    V: Visitor + ?Sized,
{
    match doc.kind(id) {
        NodeKind::Document => walk_children(visitor, doc, id),
        NodeKind::Element(element) => {
            visitor.enter_element(doc, id, element)?;
            visitor.visit_element(doc, id, element)?;
            visitor.exit_element(doc, id, element)
        }
        NodeKind::Text(text) => visitor.visit_text(doc, id, text),
        _ => ControlFlow::Continue(()),
    }
}

/// Walks all children of a node, stopping at the first `Break`.
#[inline]
pub fn walk_children<V>(visitor: &mut V, doc: &Document, id: NodeId) -> VisitResult
where
    V: Visitor + ?Sized,
{
    for &child in doc.children(id) {
        walk_node(visitor, doc, child)?;
    }
    ControlFlow::Continue(())
}
