//! Visitor trait for read-only traversal.

use std::ops::ControlFlow;

use crate::{Document, Element, NodeId};

use super::walk::walk_children;

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue the walk
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing a [`Document`] without modification.
///
/// `visit_element` walks the element's children by default. Override it to
/// act on elements; call [`walk_children`] from the override to keep
/// descending. `enter_element` and `exit_element` bracket every element,
/// which makes them the natural place to track "inside X" state.
pub trait Visitor {
    /// Called before an element's subtree is visited.
    fn enter_element(&mut self, _doc: &Document, _id: NodeId, _element: &Element) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called for each element. Default: walk the children.
    fn visit_element(&mut self, doc: &Document, id: NodeId, _element: &Element) -> VisitResult {
        walk_children(self, doc, id)
    }

    /// Called after an element's subtree has been visited.
    fn exit_element(&mut self, _doc: &Document, _id: NodeId, _element: &Element) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called for each text node with its raw (escaped) content.
    fn visit_text(&mut self, _doc: &Document, _id: NodeId, _text: &str) -> VisitResult {
        ControlFlow::Continue(())
    }
}
