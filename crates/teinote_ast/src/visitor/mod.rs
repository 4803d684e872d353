//! Visitor pattern for document traversal.
//!
//! - [`Visitor`] - Read-only traversal trait
//! - [`walk_node`] - Visits one node and, for elements, its subtree
//! - [`walk_children`] - Visits all children of a node
//!
//! Visitors receive the [`Document`](crate::Document) alongside each node so
//! they can inspect ancestors or siblings, and may stop the walk early by
//! returning `ControlFlow::Break(())`.
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use teinote_ast::{Document, Element, NodeId, NodeKind, QName};
//! use teinote_ast::visitor::{VisitResult, Visitor, walk_node};
//!
//! struct TextCollector {
//!     texts: Vec<String>,
//! }
//!
//! impl Visitor for TextCollector {
//!     fn visit_text(&mut self, _doc: &Document, _id: NodeId, text: &str) -> VisitResult {
//!         self.texts.push(text.to_string());
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut doc = Document::new();
//! let p = doc.create_element(Element::new(QName::new("p")));
//! let hello = doc.create_node(NodeKind::Text("hello".to_string()));
//! doc.append_child(doc.root(), p);
//! doc.append_child(p, hello);
//!
//! let mut collector = TextCollector { texts: Vec::new() };
//! let _ = walk_node(&mut collector, &doc, doc.root());
//! assert_eq!(collector.texts, vec!["hello"]);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
