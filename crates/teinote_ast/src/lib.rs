//! # teinote_ast
//!
//! Document model for teinote.
//!
//! A [`Document`] is an owned, mutable XML tree. Nodes live in a single arena
//! per document and are addressed by [`NodeId`] handles, so a handle stays
//! valid while the tree around it is rewritten. Copying a subtree always
//! allocates fresh nodes; two copies of the same source never share children.
//!
//! ## Example
//!
//! ```rust
//! use teinote_ast::{Document, Element, NodeKind, QName};
//!
//! let mut doc = Document::new();
//! let root = doc.create_element(Element::new(QName::new("TEI")));
//! let text = doc.create_node(NodeKind::Text("Hello".to_string()));
//! doc.append_child(doc.root(), root);
//! doc.append_child(root, text);
//!
//! let copy = doc.deep_copy(root);
//! assert_ne!(copy, root);
//! assert_eq!(doc.text_content(copy), "Hello");
//! ```

mod document;
mod node;
mod span;
pub mod visitor;

pub use document::{Ancestors, Descendants, Document};
pub use node::{Attribute, Element, NodeId, NodeKind, QName, XML_NAMESPACE};
pub use span::{Position, Span};

pub use visitor::{VisitResult, Visitor};
