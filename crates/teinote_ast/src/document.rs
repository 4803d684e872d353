//! The document arena.

use crate::{Element, NodeId, NodeKind, Span, XML_NAMESPACE};

/// An XML document held as an arena of nodes.
///
/// Node 0 is always the document node. Detached nodes stay in the arena
/// (their handles remain valid) but are no longer reachable from the root
/// and are never serialized.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    encoding: String,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    span: Option<Span>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            span: None,
        }
    }
}

impl Document {
    /// Creates an empty document containing only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            encoding: "UTF-8".to_string(),
        }
    }

    /// Returns the document node.
    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Returns the top-level element, if any.
    pub fn root_element(&self) -> Option<NodeId> {
        self.child_elements(self.root()).next()
    }

    /// Name of the character encoding the document was decoded from.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn set_encoding(&mut self, label: impl Into<String>) {
        self.encoding = label.into();
    }

    /// Number of nodes in the arena, detached ones included.
    #[inline]
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    /// Returns the element payload of `id`, if it is an element.
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.kind(id).as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.kind_mut(id) {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Source span of a parsed node. Created and copied nodes have none.
    #[inline]
    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes[id.index()].span
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = Some(span);
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Iterates the element children of `id`.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    /// Iterates the ancestors of `id`, nearest first, ending at the
    /// document node for attached nodes.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Iterates the descendants of `id` in document order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Allocates a detached node.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocates a detached element.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.create_node(NodeKind::Element(element))
    }

    /// Appends `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Removes `id` from its parent. Returns false if it had no parent.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes[id.index()].parent.take() else {
            return false;
        };
        self.nodes[parent.index()].children.retain(|&child| child != id);
        true
    }

    /// Puts `new` at the position `old` occupies among its siblings and
    /// detaches `old`. Returns false if `old` had no parent.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(old) else {
            return false;
        };
        self.detach(new);

        let siblings = &mut self.nodes[parent.index()].children;
        let Some(position) = siblings.iter().position(|&child| child == old) else {
            return false;
        };
        siblings[position] = new;

        self.nodes[new.index()].parent = Some(parent);
        self.nodes[old.index()].parent = None;
        true
    }

    /// Copies `source` and its whole subtree into fresh, detached nodes.
    pub fn deep_copy(&mut self, source: NodeId) -> NodeId {
        let kind = self.kind(source).clone();
        let copy = self.create_node(kind);
        let children = self.children(source).to_vec();
        for child in children {
            let child_copy = self.deep_copy(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Resolves `prefix` (`None` for the default namespace) to a namespace
    /// URI in the scope of `id`.
    pub fn lookup_namespace(&self, id: NodeId, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(XML_NAMESPACE);
        }

        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|node| self.element(node))
            .find_map(|element| {
                element
                    .namespace_declarations()
                    .find(|(declared, _)| *declared == prefix)
                    .map(|(_, uri)| uri)
            })
            .filter(|uri| !uri.is_empty())
    }

    /// Returns true if `id` has any child other than whitespace-only text.
    pub fn has_significant_content(&self, id: NodeId) -> bool {
        self.children(id)
            .iter()
            .any(|&child| !self.kind(child).is_whitespace_text())
    }

    /// Concatenates the raw text and CDATA of all descendants of `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| match self.kind(node) {
                NodeKind::Text(text) | NodeKind::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node. See [`Document::ancestors`].
pub struct Ancestors<'d> {
    doc: &'d Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over the descendants of a node.
/// See [`Document::descendants`].
pub struct Descendants<'d> {
    doc: &'d Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}
