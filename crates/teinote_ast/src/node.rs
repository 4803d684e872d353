//! Node types stored in a [`Document`](crate::Document).

use std::fmt;

/// Namespace permanently bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Handle to a node inside a [`Document`](crate::Document) arena.
///
/// Handles are only meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The payload of a node.
///
/// Character data (`Text`, `CData`, `Comment`, `ProcessingInstruction`,
/// `DocType`) is kept exactly as it appears in the source, so entity and
/// character references survive a parse/serialize cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node. Only the arena root has this kind.
    Document,
    /// An element with its name and attributes.
    Element(Element),
    /// Escaped character data.
    Text(String),
    /// Contents of a `<![CDATA[...]]>` section.
    CData(String),
    /// Contents of a `<!--...-->` comment.
    Comment(String),
    /// Contents of a `<?...?>` processing instruction.
    ProcessingInstruction(String),
    /// Contents of a `<!DOCTYPE ...>` declaration.
    DocType(String),
}

impl NodeKind {
    /// Returns the element payload, if this is an element.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns true if this is text made only of XML whitespace.
    pub fn is_whitespace_text(&self) -> bool {
        match self {
            NodeKind::Text(text) => text
                .bytes()
                .all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')),
            _ => false,
        }
    }
}

/// A qualified XML name: optional prefix plus local part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    /// Creates an unprefixed name.
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// Creates a prefixed name.
    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Splits a raw `prefix:local` name.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) => Self::prefixed(prefix, local),
            None => Self::new(raw),
        }
    }

    /// Returns true if this name equals the raw qualified name `raw`.
    pub fn matches(&self, raw: &str) -> bool {
        match (raw.split_once(':'), &self.prefix) {
            (Some((prefix, local)), Some(own)) => own == prefix && self.local == local,
            (None, None) => self.local == raw,
            _ => false,
        }
    }

    /// For `xmlns` and `xmlns:p` attributes, returns the prefix being
    /// declared (`Some(None)` for the default namespace).
    pub fn declared_prefix(&self) -> Option<Option<&str>> {
        match self.prefix.as_deref() {
            Some("xmlns") => Some(Some(self.local.as_str())),
            None if self.local == "xmlns" => Some(None),
            _ => None,
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// An attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// An element: qualified name, resolved namespace and attributes in
/// source order. Namespace declarations are ordinary attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    /// Namespace URI the element name resolved to when it was parsed or
    /// created.
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// Creates an element with no namespace and no attributes.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            namespace: None,
            attributes: Vec::new(),
        }
    }

    /// Appends or replaces an attribute.
    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Returns true if the element has local name `local` in `namespace`.
    #[inline]
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name.local == local && self.namespace.as_deref() == Some(namespace)
    }

    /// Looks up an attribute by its raw qualified name (`type`, `xml:id`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.matches(name))
            .map(|attr| attr.value.as_str())
    }

    /// Sets an attribute, replacing an existing one with the same name.
    pub fn set_attribute(&mut self, name: QName, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Iterates the namespace declarations made on this element as
    /// `(declared prefix, uri)` pairs.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (Option<&str>, &str)> {
        self.attributes.iter().filter_map(|attr| {
            attr.name
                .declared_prefix()
                .map(|prefix| (prefix, attr.value.as_str()))
        })
    }

    /// Prefixes this element and its ordinary attributes depend on,
    /// excluding the always-bound `xml` and `xmlns` prefixes.
    pub fn used_prefixes(&self) -> impl Iterator<Item = Option<&str>> {
        let own = std::iter::once(self.name.prefix.as_deref());
        let attrs = self
            .attributes
            .iter()
            .filter(|attr| attr.name.declared_prefix().is_none())
            .filter_map(|attr| attr.name.prefix.as_deref().map(Some));
        own.chain(attrs)
            .filter(|prefix| !matches!(prefix, Some("xml") | Some("xmlns")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("note", None, "note")]
    #[case("tei:note", Some("tei"), "note")]
    #[case("xml:id", Some("xml"), "id")]
    fn test_qname_parse(#[case] raw: &str, #[case] prefix: Option<&str>, #[case] local: &str) {
        let name = QName::parse(raw);
        assert_eq!(name.prefix.as_deref(), prefix);
        assert_eq!(name.local, local);
        assert_eq!(name.to_string(), raw);
    }

    #[rstest]
    #[case("xml:id", "xml:id", true)]
    #[case("xml:id", "id", false)]
    #[case("target", "target", true)]
    #[case("target", "x:target", false)]
    fn test_qname_matches(#[case] name: &str, #[case] raw: &str, #[case] expected: bool) {
        assert_eq!(QName::parse(name).matches(raw), expected);
    }

    #[test]
    fn test_declared_prefix() {
        assert_eq!(QName::new("xmlns").declared_prefix(), Some(None));
        assert_eq!(QName::parse("xmlns:tei").declared_prefix(), Some(Some("tei")));
        assert_eq!(QName::parse("xml:id").declared_prefix(), None);
        assert_eq!(QName::new("type").declared_prefix(), None);
    }

    #[test]
    fn test_element_attributes() {
        let mut element = Element::new(QName::new("div"))
            .with_attribute(QName::new("type"), "notes")
            .with_attribute(QName::parse("xml:id"), "d1");

        assert_eq!(element.attribute("type"), Some("notes"));
        assert_eq!(element.attribute("xml:id"), Some("d1"));
        assert_eq!(element.attribute("id"), None);

        element.set_attribute(QName::new("type"), "liminal");
        assert_eq!(element.attribute("type"), Some("liminal"));
        assert_eq!(element.attributes.len(), 2);
    }

    #[test]
    fn test_element_is_checks_namespace() {
        let element = Element {
            namespace: Some("urn:a".to_string()),
            ..Element::new(QName::new("note"))
        };
        assert!(element.is("urn:a", "note"));
        assert!(!element.is("urn:b", "note"));
        assert!(!Element::new(QName::new("note")).is("urn:a", "note"));
    }

    #[test]
    fn test_namespace_declarations() {
        let element = Element::new(QName::new("TEI"))
            .with_attribute(QName::new("xmlns"), "urn:tei")
            .with_attribute(QName::parse("xmlns:x"), "urn:x")
            .with_attribute(QName::new("n"), "1");

        let declared: Vec<_> = element.namespace_declarations().collect();
        assert_eq!(declared, vec![(None, "urn:tei"), (Some("x"), "urn:x")]);
    }

    #[test]
    fn test_used_prefixes_skips_reserved() {
        let element = Element::new(QName::parse("x:hi"))
            .with_attribute(QName::parse("xml:lang"), "de")
            .with_attribute(QName::parse("y:rend"), "italic")
            .with_attribute(QName::parse("xmlns:z"), "urn:z");

        let used: Vec<_> = element.used_prefixes().collect();
        assert_eq!(used, vec![Some("x"), Some("y")]);
    }

    #[rstest]
    #[case(NodeKind::Text(" \n\t".to_string()), true)]
    #[case(NodeKind::Text(" a ".to_string()), false)]
    #[case(NodeKind::Text("&#32;".to_string()), false)]
    #[case(NodeKind::Comment(" ".to_string()), false)]
    fn test_is_whitespace_text(#[case] kind: NodeKind, #[case] expected: bool) {
        assert_eq!(kind.is_whitespace_text(), expected);
    }
}
