//! XML parser built on `quick-xml`.
//!
//! Builds a [`Document`] directly into its arena. Character data is stored
//! raw, so `&amp;`, `&#x2014;` or custom entity references are written back
//! exactly as they were read, after checking that each one resolves.
//! Attribute values are unescaped.

use std::collections::HashSet;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use teinote_ast::{Attribute, Document, Element, NodeId, NodeKind, QName, Span};

use crate::{ParseError, Parser};

/// Deepest element nesting a document may have.
///
/// Matches libxml2's default limit. The tree walkers recurse once per
/// level, so deeper documents are rejected as malformed.
pub const MAX_DEPTH: usize = 256;

/// XML parser implementation.
pub struct XmlParser;

impl XmlParser {
    /// Creates a new XML parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for XmlParser {
    fn name(&self) -> &str {
        "xml"
    }

    fn extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn parse(&self, source: &str) -> Result<Document, ParseError> {
        TreeBuilder::new(source).build()
    }
}

/// Internal parser state.
struct TreeBuilder<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,
    doc: Document,
    /// Open elements, innermost last.
    stack: Vec<NodeId>,
    /// General entities declared in the internal DTD subset.
    entities: HashSet<String>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            source,
            reader,
            doc: Document::new(),
            stack: Vec::new(),
            entities: HashSet::new(),
        }
    }

    fn build(mut self) -> Result<Document, ParseError> {
        loop {
            let event_start = self.reader.buffer_position() as usize;

            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let offset = self.reader.error_position() as usize;
                    return Err(ParseError::invalid_source_at(
                        e.to_string(),
                        self.source,
                        offset,
                    ));
                }
            };

            match event {
                Event::Start(e) => {
                    let id = self.open_element(&e, event_start)?;
                    self.stack.push(id);
                }
                Event::Empty(e) => {
                    self.open_element(&e, event_start)?;
                }
                Event::End(_) => {
                    self.stack.pop();
                }
                Event::Text(e) => {
                    let text = self.utf8(&e, event_start)?;
                    self.check_references(text, event_start)?;
                    let text = text.to_string();
                    self.push(NodeKind::Text(text));
                }
                Event::CData(e) => {
                    let text = self.utf8(&e, event_start)?.to_string();
                    self.push(NodeKind::CData(text));
                }
                Event::Comment(e) => {
                    let text = self.utf8(&e, event_start)?.to_string();
                    self.push(NodeKind::Comment(text));
                }
                Event::PI(e) => {
                    let text = self.utf8(&e, event_start)?.to_string();
                    self.push(NodeKind::ProcessingInstruction(text));
                }
                Event::DocType(e) => {
                    let text = self.utf8(&e, event_start)?.trim_start().to_string();
                    self.entities.extend(declared_entities(&text));
                    self.push(NodeKind::DocType(text));
                }
                // The writer emits its own declaration.
                Event::Decl(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(&open) = self.stack.last() {
            let name = self
                .doc
                .element(open)
                .map(|e| e.name.to_string())
                .unwrap_or_default();
            let offset = self.doc.span(open).map_or(0, |s| s.start as usize);
            return Err(ParseError::invalid_source_at(
                format!("element <{}> is never closed", name),
                self.source,
                offset,
            ));
        }

        if self.doc.root_element().is_none() {
            return Err(ParseError::invalid_source("document has no root element"));
        }

        Ok(self.doc)
    }

    fn current_parent(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.doc.root())
    }

    fn push(&mut self, kind: NodeKind) {
        let parent = self.current_parent();
        let id = self.doc.create_node(kind);
        self.doc.append_child(parent, id);
    }

    fn open_element(
        &mut self,
        start: &BytesStart<'_>,
        event_start: usize,
    ) -> Result<NodeId, ParseError> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(ParseError::invalid_source_at(
                format!("elements nested deeper than {} levels", MAX_DEPTH),
                self.source,
                event_start,
            ));
        }

        let parent = self.current_parent();
        if parent == self.doc.root() && self.doc.root_element().is_some() {
            return Err(ParseError::invalid_source_at(
                "document has more than one root element",
                self.source,
                event_start,
            ));
        }

        let name = QName::parse(self.utf8(start.name().as_ref(), event_start)?);
        let mut element = Element::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| {
                ParseError::invalid_source_at(e.to_string(), self.source, event_start)
            })?;
            let key = QName::parse(self.utf8(attr.key.as_ref(), event_start)?);
            let value = attr.unescape_value().map_err(|e| {
                ParseError::invalid_source_at(
                    format!("invalid value for attribute '{}': {}", key, e),
                    self.source,
                    event_start,
                )
            })?;
            element.attributes.push(Attribute::new(key, value));
        }

        let prefix = element.name.prefix.clone();
        let id = self.doc.create_element(element);
        self.doc.append_child(parent, id);
        let event_end = self.reader.buffer_position() as usize;
        self.doc
            .set_span(id, Span::new(event_start as u32, event_end as u32));

        let namespace = self
            .doc
            .lookup_namespace(id, prefix.as_deref())
            .map(str::to_string);
        if namespace.is_none()
            && let Some(prefix) = prefix
        {
            return Err(ParseError::invalid_source_at(
                format!("namespace prefix '{}' is not declared", prefix),
                self.source,
                event_start,
            ));
        }
        if let Some(element) = self.doc.element_mut(id) {
            element.namespace = namespace;
        }

        Ok(id)
    }

    /// Fails on a bare `&` or a reference to an entity that is neither
    /// predefined nor declared in the DTD.
    fn check_references(&self, text: &str, offset: usize) -> Result<(), ParseError> {
        unescape_with(text, |name| {
            resolve_predefined_entity(name)
                .or_else(|| self.entities.contains(name).then_some(""))
        })
        .map(|_| ())
        .map_err(|e| ParseError::invalid_source_at(e.to_string(), self.source, offset))
    }

    fn utf8<'b>(&self, bytes: &'b [u8], offset: usize) -> Result<&'b str, ParseError> {
        std::str::from_utf8(bytes).map_err(|e| {
            ParseError::invalid_source_at(format!("invalid UTF-8: {}", e), self.source, offset)
        })
    }
}

/// Names of the general entities declared by `<!ENTITY name ...>` in a
/// DOCTYPE. Parameter entities (`<!ENTITY % name ...>`) are skipped.
fn declared_entities(doctype: &str) -> impl Iterator<Item = String> + '_ {
    doctype.split("<!ENTITY").skip(1).filter_map(|decl| {
        let name = decl.split_whitespace().next()?;
        (name != "%").then(|| name.to_string())
    })
}
