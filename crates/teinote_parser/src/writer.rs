//! Document serialization.
//!
//! Output is always UTF-8, starts with [`XML_DECLARATION`] and never with a
//! byte-order mark. Nothing is pretty-printed: whitespace inside the root
//! element is written back exactly as it is held in the tree.

use std::io;

use quick_xml::escape::escape;
use teinote_ast::{Document, NodeId, NodeKind};

/// Declaration written at the top of every serialized document.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>";

/// Serializes a document to a string.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(doc.arena_len() * 16);
    out.push_str(XML_DECLARATION);
    out.push('\n');

    // Whitespace that separated the source's own declaration from the
    // first node is replaced by the newline above.
    let top_level = doc.children(doc.root());
    let first = top_level
        .iter()
        .position(|&id| !doc.kind(id).is_whitespace_text())
        .unwrap_or(top_level.len());
    for &id in &top_level[first..] {
        write_node(doc, id, &mut out);
    }

    out
}

/// Serializes a document into `writer`.
pub fn write_document<W: io::Write>(doc: &Document, writer: &mut W) -> io::Result<()> {
    writer.write_all(serialize(doc).as_bytes())?;
    writer.flush()
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Document => {
            for &child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.name.to_string());
            for attr in &element.attributes {
                out.push(' ');
                out.push_str(&attr.name.to_string());
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }

            let children = doc.children(id);
            if children.is_empty() {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for &child in children {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&element.name.to_string());
            out.push('>');
        }
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeKind::ProcessingInstruction(text) => {
            out.push_str("<?");
            out.push_str(text);
            out.push_str("?>");
        }
        NodeKind::DocType(text) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(text);
            out.push('>');
        }
    }
}
