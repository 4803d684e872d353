//! Reference resolution and note inlining.
//!
//! References are gathered in document order in one read-only walk, then
//! each is replaced in place. A replacement only touches the reference's
//! parent, so handles gathered earlier stay valid.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use teinote_ast::visitor::{walk_children, walk_node};
use teinote_ast::{Document, Element, NodeId, QName, VisitResult, Visitor};
use tracing::{debug, warn};

use crate::tei::{self, NOTE, REF, TEXT};
use crate::{InlineConfig, NoteTable};

/// What [`inline_references`] did to a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InlineOutcome {
    /// References replaced by an inline note.
    pub inlined: usize,
    /// References to collected notes that were left alone because they sit
    /// inside a notes division.
    pub skipped: usize,
}

/// Replaces every reference to a collected note with an inline copy of it.
///
/// A reference is a `ref` inside a `text` element whose `target` is `#id`
/// with `id` in `notes`. Each replacement is a new `note` element carrying
/// only `place` and a fresh deep copy of the source note's children, so a
/// note referenced N times yields N independent copies. Text that followed
/// the reference stays immediately after the inline note.
pub fn inline_references(
    doc: &mut Document,
    notes: &NoteTable,
    config: &InlineConfig,
) -> InlineOutcome {
    let mut scanner = ReferenceScanner {
        config,
        notes,
        text_depth: 0,
        division_depth: 0,
        matches: Vec::new(),
        skipped: 0,
    };
    let _ = walk_node(&mut scanner, doc, doc.root());

    let mut outcome = InlineOutcome {
        inlined: 0,
        skipped: scanner.skipped,
    };

    for (reference, note) in scanner.matches {
        let inline = build_inline_note(doc, note, config);
        if doc.replace(reference, inline) {
            fix_namespaces(doc, note, inline);
            outcome.inlined += 1;
        }
    }

    debug!(
        "Inlined {} references ({} skipped)",
        outcome.inlined, outcome.skipped
    );
    outcome
}

struct ReferenceScanner<'a> {
    config: &'a InlineConfig,
    notes: &'a NoteTable,
    /// Number of open `text` elements.
    text_depth: usize,
    /// Element depth relative to the enclosing notes division; 0 outside.
    division_depth: usize,
    /// `(reference, source note)` pairs in document order.
    matches: Vec<(NodeId, NodeId)>,
    skipped: usize,
}

impl ReferenceScanner<'_> {
    fn resolve(&self, doc: &Document, id: NodeId, element: &Element) -> Option<NodeId> {
        if !element.is(&self.config.namespace, REF) {
            return None;
        }
        tei::fragment_target(doc, id).and_then(|target| self.notes.get(target))
    }
}

impl Visitor for ReferenceScanner<'_> {
    fn enter_element(&mut self, doc: &Document, id: NodeId, element: &Element) -> VisitResult {
        if element.is(&self.config.namespace, TEXT) {
            self.text_depth += 1;
        }
        if self.division_depth > 0 {
            self.division_depth += 1;
        } else if tei::is_notes_division(doc, id, self.config) {
            self.division_depth = 1;
        }
        ControlFlow::Continue(())
    }

    fn visit_element(&mut self, doc: &Document, id: NodeId, element: &Element) -> VisitResult {
        if self.text_depth > 0
            && let Some(note) = self.resolve(doc, id, element)
        {
            if self.division_depth > 0 {
                warn!(
                    "Reference to '{}' inside a notes division is not inlined",
                    element.attribute("target").unwrap_or_default()
                );
                self.skipped += 1;
            } else {
                // The reference's own content is discarded with it.
                self.matches.push((id, note));
                return ControlFlow::Continue(());
            }
        }
        walk_children(self, doc, id)
    }

    fn exit_element(&mut self, _doc: &Document, _id: NodeId, element: &Element) -> VisitResult {
        if element.is(&self.config.namespace, TEXT) {
            self.text_depth = self.text_depth.saturating_sub(1);
        }
        self.division_depth = self.division_depth.saturating_sub(1);
        ControlFlow::Continue(())
    }
}

/// Creates a detached `note` holding fresh copies of `source`'s children.
fn build_inline_note(doc: &mut Document, source: NodeId, config: &InlineConfig) -> NodeId {
    let (name, namespace) = match doc.element(source) {
        Some(element) => (element.name.clone(), element.namespace.clone()),
        None => (QName::new(NOTE), Some(config.namespace.clone())),
    };

    let element = Element {
        namespace,
        ..Element::new(name).with_attribute(QName::new("place"), config.inline_place.as_str())
    };
    let inline = doc.create_element(element);

    let children = doc.children(source).to_vec();
    for child in children {
        let copy = doc.deep_copy(child);
        doc.append_child(inline, copy);
    }

    inline
}

/// Declares on `inline` every prefix its subtree uses that resolves
/// differently at the reference site than at the source note.
fn fix_namespaces(doc: &mut Document, source: NodeId, inline: NodeId) {
    let mut used = BTreeSet::new();
    let mut declared_inside = BTreeSet::new();
    for id in std::iter::once(inline).chain(doc.descendants(inline)) {
        let Some(element) = doc.element(id) else {
            continue;
        };
        used.extend(element.used_prefixes().map(|p| p.map(str::to_string)));
        if id != inline {
            declared_inside.extend(
                element
                    .namespace_declarations()
                    .map(|(p, _)| p.map(str::to_string)),
            );
        }
    }

    let mut declarations = Vec::new();
    for prefix in used.difference(&declared_inside) {
        let expected = doc.lookup_namespace(source, prefix.as_deref());
        let actual = doc.lookup_namespace(inline, prefix.as_deref());
        if expected == actual {
            continue;
        }

        let name = match prefix {
            Some(prefix) => QName::prefixed("xmlns", prefix.as_str()),
            None => QName::new("xmlns"),
        };
        match (expected, prefix) {
            (Some(uri), _) => declarations.push((name, uri.to_string())),
            (None, None) => declarations.push((name, String::new())),
            // Undeclared prefixes are rejected at parse time.
            (None, Some(_)) => {}
        }
    }

    if let Some(element) = doc.element_mut(inline) {
        for (name, uri) in declarations {
            element.set_attribute(name, uri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect_notes;
    use pretty_assertions::assert_eq;
    use teinote_ast::NodeKind;
    use teinote_parser::{Parser, XmlParser, serialize};

    const TEI_OPEN: &str = "<TEI xmlns=\"http://www.tei-c.org/ns/1.0\">";

    fn run(body: &str) -> (Document, InlineOutcome) {
        let mut doc = XmlParser::new()
            .parse(&format!("{}{}</TEI>", TEI_OPEN, body))
            .unwrap();
        let config = InlineConfig::default();
        let notes = collect_notes(&doc, &config).unwrap();
        let outcome = inline_references(&mut doc, &notes, &config);
        (doc, outcome)
    }

    fn body_of(doc: &Document) -> String {
        let out = serialize(doc);
        let start = out.find("<body>").unwrap();
        let end = out.find("</body>").unwrap() + "</body>".len();
        out[start..end].to_string()
    }

    fn inline_notes(doc: &Document) -> Vec<NodeId> {
        doc.descendants(doc.root())
            .filter(|&id| {
                doc.element(id)
                    .is_some_and(|e| e.name.local == "note" && e.attribute("place") == Some("inline"))
            })
            .collect()
    }

    const NOTES: &str = "<back><div type=\"notes\">\
        <note xml:id=\"n1\">See <hi rend=\"italic\">Ovid</hi>, <foreign xml:lang=\"la\">passim</foreign>.</note>\
        <note xml:id=\"n2\">Plain.</note>\
        </div></back>";

    #[test]
    fn test_inlines_reference_and_keeps_trailing_text() {
        let (doc, outcome) = run(&format!(
            "<text><body><p>Before<ref target=\"#n2\">2</ref> after.</p></body>{}</text>",
            NOTES
        ));

        assert_eq!(outcome, InlineOutcome { inlined: 1, skipped: 0 });
        assert_eq!(
            body_of(&doc),
            "<body><p>Before<note place=\"inline\">Plain.</note> after.</p></body>"
        );
    }

    #[test]
    fn test_preserves_mixed_content() {
        let (doc, outcome) = run(&format!(
            "<text><body><p>x<ref target=\"#n1\"/>y</p></body>{}</text>",
            NOTES
        ));

        assert_eq!(outcome.inlined, 1);
        assert_eq!(
            body_of(&doc),
            "<body><p>x<note place=\"inline\">See <hi rend=\"italic\">Ovid</hi>, \
             <foreign xml:lang=\"la\">passim</foreign>.</note>y</p></body>"
        );
    }

    #[test]
    fn test_multiple_references_get_independent_copies() {
        let (mut doc, outcome) = run(&format!(
            "<text><body><p><ref target=\"#n1\"/></p><p><ref target=\"#n1\"/></p></body>{}</text>",
            NOTES
        ));
        assert_eq!(outcome.inlined, 2);

        let copies = inline_notes(&doc);
        assert_eq!(copies.len(), 2);
        assert_ne!(copies[0], copies[1]);

        let first_text = doc.children(copies[0])[0];
        let second_text = doc.children(copies[1])[0];
        assert_ne!(first_text, second_text);

        *doc.kind_mut(first_text) = NodeKind::Text("Changed ".to_string());
        assert!(doc.text_content(copies[1]).starts_with("See "));
    }

    #[test]
    fn test_leaves_unknown_and_external_references() {
        let (doc, outcome) = run(&format!(
            "<text><body><p><ref target=\"#missing\">m</ref>\
             <ref target=\"http://example.com\">e</ref><ref target=\"#n2\"/></p></body>{}</text>",
            NOTES
        ));

        assert_eq!(outcome.inlined, 1);
        assert_eq!(
            body_of(&doc),
            "<body><p><ref target=\"#missing\">m</ref>\
             <ref target=\"http://example.com\">e</ref><note place=\"inline\">Plain.</note></p></body>"
        );
    }

    #[test]
    fn test_ignores_references_outside_text() {
        let (doc, outcome) = run(&format!(
            "<teiHeader><ref target=\"#n2\"/></teiHeader><text><body/>{}</text>",
            NOTES
        ));

        assert_eq!(outcome.inlined, 0);
        assert!(serialize(&doc).contains("<teiHeader><ref target=\"#n2\"/></teiHeader>"));
    }

    #[test]
    fn test_skips_references_inside_notes_division() {
        let (doc, outcome) = run(
            "<text><body><p><ref target=\"#n1\"/></p></body>\
             <back><div type=\"notes\">\
               <note xml:id=\"n1\">See <ref target=\"#n2\">note 2</ref></note>\
               <note xml:id=\"n2\">Two</note>\
             </div></back></text>",
        );

        assert_eq!(outcome, InlineOutcome { inlined: 1, skipped: 1 });
        assert_eq!(
            body_of(&doc),
            "<body><p><note place=\"inline\">See <ref target=\"#n2\">note 2</ref></note></p></body>"
        );
    }

    #[test]
    fn test_source_notes_untouched() {
        let (doc, _) = run(&format!(
            "<text><body><p><ref target=\"#n2\"/></p></body>{}</text>",
            NOTES
        ));

        assert!(serialize(&doc).contains("<note xml:id=\"n2\">Plain.</note>"));
    }

    #[test]
    fn test_declares_prefix_bound_only_at_source() {
        let (doc, outcome) = run(
            "<text><body><p><ref target=\"#n1\"/></p></body>\
             <back><div type=\"notes\" xmlns:m=\"http://www.w3.org/1998/Math/MathML\">\
               <note xml:id=\"n1\"><m:math/></note>\
             </div></back></text>",
        );

        assert_eq!(outcome.inlined, 1);
        assert_eq!(
            body_of(&doc),
            "<body><p><note place=\"inline\" xmlns:m=\"http://www.w3.org/1998/Math/MathML\">\
             <m:math/></note></p></body>"
        );
    }

    #[test]
    fn test_prefixed_tei_documents() {
        let mut doc = XmlParser::new()
            .parse(
                "<tei:TEI xmlns:tei=\"http://www.tei-c.org/ns/1.0\"><tei:text>\
                 <tei:body><tei:p>a<tei:ref target=\"#n1\"/>b</tei:p></tei:body>\
                 <tei:back><tei:div type=\"notes\"><tei:note xml:id=\"n1\">N</tei:note></tei:div></tei:back>\
                 </tei:text></tei:TEI>",
            )
            .unwrap();
        let config = InlineConfig::default();
        let notes = collect_notes(&doc, &config).unwrap();
        let outcome = inline_references(&mut doc, &notes, &config);

        assert_eq!(outcome.inlined, 1);
        assert!(serialize(&doc).contains("<tei:p>a<tei:note place=\"inline\">N</tei:note>b</tei:p>"));
    }
}
