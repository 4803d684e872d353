//! Parser trait definition.

use teinote_ast::Document;

use crate::{ParseError, decode};

/// Trait for parsing source files into a [`Document`].
///
/// # Example
///
/// ```rust,ignore
/// use teinote_parser::{ParseError, Parser};
/// use teinote_ast::Document;
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["myxml"]
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, ParseError> {
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["xml"]`).
    fn extensions(&self) -> &[&str];

    /// Parses already decoded source text into a document.
    fn parse(&self, source: &str) -> Result<Document, ParseError>;

    /// Decodes raw file bytes and parses them.
    ///
    /// A leading byte-order mark is stripped and the encoding it names (or
    /// the one declared in the XML declaration) is recorded on the
    /// returned document.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Document, ParseError> {
        let decoded = decode(bytes)?;
        let mut doc = self.parse(&decoded.text)?;
        doc.set_encoding(decoded.encoding.name());
        Ok(doc)
    }

    /// Returns true if this parser can handle the given file extension.
    ///
    /// Extensions are compared exactly, so `XML` does not match `xml`.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions().iter().any(|ext| *ext == extension)
    }
}
