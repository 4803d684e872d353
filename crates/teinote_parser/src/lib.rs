//! # teinote_parser
//!
//! Reading and writing XML documents for teinote.
//!
//! This crate provides:
//! - A `Parser` trait for turning source files into a [`Document`]
//! - `XmlParser`, built on `quick-xml`, which keeps mixed content, comments
//!   and entity references exactly as written
//! - Input decoding that strips byte-order marks and honours the encoding
//!   named in the XML declaration
//! - A serializer that always writes UTF-8 with a declaration and no BOM
//!
//! ## Example
//!
//! ```rust
//! use teinote_parser::{Parser, XmlParser, serialize};
//!
//! let parser = XmlParser::new();
//! let doc = parser.parse_bytes(b"\xEF\xBB\xBF<TEI>caf\xC3\xA9</TEI>").unwrap();
//!
//! assert_eq!(
//!     serialize(&doc),
//!     "<?xml version='1.0' encoding='UTF-8'?>\n<TEI>caf\u{e9}</TEI>"
//! );
//! ```
//!
//! [`Document`]: teinote_ast::Document

mod decode;
mod error;
mod traits;
mod writer;
mod xml;

pub use decode::{DecodedSource, decode};
pub use error::ParseError;
pub use traits::Parser;
pub use writer::{XML_DECLARATION, serialize, write_document};
pub use xml::{MAX_DEPTH, XmlParser};
