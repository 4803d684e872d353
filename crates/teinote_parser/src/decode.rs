//! Input decoding.
//!
//! Raw file bytes become a `String` before parsing. A byte-order mark wins
//! over everything else and is always removed; without one, the encoding
//! named in the XML declaration is used, and UTF-8 otherwise.

use encoding_rs::{Encoding, UTF_8};

use crate::ParseError;

/// How far into the input the XML declaration is searched for.
const DECLARATION_WINDOW: usize = 1024;

/// Decoded document text plus what was learned while decoding it.
#[derive(Debug)]
pub struct DecodedSource {
    /// Document text without any byte-order mark.
    pub text: String,
    /// Encoding the bytes were decoded from.
    pub encoding: &'static Encoding,
}

/// Decodes raw document bytes.
pub fn decode(bytes: &[u8]) -> Result<DecodedSource, ParseError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            ParseError::encoding(format!("input is not valid {}", encoding.name()))
        })?
        .into_owned();

    Ok(DecodedSource { text, encoding })
}

/// Reads the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>, ParseError> {
    if !bytes.starts_with(b"<?xml") {
        return Ok(None);
    }

    let window = &bytes[..bytes.len().min(DECLARATION_WINDOW)];
    let Some(end) = find(window, b"?>") else {
        return Ok(None);
    };
    let declaration = &window[..end];

    let Some(label) = pseudo_attribute(declaration, b"encoding") else {
        return Ok(None);
    };

    Encoding::for_label(label).map(Some).ok_or_else(|| {
        ParseError::unsupported(format!(
            "declared encoding '{}'",
            String::from_utf8_lossy(label)
        ))
    })
}

/// Extracts the quoted value of `name="..."` from a declaration.
fn pseudo_attribute<'a>(declaration: &'a [u8], name: &[u8]) -> Option<&'a [u8]> {
    let start = find(declaration, name)? + name.len();
    let rest = trim_start(&declaration[start..]);
    let rest = trim_start(rest.strip_prefix(b"=")?);

    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[1..];
    let len = value.iter().position(|&b| b == quote)?;
    Some(&value[..len])
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    &bytes[skip..]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, WINDOWS_1252};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_plain_utf8() {
        let decoded = decode("<p>café</p>".as_bytes()).unwrap();
        assert_eq!(decoded.text, "<p>café</p>");
        assert_eq!(decoded.encoding, UTF_8);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<?xml version=\"1.0\"?><p>é</p>".as_bytes());

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.encoding, UTF_8);
        assert!(decoded.text.starts_with("<?xml"));
        assert!(decoded.text.ends_with("<p>é</p>"));
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<p>ß</p>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.encoding, UTF_16LE);
        assert_eq!(decoded.text, "<p>ß</p>");
    }

    #[test]
    fn test_declared_latin1() {
        let mut bytes = b"<?xml version='1.0' encoding='ISO-8859-1'?><p>".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</p>");

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.encoding, WINDOWS_1252);
        assert!(decoded.text.ends_with("<p>é</p>"));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let result = decode(b"<p>\xFF\xFE\xFD</p>");
        assert!(matches!(result, Err(ParseError::Encoding(_))));
    }

    #[test]
    fn test_unknown_declared_encoding_is_unsupported() {
        let result = decode(b"<?xml version=\"1.0\" encoding=\"x-klingon\"?><p/>");
        assert!(matches!(result, Err(ParseError::Unsupported(_))));
    }

    #[rstest]
    #[case(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>".as_slice(), Some("UTF-8"))]
    #[case(b"<?xml version='1.0' encoding = 'utf-8' ?>".as_slice(), Some("utf-8"))]
    #[case(b"<?xml version=\"1.0\"?>".as_slice(), None)]
    #[case(b"<?xml version=\"1.0\" encoding=UTF-8?>".as_slice(), None)]
    fn test_pseudo_attribute(#[case] declaration: &[u8], #[case] expected: Option<&str>) {
        let value = pseudo_attribute(declaration, b"encoding");
        assert_eq!(value, expected.map(str::as_bytes));
    }
}
