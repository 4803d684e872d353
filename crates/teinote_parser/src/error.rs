//! Parse error types.

use teinote_ast::Position;
use thiserror::Error;

/// Errors that can occur while decoding or parsing a document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text is not well-formed.
    #[error(
        "Invalid source: {message}{}",
        .position.map(|p| format!(" at {}", p)).unwrap_or_default()
    )]
    InvalidSource {
        /// Error message.
        message: String,
        /// Line and column where the error occurred.
        position: Option<Position>,
    },

    /// The input bytes could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The input uses a feature this parser does not handle.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// An internal parser error occurred.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            position: None,
        }
    }

    /// Creates a new invalid source error located at a byte offset of
    /// `source`.
    pub fn invalid_source_at(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            position: Some(Position::from_offset(source, offset)),
        }
    }

    /// Creates a new encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }

    /// Creates a new unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported(feature.into())
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
