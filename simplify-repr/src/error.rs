//! Error types for the fixture reader

use thiserror::Error;

use crate::expr::Location;

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while reading source text into a [`Module`](crate::Module).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token that cannot start or continue the construct being read
    #[error("{location}: unexpected {found}, expected {expected}")]
    Unexpected {
        location: Location,
        found: String,
        expected: &'static str,
    },

    /// Input ended in the middle of a construct
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A character the lexer does not recognise
    #[error("{location}: invalid character {found:?}")]
    InvalidCharacter { location: Location, found: char },

    /// String or char literal without its closing quote
    #[error("{location}: unterminated literal")]
    UnterminatedLiteral { location: Location },

    /// `{-` without matching `-}`
    #[error("{location}: unterminated block comment")]
    UnterminatedComment { location: Location },

    /// Number that does not fit the literal type
    #[error("{location}: invalid number literal `{text}`")]
    InvalidNumber { location: Location, text: String },

    /// Syntax the reader deliberately does not handle
    #[error("{location}: `{construct}` is not supported")]
    Unsupported {
        location: Location,
        construct: &'static str,
    },
}
