use std::fmt;

use thiserror::Error;

/// Parsing errors.
///
/// Raised while recognizing a line or building an expression tree: unbalanced
/// parentheses, operators without operands, malformed directive lines and
/// words that are neither literals nor symbols.
pub mod parse_error;
/// Runtime errors.
///
/// Raised while resolving a tree against the interpreter state: unknown
/// symbols and directives, invalid assignments, stack underflow and failed
/// includes.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The category of an error, independent of where it was raised.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed expression or line structure.
    SyntaxError,
    /// A token looks like a literal or symbol but fails validation, or a
    /// literal cannot be converted to a number.
    ValueError,
    /// A node cannot be resolved because of its shape.
    TypeError,
    /// Structurally valid but semantically invalid input.
    InvalidOperation,
    /// Unknown symbol, directive or file.
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SyntaxError => "SyntaxError",
            Self::ValueError => "ValueError",
            Self::TypeError => "TypeError",
            Self::InvalidOperation => "InvalidOperation",
            Self::NotFound => "NotFound",
        };
        f.write_str(name)
    }
}

/// Any error produced while running a line.
#[derive(Debug, Error)]
pub enum Error {
    /// The line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed tree could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the category of the underlying error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }
}
