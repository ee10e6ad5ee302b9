use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a line.
pub enum ParseError {
    /// A `)` appeared without a matching `(`.
    #[error("Syntax error: unexpected ')' at position {position}.")]
    UnexpectedClosingParen {
        /// Byte offset of the parenthesis within the parsed text.
        position: usize,
    },
    /// A `(` was never closed.
    #[error("Syntax error: unbalanced parenthesis opened at position {position}.")]
    UnbalancedParen {
        /// Byte offset of the opening parenthesis within the parsed text.
        position: usize,
    },
    /// An operand was expected but the text ended or an operator followed.
    #[error("Syntax error: expected an operand {context}.")]
    MissingOperand {
        /// Where the operand was missing, e.g. `before '*'`.
        context: String,
    },
    /// Two operands followed each other without an operator in between.
    #[error("Syntax error: unexpected '{found}' after '{after}'.")]
    MissingOperator {
        /// The text that was already complete.
        after: String,
        /// The character that followed it.
        found: char,
    },
    /// The text before a `(` is neither a sign nor a directive name.
    #[error("Syntax error: '{prefix}' cannot precede '('.")]
    InvalidCall {
        /// The offending prefix.
        prefix: String,
    },
    /// A `@` line matched none of the directive forms.
    #[error("Syntax error: invalid directive syntax '{line}'.")]
    InvalidDirective {
        /// The directive text after `@`.
        line: String,
    },
    /// Parentheses nest deeper than the parser accepts.
    #[error("Syntax error: parentheses nest deeper than {limit} levels.")]
    GroupsTooDeep {
        /// The maximum nesting depth.
        limit: usize,
    },
    /// The expression holds more binary operators than the parser accepts.
    #[error("Syntax error: expression has more than {limit} operators.")]
    TooManyOperators {
        /// The maximum operator count.
        limit: usize,
    },
    /// A word is neither a valid literal nor a valid symbol.
    #[error("Value error: '{word}' is not a valid literal or symbol.")]
    InvalidWord {
        /// The rejected word.
        word: String,
    },
}

impl ParseError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidWord { .. } => ErrorKind::ValueError,
            Self::UnexpectedClosingParen { .. }
            | Self::UnbalancedParen { .. }
            | Self::MissingOperand { .. }
            | Self::MissingOperator { .. }
            | Self::InvalidCall { .. }
            | Self::InvalidDirective { .. }
            | Self::GroupsTooDeep { .. }
            | Self::TooManyOperators { .. } => ErrorKind::SyntaxError,
        }
    }
}
