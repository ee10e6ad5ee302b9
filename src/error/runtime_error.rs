use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Error)]
/// Represents all errors that can occur while resolving a tree.
pub enum RuntimeError {
    /// A literal magnitude could not be converted to a number.
    #[error("Value error: invalid literal \"{magnitude}\".")]
    InvalidLiteral {
        /// The magnitude text.
        magnitude: String,
    },
    /// A symbol was read before it was ever assigned.
    #[error("Not found: cannot find symbol '{name}'.")]
    UnknownSymbol {
        /// The symbol name.
        name: String,
    },
    /// A directive was invoked that was never defined.
    #[error("Not found: cannot find directive '{name}'.")]
    UnknownDirective {
        /// The directive name.
        name: String,
    },
    /// A directive was declared with an empty body and then invoked.
    #[error("Invalid operation: cannot call empty directive '{name}'.")]
    EmptyDirective {
        /// The directive name.
        name: String,
    },
    /// The left side of `=` is not a bare symbol.
    #[error("Invalid operation: cannot assign to '{target}'.")]
    InvalidAssignment {
        /// Canonical form of the assignment target.
        target: String,
    },
    /// An assignment targeted a reserved stack name.
    #[error("Invalid operation: '{name}' is reserved and cannot be assigned.")]
    ReservedSymbol {
        /// The reserved name.
        name: String,
    },
    /// A binary node is missing one of its children.
    #[error("Type error: cannot resolve incomplete {entity} entity.")]
    IncompleteEntity {
        /// Label of the incomplete entity kind.
        entity: &'static str,
    },
    /// A value was needed from the operand stack but it was empty.
    #[error("Invalid operation: operand stack is empty.")]
    StackUnderflow,
    /// A comparison builtin was called with an unsupported argument count.
    #[error("Invalid operation: '{name}' takes 0 or 4 arguments, found {found}.")]
    BuiltinArity {
        /// The builtin name.
        name:  &'static str,
        /// The number of arguments supplied.
        found: usize,
    },
    /// A comparison builtin ran without one of its convention symbols.
    #[error("Invalid operation: '{name}' requires symbol '{symbol}' to be set.")]
    MissingBuiltinSymbol {
        /// The builtin name.
        name:   &'static str,
        /// The missing symbol.
        symbol: &'static str,
    },
    /// Directives or includes nested deeper than the interpreter allows.
    #[error("Invalid operation: '{name}' exceeds the maximum nesting depth of {limit}.")]
    NestingTooDeep {
        /// The directive or file being entered.
        name:  String,
        /// The configured limit.
        limit: usize,
    },
    /// An included file could not be read.
    #[error("Not found: cannot open file \"{}\": {source}", path.display())]
    IncludeFailed {
        /// The path as written in the include line.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLiteral { .. } => ErrorKind::ValueError,
            Self::IncompleteEntity { .. } => ErrorKind::TypeError,
            Self::UnknownSymbol { .. }
            | Self::UnknownDirective { .. }
            | Self::IncludeFailed { .. } => ErrorKind::NotFound,
            Self::EmptyDirective { .. }
            | Self::InvalidAssignment { .. }
            | Self::ReservedSymbol { .. }
            | Self::StackUnderflow
            | Self::BuiltinArity { .. }
            | Self::MissingBuiltinSymbol { .. }
            | Self::NestingTooDeep { .. } => ErrorKind::InvalidOperation,
        }
    }
}
