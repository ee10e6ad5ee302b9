//! # stackcalc
//!
//! stackcalc is a small arithmetic language with an operand stack. Lines are
//! parsed in a single pass into expression trees and resolved against a
//! context holding symbols, directives and the stack. Directives are named
//! expressions that read their arguments from the stack; lines starting with
//! `@` define, invoke and include them.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::Error, interpreter::evaluator::core::Context};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Entity` enum and the node types it wraps:
/// literals, symbols, groups, binary operations and calls. Trees are built by
/// the parser, stored as directive bodies and resolved by the evaluator.
///
/// # Responsibilities
/// - Defines the node types and operator precedence and associativity.
/// - Renders trees in infix and postfix form.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while classifying lines,
/// parsing expressions or resolving trees. Every error belongs to one
/// `ErrorKind`.
///
/// # Responsibilities
/// - Defines error enums for the parser and the evaluator.
/// - Maps every error to its category.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together word classification, parsing, evaluation and
/// source handling, and exposes the `Context` that runs lines.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser and evaluator.
/// - Provides entry points for running lines, sources and files.
pub mod interpreter;
/// Runs test suites of `input,expected` lines against a context.
pub mod suite;
/// General utilities for numeric conversion.
///
/// # Responsibilities
/// - Parse literal magnitudes, including `inf` and `nan`.
/// - Convert stack depths to `f64`.
pub mod util;

/// Runs a source text in a fresh context and returns the top of the stack.
///
/// Each line is run in order and execution stops at the first error.
///
/// # Errors
/// Returns the first parse or runtime error raised by any line.
///
/// # Examples
/// ```
/// use stackcalc::evaluate;
///
/// // The last expression's value is on top of the stack.
/// let source = "@[$sq$ _*_]\n@x = 3\nsq(x; x) + 1";
/// assert_eq!(evaluate(source).unwrap(), Some(10.0));
///
/// // Lines that leave nothing on the stack produce no value.
/// assert_eq!(evaluate("# nothing here").unwrap(), None);
///
/// // Example with an intentional error (unknown symbol).
/// assert!(evaluate("y + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Option<f64>, Error> {
    let mut context = Context::new();
    context.run_source(source)?;

    Ok(context.pop_from_stack())
}
