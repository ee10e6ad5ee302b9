/// Core expression parsing.
///
/// Contains the single-pass scanner that turns expression text into a tree,
/// and the `ParseResult` alias shared by the parser.
pub mod core;

/// Binary node placement.
///
/// Splices completed binary nodes into the tree by precedence and
/// associativity.
pub mod binary;

/// Utility functions for the parser.
///
/// Parenthesis matching and call argument splitting.
pub mod utils;

/// Line classification.
///
/// Recognizes comments, directive lines and plain expressions before any
/// expression is parsed.
pub mod statement;
