/// Binary operator evaluation logic.
///
/// Arithmetic with its operand order, and assignment.
pub mod binary;

/// Unary evaluation logic.
///
/// Negation of groups and call results.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, line dispatch and the resolution of leaf
/// entities.
pub mod core;

/// Utility functions for evaluation.
///
/// Operand stack and symbol table helpers, and the reserved stack symbols.
pub mod utils;

/// Call evaluation.
///
/// Argument passing, the comparison builtins and directive invocation.
pub mod function;
