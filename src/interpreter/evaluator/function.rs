/// Comparison builtins.
///
/// The six `__cmp_*__` functions and the `_a`..`_d` symbols they work on.
pub mod builtin;

/// Call evaluation and directive dispatch.
pub mod core;
