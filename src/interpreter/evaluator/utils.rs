use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult},
};

/// Reading this symbol pops the top of the operand stack.
pub const STACK_TOP: &str = "_";
/// Reading this symbol yields the current depth of the operand stack.
pub const STACK_DEPTH: &str = "__";

/// Returns whether `name` is one of the stack-backed symbols that cannot be
/// assigned.
///
/// ```
/// use stackcalc::interpreter::evaluator::utils::is_reserved_symbol;
///
/// assert!(is_reserved_symbol("_"));
/// assert!(is_reserved_symbol("__"));
/// assert!(!is_reserved_symbol("_a"));
/// ```
#[must_use]
pub fn is_reserved_symbol(name: &str) -> bool {
    name == STACK_TOP || name == STACK_DEPTH
}

/// Applies a negation flag to a value.
#[must_use]
pub fn signed(negative: bool, value: f64) -> f64 {
    if negative { -value } else { value }
}

impl Context {
    /// Pushes a value onto the operand stack.
    pub fn push_to_stack(&mut self, value: f64) {
        self.stack.push(value);
    }

    /// Pops the top of the operand stack.
    ///
    /// # Returns
    /// `None` if the stack is empty.
    pub fn pop_from_stack(&mut self) -> Option<f64> {
        self.stack.pop()
    }

    /// Pops the top of the operand stack, failing if there is none.
    ///
    /// # Errors
    /// `StackUnderflow` if the stack is empty.
    pub fn pop_operand(&mut self) -> EvalResult<f64> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Returns whether the operand stack is empty.
    #[must_use]
    pub fn is_stack_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns the number of values on the operand stack.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Discards every value on the operand stack.
    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    /// Looks up a symbol.
    ///
    /// # Errors
    /// `UnknownSymbol` if the symbol was never assigned.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// ctx.set_symbol("x", 1.5).unwrap();
    ///
    /// assert_eq!(ctx.symbol("x").unwrap(), 1.5);
    /// assert!(ctx.symbol("y").is_err());
    /// ```
    pub fn symbol(&self, name: &str) -> EvalResult<f64> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownSymbol { name: name.to_string() })
    }

    /// Looks up a symbol, treating a missing one as `0`.
    #[must_use]
    pub fn symbol_or_zero(&self, name: &str) -> f64 {
        self.symbols.get(name).copied().unwrap_or_default()
    }

    /// Creates or overwrites a symbol.
    ///
    /// # Errors
    /// `ReservedSymbol` for `_` and `__`.
    pub fn set_symbol(&mut self, name: &str, value: f64) -> EvalResult<()> {
        if is_reserved_symbol(name) {
            return Err(RuntimeError::ReservedSymbol { name: name.to_string() });
        }

        self.symbols.insert(name.to_string(), value);
        Ok(())
    }
}
