use crate::{
    ast::Parenthesis,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Resolves a parenthesized group.
    ///
    /// The inner expression is resolved first; a negated group then replaces
    /// the value on top of the stack with its negation.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::{evaluator::core::Context, parser::core::parse_expression};
    ///
    /// let mut ctx = Context::new();
    /// ctx.resolve(&parse_expression("-(2 - 5)").unwrap()).unwrap();
    ///
    /// assert_eq!(ctx.pop_from_stack(), Some(3.0));
    /// ```
    pub(crate) fn resolve_parenthesis(&mut self, group: &Parenthesis) -> EvalResult<()> {
        self.resolve(&group.inner)?;

        if group.negative {
            self.negate_top()?;
        }
        Ok(())
    }

    /// Replaces the value on top of the stack with its negation.
    ///
    /// # Errors
    /// `StackUnderflow` if the stack is empty.
    pub fn negate_top(&mut self) -> EvalResult<()> {
        let value = self.pop_operand()?;
        self.push_to_stack(-value);
        Ok(())
    }
}
