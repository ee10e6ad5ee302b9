use crate::{
    ast::{BinaryOp, BinaryOperator, Entity, EntityKind, Symbol},
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Resolves a binary operation.
    ///
    /// Arithmetic operators resolve their operands left to right, except `^`
    /// which resolves the exponent first. The order is observable through `_`
    /// and through assignments inside the operands. Assignment is handled by
    /// [`Context::resolve_assignment`].
    ///
    /// # Errors
    /// - `IncompleteEntity` if either child is missing.
    /// - Any error raised while resolving the operands.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::{evaluator::core::Context, parser::core::parse_expression};
    ///
    /// let mut ctx = Context::new();
    /// ctx.push_to_stack(2.0);
    /// ctx.push_to_stack(3.0);
    ///
    /// // The exponent takes the top value, then the base takes the next one.
    /// ctx.resolve(&parse_expression("_ ^ _").unwrap()).unwrap();
    /// assert_eq!(ctx.pop_from_stack(), Some(8.0));
    /// ```
    pub(crate) fn resolve_binary(&mut self, node: &BinaryOp) -> EvalResult<()> {
        let (Some(left), Some(right)) = (node.left.as_deref(), node.right.as_deref()) else {
            return Err(RuntimeError::IncompleteEntity { entity: EntityKind::BinaryOp.label() });
        };

        if node.op == BinaryOperator::Assign {
            return self.resolve_assignment(left, right);
        }

        let (lhs, rhs) = if node.op == BinaryOperator::Pow {
            let rhs = self.resolve_value(right)?;
            (self.resolve_value(left)?, rhs)
        } else {
            let lhs = self.resolve_value(left)?;
            (lhs, self.resolve_value(right)?)
        };

        self.push_to_stack(Self::eval_arithmetic(node.op, lhs, rhs));
        Ok(())
    }

    /// Resolves `target = value`.
    ///
    /// The value is resolved, written to the symbol and pushed back, so an
    /// assignment is itself an expression: `a = b = 3` sets both.
    ///
    /// # Errors
    /// - `InvalidAssignment` if the target is not a bare, non-negated symbol.
    /// - `ReservedSymbol` if the target is `_` or `__`.
    pub(crate) fn resolve_assignment(&mut self, target: &Entity, value: &Entity) -> EvalResult<()> {
        let Entity::Symbol(Symbol { name, negative: false }) = target else {
            return Err(RuntimeError::InvalidAssignment { target: target.to_string() });
        };

        let value = self.resolve_value(value)?;
        self.set_symbol(name, value)?;
        self.push_to_stack(value);
        Ok(())
    }

    /// Applies an arithmetic operator to two values.
    ///
    /// Division by zero and overflow follow IEEE-754; `%` is the
    /// floating-point remainder with the sign of the dividend. For
    /// [`BinaryOperator::Assign`] the result is the right operand, which is the
    /// value an assignment produces.
    ///
    /// # Example
    /// ```
    /// use stackcalc::{ast::BinaryOperator, interpreter::evaluator::core::Context};
    ///
    /// assert_eq!(Context::eval_arithmetic(BinaryOperator::Mod, -7.0, 3.0), -1.0);
    /// assert_eq!(Context::eval_arithmetic(BinaryOperator::Pow, 2.0, 10.0), 1024.0);
    /// assert!(Context::eval_arithmetic(BinaryOperator::Div, 1.0, 0.0).is_infinite());
    /// ```
    #[must_use]
    pub fn eval_arithmetic(op: BinaryOperator, lhs: f64, rhs: f64) -> f64 {
        match op {
            BinaryOperator::Add => lhs + rhs,
            BinaryOperator::Sub => lhs - rhs,
            BinaryOperator::Mul => lhs * rhs,
            BinaryOperator::Div => lhs / rhs,
            BinaryOperator::Mod => lhs % rhs,
            BinaryOperator::Pow => lhs.powf(rhs),
            BinaryOperator::Assign => rhs,
        }
    }
}
