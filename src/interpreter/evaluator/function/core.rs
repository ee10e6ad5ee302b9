use tracing::trace;

use crate::{
    ast::Call,
    error::RuntimeError,
    interpreter::evaluator::{
        core::{Context, EvalResult, MAX_DIRECTIVE_DEPTH},
        function::builtin::{self, CompareFn},
    },
};

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides a string name and the comparison it applies. The
/// macro produces `BuiltinDef` and the static `BUILTIN_TABLE` searched by
/// dispatch.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $compare:expr
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:    &'static str,
            compare: CompareFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, compare: $compare },
            )*
        ];
    };
}

builtin_functions! {
    "__cmp_eq__" => builtin::equal,
    "__cmp_ne__" => builtin::not_equal,
    "__cmp_lt__" => builtin::less,
    "__cmp_le__" => builtin::less_equal,
    "__cmp_gt__" => builtin::greater,
    "__cmp_ge__" => builtin::greater_equal,
}

impl Context {
    /// Resolves a call.
    ///
    /// Arguments are resolved left to right and each value is popped as soon
    /// as it is known, so the arguments can use `_` freely. The values are
    /// then pushed back in reverse order, leaving the first argument on top,
    /// and the target is dispatched with the argument count. A negated call
    /// negates whatever its target left on top.
    ///
    /// # Errors
    /// Any error raised by an argument or by the target.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// ctx.run("@[$diff$ _-_]").unwrap();
    /// ctx.run("-diff(10; 4)").unwrap();
    ///
    /// assert_eq!(ctx.pop_from_stack(), Some(-6.0));
    /// ```
    pub(crate) fn resolve_call(&mut self, call: &Call) -> EvalResult<()> {
        let mut values = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            values.push(self.resolve_value(argument)?);
        }
        for value in values.into_iter().rev() {
            self.push_to_stack(value);
        }

        self.dispatch(&call.name, call.arguments.len(), false)?;

        if call.negative {
            self.negate_top()?;
        }
        Ok(())
    }

    /// Invokes a builtin or directive without arguments.
    ///
    /// # Parameters
    /// - `name`: Builtin or directive name.
    /// - `ignore_missing`: Do nothing instead of failing when no directive of
    ///   that name exists.
    ///
    /// # Errors
    /// - `UnknownDirective` if the directive does not exist and
    ///   `ignore_missing` is false.
    /// - `EmptyDirective` if it was declared without a body.
    /// - `NestingTooDeep` if invocations nest too deeply.
    /// - Any error raised by the directive body.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// ctx.run("@[$one$ 1]").unwrap();
    ///
    /// ctx.call_directive("one", false).unwrap();
    /// assert_eq!(ctx.pop_from_stack(), Some(1.0));
    ///
    /// assert!(ctx.call_directive("two", true).is_ok());
    /// assert!(ctx.call_directive("two", false).is_err());
    /// ```
    pub fn call_directive(&mut self, name: &str, ignore_missing: bool) -> EvalResult<()> {
        self.dispatch(name, 0, ignore_missing)
    }

    /// Dispatches a name to a builtin first and to the directive table
    /// second.
    fn dispatch(&mut self, name: &str, arg_count: usize, ignore_missing: bool) -> EvalResult<()> {
        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            return self.call_comparison(builtin.name, builtin.compare, arg_count);
        }

        let body = match self.directives.get(name) {
            Some(Some(body)) => body.clone(),
            Some(None) => return Err(RuntimeError::EmptyDirective { name: name.to_string() }),
            None if ignore_missing => return Ok(()),
            None => return Err(RuntimeError::UnknownDirective { name: name.to_string() }),
        };

        trace!(directive = name, arg_count, depth = self.depth, "enter directive");
        self.nested(name, |ctx| ctx.resolve(&body))
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// Directive invocations and includes share the same depth budget. The
    /// level is released whether `f` succeeds or fails.
    ///
    /// # Errors
    /// `NestingTooDeep` if the limit is already reached; otherwise whatever
    /// `f` returns.
    pub(crate) fn nested<T, E, F>(&mut self, name: &str, f: F) -> Result<T, E>
        where F: FnOnce(&mut Self) -> Result<T, E>,
              E: From<RuntimeError>
    {
        if self.depth >= MAX_DIRECTIVE_DEPTH {
            return Err(RuntimeError::NestingTooDeep { name:  name.to_string(),
                                                      limit: MAX_DIRECTIVE_DEPTH, }.into());
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
