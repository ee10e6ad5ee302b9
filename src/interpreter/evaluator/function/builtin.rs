use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult},
};

/// A comparison predicate used by a `__cmp_*__` builtin.
pub type CompareFn = fn(f64, f64) -> bool;

/// The symbols a comparison builtin reads and writes, in argument order.
///
/// `_a` and `_b` are compared; `_c` is the result when the comparison holds
/// and `_d` when it does not. The result is written back to `_a`.
pub const CONVENTION_SYMBOLS: [&str; 4] = ["_a", "_b", "_c", "_d"];

/// `_a == _b`
#[allow(clippy::float_cmp)]
#[must_use]
pub fn equal(a: f64, b: f64) -> bool {
    a == b
}

/// `_a != _b`
#[allow(clippy::float_cmp)]
#[must_use]
pub fn not_equal(a: f64, b: f64) -> bool {
    a != b
}

/// `_a < _b`
#[must_use]
pub fn less(a: f64, b: f64) -> bool {
    a < b
}

/// `_a <= _b`
#[must_use]
pub fn less_equal(a: f64, b: f64) -> bool {
    a <= b
}

/// `_a > _b`
#[must_use]
pub fn greater(a: f64, b: f64) -> bool {
    a > b
}

/// `_a >= _b`
#[must_use]
pub fn greater_equal(a: f64, b: f64) -> bool {
    a >= b
}

impl Context {
    /// Runs a comparison builtin.
    ///
    /// With four arguments the values are moved from the stack into `_a`,
    /// `_b`, `_c` and `_d`, the first argument (on top of the stack) going to
    /// `_a`. With no arguments the four symbols must already hold values. The
    /// builtin then writes `_c` or `_d` to `_a`, depending on the comparison,
    /// and pushes the written value.
    ///
    /// # Parameters
    /// - `name`: Builtin name, for error reporting.
    /// - `compare`: The comparison to apply to `_a` and `_b`.
    /// - `arg_count`: Number of arguments already pushed by the call.
    ///
    /// # Errors
    /// - `BuiltinArity` for any argument count other than 0 or 4.
    /// - `MissingBuiltinSymbol` if one of the four symbols is unset.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// ctx.run("__cmp_lt__(1; 2; 10; 20)").unwrap();
    ///
    /// assert_eq!(ctx.pop_from_stack(), Some(10.0));
    /// assert_eq!(ctx.symbol("_a").unwrap(), 10.0);
    /// ```
    pub(crate) fn call_comparison(&mut self,
                                  name: &'static str,
                                  compare: CompareFn,
                                  arg_count: usize)
                                  -> EvalResult<()> {
        match arg_count {
            0 => {},
            4 => {
                for symbol in CONVENTION_SYMBOLS {
                    let value = self.pop_operand()?;
                    self.symbols.insert(symbol.to_string(), value);
                }
            },
            found => return Err(RuntimeError::BuiltinArity { name, found }),
        }

        let mut values = [0.0; 4];
        for (slot, symbol) in values.iter_mut().zip(CONVENTION_SYMBOLS) {
            *slot = self.symbols
                        .get(symbol)
                        .copied()
                        .ok_or(RuntimeError::MissingBuiltinSymbol { name, symbol })?;
        }

        let [a, b, then, otherwise] = values;
        let result = if compare(a, b) { then } else { otherwise };

        self.symbols.insert(CONVENTION_SYMBOLS[0].to_string(), result);
        self.push_to_stack(result);
        Ok(())
    }
}
