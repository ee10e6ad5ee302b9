use std::{collections::HashMap, path::Path};

use tracing::{debug, trace};

use crate::{
    ast::{Entity, Literal, Symbol},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::utils::{STACK_DEPTH, STACK_TOP, signed},
        parser::{
            core::parse_expression,
            statement::{Line, classify_line},
        },
    },
    util::num::{depth_to_f64, parse_magnitude},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum nesting of directive invocations and file includes.
pub const MAX_DIRECTIVE_DEPTH: usize = 256;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the symbol table, the directive
/// table and the operand stack. Every line run against a context sees the
/// effects of the lines before it.
///
/// ## Usage
///
/// `Context` is created once and reused for every line of a session. Each
/// resolved expression leaves exactly one value on the stack; the caller
/// decides when to pop it.
///
/// ```
/// use stackcalc::interpreter::evaluator::core::Context;
///
/// let mut ctx = Context::new();
/// ctx.run("@x = 4").unwrap();
/// ctx.run("x * 2").unwrap();
///
/// assert_eq!(ctx.pop_from_stack(), Some(8.0));
/// assert!(ctx.is_stack_empty());
/// ```
#[derive(Debug, Default)]
pub struct Context {
    /// Symbol values, created on first assignment.
    pub symbols:    HashMap<String, f64>,
    /// Directive bodies. `None` marks a directive declared with an empty body.
    pub directives: HashMap<String, Option<Entity>>,
    /// The operand stack. The last element is the top.
    pub stack:      Vec<f64>,
    pub(crate) depth: usize,
}

impl Context {
    /// Creates a new evaluation context with no symbols, no directives and an
    /// empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one logical line.
    ///
    /// Equivalent to [`Context::run_line`] with the evaluated tree dropped.
    ///
    /// # Errors
    /// Any parse or runtime error raised by the line.
    pub fn run(&mut self, line: &str) -> Result<(), Error> {
        self.run_line(line).map(drop)
    }

    /// Runs one logical line and returns the tree it evaluated.
    ///
    /// The line is classified first:
    /// - blank lines and comments do nothing;
    /// - `@[$name$ body]` parses the body and installs it, replacing any
    ///   previous definition only once the parse succeeded;
    /// - `@[name]` invokes a directive with no arguments;
    /// - `@name = expr` resolves the expression and stores it without leaving
    ///   anything on the stack;
    /// - `@[!path]` runs every logical line of a file;
    /// - anything else is an expression whose value stays on the stack.
    ///
    /// # Parameters
    /// - `line`: The logical line, continuations already joined.
    ///
    /// # Returns
    /// `Some(tree)` for expression lines, `None` for every other kind.
    ///
    /// # Errors
    /// Any parse or runtime error raised by the line. State changes made
    /// before the failure point are kept.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// assert!(ctx.run_line("@[$sq$ _*_]").unwrap().is_none());
    ///
    /// let tree = ctx.run_line("sq(4; 4)").unwrap().unwrap();
    /// assert_eq!(tree.to_string(), "sq(4;4)");
    /// assert_eq!(ctx.pop_from_stack(), Some(16.0));
    /// ```
    pub fn run_line(&mut self, line: &str) -> Result<Option<Entity>, Error> {
        match classify_line(line)? {
            Line::Blank | Line::Comment => Ok(None),
            Line::DefineDirective { name, body } => {
                debug!(directive = name, body = body.unwrap_or_default(), "define directive");
                let tree = body.map(parse_expression).transpose()?;
                self.directives.insert(name.to_string(), tree);
                Ok(None)
            },
            Line::InvokeDirective { name } => {
                debug!(directive = name, "invoke directive");
                self.call_directive(name, false)?;
                Ok(None)
            },
            Line::SetSymbol { name, expression } => {
                debug!(symbol = name, expression, "set symbol");
                let tree = parse_expression(expression)?;
                let value = self.resolve_value(&tree)?;
                self.set_symbol(name, value)?;
                Ok(None)
            },
            Line::Include { path } => {
                self.include_file(Path::new(path))?;
                Ok(None)
            },
            Line::Expression(text) => {
                let tree = parse_expression(text)?;
                trace!(tree = %tree, postfix = %tree.postfix(), "parsed expression");
                self.resolve(&tree)?;
                Ok(Some(tree))
            },
        }
    }

    /// Resolves an entity, pushing its value onto the operand stack.
    ///
    /// This is the main entry point for tree evaluation. Every variant pushes
    /// exactly one value on success.
    ///
    /// # Parameters
    /// - `entity`: Tree to resolve.
    ///
    /// # Errors
    /// Any runtime error raised while resolving the tree. The stack is left
    /// as it was at the failure point.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::{evaluator::core::Context, parser::core::parse_expression};
    ///
    /// let mut ctx = Context::new();
    /// let tree = parse_expression("2 ^ 3 ^ 2").unwrap();
    ///
    /// ctx.resolve(&tree).unwrap();
    /// assert_eq!(ctx.pop_from_stack(), Some(512.0));
    /// ```
    pub fn resolve(&mut self, entity: &Entity) -> EvalResult<()> {
        match entity {
            Entity::Literal(literal) => self.resolve_literal(literal),
            Entity::Symbol(symbol) => self.resolve_symbol(symbol),
            Entity::Parenthesis(group) => self.resolve_parenthesis(group),
            Entity::BinaryOp(node) => self.resolve_binary(node),
            Entity::Call(call) => self.resolve_call(call),
        }
    }

    /// Resolves an entity and pops the value it pushed.
    ///
    /// # Errors
    /// Any runtime error raised while resolving the tree.
    pub fn resolve_value(&mut self, entity: &Entity) -> EvalResult<f64> {
        self.resolve(entity)?;
        self.pop_operand()
    }

    fn resolve_literal(&mut self, literal: &Literal) -> EvalResult<()> {
        let value = parse_magnitude(&literal.magnitude)
            .ok_or_else(|| RuntimeError::InvalidLiteral { magnitude: literal.magnitude.clone() })?;

        self.push_to_stack(signed(literal.negative, value));
        Ok(())
    }

    /// Resolves a symbol reference.
    ///
    /// `_` takes the value on top of the stack and `__` is the current stack
    /// depth. Every other name is looked up in the symbol table.
    fn resolve_symbol(&mut self, symbol: &Symbol) -> EvalResult<()> {
        let value = match symbol.name.as_str() {
            STACK_TOP => self.pop_operand()?,
            STACK_DEPTH => depth_to_f64(self.stack_depth()),
            name => self.symbol(name)?,
        };

        self.push_to_stack(signed(symbol.negative, value));
        Ok(())
    }
}
