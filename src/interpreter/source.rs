use std::{fs, path::Path};

use tracing::{debug, warn};

use crate::{
    ast::Entity,
    error::{Error, RuntimeError},
    interpreter::evaluator::core::Context,
};

/// Joins physical lines ending in `\` into logical lines.
///
/// The trailing backslash is removed and the next physical line is appended
/// directly, without a separator.
///
/// # Example
/// ```
/// use stackcalc::interpreter::source::LineJoiner;
///
/// let mut joiner = LineJoiner::new();
/// assert_eq!(joiner.push("1 + \\"), None);
/// assert!(joiner.is_pending());
/// assert_eq!(joiner.push("2"), Some("1 + 2".to_string()));
/// assert!(!joiner.is_pending());
/// ```
#[derive(Debug, Default)]
pub struct LineJoiner {
    buffer:  String,
    pending: bool,
}

impl LineJoiner {
    /// Creates a joiner with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one physical line.
    ///
    /// # Returns
    /// The completed logical line, or `None` if `line` continues on the next
    /// one.
    pub fn push(&mut self, line: &str) -> Option<String> {
        if let Some(head) = line.strip_suffix('\\') {
            self.buffer.push_str(head);
            self.pending = true;
            return None;
        }

        self.buffer.push_str(line);
        self.pending = false;
        Some(std::mem::take(&mut self.buffer))
    }

    /// Returns whether a continuation is waiting for its next line.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Flushes a continuation left open at the end of the input.
    #[must_use]
    pub fn finish(self) -> Option<String> {
        self.pending.then_some(self.buffer)
    }

    /// Drops any pending continuation.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending = false;
    }
}

/// Splits a source text into logical lines.
///
/// # Returns
/// Each logical line with the 1-based number of the physical line it starts
/// on.
///
/// # Example
/// ```
/// use stackcalc::interpreter::source::logical_lines;
///
/// let lines = logical_lines("a = \\\n1\nb = 2\n");
/// assert_eq!(lines, vec![(1, "a = 1".to_string()), (3, "b = 2".to_string())]);
/// ```
#[must_use]
pub fn logical_lines(source: &str) -> Vec<(usize, String)> {
    let mut joiner = LineJoiner::new();
    let mut lines = Vec::new();
    let mut start = 1;

    for (index, line) in source.lines().enumerate() {
        if !joiner.is_pending() {
            start = index + 1;
        }
        if let Some(logical) = joiner.push(line) {
            lines.push((start, logical));
        }
    }
    if let Some(rest) = joiner.finish() {
        lines.push((start, rest));
    }

    lines
}

/// What an interactive line produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Echo {
    /// The expression tree, for expression lines only.
    pub tree:  Option<Entity>,
    /// The value popped for display.
    pub value: Option<f64>,
}

impl Context {
    /// Runs one logical line the way the prompt does.
    ///
    /// An expression line that leaves the stack deeper than it found it has
    /// its value popped and returned for display. Every other line kind
    /// leaves the stack as it made it, so a value pushed by `@[name]` stays
    /// available to `_` on the next line.
    ///
    /// # Errors
    /// Any parse or runtime error raised by the line.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// ctx.run("@[$one$ 1]").unwrap();
    ///
    /// assert_eq!(ctx.run_interactive("@[one]").unwrap().value, None);
    /// assert_eq!(ctx.run_interactive("_ + 1").unwrap().value, Some(2.0));
    /// assert!(ctx.is_stack_empty());
    /// ```
    pub fn run_interactive(&mut self, line: &str) -> Result<Echo, Error> {
        let depth = self.stack_depth();
        let tree = self.run_line(line)?;

        let value = if tree.is_some() && self.stack_depth() > depth {
            self.pop_from_stack()
        } else {
            None
        };

        Ok(Echo { tree, value })
    }

    /// Runs every logical line of a source text.
    ///
    /// Stops at the first failing line.
    ///
    /// # Errors
    /// The error of the first failing line.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::new();
    /// ctx.run_source("# setup\n@x = 2\nx ^ \\\n 3\n").unwrap();
    ///
    /// assert_eq!(ctx.pop_from_stack(), Some(8.0));
    /// ```
    pub fn run_source(&mut self, source: &str) -> Result<(), Error> {
        for (number, line) in logical_lines(source) {
            if let Err(error) = self.run(&line) {
                warn!(line = number, %error, "source line failed");
                return Err(error);
            }
        }
        Ok(())
    }

    /// Runs every logical line of a file against this context.
    ///
    /// Includes count towards the same nesting limit as directives, so a file
    /// that includes itself fails instead of recursing forever.
    ///
    /// # Errors
    /// - `IncludeFailed` if the file cannot be read.
    /// - `NestingTooDeep` if includes nest too deeply.
    /// - The error of the first failing line.
    pub fn include_file(&mut self, path: &Path) -> Result<(), Error> {
        debug!(path = %path.display(), "include file");

        let source = fs::read_to_string(path).map_err(|source| {
                                                 RuntimeError::IncludeFailed { path: path.to_path_buf(),
                                                                               source }
                                             })?;

        self.nested(&path.display().to_string(), |ctx| ctx.run_source(&source))
    }
}
