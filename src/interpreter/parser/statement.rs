use crate::{
    error::ParseError,
    interpreter::{lexer::is_identifier, parser::core::ParseResult},
};

/// A classified source line.
///
/// Classification is purely structural; expressions and directive bodies are
/// kept as text and parsed later, so a line can be classified even when its
/// expression is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A whitespace-only line.
    Blank,
    /// A line starting with `#`.
    Comment,
    /// `@[$name$ body]`. An empty body declares an empty directive.
    DefineDirective {
        /// Directive name.
        name: &'a str,
        /// Expression text of the body, if any.
        body: Option<&'a str>,
    },
    /// `@[name]`
    InvokeDirective {
        /// Directive name.
        name: &'a str,
    },
    /// `@name = expression`
    SetSymbol {
        /// Symbol name.
        name:       &'a str,
        /// Expression text of the value.
        expression: &'a str,
    },
    /// `@[!path]`
    Include {
        /// Path of the file to run.
        path: &'a str,
    },
    /// Any other line; an expression to parse and resolve.
    Expression(&'a str),
}

/// Classifies one logical line.
///
/// Leading whitespace is ignored when looking for `#` and `@`. The forms of a
/// directive line are tried in a fixed order: define, invoke, set symbol,
/// include.
///
/// # Parameters
/// - `line`: A logical line with continuations already joined.
///
/// # Returns
/// The classified line, borrowing from `line`.
///
/// # Errors
/// `InvalidDirective` when a `@` line matches none of the directive forms.
///
/// # Example
/// ```
/// use stackcalc::interpreter::parser::statement::{Line, classify_line};
///
/// assert_eq!(classify_line("@[$sq$ _*_]").unwrap(),
///            Line::DefineDirective { name: "sq",
///                                    body: Some("_*_") });
/// assert_eq!(classify_line("@x = 1 + 2").unwrap(),
///            Line::SetSymbol { name:       "x",
///                              expression: "1 + 2", });
/// assert_eq!(classify_line("  # note").unwrap(), Line::Comment);
/// assert!(classify_line("@ what").is_err());
/// ```
pub fn classify_line(line: &str) -> ParseResult<Line<'_>> {
    let trimmed = line.trim_start();

    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with('#') {
        return Ok(Line::Comment);
    }

    match trimmed.strip_prefix('@') {
        Some(directive) => classify_directive(directive),
        None => Ok(Line::Expression(line)),
    }
}

fn classify_directive(text: &str) -> ParseResult<Line<'_>> {
    parse_define(text).or_else(|| parse_invoke(text))
                      .or_else(|| parse_set_symbol(text))
                      .or_else(|| parse_include(text))
                      .ok_or_else(|| ParseError::InvalidDirective { line: text.trim().to_string() })
}

/// Returns the text between `[` and the final `]`, ignoring trailing
/// whitespace after the bracket.
fn bracketed(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.trim_end().strip_suffix(']')
}

/// `[ $name$ body ]`
fn parse_define(text: &str) -> Option<Line<'_>> {
    let inner = bracketed(text)?.trim_start().strip_prefix('$')?;
    let (name, body) = inner.split_once('$')?;

    if !is_identifier(name) {
        return None;
    }

    let body = body.trim();
    Some(Line::DefineDirective { name,
                                 body: (!body.is_empty()).then_some(body) })
}

/// `[ name ]`
fn parse_invoke(text: &str) -> Option<Line<'_>> {
    let name = bracketed(text)?.trim();
    is_identifier(name).then_some(Line::InvokeDirective { name })
}

/// `name = expression`
fn parse_set_symbol(text: &str) -> Option<Line<'_>> {
    let (name, expression) = text.split_once('=')?;
    let name = name.trim_end();

    is_identifier(name).then_some(Line::SetSymbol { name,
                                                    expression: expression.trim() })
}

/// `[!path]`
fn parse_include(text: &str) -> Option<Line<'_>> {
    let path = bracketed(text)?.strip_prefix('!')?.trim();
    (!path.is_empty()).then_some(Line::Include { path })
}
