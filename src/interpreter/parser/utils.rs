use crate::{
    ast::Entity,
    interpreter::parser::core::{Budget, ParseResult, parse_nested},
};

/// Finds the `)` that closes the `(` at byte offset `open`.
///
/// Nesting is tracked with a depth counter; the first `)` that brings the
/// depth back to zero is the match.
///
/// # Parameters
/// - `text`: The text being parsed.
/// - `open`: Byte offset of an opening parenthesis in `text`.
///
/// # Returns
/// The byte offset of the matching `)`, or `None` if the text ends first.
///
/// # Example
/// ```
/// use stackcalc::interpreter::parser::utils::find_closing_paren;
///
/// assert_eq!(find_closing_paren("(a*(b+c))+d", 0), Some(8));
/// assert_eq!(find_closing_paren("(a*(b+c)", 0), None);
/// ```
#[must_use]
pub fn find_closing_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (offset, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            },
            _ => {},
        }
    }

    None
}

/// Splits call arguments at top-level `;` separators.
///
/// Separators nested inside parentheses belong to inner calls and are left
/// alone. The pieces are returned untrimmed.
///
/// ```
/// use stackcalc::interpreter::parser::utils::split_arguments;
///
/// assert_eq!(split_arguments("a; f(b;c); 2"), vec!["a", " f(b;c)", " 2"]);
/// ```
#[must_use]
pub fn split_arguments(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (offset, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                pieces.push(&text[start..offset]);
                start = offset + 1;
            },
            _ => {},
        }
    }

    pieces.push(&text[start..]);
    pieces
}

/// Parses the text between a call's parentheses into argument trees.
///
/// Whitespace-only text is a call with no arguments. Otherwise every
/// `;`-separated piece must be a complete expression, so `f(1;)` fails with
/// a missing operand.
pub(in crate::interpreter::parser) fn parse_arguments(text: &str,
                                                      budget: &mut Budget)
                                                      -> ParseResult<Vec<Entity>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_arguments(text).into_iter()
                         .map(|piece| parse_nested(piece, budget))
                         .collect()
}
