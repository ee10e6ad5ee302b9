use logos::Logos;

use crate::{
    ast::{Entity, Literal, Symbol},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// Classification of a single buffered word.
///
/// The parser collects the characters between operators and parentheses into
/// a word buffer. A word is only meaningful if exactly one of these patterns
/// covers it from its first to its last byte; anything else, like `3x` or
/// `1.2.3`, is an invalid word.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Word {
    /// Unsigned decimal digits with an optional fractional part, such as `42`
    /// or `2.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// The non-finite magnitudes `inf` and `nan`.
    #[token("inf")]
    #[token("nan")]
    NonFinite,
    /// Identifier words; symbol or directive names such as `x` or `_a`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,
}

/// Classifies a complete word.
///
/// # Parameters
/// - `word`: The unsigned word to classify.
///
/// # Returns
/// `Some(Word)` if exactly one token spans the whole word, `None` otherwise.
///
/// # Example
/// ```
/// use stackcalc::interpreter::lexer::{Word, classify};
///
/// assert_eq!(classify("2.5"), Some(Word::Number));
/// assert_eq!(classify("inf"), Some(Word::NonFinite));
/// assert_eq!(classify("info"), Some(Word::Name));
/// assert_eq!(classify("3x"), None);
/// assert_eq!(classify(""), None);
/// ```
#[must_use]
pub fn classify(word: &str) -> Option<Word> {
    let mut lexer = Word::lexer(word);
    let token = lexer.next()?.ok()?;

    (lexer.span() == (0..word.len()) && lexer.next().is_none()).then_some(token)
}

/// Returns whether `word` is a valid symbol or directive name.
///
/// `inf` and `nan` are magnitudes, not names.
#[must_use]
pub fn is_identifier(word: &str) -> bool {
    classify(word) == Some(Word::Name)
}

/// Splits a leading minus sign from a word.
///
/// ```
/// use stackcalc::interpreter::lexer::split_sign;
///
/// assert_eq!(split_sign("-x"), (true, "x"));
/// assert_eq!(split_sign("12"), (false, "12"));
/// ```
#[must_use]
pub fn split_sign(word: &str) -> (bool, &str) {
    word.strip_prefix('-').map_or((false, word), |rest| (true, rest))
}

/// Turns a buffered word into a leaf entity.
///
/// A leading `-` marks the leaf as negative. Numbers and non-finite
/// magnitudes become literals and names become symbol references.
///
/// # Parameters
/// - `word`: The buffered word, possibly starting with `-`.
/// - `context`: Produces a description of where an operand was expected; only
///   called when the word is empty.
///
/// # Returns
/// The leaf entity.
///
/// # Errors
/// - `MissingOperand` if the word is empty or a lone `-`.
/// - `InvalidWord` if the word is not a number, `inf`, `nan` or a name.
///
/// # Example
/// ```
/// use stackcalc::{ast::Entity, interpreter::lexer::word_to_entity};
///
/// let leaf = word_to_entity("-x", String::new).unwrap();
/// assert!(matches!(leaf, Entity::Symbol(ref s) if s.name == "x" && s.negative));
///
/// assert!(word_to_entity("-", String::new).is_err());
/// assert!(word_to_entity("2a", String::new).is_err());
/// ```
pub fn word_to_entity<F>(word: &str, context: F) -> ParseResult<Entity>
    where F: FnOnce() -> String
{
    let (negative, magnitude) = split_sign(word);

    match classify(magnitude) {
        Some(Word::Number | Word::NonFinite) => {
            Ok(Entity::Literal(Literal { magnitude: magnitude.to_string(),
                                         negative }))
        },
        Some(Word::Name) => Ok(Entity::Symbol(Symbol { name: magnitude.to_string(),
                                                       negative })),
        None if magnitude.is_empty() => Err(ParseError::MissingOperand { context: context() }),
        None => Err(ParseError::InvalidWord { word: word.to_string() }),
    }
}
