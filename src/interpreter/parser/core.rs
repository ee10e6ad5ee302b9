use crate::{
    ast::{BinaryOp, BinaryOperator, Call, Entity, Parenthesis},
    error::ParseError,
    interpreter::{
        lexer::{is_identifier, split_sign, word_to_entity},
        parser::{
            binary::insert,
            utils::{find_closing_paren, parse_arguments},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum nesting of groups and call parentheses in one expression.
pub const MAX_GROUP_DEPTH: usize = 256;

/// Maximum number of binary operators in one expression, counting every
/// nested group and argument.
pub const MAX_OPERATORS: usize = 512;

/// Parses one expression into a tree.
///
/// This is the entry point for expression parsing. The text is scanned once,
/// left to right. Characters accumulate in a word buffer until an operator or
/// a parenthesis arrives; each completed binary node is spliced into the tree
/// by precedence and associativity. Parenthesized groups and call arguments
/// are parsed recursively. Whitespace is skipped everywhere.
///
/// # Parameters
/// - `text`: The expression source.
///
/// # Returns
/// The root of the parsed tree.
///
/// # Errors
/// - `UnexpectedClosingParen` for a `)` with no matching `(`.
/// - `UnbalancedParen` for a `(` that is never closed.
/// - `MissingOperand` for empty input, a trailing operator, two operators in a
///   row or empty group parentheses.
/// - `MissingOperator` when anything follows a group or call directly.
/// - `InvalidCall` when the text before `(` is not a sign or a name.
/// - `InvalidWord` for a word that is neither a literal nor a name.
/// - `GroupsTooDeep` past [`MAX_GROUP_DEPTH`] nested parentheses.
/// - `TooManyOperators` past [`MAX_OPERATORS`] binary operators.
///
/// # Example
/// ```
/// use stackcalc::interpreter::parser::core::parse_expression;
///
/// let tree = parse_expression("2 ^ 3 ^ 2").unwrap();
/// assert_eq!(tree.postfix(), "232^^");
///
/// let tree = parse_expression("-sq(1; x - 1)").unwrap();
/// assert_eq!(tree.to_string(), "(-sq(1;x-1))");
///
/// assert!(parse_expression("1 +").is_err());
/// ```
pub fn parse_expression(text: &str) -> ParseResult<Entity> {
    parse_nested(text, &mut Budget::default())
}

/// How much of the expression limits the enclosing parse has used. The tree
/// is resolved and dropped recursively, so its height has to stay bounded.
#[derive(Debug, Default)]
pub(in crate::interpreter::parser) struct Budget {
    depth:     usize,
    operators: usize,
}

pub(in crate::interpreter::parser) fn parse_nested(text: &str,
                                                   budget: &mut Budget)
                                                   -> ParseResult<Entity> {
    let mut builder = TreeBuilder::default();
    let mut index = 0;

    while let Some(c) = text[index..].chars().next() {
        let next = index + c.len_utf8();

        match c {
            c if c.is_whitespace() => {},
            ')' => return Err(ParseError::UnexpectedClosingParen { position: index }),
            '(' => {
                let close = find_closing_paren(text, index)
                                .ok_or(ParseError::UnbalancedParen { position: index })?;
                builder.push_group(&text[next..close], budget)?;
                index = close + 1;
                continue;
            },
            c => match BinaryOperator::from_char(c) {
                Some(op) => builder.push_operator(op, budget)?,
                None => builder.push_char(c)?,
            },
        }

        index = next;
    }

    builder.finish()
}

/// Parser state for one nesting level.
///
/// `operand` holds a finished group or call waiting for an operator; `word`
/// holds the characters of a leaf that has not been classified yet. At most
/// one of them is non-empty at any time. `current` is the binary node whose
/// right operand is still being read, and `head` is the root of everything
/// completed before it.
#[derive(Default)]
struct TreeBuilder {
    word:    String,
    operand: Option<Entity>,
    current: Option<BinaryOp>,
    head:    Option<BinaryOp>,
}

impl TreeBuilder {
    fn push_char(&mut self, c: char) -> ParseResult<()> {
        if let Some(operand) = &self.operand {
            return Err(ParseError::MissingOperator { after: operand.to_string(),
                                                     found: c, });
        }

        self.word.push(c);
        Ok(())
    }

    fn push_group(&mut self, inner: &str, budget: &mut Budget) -> ParseResult<()> {
        if let Some(operand) = &self.operand {
            return Err(ParseError::MissingOperator { after: operand.to_string(),
                                                     found: '(', });
        }
        if budget.depth >= MAX_GROUP_DEPTH {
            return Err(ParseError::GroupsTooDeep { limit: MAX_GROUP_DEPTH });
        }

        let (negative, prefix) = split_sign(&self.word);
        if !prefix.is_empty() && !is_identifier(prefix) {
            return Err(ParseError::InvalidCall { prefix: self.word.clone() });
        }

        budget.depth += 1;
        let entity = if prefix.is_empty() {
            parse_nested(inner, budget).map(|inner| {
                                           Entity::Parenthesis(Parenthesis { inner: Box::new(inner),
                                                                             negative })
                                       })
        } else {
            parse_arguments(inner, budget).map(|arguments| {
                                              Entity::Call(Call { name: prefix.to_string(),
                                                                  negative,
                                                                  arguments })
                                          })
        };
        budget.depth -= 1;

        let entity = entity?;
        self.word.clear();
        self.operand = Some(entity);
        Ok(())
    }

    fn push_operator(&mut self, op: BinaryOperator, budget: &mut Budget) -> ParseResult<()> {
        if op == BinaryOperator::Sub && self.word.is_empty() && self.operand.is_none() {
            self.word.push('-');
            return Ok(());
        }

        if budget.operators >= MAX_OPERATORS {
            return Err(ParseError::TooManyOperators { limit: MAX_OPERATORS });
        }
        budget.operators += 1;

        let operand = self.take_operand(|| format!("before '{op}'"))?;

        match self.current.take() {
            None => {
                let mut node = BinaryOp::new(op);
                node.left = Some(Box::new(operand));
                self.current = Some(node);
            },
            Some(mut node) => {
                node.right = Some(Box::new(operand));
                self.head = Some(insert(self.head.take(), node));
                self.current = Some(BinaryOp::new(op));
            },
        }

        Ok(())
    }

    fn take_operand<F>(&mut self, context: F) -> ParseResult<Entity>
        where F: FnOnce() -> String
    {
        if let Some(operand) = self.operand.take() {
            return Ok(operand);
        }

        let word = std::mem::take(&mut self.word);
        word_to_entity(&word, context)
    }

    fn finish(mut self) -> ParseResult<Entity> {
        let operand = self.take_operand(|| "at end of expression".to_string())?;

        match self.current.take() {
            None => Ok(operand),
            Some(mut node) => {
                node.right = Some(Box::new(operand));
                Ok(Entity::BinaryOp(insert(self.head, node)))
            },
        }
    }
}
