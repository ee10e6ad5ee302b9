use std::fmt;

/// An abstract syntax tree (AST) node produced by the parser.
///
/// `Entity` is a closed set of node kinds. Every node owns its children
/// exclusively, so dropping a root drops the whole tree and a tree that was
/// never published (for example because parsing failed half way) simply goes
/// away with the stack frame that built it.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A numeric literal such as `3`, `2.5` or `inf`.
    Literal(Literal),
    /// A reference to a symbol, resolved at evaluation time.
    Symbol(Symbol),
    /// A parenthesized group, optionally negated as a whole.
    Parenthesis(Parenthesis),
    /// A binary operation, including assignment.
    BinaryOp(BinaryOp),
    /// A named directive invocation with positional arguments.
    Call(Call),
}

/// A numeric literal.
///
/// The magnitude never carries a sign; negation is tracked by `negative` so
/// that `-3` as an operand is distinguishable from a subtraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Digits with an optional fractional part, or `inf` / `nan`.
    pub magnitude: String,
    /// Whether the literal was written with a leading `-`.
    pub negative:  bool,
}

/// A symbol reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Case-sensitive symbol name.
    pub name:     String,
    /// Whether the reference was written with a leading `-`.
    pub negative: bool,
}

/// A parenthesized group `(expr)` or `-(expr)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parenthesis {
    /// The enclosed expression.
    pub inner:    Box<Entity>,
    /// Negation of the group as a whole, independent of any sign inside.
    pub negative: bool,
}

/// A binary operation.
///
/// Both children are optional while the parser is still splicing the node
/// into the tree; a fully parsed tree always has both.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    /// The operator.
    pub op:    BinaryOperator,
    /// Left operand.
    pub left:  Option<Box<Entity>>,
    /// Right operand.
    pub right: Option<Box<Entity>>,
}

/// A directive invocation such as `sq(3)` or `__cmp_lt__(a; b; 1; 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Name of the directive or builtin.
    pub name:      String,
    /// Whether the call result is negated.
    pub negative:  bool,
    /// Independently rooted argument trees, in source order.
    pub arguments: Vec<Entity>,
}

/// The kind of an [`Entity`], with a stable label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// [`Entity::Literal`]
    Literal,
    /// [`Entity::Symbol`]
    Symbol,
    /// [`Entity::Parenthesis`]
    Parenthesis,
    /// [`Entity::BinaryOp`]
    BinaryOp,
    /// [`Entity::Call`]
    Call,
}

impl EntityKind {
    /// Returns the stable label of this kind.
    ///
    /// ```
    /// use stackcalc::ast::EntityKind;
    ///
    /// assert_eq!(EntityKind::BinaryOp.label(), "binary");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Symbol => "symbol",
            Self::Parenthesis => "parenthesis",
            Self::BinaryOp => "binary",
            Self::Call => "call",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floating-point remainder (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Assignment (`=`)
    Assign,
}

/// Which way a chain of equal-precedence operators nests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
}

impl BinaryOperator {
    /// Maps an operator character to its operator.
    ///
    /// ```
    /// use stackcalc::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_char('^'), Some(BinaryOperator::Pow));
    /// assert_eq!(BinaryOperator::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Mod),
            '^' => Some(Self::Pow),
            '=' => Some(Self::Assign),
            _ => None,
        }
    }

    /// Returns the precedence of the operator. Lower binds tighter, except
    /// that assignment has the largest value and therefore binds loosest.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Pow => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Add | Self::Sub => 3,
            Self::Assign => 4,
        }
    }

    /// Returns the associativity of the operator.
    #[must_use]
    pub const fn associativity(self) -> Associativity {
        match self {
            Self::Pow | Self::Assign => Associativity::Right,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod => Associativity::Left,
        }
    }

    /// Returns the source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Assign => "=",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl BinaryOp {
    /// Creates a node with no children yet.
    #[must_use]
    pub const fn new(op: BinaryOperator) -> Self {
        Self { op,
               left: None,
               right: None }
    }

    /// Creates a complete node.
    #[must_use]
    pub fn with_children(op: BinaryOperator, left: Entity, right: Entity) -> Self {
        Self { op,
               left: Some(Box::new(left)),
               right: Some(Box::new(right)) }
    }
}

impl Entity {
    /// Returns the kind of this entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Literal(_) => EntityKind::Literal,
            Self::Symbol(_) => EntityKind::Symbol,
            Self::Parenthesis(_) => EntityKind::Parenthesis,
            Self::BinaryOp(_) => EntityKind::BinaryOp,
            Self::Call(_) => EntityKind::Call,
        }
    }

    /// Renders the tree in postfix order, operands before their operator.
    ///
    /// Missing children of an incomplete binary node render as `[NULL]`.
    /// Leaves, groups and calls render with their canonical string form.
    ///
    /// ```
    /// use stackcalc::interpreter::parser::core::parse_expression;
    ///
    /// let tree = parse_expression("1+2*3").unwrap();
    /// assert_eq!(tree.postfix(), "123*+");
    /// ```
    #[must_use]
    pub fn postfix(&self) -> String {
        match self {
            Self::BinaryOp(node) => {
                let render = |child: &Option<Box<Self>>| {
                    child.as_deref().map_or_else(|| "[NULL]".to_string(), Self::postfix)
                };
                format!("{}{}{}", render(&node.left), render(&node.right), node.op)
            },
            other => other.to_string(),
        }
    }
}

/// Writes a signed single value: `(-x)` when negated, `x` otherwise.
fn write_signed(f: &mut fmt::Formatter<'_>, negative: bool, text: &str) -> fmt::Result {
    if negative {
        write!(f, "(-{text})")
    } else {
        f.write_str(text)
    }
}

impl fmt::Display for Entity {
    /// Renders the canonical infix string form of the tree.
    ///
    /// ```
    /// use stackcalc::interpreter::parser::core::parse_expression;
    ///
    /// let tree = parse_expression("-(a + 1) * -2").unwrap();
    /// assert_eq!(tree.to_string(), "-(a+1)*(-2)");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write_signed(f, literal.negative, &literal.magnitude),
            Self::Symbol(symbol) => write_signed(f, symbol.negative, &symbol.name),
            Self::Parenthesis(group) => {
                let sign = if group.negative { "-" } else { "" };
                write!(f, "{sign}({})", group.inner)
            },
            Self::BinaryOp(node) => {
                match &node.left {
                    Some(left) => write!(f, "{left}")?,
                    None => f.write_str("NULL")?,
                }
                write!(f, "{}", node.op)?;
                match &node.right {
                    Some(right) => write!(f, "{right}"),
                    None => f.write_str("NULL"),
                }
            },
            Self::Call(call) => {
                let arguments = call.arguments
                                    .iter()
                                    .map(ToString::to_string)
                                    .collect::<Vec<_>>()
                                    .join(";");
                write_signed(f, call.negative, &format!("{}({arguments})", call.name))
            },
        }
    }
}
