use crate::ast::{Associativity, BinaryOp, Entity};

/// Splices a completed binary node into the tree built so far.
///
/// The parser finishes one binary node at a time: once an operator's right
/// operand is known, the node is handed to this function together with the
/// current head of the tree. The node is placed according to its operator's
/// associativity.
///
/// # Parameters
/// - `head`: Root of the tree built so far, if any.
/// - `node`: A binary node whose right operand is set. Its left operand is
///   set only when `head` is `None`.
///
/// # Returns
/// The new root of the tree.
///
/// # Example
/// ```
/// use stackcalc::{
///     ast::{BinaryOp, BinaryOperator, Entity},
///     interpreter::parser::{binary::insert, core::parse_expression},
/// };
///
/// let one = parse_expression("1").unwrap();
/// let two = parse_expression("2").unwrap();
/// let three = parse_expression("3").unwrap();
///
/// let head = BinaryOp::with_children(BinaryOperator::Add, one, two);
/// let mut times = BinaryOp::new(BinaryOperator::Mul);
/// times.right = Some(Box::new(three));
///
/// let root = insert(Some(head), times);
/// assert_eq!(Entity::BinaryOp(root).postfix(), "123*+");
/// ```
#[must_use]
pub fn insert(head: Option<BinaryOp>, node: BinaryOp) -> BinaryOp {
    let Some(head) = head else {
        return node;
    };

    match node.op.associativity() {
        Associativity::Left => left_associate(head, node),
        Associativity::Right => right_associate(head, node),
    }
}

/// Inserts a left-associative node.
///
/// The node becomes the new root when the root binds at least as tightly;
/// otherwise it descends the right spine past every node that binds strictly
/// looser. Equal precedence therefore groups to the left.
#[must_use]
pub fn left_associate(head: BinaryOp, node: BinaryOp) -> BinaryOp {
    associate(head, node, |root, new| root <= new, |child, new| child > new)
}

/// Inserts a right-associative node.
///
/// The node becomes the new root only when the root binds strictly tighter;
/// otherwise it descends the right spine past every node that binds at least
/// as loosely. Equal precedence therefore groups to the right.
#[must_use]
pub fn right_associate(head: BinaryOp, node: BinaryOp) -> BinaryOp {
    associate(head, node, |root, new| root < new, |child, new| child >= new)
}

fn associate(mut head: BinaryOp,
             mut node: BinaryOp,
             replaces_root: fn(u8, u8) -> bool,
             descends: fn(u8, u8) -> bool)
             -> BinaryOp {
    if replaces_root(head.op.precedence(), node.op.precedence()) {
        node.left = Some(Box::new(Entity::BinaryOp(head)));
        return node;
    }

    splice(&mut head, node, descends);
    head
}

/// Walks down the right spine from `parent` and hangs `node` where the walk
/// stops. The right child found there becomes the node's left operand.
fn splice(parent: &mut BinaryOp, mut node: BinaryOp, descends: fn(u8, u8) -> bool) {
    let precedence = node.op.precedence();
    let go_down = matches!(parent.right.as_deref(),
                           Some(Entity::BinaryOp(child)) if descends(child.op.precedence(), precedence));

    if go_down && let Some(Entity::BinaryOp(child)) = parent.right.as_deref_mut() {
        splice(child, node, descends);
        return;
    }

    node.left = parent.right.take();
    parent.right = Some(Box::new(Entity::BinaryOp(node)));
}
