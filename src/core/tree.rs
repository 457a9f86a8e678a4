use super::FormulaError;
use crate::Valuation;
use anyhow::Result;
use std::fmt::Display;

pub(crate) const NOT_SYMBOL: char = '¬';
pub(crate) const AND_SYMBOL: char = '∧';
pub(crate) const OR_SYMBOL: char = '∨';
pub(crate) const IMPLIES_SYMBOL: char = '→';

/// Returns `true` iff the character may begin a variable identifier.
pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns `true` iff the character may appear in a variable identifier after its first character.
pub(crate) fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A node of a formula tree written in canonical form, i.e. with negations and conjunctions only.
///
/// Trees are produced by the [`Parser`](crate::Parser) and the [`Translator`](crate::Translator).
/// They own their children and carry no identifier; identifiers are given by the [`GraphBuilder`](crate::GraphBuilder)
/// when the tree is turned into a [`FormulaGraph`](crate::FormulaGraph).
///
/// When a tree is displayed, the canonical textual form is used.
///
/// # Example
///
/// ```
/// use propsat_rs::Node;
///
/// let tree = Node::not(Node::and(Node::variable("p"), Node::not(Node::variable("q"))));
/// assert_eq!("¬(p∧¬q)", format!("{tree}"));
/// assert_eq!("¬", tree.value());
/// assert_eq!(1, tree.children().len());
/// ```
#[derive(Debug)]
pub enum Node {
    /// A propositional variable.
    Variable(String),
    /// A negation.
    Not(Box<Node>),
    /// A conjunction.
    And(Box<Node>, Box<Node>),
}

/// **(internal)** A node whose children have already been folded, as given to the closure of [`Node::fold`].
pub(crate) enum FoldStep<'a, T> {
    Variable(&'a str),
    Not(T),
    And(T, T),
}

impl Node {
    /// Builds a variable leaf.
    #[must_use]
    pub fn variable<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Node::Variable(name.into())
    }

    /// Builds a negation node.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Node) -> Self {
        Node::Not(Box::new(child))
    }

    /// Builds a conjunction node.
    #[must_use]
    pub fn and(left: Node, right: Node) -> Self {
        Node::And(Box::new(left), Box::new(right))
    }

    /// Builds the negation of a node, removing a double negation if the node is itself a negation.
    #[must_use]
    pub fn negate(mut child: Node) -> Self {
        if let Node::Not(inner) = &mut child {
            return detach(inner);
        }
        Node::not(child)
    }

    /// Returns the value held by this node: the variable name for a leaf, or the operator symbol otherwise.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Node::Variable(name) => name.as_str(),
            Node::Not(_) => "¬",
            Node::And(_, _) => "∧",
        }
    }

    /// Returns the children of this node, in order.
    ///
    /// The number of children is 0 for variables, 1 for negations and 2 for conjunctions.
    #[must_use]
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Variable(_) => vec![],
            Node::Not(child) => vec![child.as_ref()],
            Node::And(left, right) => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Returns the number of nodes in this tree, counting repeated subtrees as many times as they occur.
    #[must_use]
    pub fn size(&self) -> usize {
        self.fold(|step| match step {
            FoldStep::Variable(_) => 1,
            FoldStep::Not(child) => child + 1,
            FoldStep::And(left, right) => left + right + 1,
        })
    }

    /// Evaluates this tree under a valuation, without any sharing of subformulas.
    ///
    /// # Errors
    ///
    /// An error is returned if a variable of the tree has no value in the valuation.
    pub fn evaluate(&self, valuation: &Valuation) -> Result<bool> {
        self.fold(|step| match step {
            FoldStep::Variable(name) => valuation
                .get(name)
                .ok_or_else(|| FormulaError::unbound_variable(name).into()),
            FoldStep::Not(child) => child.map(|c| !c),
            FoldStep::And(Err(e), _) | FoldStep::And(_, Err(e)) => Err(e),
            FoldStep::And(Ok(left), Ok(right)) => Ok(left && right),
        })
    }

    /// Computes a value bottom-up, the children of a node being folded before the node itself, left child first.
    ///
    /// The tree is walked with an explicit stack, so its depth is not limited by the call stack.
    pub(crate) fn fold<'a, T, F>(&'a self, mut f: F) -> T
    where
        F: FnMut(FoldStep<'a, T>) -> T,
    {
        enum Step<'a> {
            Enter(&'a Node),
            ExitNot,
            ExitAnd,
        }
        let mut steps = vec![Step::Enter(self)];
        let mut values = Vec::new();
        while let Some(step) = steps.pop() {
            let value = match step {
                Step::Enter(Node::Variable(name)) => f(FoldStep::Variable(name.as_str())),
                Step::Enter(Node::Not(child)) => {
                    steps.push(Step::ExitNot);
                    steps.push(Step::Enter(child.as_ref()));
                    continue;
                }
                Step::Enter(Node::And(left, right)) => {
                    steps.push(Step::ExitAnd);
                    steps.push(Step::Enter(right.as_ref()));
                    steps.push(Step::Enter(left.as_ref()));
                    continue;
                }
                Step::ExitNot => {
                    let Some(child) = values.pop() else {
                        unreachable!()
                    };
                    f(FoldStep::Not(child))
                }
                Step::ExitAnd => {
                    let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
                        unreachable!()
                    };
                    f(FoldStep::And(left, right))
                }
            };
            values.push(value);
        }
        let Some(result) = values.pop() else {
            unreachable!()
        };
        result
    }
}

fn detach(child: &mut Node) -> Node {
    std::mem::replace(child, Node::Variable(String::new()))
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.fold(|step| match step {
            FoldStep::Variable(name) => Node::variable(name),
            FoldStep::Not(child) => Node::not(child),
            FoldStep::And(left, right) => Node::and(left, right),
        })
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (Node::Variable(a), Node::Variable(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Node::Not(a), Node::Not(b)) => pairs.push((a.as_ref(), b.as_ref())),
                (Node::And(a_left, a_right), Node::And(b_left, b_right)) => {
                    pairs.push((a_right.as_ref(), b_right.as_ref()));
                    pairs.push((a_left.as_ref(), b_left.as_ref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_inner_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            detach_inner_children(&mut node, &mut stack);
        }
    }
}

/// Moves the children that are not leaves onto the stack, so that dropping a tree never recurses.
fn detach_inner_children(node: &mut Node, stack: &mut Vec<Node>) {
    let children = match node {
        Node::Variable(_) => return,
        Node::Not(child) => [Some(child), None],
        Node::And(left, right) => [Some(left), Some(right)],
    };
    for child in children.into_iter().flatten() {
        if !matches!(**child, Node::Variable(_)) {
            stack.push(detach(child));
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        enum Piece<'a> {
            Node(&'a Node),
            Symbol(char),
        }
        fn push_operand<'a>(pieces: &mut Vec<Piece<'a>>, operand: &'a Node) {
            if let Node::And(_, _) = operand {
                pieces.push(Piece::Symbol(')'));
                pieces.push(Piece::Node(operand));
                pieces.push(Piece::Symbol('('));
            } else {
                pieces.push(Piece::Node(operand));
            }
        }
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Symbol(c) => write!(f, "{c}")?,
                Piece::Node(Node::Variable(name)) => write!(f, "{name}")?,
                Piece::Node(Node::Not(child)) => {
                    write!(f, "{NOT_SYMBOL}")?;
                    push_operand(&mut pieces, child.as_ref());
                }
                Piece::Node(Node::And(left, right)) => {
                    push_operand(&mut pieces, right.as_ref());
                    pieces.push(Piece::Symbol(AND_SYMBOL));
                    pieces.push(Piece::Node(left.as_ref()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Node {
        Node::variable(name)
    }

    #[test]
    fn test_display_left_chain() {
        let tree = Node::and(Node::and(var("a"), var("b")), var("c"));
        assert_eq!("a∧b∧c", format!("{tree}"));
    }

    #[test]
    fn test_display_right_nested() {
        let tree = Node::and(var("a"), Node::and(var("b"), var("c")));
        assert_eq!("a∧(b∧c)", format!("{tree}"));
    }

    #[test]
    fn test_display_negations() {
        let tree = Node::not(Node::not(Node::and(Node::not(var("a")), var("b"))));
        assert_eq!("¬¬(¬a∧b)", format!("{tree}"));
    }

    #[test]
    fn test_negate_collapses() {
        assert_eq!(var("a"), Node::negate(Node::not(var("a"))));
        assert_eq!(Node::not(var("a")), Node::negate(var("a")));
    }

    #[test]
    fn test_arity() {
        assert!(var("a").children().is_empty());
        assert_eq!(1, Node::not(var("a")).children().len());
        assert_eq!(2, Node::and(var("a"), var("a")).children().len());
    }

    #[test]
    fn test_size() {
        let tree = Node::and(Node::not(var("a")), Node::not(var("a")));
        assert_eq!(5, tree.size());
    }

    #[test]
    fn test_evaluate() {
        let tree = Node::not(Node::and(var("p"), Node::not(var("q"))));
        let valuation = Valuation::from_iter([("p", true), ("q", false)]);
        assert!(!tree.evaluate(&valuation).unwrap());
        let valuation = Valuation::from_iter([("p", true), ("q", true)]);
        assert!(tree.evaluate(&valuation).unwrap());
    }

    fn deep_negation(depth: usize) -> Node {
        let mut tree = var("p");
        for _ in 0..depth {
            tree = Node::not(tree);
        }
        tree
    }

    #[test]
    fn test_deep_tree() {
        let depth = 200_000;
        let tree = deep_negation(depth);
        assert_eq!(depth + 1, tree.size());
        assert_eq!(depth + 1, format!("{tree}").chars().count());
        let copy = tree.clone();
        assert_eq!(tree, copy);
        assert_ne!(tree, deep_negation(depth - 1));
        assert!(tree.evaluate(&Valuation::from_iter([("p", true)])).unwrap());
    }

    #[test]
    fn test_deep_conjunction_chain() {
        let mut tree = var("p");
        for _ in 0..100_000 {
            tree = Node::and(var("q"), tree);
        }
        let rendered = format!("{tree}");
        assert!(rendered.starts_with("q∧(q∧(q∧"));
        assert!(rendered.ends_with("q∧p))))"));
        assert_eq!(200_001, tree.size());
    }

    #[test]
    fn test_evaluate_unbound() {
        let tree = Node::and(var("p"), var("q"));
        let valuation = Valuation::from_iter([("p", true)]);
        assert_eq!(
            r#"no value for variable "q""#,
            format!("{}", tree.evaluate(&valuation).unwrap_err().root_cause())
        );
    }
}
