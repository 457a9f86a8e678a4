use crate::{
    core::{BottomUpTraversal, BottomUpVisitor},
    FormulaGraph, VariableIndex,
};

/// A bottom-up visitor computing the number of nodes of the tree a [`FormulaGraph`] stands for.
///
/// Each shared node is counted once per occurrence, so the result is the size the formula would have without hash-consing.
/// Comparing it to [`FormulaGraph::n_nodes`] gives the gain brought by sharing.
/// The computation saturates at [`u128::MAX`].
///
/// # Example
///
/// ```
/// use propsat_rs::{BottomUpTraversal, GraphBuilder, Parser, TreeSizeVisitor};
///
/// let tree = Parser::parse("¬(p∧q)∧¬(p∧q)").unwrap();
/// let graph = GraphBuilder::default().build(&tree);
/// let traversal = BottomUpTraversal::new(Box::<TreeSizeVisitor>::default());
/// assert_eq!(9, traversal.traverse(&graph));
/// assert_eq!(5, graph.n_nodes());
/// ```
#[derive(Default)]
pub struct TreeSizeVisitor;

impl TreeSizeVisitor {
    /// Computes the unfolded size of a graph.
    #[must_use]
    pub fn tree_size(graph: &FormulaGraph) -> u128 {
        BottomUpTraversal::new(Box::new(TreeSizeVisitor)).traverse(graph)
    }
}

impl BottomUpVisitor<u128> for TreeSizeVisitor {
    fn new_for_variable(&self, _graph: &FormulaGraph, _variable: VariableIndex) -> u128 {
        1
    }

    fn merge_for_not(&self, _graph: &FormulaGraph, child: u128) -> u128 {
        child.saturating_add(1)
    }

    fn merge_for_and(&self, _graph: &FormulaGraph, left: u128, right: u128) -> u128 {
        left.saturating_add(right).saturating_add(1)
    }
}
