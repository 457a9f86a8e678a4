use crate::{FormulaGraph, GraphNode, VariableIndex};

/// A structure used to apply algorithms on a [`FormulaGraph`] in a bottom-up fashion.
///
/// Algorithms that want to use this object must use a structure implementing the [`BottomUpVisitor`] trait.
/// Each call to [`traverse`](Self::traverse) keeps its own vector of the values computed for the nodes,
/// so that a node shared by several parents is visited only once per traversal.
/// Nodes are visited in the order of their indices, which puts children before their parents.
pub struct BottomUpTraversal<'a, T> {
    visitor: Box<dyn BottomUpVisitor<T> + 'a>,
}

/// The operations an algorithm must provide to be run by a [`BottomUpTraversal`].
pub trait BottomUpVisitor<T> {
    /// Computes the value of a variable node.
    fn new_for_variable(&self, graph: &FormulaGraph, variable: VariableIndex) -> T;

    /// Computes the value of a negation node, given the value of its child.
    fn merge_for_not(&self, graph: &FormulaGraph, child: T) -> T;

    /// Computes the value of a conjunction node, given the values of its children.
    fn merge_for_and(&self, graph: &FormulaGraph, left: T, right: T) -> T;
}

impl<'a, T> BottomUpTraversal<'a, T>
where
    T: Clone,
{
    /// Builds a new traversal structure given an algorithm working in a bottom-up fashion.
    #[must_use]
    pub fn new(visitor: Box<dyn BottomUpVisitor<T> + 'a>) -> Self {
        Self { visitor }
    }

    /// Make the traversal, applying the algorithm given at this object creation time.
    #[must_use]
    pub fn traverse(&self, graph: &FormulaGraph) -> T {
        let mut values: Vec<T> = Vec::with_capacity(graph.n_nodes());
        for node in graph.nodes().as_slice() {
            let value = match *node {
                GraphNode::Variable(variable) => self.visitor.new_for_variable(graph, variable),
                GraphNode::Not(child) => self
                    .visitor
                    .merge_for_not(graph, values[usize::from(child)].clone()),
                GraphNode::And(left, right) => self.visitor.merge_for_and(
                    graph,
                    values[usize::from(left)].clone(),
                    values[usize::from(right)].clone(),
                ),
            };
            values.push(value);
        }
        values.swap_remove(usize::from(graph.root()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, Parser};
    use std::cell::Cell;

    struct CountingVisitor<'a> {
        n_visits: &'a Cell<usize>,
    }

    impl BottomUpVisitor<()> for CountingVisitor<'_> {
        fn new_for_variable(&self, _graph: &FormulaGraph, _variable: VariableIndex) {
            self.n_visits.set(self.n_visits.get() + 1);
        }

        fn merge_for_not(&self, _graph: &FormulaGraph, _child: ()) {
            self.n_visits.set(self.n_visits.get() + 1);
        }

        fn merge_for_and(&self, _graph: &FormulaGraph, _left: (), _right: ()) {
            self.n_visits.set(self.n_visits.get() + 1);
        }
    }

    #[test]
    fn test_each_node_visited_once() {
        let tree = Parser::parse("¬(p∧q)∧(¬(p∧q)∧¬(p∧q))").unwrap();
        let graph = GraphBuilder::default().build(&tree);
        let n_visits = Cell::new(0);
        let traversal = BottomUpTraversal::new(Box::new(CountingVisitor {
            n_visits: &n_visits,
        }));
        let _ = traversal.traverse(&graph);
        assert_eq!(graph.n_nodes(), n_visits.get());
        let _ = traversal.traverse(&graph);
        assert_eq!(2 * graph.n_nodes(), n_visits.get());
    }
}
