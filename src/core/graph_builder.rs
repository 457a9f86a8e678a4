use super::{tree::FoldStep, FormulaGraph, GraphNode, Node, NodeIndex, VariableIndex};
use log::debug;
use rustc_hash::FxHashMap;

/// A structure used to turn a formula tree into a [`FormulaGraph`] in which identical subformulas are shared.
///
/// The builder processes the tree bottom-up, without recursion: the children of a node receive their identifiers before the node itself is considered.
/// The signature of a node is then its kind and the identifiers of its children, and is looked up in a table of the already built nodes.
/// If the signature is found, the existing identifier is reused; otherwise, a new identifier is allocated.
///
/// The identifier allocator and the signature table are owned by the builder, and [`build`](Self::build) consumes it.
/// Each build thus starts from scratch, and builds never interfere.
///
/// # Example
///
/// ```
/// use propsat_rs::{GraphBuilder, Parser};
///
/// // ¬(p∧q) occurs twice
/// let tree = Parser::parse("¬(p∧q)∧(r∧¬(p∧q))").unwrap();
/// let graph = GraphBuilder::default().build(&tree);
/// assert_eq!(tree.size(), 11);
/// assert_eq!(graph.n_nodes(), 7);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    signatures: FxHashMap<GraphNode, NodeIndex>,
    variables: Vec<String>,
    variable_indices: FxHashMap<String, VariableIndex>,
    n_parent_edges: Vec<usize>,
}

impl GraphBuilder {
    /// Builds the graph associated with a tree.
    #[must_use]
    pub fn build(mut self, tree: &Node) -> FormulaGraph {
        let root = tree.fold(|step| {
            let signature = match step {
                FoldStep::Variable(name) => GraphNode::Variable(self.variable_index(name)),
                FoldStep::Not(child) => GraphNode::Not(child),
                FoldStep::And(left, right) => GraphNode::And(left, right),
            };
            self.node_index(signature)
        });
        debug!(
            "built a graph with {} nodes and {} variables",
            self.nodes.len(),
            self.variables.len()
        );
        FormulaGraph::from_raw_data(self.nodes, self.variables, self.n_parent_edges, root)
    }

    fn variable_index(&mut self, name: &str) -> VariableIndex {
        if let Some(index) = self.variable_indices.get(name) {
            return *index;
        }
        let index = VariableIndex::from(self.variables.len());
        self.variables.push(name.to_string());
        self.variable_indices.insert(name.to_string(), index);
        index
    }

    fn node_index(&mut self, signature: GraphNode) -> NodeIndex {
        if let Some(index) = self.signatures.get(&signature) {
            return *index;
        }
        let index = NodeIndex::from(self.nodes.len());
        for child in signature.children() {
            self.n_parent_edges[usize::from(child)] += 1;
        }
        self.nodes.push(signature);
        self.n_parent_edges.push(0);
        self.signatures.insert(signature, index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn build(canonical: &str) -> FormulaGraph {
        GraphBuilder::default().build(&Parser::parse(canonical).unwrap())
    }

    #[test]
    fn test_single_variable() {
        let graph = build("p");
        assert_eq!(1, graph.n_nodes());
        assert_eq!(NodeIndex::from(0), graph.root());
        assert_eq!(GraphNode::Variable(0.into()), graph.nodes()[0]);
        assert!(!graph.is_shared(graph.root()));
    }

    #[test]
    fn test_post_order_ids() {
        let graph = build("¬p∧q");
        assert_eq!(
            &[
                GraphNode::Variable(0.into()),
                GraphNode::Not(0.into()),
                GraphNode::Variable(1.into()),
                GraphNode::And(1.into(), 2.into()),
            ],
            graph.nodes().as_slice()
        );
        assert_eq!(NodeIndex::from(3), graph.root());
    }

    #[test]
    fn test_identical_subformulas_are_shared() {
        let graph = build("¬(p∧q)∧¬(p∧q)");
        assert_eq!(5, graph.n_nodes());
        assert_eq!(
            GraphNode::And(3.into(), 3.into()),
            graph.nodes()[graph.root()]
        );
        assert!(graph.is_shared(3.into()));
        assert_eq!(2, graph.n_parent_edges(3.into()));
        assert!(!graph.is_shared(2.into()));
    }

    #[test]
    fn test_shared_variable() {
        let graph = build("p∧¬p");
        assert_eq!(3, graph.n_nodes());
        assert!(graph.is_shared(0.into()));
    }

    #[test]
    fn test_conjunction_is_order_sensitive() {
        let graph = build("(p∧q)∧(q∧p)");
        assert_eq!(5, graph.n_nodes());
        assert_ne!(graph.nodes()[2], graph.nodes()[3]);
    }

    #[test]
    fn test_variables_first_occurrence_order() {
        let graph = build("¬(z∧a)∧(m∧z)");
        assert_eq!(&["z", "a", "m"], graph.variables());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let tree = Parser::parse("¬(p∧¬q)∧(¬q∧¬(p∧¬q))").unwrap();
        let g0 = GraphBuilder::default().build(&tree);
        let g1 = GraphBuilder::default().build(&tree);
        assert_eq!(g0, g1);
    }

    #[test]
    fn test_deep_tree() {
        let depth = 100_000;
        let canonical = format!("{}p{}", "¬(".repeat(depth), ")".repeat(depth));
        let graph = build(&canonical);
        assert_eq!(depth + 1, graph.n_nodes());
        assert_eq!(NodeIndex::from(depth), graph.root());
    }

    #[test]
    fn test_long_shared_chain() {
        let canonical = vec!["(¬p∧q)"; 50_000].join("∧");
        let graph = build(&canonical);
        assert_eq!(4 + 49_999, graph.n_nodes());
        assert!(graph.is_shared(3.into()));
    }

    #[test]
    fn test_children_have_lower_indices() {
        let graph = build("¬(a∧¬b)∧¬(¬a∧(b∧¬(a∧¬b)))");
        for (i, node) in graph.nodes().as_slice().iter().enumerate() {
            assert!(node.children().into_iter().all(|c| usize::from(c) < i));
        }
    }
}
