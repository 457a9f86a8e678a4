use std::{fmt::Debug, ops::Index};

/// A node of a [`FormulaGraph`].
///
/// Children are referred to by their [`NodeIndex`], and variables by their [`VariableIndex`].
/// Since graph nodes are hash-consed, a [`GraphNode`] is also the structural signature of the subformula it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphNode {
    /// A propositional variable.
    Variable(VariableIndex),
    /// A negation, associated with the index of its child.
    Not(NodeIndex),
    /// A conjunction, associated with the indices of its children.
    And(NodeIndex, NodeIndex),
}

impl GraphNode {
    /// Returns the indices of the children of this node, in order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeIndex> {
        match self {
            GraphNode::Variable(_) => vec![],
            GraphNode::Not(child) => vec![*child],
            GraphNode::And(left, right) => vec![*left, *right],
        }
    }
}

/// A propositional formula in canonical form, in which identical subformulas are shared.
///
/// Formula graphs are built by the [`GraphBuilder`](crate::GraphBuilder).
/// Internally, they are represented by a vector of [`GraphNode`] and a vector of variable names.
/// The index of a node in the vector is its identifier: two subformulas are represented by the same node iff they are syntactically identical.
/// The children of a node always have lower indices than the node itself, so the graph is acyclic and the vector is topologically sorted.
///
/// The variables are stored in the order of their first occurrence in the formula, read from left to right.
///
/// # Example
///
/// ```
/// use propsat_rs::{GraphBuilder, Parser};
///
/// let tree = Parser::parse("¬p∧¬p").unwrap();
/// let graph = GraphBuilder::default().build(&tree);
/// assert_eq!(3, graph.n_nodes());
/// assert_eq!(&["p".to_string()], graph.variables());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaGraph {
    nodes: GraphNodeVec,
    variables: VariableVec,
    n_parent_edges: Vec<usize>,
    root: NodeIndex,
}

impl FormulaGraph {
    pub(crate) fn from_raw_data(
        nodes: Vec<GraphNode>,
        variables: Vec<String>,
        n_parent_edges: Vec<usize>,
        root: NodeIndex,
    ) -> Self {
        Self {
            nodes: GraphNodeVec(nodes),
            variables: VariableVec(variables),
            n_parent_edges,
            root,
        }
    }

    /// Returns the index of the root node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Returns the vector of nodes of the graph.
    #[must_use]
    pub fn nodes(&self) -> &GraphNodeVec {
        &self.nodes
    }

    /// Returns the number of nodes in the graph, i.e. the number of distinct subformulas.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.as_slice().len()
    }

    /// Returns the names of the variables, in the order of their first occurrence.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        self.variables.as_slice()
    }

    /// Returns the number of distinct variables.
    #[must_use]
    pub fn n_vars(&self) -> usize {
        self.variables.as_slice().len()
    }

    /// Returns the name of a variable.
    #[must_use]
    pub fn variable_name(&self, index: VariableIndex) -> &str {
        &self.variables[index]
    }

    /// Returns the value held by a node: the variable name for a leaf, or the operator symbol otherwise.
    #[must_use]
    pub fn node_value(&self, index: NodeIndex) -> &str {
        match &self.nodes[index] {
            GraphNode::Variable(v) => self.variable_name(*v),
            GraphNode::Not(_) => "¬",
            GraphNode::And(_, _) => "∧",
        }
    }

    /// Returns the number of edges that target a node.
    ///
    /// A conjunction whose both children are the same node counts for two edges.
    #[must_use]
    pub fn n_parent_edges(&self, index: NodeIndex) -> usize {
        self.n_parent_edges[usize::from(index)]
    }

    /// Returns `true` iff more than one edge targets this node.
    #[must_use]
    pub fn is_shared(&self, index: NodeIndex) -> bool {
        self.n_parent_edges(index) > 1
    }
}

macro_rules! index_type {
    ($type_name:ident, $index_name:ident, $vec_index_name:ident) => {
        #[doc = concat!("An index type dedicated to [`", stringify!($type_name), "`] objects.")]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $index_name(usize);

        impl From<usize> for $index_name {
            fn from(value: usize) -> Self {
                $index_name(value)
            }
        }

        impl From<$index_name> for usize {
            fn from(value: $index_name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $index_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[doc = concat!("A vector of [`", stringify!($type_name), "`] objects.")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $vec_index_name(Vec<$type_name>);

        impl $vec_index_name {
            #[doc = concat!("Returns a ", stringify!($vec_index_name), " as a slice of [`", stringify!($type_name), "`].")]
            #[must_use]
            pub fn as_slice(&self) -> &[$type_name] {
                &self.0
            }
        }

        impl Index<usize> for $vec_index_name {
            type Output = $type_name;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl Index<$index_name> for $vec_index_name {
            type Output = $type_name;

            fn index(&self, index: $index_name) -> &Self::Output {
                &self.0[usize::from(index)]
            }
        }
    };
}

index_type!(GraphNode, NodeIndex, GraphNodeVec);
index_type!(String, VariableIndex, VariableVec);

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_negation_graph() -> FormulaGraph {
        FormulaGraph::from_raw_data(
            vec![
                GraphNode::Variable(0.into()),
                GraphNode::Not(0.into()),
                GraphNode::And(1.into(), 1.into()),
            ],
            vec!["p".to_string()],
            vec![1, 2, 0],
            2.into(),
        )
    }

    #[test]
    fn test_accessors() {
        let graph = shared_negation_graph();
        assert_eq!(NodeIndex::from(2), graph.root());
        assert_eq!(3, graph.n_nodes());
        assert_eq!(1, graph.n_vars());
        assert_eq!("p", graph.variable_name(0.into()));
    }

    #[test]
    fn test_node_values() {
        let graph = shared_negation_graph();
        assert_eq!("p", graph.node_value(0.into()));
        assert_eq!("¬", graph.node_value(1.into()));
        assert_eq!("∧", graph.node_value(2.into()));
    }

    #[test]
    fn test_is_shared() {
        let graph = shared_negation_graph();
        assert!(!graph.is_shared(0.into()));
        assert!(graph.is_shared(1.into()));
        assert!(!graph.is_shared(2.into()));
    }

    #[test]
    fn test_children() {
        let graph = shared_negation_graph();
        assert_eq!(
            vec![NodeIndex::from(1), NodeIndex::from(1)],
            graph.nodes()[graph.root()].children()
        );
        assert!(graph.nodes()[0].children().is_empty());
    }
}
