mod bottom_up_traversal;
pub use bottom_up_traversal::BottomUpTraversal;
pub use bottom_up_traversal::BottomUpVisitor;

mod formula_error;
pub use formula_error::FormulaError;

mod formula_graph;
pub use formula_graph::FormulaGraph;
pub use formula_graph::GraphNode;
pub use formula_graph::GraphNodeVec;
pub use formula_graph::NodeIndex;
pub use formula_graph::VariableIndex;

mod graph_builder;
pub use graph_builder::GraphBuilder;

pub(crate) mod tree;
pub use tree::Node;

mod valuation;
pub use valuation::Valuation;
