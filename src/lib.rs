#![doc = include_str!("../README.md")]

mod algorithms;
pub use algorithms::Enumerator;
pub use algorithms::Evaluator;
pub use algorithms::TreeSizeVisitor;
pub use algorithms::ValuationIterator;

mod core;
pub use core::BottomUpTraversal;
pub use core::BottomUpVisitor;
pub use core::FormulaError;
pub use core::FormulaGraph;
pub use core::GraphBuilder;
pub use core::GraphNode;
pub use core::GraphNodeVec;
pub use core::Node;
pub use core::NodeIndex;
pub use core::Valuation;
pub use core::VariableIndex;

mod io;
pub use io::DotWriter;
pub use io::FormulaGraphWriter;
pub use io::Parser;
pub use io::Translator;
pub use io::TreeLines;
pub use io::TreeWriter;
