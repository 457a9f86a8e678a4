mod enumerator;
pub use enumerator::Enumerator;

mod evaluator;
pub use evaluator::Evaluator;

mod tree_size;
pub use tree_size::TreeSizeVisitor;

mod valuation_iterator;
pub use valuation_iterator::ValuationIterator;
