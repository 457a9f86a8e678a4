use crate::{
    core::{BottomUpTraversal, BottomUpVisitor},
    FormulaError, FormulaGraph, Valuation, VariableIndex,
};
use anyhow::Result;
use bitvec::{slice::BitSlice, vec::BitVec};

/// A structure used to compute the truth value of a [`FormulaGraph`] under a valuation.
///
/// Evaluation is made bottom-up, and the value of each node is computed at most once per valuation,
/// no matter how many parents share it.
/// The time needed to evaluate a formula is thus linear in the number of its distinct subformulas.
///
/// # Example
///
/// ```
/// use propsat_rs::{Evaluator, GraphBuilder, Parser, Valuation};
///
/// let graph = GraphBuilder::default().build(&Parser::parse("¬(p∧¬q)").unwrap());
/// let evaluator = Evaluator::new(&graph);
/// let valuation = Valuation::from_iter([("p", true), ("q", false)]);
/// assert!(!evaluator.evaluate(&valuation).unwrap());
///
/// // q has no value
/// assert!(evaluator.evaluate(&Valuation::from_iter([("p", true)])).is_err());
/// ```
pub struct Evaluator<'a> {
    graph: &'a FormulaGraph,
}

impl<'a> Evaluator<'a> {
    /// Builds a new evaluator for a formula graph.
    #[must_use]
    pub fn new(graph: &'a FormulaGraph) -> Self {
        Self { graph }
    }

    /// Computes the truth value of the formula under a valuation.
    ///
    /// The valuation may contain variables that do not appear in the formula; they are ignored.
    ///
    /// # Errors
    ///
    /// An error is returned if a variable of the formula has no value in the valuation.
    pub fn evaluate(&self, valuation: &Valuation) -> Result<bool> {
        let values = self.values_of(valuation)?;
        Ok(self.evaluate_bits(&values))
    }

    fn values_of(&self, valuation: &Valuation) -> Result<BitVec> {
        let mut values = BitVec::with_capacity(self.graph.n_vars());
        for name in self.graph.variables() {
            let value = valuation
                .get(name)
                .ok_or_else(|| FormulaError::unbound_variable(name.as_str()))?;
            values.push(value);
        }
        Ok(values)
    }

    /// Computes the truth value of the formula given the values of its variables, indexed by their [`VariableIndex`].
    pub(crate) fn evaluate_bits(&self, values: &BitSlice) -> bool {
        let traversal = BottomUpTraversal::new(Box::new(EvaluationVisitor { values }));
        traversal.traverse(self.graph)
    }
}

struct EvaluationVisitor<'a> {
    values: &'a BitSlice,
}

impl BottomUpVisitor<bool> for EvaluationVisitor<'_> {
    fn new_for_variable(&self, _graph: &FormulaGraph, variable: VariableIndex) -> bool {
        self.values[usize::from(variable)]
    }

    fn merge_for_not(&self, _graph: &FormulaGraph, child: bool) -> bool {
        !child
    }

    fn merge_for_and(&self, _graph: &FormulaGraph, left: bool, right: bool) -> bool {
        left && right
    }
}
