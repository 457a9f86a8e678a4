use super::valuation_iterator::{increment, to_valuation};
use crate::{Evaluator, FormulaGraph, Valuation, ValuationIterator};
use bitvec::{bitvec, vec::BitVec};
use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

const MAX_PARALLEL_PREFIX_LEN: usize = 12;

/// A structure used to decide the satisfiability and the validity of a [`FormulaGraph`] by enumerating its valuations.
///
/// The valuations are built over the variables of the graph, taken in the order of their first occurrence in the formula.
/// They are enumerated in the order given by [`ValuationIterator`], and each one is checked by an [`Evaluator`].
/// Since `2^n` valuations exist for `n` variables, the formulas under consideration must involve a small number of variables.
///
/// # Example
///
/// ```
/// use propsat_rs::{Enumerator, GraphBuilder, Translator};
///
/// let tree = Translator::default().translate_to_tree("p ∨ ¬p").unwrap();
/// let graph = GraphBuilder::default().build(&tree);
/// let enumerator = Enumerator::new(&graph);
/// assert!(enumerator.is_tautology());
/// assert_eq!(2, enumerator.satisfying_valuations().len());
///
/// let tree = Translator::default().translate_to_tree("p ∧ ¬p").unwrap();
/// let graph = GraphBuilder::default().build(&tree);
/// let enumerator = Enumerator::new(&graph);
/// assert!(!enumerator.is_satisfiable());
/// assert!(enumerator.satisfying_valuations().is_empty());
/// ```
pub struct Enumerator<'a> {
    graph: &'a FormulaGraph,
    evaluator: Evaluator<'a>,
}

impl<'a> Enumerator<'a> {
    /// Builds a new enumerator for a formula graph.
    #[must_use]
    pub fn new(graph: &'a FormulaGraph) -> Self {
        Self {
            graph,
            evaluator: Evaluator::new(graph),
        }
    }

    /// Returns the variables of the formula, in enumeration order.
    #[must_use]
    pub fn variables(&self) -> &'a [String] {
        self.graph.variables()
    }

    /// Returns an iterator over all the valuations of the variables, whether they satisfy the formula or not.
    #[must_use]
    pub fn valuations(&self) -> ValuationIterator<'a> {
        ValuationIterator::new(self.graph.variables())
    }

    /// Returns all the valuations that satisfy the formula, in enumeration order.
    ///
    /// All the `2^n` valuations are considered.
    #[must_use]
    pub fn satisfying_valuations(&self) -> Vec<Valuation> {
        debug!(
            "enumerating the valuations of {} variables",
            self.graph.n_vars()
        );
        let mut result = Vec::new();
        self.for_each_satisfying(bitvec![0; self.graph.n_vars()], 0, |v| result.push(v));
        result
    }

    /// Returns all the valuations that satisfy the formula, in enumeration order, using the current [`rayon`] thread pool.
    ///
    /// The result is the same as the one of [`satisfying_valuations`](Self::satisfying_valuations).
    /// The valuations are split according to the values of the first variables, and each part is handled by a single task.
    #[must_use]
    pub fn satisfying_valuations_parallel(&self) -> Vec<Valuation> {
        let n_vars = self.graph.n_vars();
        let prefix_len = usize::min(n_vars, MAX_PARALLEL_PREFIX_LEN);
        debug!(
            "enumerating the valuations of {n_vars} variables in {} parallel tasks",
            1usize << prefix_len
        );
        let parts = (0..1usize << prefix_len)
            .into_par_iter()
            .map(|prefix| {
                let mut bits = bitvec![0; n_vars];
                for i in 0..prefix_len {
                    bits.set(i, (prefix >> (prefix_len - 1 - i)) & 1 == 1);
                }
                let mut part = Vec::new();
                self.for_each_satisfying(bits, prefix_len, |v| part.push(v));
                part
            })
            .collect::<Vec<_>>();
        parts.into_iter().flatten().collect()
    }

    fn for_each_satisfying<F>(&self, mut bits: BitVec, first_free: usize, mut f: F)
    where
        F: FnMut(Valuation),
    {
        loop {
            if self.evaluator.evaluate_bits(&bits) {
                f(to_valuation(self.graph.variables(), &bits));
            }
            if !increment(&mut bits, first_free) {
                break;
            }
        }
    }

    /// Returns the number of valuations that satisfy the formula.
    #[must_use]
    pub fn count_models(&self) -> u128 {
        let mut n_models = 0;
        self.for_each_satisfying(bitvec![0; self.graph.n_vars()], 0, |_| n_models += 1);
        n_models
    }

    /// Returns the first valuation that satisfies the formula, if any.
    ///
    /// The enumeration stops as soon as such a valuation is found.
    #[must_use]
    pub fn find_satisfying_valuation(&self) -> Option<Valuation> {
        self.find_valuation_evaluating_to(true)
    }

    /// Returns `true` iff at least one valuation satisfies the formula.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.find_satisfying_valuation().is_some()
    }

    /// Returns the first valuation that falsifies the formula, if any.
    ///
    /// The enumeration stops as soon as such a valuation is found.
    #[must_use]
    pub fn find_falsifying_valuation(&self) -> Option<Valuation> {
        self.find_valuation_evaluating_to(false)
    }

    /// Returns `true` iff all the valuations satisfy the formula.
    ///
    /// The enumeration stops at the first valuation that falsifies the formula.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.find_falsifying_valuation().is_none()
    }

    fn find_valuation_evaluating_to(&self, expected: bool) -> Option<Valuation> {
        let mut bits = bitvec![0; self.graph.n_vars()];
        loop {
            if self.evaluator.evaluate_bits(&bits) == expected {
                return Some(to_valuation(self.graph.variables(), &bits));
            }
            if !increment(&mut bits, 0) {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, Translator};

    fn graph(formula: &str) -> FormulaGraph {
        let tree = Translator::default().translate_to_tree(formula).unwrap();
        GraphBuilder::default().build(&tree)
    }

    fn formatted(valuations: &[Valuation]) -> Vec<String> {
        valuations.iter().map(|v| format!("{v}")).collect()
    }

    #[test]
    fn test_unsatisfiable() {
        let graph = graph("p ∧ ¬p");
        let enumerator = Enumerator::new(&graph);
        assert!(enumerator.satisfying_valuations().is_empty());
        assert!(!enumerator.is_satisfiable());
        assert!(!enumerator.is_tautology());
        assert_eq!(0, enumerator.count_models());
    }

    #[test]
    fn test_tautology() {
        let graph = graph("p ∨ ¬p");
        let enumerator = Enumerator::new(&graph);
        assert!(enumerator.is_tautology());
        assert_eq!(None, enumerator.find_falsifying_valuation());
        assert_eq!(2, enumerator.satisfying_valuations().len());
    }

    #[test]
    fn test_implication() {
        let graph = graph("p → q");
        let enumerator = Enumerator::new(&graph);
        assert_eq!(
            vec!["p=0 q=0", "p=0 q=1", "p=1 q=1"],
            formatted(&enumerator.satisfying_valuations())
        );
        assert_eq!(
            Some(Valuation::from_iter([("p", true), ("q", false)])),
            enumerator.find_falsifying_valuation()
        );
    }

    #[test]
    fn test_first_witness() {
        let graph = graph("a ∧ (b ∨ c)");
        let enumerator = Enumerator::new(&graph);
        assert_eq!(
            Some(Valuation::from_iter([("a", true), ("b", false), ("c", true)])),
            enumerator.find_satisfying_valuation()
        );
        assert_eq!(3, enumerator.count_models());
    }

    #[test]
    fn test_tautology_iff_all_valuations_satisfy() {
        for formula in [
            "p → p",
            "(p → q) ∨ (q → p)",
            "p ∨ q",
            "((p → q) → p) → p",
            "(p ∧ q) → (q ∧ r)",
        ] {
            let graph = graph(formula);
            let enumerator = Enumerator::new(&graph);
            let all = enumerator.valuations().collect::<Vec<_>>();
            let satisfying = enumerator.satisfying_valuations();
            assert!(satisfying.iter().all(|v| all.contains(v)));
            assert_eq!(1 << graph.n_vars(), all.len());
            assert_eq!(
                enumerator.is_tautology(),
                satisfying.len() == all.len(),
                "{formula}"
            );
        }
    }

    #[test]
    fn test_parallel_enumeration_matches_sequential() {
        for formula in [
            "p",
            "(a → b) ∧ (b → c) ∧ ¬(a ∧ ¬c)",
            "(x1 ∨ x2 ∨ x3) ∧ (¬x1 ∨ x4) ∧ (x5 → ¬x6) ∧ (x7 ∨ x8 ∨ x9 ∨ x10 ∨ x11 ∨ x12 ∨ x13 ∨ x14)",
        ] {
            let graph = graph(formula);
            let enumerator = Enumerator::new(&graph);
            assert_eq!(
                enumerator.satisfying_valuations(),
                enumerator.satisfying_valuations_parallel()
            );
        }
    }

    #[test]
    fn test_long_formula() {
        let graph = graph(&vec!["(p ∧ ¬q)", "(q → p)"].repeat(5_000).join(" ∨ "));
        assert_eq!(2, graph.n_vars());
        let enumerator = Enumerator::new(&graph);
        assert!(enumerator.is_satisfiable());
        assert_eq!(
            vec!["p=0 q=0", "p=1 q=0", "p=1 q=1"],
            formatted(&enumerator.satisfying_valuations())
        );
    }
}
