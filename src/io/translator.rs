//! The translation of formulas into their canonical form.
//!
//! The tokens of the formula are read by an operator-precedence algorithm using explicit stacks, with `¬` binding
//! tighter than `∧`, `∧` tighter than `∨` and `∨` tighter than `→`.
//! The induction rules are applied as soon as both operands of a connective are known:
//!
//! ```text
//! T(p)            = p
//! T(¬φ)           = ¬T(φ)
//! T(φ1 ∧ φ2)      = T(φ1) ∧ T(φ2)
//! T(φ1 ∨ φ2)      = ¬(¬T(φ1) ∧ ¬T(φ2))
//! T(φ1 → φ2)      = ¬(T(φ1) ∧ ¬T(φ2))
//! ```
//!
//! Parenthesized groups are read (and thus translated) as operands before the enclosing connective is built.
//! Conjunctions and disjunctions associate to the left, implications to the right.
//! No recursion is involved, so the nesting depth of a formula is only bounded by the available memory.

use super::{formula_reader, lexer};
use crate::Node;
use anyhow::{Context, Result};
use log::debug;

/// A structure used to translate formulas using negations, conjunctions, disjunctions and implications
/// into equivalent formulas using only negations and conjunctions.
///
/// By default, double negations are removed from the result.
///
/// # Example
///
/// ```
/// use propsat_rs::Translator;
///
/// assert_eq!("¬(¬p∧¬q)", Translator::translate("p ∨ q").unwrap());
/// assert_eq!("¬(p∧¬q)", Translator::translate("p → q").unwrap());
/// assert_eq!("p∧q", Translator::translate("¬¬(p ∧ q)").unwrap());
///
/// let mut translator = Translator::default();
/// translator.set_collapse_double_negations(false);
/// assert_eq!("¬¬(p∧q)", translator.translate_formula("¬¬(p ∧ q)").unwrap());
/// ```
pub struct Translator {
    collapse_double_negations: bool,
}

impl Default for Translator {
    fn default() -> Self {
        Self {
            collapse_double_negations: true,
        }
    }
}

impl Translator {
    /// Translates a formula into its canonical form with the default settings.
    ///
    /// # Errors
    ///
    /// An error is returned if the formula is malformed or contains an unknown token.
    pub fn translate(formula: &str) -> Result<String> {
        Translator::default().translate_formula(formula)
    }

    /// Sets whether double negations must be removed.
    pub fn set_collapse_double_negations(&mut self, collapse_double_negations: bool) {
        self.collapse_double_negations = collapse_double_negations;
    }

    /// Translates a formula into its canonical form.
    ///
    /// # Errors
    ///
    /// An error is returned if the formula is malformed or contains an unknown token.
    pub fn translate_formula(&self, formula: &str) -> Result<String> {
        let canonical = format!("{}", self.translate_to_tree(formula)?);
        debug!("translated {formula:?} into {canonical:?}");
        Ok(canonical)
    }

    /// Translates a formula into the tree of its canonical form.
    ///
    /// # Errors
    ///
    /// An error is returned if the formula is malformed or contains an unknown token.
    pub fn translate_to_tree(&self, formula: &str) -> Result<Node> {
        let context = "while translating a formula";
        let tokens = lexer::tokenize(formula).context(context)?;
        let negate: fn(Node) -> Node = if self.collapse_double_negations {
            Node::negate
        } else {
            Node::not
        };
        formula_reader::read_tree(&tokens, negate).context(context)
    }
}
