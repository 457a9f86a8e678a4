use super::{formula_reader, lexer};
use crate::{
    core::tree::{is_identifier_part, AND_SYMBOL, NOT_SYMBOL},
    FormulaError, Node,
};
use anyhow::{Context, Result};

/// A structure used to parse formulas written in canonical form, i.e. using only negations and conjunctions.
///
/// Canonical formulas are usually produced by the [`Translator`](crate::Translator).
/// Whitespace is allowed between tokens.
/// Conjunctions associate to the left, so `a∧b∧c` is read as `(a∧b)∧c`.
/// Formulas are read without recursion, so deeply nested formulas are accepted.
///
/// # Example
///
/// ```
/// use propsat_rs::{Node, Parser};
///
/// let tree = Parser::parse("¬(p∧¬q)").unwrap();
/// assert_eq!(
///     Node::not(Node::and(Node::variable("p"), Node::not(Node::variable("q")))),
///     tree,
/// );
/// ```
pub struct Parser;

impl Parser {
    /// Parses a formula written in canonical form.
    ///
    /// Errors are reported at the same positions as the [`Translator`](crate::Translator) would report them.
    ///
    /// # Errors
    ///
    /// An error is returned if the formula is empty, if its parentheses are unbalanced, if an operator misses an operand,
    /// or if it contains something that is neither a canonical operator nor a variable identifier.
    pub fn parse(canonical: &str) -> Result<Node> {
        let context = "while parsing a canonical formula";
        check_chars(canonical).context(context)?;
        let tokens = lexer::tokenize(canonical).context(context)?;
        formula_reader::read_tree(&tokens, Node::not).context(context)
    }
}

fn check_chars(canonical: &str) -> Result<()> {
    match canonical.chars().enumerate().find(|(_, c)| !is_canonical_char(*c)) {
        Some((i, c)) => Err(FormulaError::unknown_token(i, c).into()),
        None => Ok(()),
    }
}

fn is_canonical_char(c: char) -> bool {
    c.is_whitespace()
        || c == '('
        || c == ')'
        || c == NOT_SYMBOL
        || c == AND_SYMBOL
        || is_identifier_part(c)
}
