use std::fmt::Display;

/// The errors raised while translating, parsing or evaluating a formula.
///
/// Library functions return [`anyhow::Result`]; the errors they raise on invalid formulas or valuations are instances of this type,
/// and can be recovered with [`anyhow::Error::downcast_ref`].
///
/// # Example
///
/// ```
/// use propsat_rs::{FormulaError, Parser};
///
/// let error = Parser::parse("p # q").unwrap_err();
/// assert!(matches!(
///     error.downcast_ref::<FormulaError>(),
///     Some(FormulaError::UnknownToken { position: 2, .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// Unbalanced parentheses, an operator missing an operand, or an empty subexpression.
    MalformedExpression {
        /// The position (in characters) at which the problem was detected.
        position: usize,
        /// The part of the formula involved in the problem.
        fragment: String,
        /// A short description of the problem.
        reason: String,
    },
    /// A character or substring that is neither an operator nor a legal variable identifier.
    UnknownToken {
        /// The position (in characters) of the token.
        position: usize,
        /// The token itself.
        token: String,
    },
    /// A variable of the formula that has no value in the valuation under consideration.
    UnboundVariable {
        /// The name of the variable.
        name: String,
    },
}

impl FormulaError {
    pub(crate) fn malformed<S, R>(position: usize, fragment: S, reason: R) -> Self
    where
        S: Into<String>,
        R: Into<String>,
    {
        FormulaError::MalformedExpression {
            position,
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_token<S>(position: usize, token: S) -> Self
    where
        S: Into<String>,
    {
        FormulaError::UnknownToken {
            position,
            token: token.into(),
        }
    }

    pub(crate) fn unbound_variable<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        FormulaError::UnboundVariable { name: name.into() }
    }
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulaError::MalformedExpression {
                position,
                fragment,
                reason,
            } => write!(
                f,
                r#"malformed expression at position {position} ("{fragment}"): {reason}"#
            ),
            FormulaError::UnknownToken { position, token } => {
                write!(f, r#"unknown token "{token}" at position {position}"#)
            }
            FormulaError::UnboundVariable { name } => {
                write!(f, r#"no value for variable "{name}""#)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_malformed() {
        assert_eq!(
            r#"malformed expression at position 0 ("(p∧q"): unmatched opening parenthesis"#,
            format!(
                "{}",
                FormulaError::malformed(0, "(p∧q", "unmatched opening parenthesis")
            )
        );
    }

    #[test]
    fn test_display_unknown_token() {
        assert_eq!(
            r##"unknown token "#" at position 2"##,
            format!("{}", FormulaError::unknown_token(2, "#"))
        );
    }

    #[test]
    fn test_display_unbound_variable() {
        assert_eq!(
            r#"no value for variable "q""#,
            format!("{}", FormulaError::unbound_variable("q"))
        );
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let error = anyhow::Error::from(FormulaError::unbound_variable("q"));
        assert_eq!(
            Some(&FormulaError::unbound_variable("q")),
            error.downcast_ref::<FormulaError>()
        );
    }
}
