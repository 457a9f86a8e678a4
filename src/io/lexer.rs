use crate::core::{
    tree::{
        is_identifier_part, is_identifier_start, AND_SYMBOL, IMPLIES_SYMBOL, NOT_SYMBOL,
        OR_SYMBOL,
    },
    FormulaError,
};
use anyhow::Result;
use std::{fmt::Display, iter::Peekable, str::CharIndices};

/// **(internal)** The kinds of tokens that can appear in a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Variable(String),
    Not,
    And,
    Or,
    Implies,
    OpeningParenthesis,
    ClosingParenthesis,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Variable(name) => write!(f, "{name}"),
            TokenKind::Not => write!(f, "{NOT_SYMBOL}"),
            TokenKind::And => write!(f, "{AND_SYMBOL}"),
            TokenKind::Or => write!(f, "{OR_SYMBOL}"),
            TokenKind::Implies => write!(f, "{IMPLIES_SYMBOL}"),
            TokenKind::OpeningParenthesis => write!(f, "("),
            TokenKind::ClosingParenthesis => write!(f, ")"),
        }
    }
}

/// **(internal)** A token, along with its position (in characters) in the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) position: usize,
}

/// **(internal)** Splits a formula into tokens.
///
/// Whitespace is skipped. Besides the usual symbols, the ASCII aliases `!` and `~` (negation), `&` (conjunction),
/// `|` (disjunction) and `->` (implication) are recognized.
pub(crate) fn tokenize(formula: &str) -> Result<Vec<Token>> {
    let mut chars = CharPositions::new(formula);
    let mut tokens = Vec::new();
    while let Some((position, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => continue,
            '¬' | '!' | '~' => TokenKind::Not,
            '∧' | '&' => TokenKind::And,
            '∨' | '|' => TokenKind::Or,
            '→' => TokenKind::Implies,
            '-' => {
                if chars.next_if_eq('>') {
                    TokenKind::Implies
                } else {
                    return Err(FormulaError::unknown_token(position, "-").into());
                }
            }
            '(' => TokenKind::OpeningParenthesis,
            ')' => TokenKind::ClosingParenthesis,
            c if is_identifier_start(c) => {
                let mut name = String::from(c);
                while let Some(next) = chars.next_if(is_identifier_part) {
                    name.push(next);
                }
                TokenKind::Variable(name)
            }
            c if is_identifier_part(c) => {
                let mut token = String::from(c);
                while let Some(next) = chars.next_if(is_identifier_part) {
                    token.push(next);
                }
                return Err(FormulaError::unknown_token(position, token).into());
            }
            c => return Err(FormulaError::unknown_token(position, c).into()),
        };
        tokens.push(Token { kind, position });
    }
    Ok(tokens)
}

/// **(internal)** An iterator over the characters of a string and their positions, counted in characters.
struct CharPositions<'a> {
    chars: Peekable<CharIndices<'a>>,
    position: usize,
}

impl<'a> CharPositions<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.char_indices().peekable(),
            position: 0,
        }
    }

    fn next_if<F>(&mut self, predicate: F) -> Option<char>
    where
        F: Fn(char) -> bool,
    {
        let (_, c) = self.chars.next_if(|(_, c)| predicate(*c))?;
        self.position += 1;
        Some(c)
    }

    fn next_if_eq(&mut self, expected: char) -> bool {
        self.next_if(|c| c == expected).is_some()
    }
}

impl Iterator for CharPositions<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let (_, c) = self.chars.next()?;
        let position = self.position;
        self.position += 1;
        Some((position, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(formula: &str) -> Vec<TokenKind> {
        tokenize(formula)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn assert_error(formula: &str, expected_error: &str) {
        match tokenize(formula) {
            Ok(_) => panic!(),
            Err(e) => assert_eq!(expected_error, format!("{}", e.root_cause())),
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            vec![
                TokenKind::Not,
                TokenKind::OpeningParenthesis,
                TokenKind::Variable("p".to_string()),
                TokenKind::And,
                TokenKind::Variable("q1".to_string()),
                TokenKind::ClosingParenthesis,
                TokenKind::Or,
                TokenKind::Variable("r_s".to_string()),
                TokenKind::Implies,
                TokenKind::Variable("t".to_string()),
            ],
            kinds("¬(p ∧ q1) ∨ r_s → t")
        );
    }

    #[test]
    fn test_ascii_aliases() {
        assert_eq!(kinds("¬(p∧q)∨r→t"), kinds("!(p & q) | r -> t"));
        assert_eq!(kinds("¬p"), kinds("~p"));
    }

    #[test]
    fn test_positions_count_chars() {
        let positions = tokenize("¬p ∧ q")
            .unwrap()
            .into_iter()
            .map(|t| t.position)
            .collect::<Vec<_>>();
        assert_eq!(vec![0, 1, 3, 5], positions);
    }

    #[test]
    fn test_unknown_char() {
        assert_error("p # q", r##"unknown token "#" at position 2"##);
    }

    #[test]
    fn test_lone_dash() {
        assert_error("p - q", r#"unknown token "-" at position 2"#);
    }

    #[test]
    fn test_identifier_starting_with_digit() {
        assert_error("p ∧ 1q", r#"unknown token "1q" at position 4"#);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("  ").unwrap().is_empty());
    }
}
