use super::lexer::{Token, TokenKind};
use crate::{FormulaError, Node};
use anyhow::Result;

/// **(internal)** The binary connectives, from the loosest to the tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    Implies,
    Or,
    And,
}

impl Connective {
    fn of(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Implies => Some(Connective::Implies),
            TokenKind::Or => Some(Connective::Or),
            TokenKind::And => Some(Connective::And),
            _ => None,
        }
    }

    fn precedence(self) -> usize {
        match self {
            Connective::Implies => 0,
            Connective::Or => 1,
            Connective::And => 2,
        }
    }

    /// Returns `true` iff the pending connective must be applied before this one is pushed.
    fn applies_pending(self, pending: Connective) -> bool {
        pending.precedence() > self.precedence()
            || (pending.precedence() == self.precedence() && self != Connective::Implies)
    }
}

enum Pending {
    Negation,
    Group(usize),
    Connective(Connective),
}

/// **(internal)** Reads a token stream into the tree of its canonical form.
///
/// Tokens are processed by an operator-precedence algorithm with explicit stacks, so the nesting depth of the formula
/// is only bounded by the available memory.
/// `¬` binds tighter than `∧`, which binds tighter than `∨`, which binds tighter than `→`.
/// Conjunctions and disjunctions associate to the left, implications to the right.
///
/// Disjunctions and implications are rewritten into negations and conjunctions as soon as both their operands are known.
/// Each negation, including the ones introduced by the rewriting, is built by `negate`.
pub(crate) fn read_tree(tokens: &[Token], negate: fn(Node) -> Node) -> Result<Node> {
    let mut reader = FormulaReader {
        negate,
        operands: Vec::new(),
        pending: Vec::new(),
    };
    let mut expects_operand = true;
    for token in tokens {
        if expects_operand {
            match &token.kind {
                TokenKind::Not => reader.pending.push(Pending::Negation),
                TokenKind::OpeningParenthesis => reader.pending.push(Pending::Group(token.position)),
                TokenKind::Variable(name) => {
                    reader.push_operand(Node::variable(name.as_str()));
                    expects_operand = false;
                }
                _ => return Err(malformed(token, "missing operand before this token")),
            }
        } else if token.kind == TokenKind::ClosingParenthesis {
            reader.close_group(token)?;
        } else if let Some(connective) = Connective::of(&token.kind) {
            reader.push_connective(connective);
            expects_operand = true;
        } else {
            return Err(malformed(token, "missing operator before this token"));
        }
    }
    if expects_operand {
        let error = match tokens.last() {
            Some(token) => malformed(token, "missing operand"),
            None => FormulaError::malformed(0, "", "missing operand").into(),
        };
        return Err(error);
    }
    reader.finish()
}

fn malformed(token: &Token, reason: &str) -> anyhow::Error {
    FormulaError::malformed(token.position, format!("{}", token.kind), reason).into()
}

struct FormulaReader {
    negate: fn(Node) -> Node,
    operands: Vec<Node>,
    pending: Vec<Pending>,
}

impl FormulaReader {
    /// Pushes a complete operand, applying the negations written right before it.
    fn push_operand(&mut self, mut operand: Node) {
        while matches!(self.pending.last(), Some(Pending::Negation)) {
            self.pending.pop();
            operand = (self.negate)(operand);
        }
        self.operands.push(operand);
    }

    fn push_connective(&mut self, connective: Connective) {
        loop {
            let pending = match self.pending.last() {
                Some(Pending::Connective(c)) if connective.applies_pending(*c) => *c,
                _ => break,
            };
            self.pending.pop();
            self.apply(pending);
        }
        self.pending.push(Pending::Connective(connective));
    }

    fn close_group(&mut self, token: &Token) -> Result<()> {
        loop {
            match self.pending.pop() {
                Some(Pending::Connective(c)) => self.apply(c),
                Some(Pending::Group(_)) => break,
                Some(Pending::Negation) | None => {
                    return Err(malformed(token, "unmatched closing parenthesis"))
                }
            }
        }
        let group = self.pop_operand();
        self.push_operand(group);
        Ok(())
    }

    fn finish(mut self) -> Result<Node> {
        while let Some(pending) = self.pending.pop() {
            match pending {
                Pending::Connective(c) => self.apply(c),
                Pending::Group(position) => {
                    return Err(FormulaError::malformed(
                        position,
                        "(",
                        "unmatched opening parenthesis",
                    )
                    .into())
                }
                Pending::Negation => unreachable!(),
            }
        }
        Ok(self.pop_operand())
    }

    /// T(φ1 ∧ φ2) = T(φ1) ∧ T(φ2); T(φ1 ∨ φ2) = ¬(¬T(φ1) ∧ ¬T(φ2)); T(φ1 → φ2) = ¬(T(φ1) ∧ ¬T(φ2)).
    fn apply(&mut self, connective: Connective) {
        let right = self.pop_operand();
        let left = self.pop_operand();
        let negate = self.negate;
        let result = match connective {
            Connective::And => Node::and(left, right),
            Connective::Or => negate(Node::and(negate(left), negate(right))),
            Connective::Implies => negate(Node::and(left, negate(right))),
        };
        self.operands.push(result);
    }

    fn pop_operand(&mut self) -> Node {
        let Some(operand) = self.operands.pop() else {
            unreachable!()
        };
        operand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::lexer::tokenize;

    fn read(formula: &str) -> String {
        format!("{}", read_tree(&tokenize(formula).unwrap(), Node::not).unwrap())
    }

    #[test]
    fn test_precedence() {
        assert_eq!("¬¬p∧q", read("¬¬p ∧ q"));
        assert_eq!("¬(¬(¬p∧q)∧¬r)", read("¬p ∧ q ∨ r"));
        assert_eq!("¬(p∧¬¬(¬q∧¬r))", read("p → q ∨ r"));
    }

    #[test]
    fn test_associativity() {
        assert_eq!("a∧b∧c", read("a ∧ b ∧ c"));
        assert_eq!("a∧(b∧c)", read("a ∧ (b ∧ c)"));
        assert_eq!("¬(a∧¬¬(b∧¬c))", read("a → b → c"));
    }

    #[test]
    fn test_deep_groups() {
        let depth = 100_000;
        let formula = format!("{}p{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!("p", read(&formula));
    }

    #[test]
    fn test_long_right_associative_chain() {
        let formula = vec!["p"; 20_000].join(" → ");
        let rendered = read(&formula);
        assert!(rendered.starts_with("¬(p∧¬¬(p∧¬¬(p∧"));
    }
}
