use crate::Valuation;
use bitvec::{bitvec, slice::BitSlice, vec::BitVec};

/// A lazy iterator over all the valuations of a set of variables.
///
/// The variables are considered in the order they were given; the first one acts as the most significant bit.
/// The first valuation sets all variables to false, and the last one sets them all to true.
/// For `n` variables, `2^n` valuations are produced; when there are no variables, the single empty valuation is produced.
///
/// # Example
///
/// ```
/// use propsat_rs::{GraphBuilder, Enumerator, Parser};
///
/// let graph = GraphBuilder::default().build(&Parser::parse("q∧p").unwrap());
/// let valuations = Enumerator::new(&graph)
///     .valuations()
///     .map(|v| format!("{v}"))
///     .collect::<Vec<_>>();
/// assert_eq!(vec!["p=0 q=0", "p=1 q=0", "p=0 q=1", "p=1 q=1"], valuations);
/// ```
pub struct ValuationIterator<'a> {
    variables: &'a [String],
    current: BitVec,
    exhausted: bool,
}

impl<'a> ValuationIterator<'a> {
    pub(crate) fn new(variables: &'a [String]) -> Self {
        Self {
            variables,
            current: bitvec![0; variables.len()],
            exhausted: false,
        }
    }
}

impl Iterator for ValuationIterator<'_> {
    type Item = Valuation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let valuation = to_valuation(self.variables, &self.current);
        self.exhausted = !increment(&mut self.current, 0);
        Some(valuation)
    }
}

/// Increments the binary number made of the bits at indices `from..`, the last bit being the least significant.
///
/// Returns `false` when the number overflows, in which case all those bits are reset to 0.
pub(crate) fn increment(bits: &mut BitSlice, from: usize) -> bool {
    for i in (from..bits.len()).rev() {
        if bits[i] {
            bits.set(i, false);
        } else {
            bits.set(i, true);
            return true;
        }
    }
    false
}

pub(crate) fn to_valuation(variables: &[String], bits: &BitSlice) -> Valuation {
    variables
        .iter()
        .zip(bits.iter().by_vals())
        .map(|(v, b)| (v.as_str(), b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::order::Lsb0;

    #[test]
    fn test_increment() {
        let mut bits = bitvec![0, 1, 1];
        assert!(increment(&mut bits, 0));
        assert_eq!(bitvec![1, 0, 0], bits);
        let mut bits = bitvec![1, 1];
        assert!(!increment(&mut bits, 0));
        assert_eq!(bitvec![0, 0], bits);
    }

    #[test]
    fn test_increment_suffix() {
        let mut bits = bitvec![1, 0, 1];
        assert!(increment(&mut bits, 1));
        assert_eq!(bitvec![1, 1, 0], bits);
        let mut bits = bitvec![0, 1, 1];
        assert!(!increment(&mut bits, 1));
        assert_eq!(bitvec![0, 0, 0], bits);
        assert!(!increment(&mut bits, 3));
    }

    #[test]
    fn test_no_variables() {
        let valuations = ValuationIterator::new(&[]).collect::<Vec<_>>();
        assert_eq!(vec![Valuation::new()], valuations);
    }

    #[test]
    fn test_count() {
        let variables = ["a", "b", "c", "d"].map(String::from);
        let mut iterator = ValuationIterator::new(&variables);
        assert_eq!(16, iterator.by_ref().count());
        assert!(iterator.next().is_none());
    }
}
