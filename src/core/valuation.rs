use std::{collections::BTreeMap, fmt::Display};

/// An assignment of truth values to variables.
///
/// Valuations are ordered by variable names, and can be compared and hashed, so that sets of valuations can be built.
/// When a valuation is displayed, each variable is written followed by `=1` or `=0`.
///
/// # Example
///
/// ```
/// use propsat_rs::Valuation;
///
/// let mut valuation = Valuation::from_iter([("q", false)]);
/// valuation.set("p", true);
/// assert_eq!(Some(true), valuation.get("p"));
/// assert_eq!(None, valuation.get("r"));
/// assert_eq!("p=1 q=0", format!("{valuation}"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Valuation(BTreeMap<String, bool>);

impl Valuation {
    /// Builds an empty valuation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a variable, replacing the previous one if it exists.
    pub fn set<S>(&mut self, variable: S, value: bool)
    where
        S: Into<String>,
    {
        self.0.insert(variable.into(), value);
    }

    /// Returns the value of a variable, if it has one.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<bool> {
        self.0.get(variable).copied()
    }

    /// Returns the number of variables having a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff no variable has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the variables and their values, in the order of the variable names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S> FromIterator<(S, bool)> for Valuation
where
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Display for Valuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (variable, value) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{variable}={}", u8::from(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_set_overrides() {
        let mut valuation = Valuation::new();
        valuation.set("p", true);
        valuation.set("p", false);
        assert_eq!(1, valuation.len());
        assert_eq!(Some(false), valuation.get("p"));
    }

    #[test]
    fn test_empty() {
        let valuation = Valuation::new();
        assert!(valuation.is_empty());
        assert_eq!("", format!("{valuation}"));
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let v0 = Valuation::from_iter([("p", true), ("q", false)]);
        let v1 = Valuation::from_iter([("q", false), ("p", true)]);
        assert_eq!(v0, v1);
        let set = [v0, v1].into_iter().collect::<HashSet<_>>();
        assert_eq!(1, set.len());
    }
}
