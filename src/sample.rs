//! Evaluation history rows.

use std::collections::HashMap;

/// One evaluated point: variable, objective, and constraint values keyed
/// by column name.
///
/// The evaluation loop appends one `Sample` per finished evaluation; the
/// controller consumes the accumulated slice in evaluation order. Values
/// may be missing (an evaluation that failed to produce a constraint
/// output simply omits the column), and a missing value never counts as
/// feasible.
///
/// # Examples
///
/// ```
/// use turbo::Sample;
///
/// let sample = Sample::from_iter([("x", 0.5), ("f", 1.0), ("c", -1.0)]);
/// assert_eq!(sample.get("x"), Some(0.5));
/// assert_eq!(sample.get("missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    values: HashMap<String, f64>,
}

impl Sample {
    /// Creates an empty sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Inserts or overwrites the value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Fluent variant of [`insert`](Self::insert) for building fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Sample {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
