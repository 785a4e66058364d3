//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The direction of optimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Minimize the objective value.
    Minimize,
    /// Maximize the objective value.
    Maximize,
}

/// How a constraint value is compared against its threshold.
///
/// A constraint is satisfied when the observed value lies strictly on the
/// declared side of the threshold. A missing or NaN value never satisfies
/// a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relation {
    /// Satisfied when the observed value is strictly below the threshold.
    LessThan,
    /// Satisfied when the observed value is strictly above the threshold.
    GreaterThan,
}

impl Relation {
    /// Returns `true` if `value` satisfies this relation against `threshold`.
    ///
    /// NaN comparisons are false, so NaN values are never satisfying.
    #[must_use]
    pub fn satisfied_by(self, value: f64, threshold: f64) -> bool {
        match self {
            Relation::LessThan => value < threshold,
            Relation::GreaterThan => value > threshold,
        }
    }
}
