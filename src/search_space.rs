//! Search-space declaration: variables, objective, and constraints.
//!
//! A [`SearchSpace`] is the configuration collaborator the controller is
//! constructed with: an ordered list of bounded variables, exactly one
//! objective with a direction, and zero or more constraint relations.
//! Variable order is significant: trust-region bounds and length-scale
//! vectors follow it.
//!
//! # Example
//!
//! ```
//! use turbo::prelude::*;
//!
//! let space = SearchSpace::builder()
//!     .variable("x1", 0.0, 1.0)
//!     .variable("x2", -5.0, 5.0)
//!     .objective("f", Direction::Minimize)
//!     .constraint("c", Relation::LessThan, 0.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(space.dim(), 2);
//! let feasible = Sample::from_iter([("x1", 0.5), ("x2", 0.0), ("f", 1.0), ("c", -1.0)]);
//! assert!(space.is_feasible(&feasible));
//! ```

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::types::{Direction, Relation};

/// A bounded scalar variable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    name: String,
    low: f64,
    high: f64,
}

impl Variable {
    /// Creates a variable with inclusive bounds `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high` or either bound
    /// is not finite.
    pub fn new(name: impl Into<String>, low: f64, high: f64) -> Result<Self> {
        let name = name.into();
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return Err(Error::InvalidBounds { name, low, high });
        }
        Ok(Self { name, low, high })
    }

    /// The variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The inclusive lower bound.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// The inclusive upper bound.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// The bound width `high - low`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// A constraint relation against a threshold.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    name: String,
    relation: Relation,
    threshold: f64,
}

impl Constraint {
    /// Creates a constraint on the output column `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, relation: Relation, threshold: f64) -> Self {
        Self {
            name: name.into(),
            relation,
            threshold,
        }
    }

    /// The constrained output column.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The comparison relation.
    #[must_use]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The comparison threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns `true` if the sample's value for this constraint satisfies
    /// the relation. A missing or NaN value does not.
    #[must_use]
    pub fn is_satisfied_by(&self, sample: &Sample) -> bool {
        sample
            .get(&self.name)
            .is_some_and(|v| self.relation.satisfied_by(v, self.threshold))
    }
}

/// The declared search space: ordered variables, one objective, and
/// constraint relations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpace {
    variables: Vec<Variable>,
    objective_name: String,
    direction: Direction,
    constraints: Vec<Constraint>,
}

impl SearchSpace {
    /// Creates a builder for declaring a search space.
    #[must_use]
    pub fn builder() -> SearchSpaceBuilder {
        SearchSpaceBuilder::new()
    }

    /// The number of variable dimensions.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.variables.len()
    }

    /// The declared variables, in order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The objective column name.
    #[must_use]
    pub fn objective_name(&self) -> &str {
        &self.objective_name
    }

    /// The optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The declared constraints, in order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns `true` if any constraints are declared.
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    /// The global bounds as `(lower, upper)` vectors in variable order.
    #[must_use]
    pub fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let lower = self.variables.iter().map(Variable::low).collect();
        let upper = self.variables.iter().map(Variable::high).collect();
        (lower, upper)
    }

    /// Returns `true` if the sample satisfies every declared constraint.
    ///
    /// A sample with no constraints declared is always feasible. A missing
    /// or NaN constraint value makes the sample infeasible.
    #[must_use]
    pub fn is_feasible(&self, sample: &Sample) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(sample))
    }

    /// The sample's objective value in minimize form, or `None` when the
    /// value is missing or non-finite.
    ///
    /// Maximize objectives are negated so that smaller is always better;
    /// every comparison inside the controller runs on this form.
    #[must_use]
    pub fn objective_minimize_form(&self, sample: &Sample) -> Option<f64> {
        let value = sample.get(&self.objective_name).filter(|v| v.is_finite())?;
        Some(match self.direction {
            Direction::Minimize => value,
            Direction::Maximize => -value,
        })
    }

    /// The sample's variable values in variable order, or `None` when any
    /// variable is missing or non-finite.
    #[must_use]
    pub fn variable_values(&self, sample: &Sample) -> Option<Vec<f64>> {
        self.variables
            .iter()
            .map(|v| sample.get(v.name()).filter(|x| x.is_finite()))
            .collect()
    }
}

/// Builder for a [`SearchSpace`].
///
/// Validation happens in [`build`](Self::build): at least one variable,
/// exactly one objective, valid bounds, and unique names.
#[derive(Debug, Default)]
pub struct SearchSpaceBuilder {
    variables: Vec<(String, f64, f64)>,
    objective: Option<(String, Direction)>,
    constraints: Vec<Constraint>,
}

impl SearchSpaceBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable with inclusive bounds `[low, high]`.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, low: f64, high: f64) -> Self {
        self.variables.push((name.into(), low, high));
        self
    }

    /// Declares the objective column and its direction.
    ///
    /// Calling this twice keeps the last declaration.
    #[must_use]
    pub fn objective(mut self, name: impl Into<String>, direction: Direction) -> Self {
        self.objective = Some((name.into(), direction));
        self
    }

    /// Declares a constraint relation on an output column.
    #[must_use]
    pub fn constraint(mut self, name: impl Into<String>, relation: Relation, threshold: f64) -> Self {
        self.constraints.push(Constraint::new(name, relation, threshold));
        self
    }

    /// Builds the search space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySearchSpace`] when no variables were declared,
    /// [`Error::MissingObjective`] when no objective was declared,
    /// [`Error::InvalidBounds`] for a variable with `low > high` or
    /// non-finite bounds, and [`Error::DuplicateName`] when two variables
    /// or two constraints share a name.
    pub fn build(self) -> Result<SearchSpace> {
        if self.variables.is_empty() {
            return Err(Error::EmptySearchSpace);
        }
        let (objective_name, direction) = self.objective.ok_or(Error::MissingObjective)?;

        let mut variables = Vec::with_capacity(self.variables.len());
        for (name, low, high) in self.variables {
            if variables.iter().any(|v: &Variable| v.name() == name) {
                return Err(Error::DuplicateName(name));
            }
            variables.push(Variable::new(name, low, high)?);
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.constraints.len());
        for c in &self.constraints {
            if seen.contains(&c.name()) {
                return Err(Error::DuplicateName(c.name().to_string()));
            }
            seen.push(c.name());
        }

        Ok(SearchSpace {
            variables,
            objective_name,
            direction,
            constraints: self.constraints,
        })
    }
}
