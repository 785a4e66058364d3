#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a variable's lower bound is greater than its upper bound.
    #[error("invalid bounds for '{name}': low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The name of the offending variable.
        name: String,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a search space is built without any variables.
    #[error("search space must declare at least one variable")]
    EmptySearchSpace,

    /// Returned when a search space is built without an objective.
    #[error("search space must declare an objective")]
    MissingObjective,

    /// Returned when two variables or constraints share a name.
    #[error("duplicate name '{0}' in search space")]
    DuplicateName(String),

    /// Returned when a success or failure tolerance is zero.
    #[error("invalid tolerance: {name} must be at least 1")]
    InvalidTolerance {
        /// Which tolerance was rejected.
        name: &'static str,
    },

    /// Returned when controller length/scale settings are inconsistent.
    #[error("invalid controller configuration: {0}")]
    InvalidConfig(&'static str),

    /// Returned when `update_state` is called with an empty history table.
    #[error("evaluation history is empty")]
    EmptyHistory,

    /// Returned when constraints are declared but no history row satisfies
    /// them all. The controller will not pick an infeasible center; the
    /// caller must supply a feasible seed point or relax the constraints.
    #[error("no feasible points in the evaluation history")]
    NoFeasiblePoints,

    /// Returned when no history row carries a finite objective value.
    #[error("no history row has a finite objective value")]
    NoObjectiveValues,

    /// Returned when `trust_region` is called before any successful
    /// `update_state`. Signals a sequencing error in the caller.
    #[error("controller has no center point yet; call update_state first")]
    NotInitialized,

    /// Returned when the optimize variant's `trust_region` is called
    /// without a surrogate model.
    #[error("a fitted surrogate model is required to compute the trust region")]
    MissingModel,

    /// Returned when the surrogate's length-scale vector does not match
    /// the search-space dimensionality.
    #[error("length-scale dimension mismatch: expected {expected} scales but got {got}")]
    LengthScaleDimensionMismatch {
        /// The search-space dimensionality.
        expected: usize,
        /// The number of length-scales supplied by the model.
        got: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
