#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Adaptive trust-region controller for Bayesian optimization loops,
//! in the style of `TuRBO` (trust-region Bayesian optimization).
//!
//! The controller watches the history of evaluated points and maintains a
//! hyper-rectangular region around the running best point. Streaks of
//! improving batches expand the region; streaks of non-improving (or
//! constraint-violating) batches shrink it. The surrounding machinery
//! (surrogate model fitting, acquisition optimization, the evaluation
//! loop itself) lives elsewhere; this crate only owns the
//! region-adaptation state machine and its best-point policy.
//!
//! # Getting Started
//!
//! ```
//! use turbo::prelude::*;
//!
//! let space = SearchSpace::builder()
//!     .variable("x", 0.0, 1.0)
//!     .objective("f", Direction::Minimize)
//!     .build()
//!     .unwrap();
//!
//! let mut controller = OptimizeController::new(space).unwrap();
//!
//! let history = vec![
//!     Sample::from_iter([("x", 0.3), ("f", 1.2)]),
//!     Sample::from_iter([("x", 0.6), ("f", 0.4)]),
//! ];
//! controller.update_state(&history).unwrap();
//!
//! let model = FixedLengthScales::new(vec![1.0]);
//! let region = controller.trust_region(Some(&model)).unwrap();
//! assert!(region.lower()[0] >= 0.0);
//! assert!(region.upper()[0] <= 1.0);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`SearchSpace`] | Declare variables with bounds, the objective, and constraint relations. |
//! | [`Sample`] | One evaluated point: variable, objective, and constraint values by name. |
//! | [`Controller`](controller::Controller) | The shared contract: `update_state` + `trust_region` + counter access. |
//! | [`OptimizeController`] | Center on the best feasible point; scale the region by model length-scales. |
//! | [`SafetyController`] | Center on the mean of feasible points; fixed geometric scaling, no model. |
//! | [`Surrogate`](surrogate::Surrogate) | The narrow model capability the optimize variant queries: per-dimension length-scales. |
//!
//! # Choosing a variant
//!
//! - [`OptimizeController`] is the usual choice for plain minimization or
//!   maximization: it chases the best feasible observation and lets the
//!   surrogate's learned length-scales stretch the region along
//!   insensitive dimensions.
//! - [`SafetyController`] suits safety-constrained experiments where an
//!   infeasible evaluation is costly: a batch that strays infeasible
//!   counts as a failure no matter how attractive its objective value,
//!   so the region contracts away from danger.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public types, including controller state | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at resize and center updates | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod controller;
mod error;
mod sample;
pub mod search_space;
pub mod surrogate;
mod types;

pub use controller::{Controller, OptimizeController, SafetyController, TrustRegion};
pub use error::{Error, Result};
pub use sample::Sample;
pub use search_space::{Constraint, SearchSpace, SearchSpaceBuilder, Variable};
pub use surrogate::{FixedLengthScales, Surrogate};
pub use types::{Direction, Relation};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use turbo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::controller::{Controller, OptimizeController, SafetyController, TrustRegion};
    pub use crate::error::{Error, Result};
    pub use crate::sample::Sample;
    pub use crate::search_space::{Constraint, SearchSpace, SearchSpaceBuilder, Variable};
    pub use crate::surrogate::{FixedLengthScales, Surrogate};
    pub use crate::types::{Direction, Relation};
}
