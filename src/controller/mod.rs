//! The trust-region state machine and its two variants.
//!
//! Both controllers share one state machine: a per-dimension length
//! vector, a success counter, and a failure counter. Every call to
//! [`Controller::update_state`] recomputes the best feasible point from
//! the full history, classifies the most recent batch as a success or a
//! failure, and resizes the region when a counter reaches its tolerance.
//! What differs between the variants is the center rule and the region
//! geometry:
//!
//! - [`OptimizeController`] centers on the single best feasible point and
//!   scales each dimension by the surrogate's length-scales.
//! - [`SafetyController`] centers on the mean of all feasible points and
//!   uses a fixed geometric scaling, no model required.
//!
//! State is owned exclusively by the caller and mutated in place; run one
//! controller per optimization run and drop it when the run ends.

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::search_space::SearchSpace;
use crate::surrogate::Surrogate;

mod optimize;
mod safety;

pub use optimize::{OptimizeController, OptimizeControllerBuilder};
pub use safety::{SafetyController, SafetyControllerBuilder};

/// Default success streak length that triggers expansion.
pub(crate) const DEFAULT_SUCCESS_TOLERANCE: usize = 2;
/// Default failure streak length that triggers shrinkage.
pub(crate) const DEFAULT_FAILURE_TOLERANCE: usize = 2;
/// Default number of trailing history rows treated as the newest batch.
pub(crate) const DEFAULT_BATCH_SIZE: usize = 1;
/// Default initial per-dimension length, relative to normalized bounds.
pub(crate) const DEFAULT_INITIAL_LENGTH: f64 = 0.25;
/// Default length floor: `0.5^7`. A region this small terminates shrinkage.
pub(crate) const DEFAULT_LENGTH_MIN: f64 = 0.007_812_5;
/// Default length ceiling: the full normalized bound width.
pub(crate) const DEFAULT_LENGTH_MAX: f64 = 1.0;
/// Default multiplicative resize factor (double on expand, halve on shrink).
pub(crate) const DEFAULT_SCALE_FACTOR: f64 = 2.0;

/// A feasible trust-region box, clamped to the global variable bounds.
///
/// Bounds are in search-space variable order and satisfy
/// `global_low[i] <= lower[i] <= upper[i] <= global_high[i]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrustRegion {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl TrustRegion {
    /// The lower bound per dimension.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// The upper bound per dimension.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Consumes the region into `(lower, upper)` vectors.
    #[must_use]
    pub fn into_bounds(self) -> (Vec<f64>, Vec<f64>) {
        (self.lower, self.upper)
    }
}

/// The shared contract of both trust-region controllers.
///
/// The evaluation loop calls [`update_state`](Self::update_state) once per
/// finished batch with the full accumulated history; the candidate
/// generator calls [`trust_region`](Self::trust_region) on demand. The
/// remaining methods give diagnostics and tests read access to the
/// internal counters.
pub trait Controller {
    /// Recomputes the center from the full history, classifies the newest
    /// batch as a success or failure, and resizes the region when a
    /// counter reaches its tolerance.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyHistory`] when `history` has no rows.
    /// - [`Error::NoFeasiblePoints`] when constraints are declared and no
    ///   row satisfies them all (fatal for this update; the controller
    ///   never falls back to an infeasible center).
    /// - [`Error::NoObjectiveValues`] when no usable row carries a finite
    ///   objective value.
    fn update_state(&mut self, history: &[Sample]) -> Result<()>;

    /// Materializes the current trust region, clamped to the global
    /// bounds. Edges falling outside the declared bounds are silently
    /// truncated; that is policy, not an error.
    ///
    /// # Errors
    ///
    /// - [`Error::NotInitialized`] before the first successful
    ///   [`update_state`](Self::update_state).
    /// - [`Error::MissingModel`] when the variant requires a surrogate
    ///   and `model` is `None`.
    /// - [`Error::LengthScaleDimensionMismatch`] when the supplied
    ///   length-scale vector does not match the search-space dimension.
    fn trust_region(&self, model: Option<&dyn Surrogate>) -> Result<TrustRegion>;

    /// The search space this controller was constructed with.
    fn space(&self) -> &SearchSpace;

    /// The search-space dimensionality.
    fn dim(&self) -> usize {
        self.space().dim()
    }

    /// Per-dimension region lengths, each within `[length_min, length_max]`.
    fn lengths(&self) -> &[f64];

    /// Consecutive-success count since the last expansion.
    fn success_counter(&self) -> usize;

    /// Consecutive-failure count since the last shrinkage.
    fn failure_counter(&self) -> usize;

    /// The current center point in variable order, or `None` before the
    /// first successful update.
    fn center(&self) -> Option<&[f64]>;

    /// The objective value at the center, in minimize form. `+inf` before
    /// the first successful update.
    fn best_value(&self) -> f64;
}

/// Shared knobs of both variants, resolved by the builders.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CoreConfig {
    pub(crate) success_tolerance: usize,
    pub(crate) failure_tolerance: usize,
    pub(crate) batch_size: usize,
    pub(crate) initial_length: f64,
    pub(crate) length_min: f64,
    pub(crate) length_max: f64,
    pub(crate) scale_factor: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            success_tolerance: DEFAULT_SUCCESS_TOLERANCE,
            failure_tolerance: DEFAULT_FAILURE_TOLERANCE,
            batch_size: DEFAULT_BATCH_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            length_min: DEFAULT_LENGTH_MIN,
            length_max: DEFAULT_LENGTH_MAX,
            scale_factor: DEFAULT_SCALE_FACTOR,
        }
    }
}

impl CoreConfig {
    fn validate(&self) -> Result<()> {
        if self.success_tolerance == 0 {
            return Err(Error::InvalidTolerance {
                name: "success_tolerance",
            });
        }
        if self.failure_tolerance == 0 {
            return Err(Error::InvalidTolerance {
                name: "failure_tolerance",
            });
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1"));
        }
        if !(self.length_min > 0.0 && self.length_min.is_finite()) {
            return Err(Error::InvalidConfig("length_min must be positive and finite"));
        }
        if !(self.length_max >= self.length_min && self.length_max.is_finite()) {
            return Err(Error::InvalidConfig("length_max must be at least length_min"));
        }
        if !(self.initial_length >= self.length_min && self.initial_length <= self.length_max) {
            return Err(Error::InvalidConfig(
                "initial_length must lie within [length_min, length_max]",
            ));
        }
        if !(self.scale_factor > 1.0 && self.scale_factor.is_finite()) {
            return Err(Error::InvalidConfig("scale_factor must be greater than 1"));
        }
        Ok(())
    }
}

/// The mutable state both variants drive.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct ControllerState {
    space: SearchSpace,
    lengths: Vec<f64>,
    length_min: f64,
    length_max: f64,
    scale_factor: f64,
    success_counter: usize,
    failure_counter: usize,
    success_tolerance: usize,
    failure_tolerance: usize,
    batch_size: usize,
    center: Option<Vec<f64>>,
    best_value: f64,
}

impl ControllerState {
    pub(crate) fn new(space: SearchSpace, config: CoreConfig) -> Result<Self> {
        config.validate()?;
        let dim = space.dim();
        Ok(Self {
            space,
            lengths: vec![config.initial_length; dim],
            length_min: config.length_min,
            length_max: config.length_max,
            scale_factor: config.scale_factor,
            success_counter: 0,
            failure_counter: 0,
            success_tolerance: config.success_tolerance,
            failure_tolerance: config.failure_tolerance,
            batch_size: config.batch_size,
            center: None,
            best_value: f64::INFINITY,
        })
    }

    pub(crate) fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub(crate) fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub(crate) fn success_counter(&self) -> usize {
        self.success_counter
    }

    pub(crate) fn failure_counter(&self) -> usize {
        self.failure_counter
    }

    pub(crate) fn center(&self) -> Option<&[f64]> {
        self.center.as_deref()
    }

    pub(crate) fn best_value(&self) -> f64 {
        self.best_value
    }

    /// Index of the first row of the newest batch.
    pub(crate) fn recent_start(&self, history_len: usize) -> usize {
        history_len.saturating_sub(self.batch_size)
    }

    pub(crate) fn set_center(&mut self, center: Vec<f64>, best_value: f64) {
        trace_debug!(best_value, "center updated");
        self.center = Some(center);
        self.best_value = best_value;
    }

    /// Records the newest batch's classification. Incrementing one counter
    /// zeroes the other, so at most one is ever nonzero.
    pub(crate) fn record(&mut self, success: bool) {
        if success {
            self.success_counter += 1;
            self.failure_counter = 0;
        } else {
            self.failure_counter += 1;
            self.success_counter = 0;
        }
        trace_debug!(
            success,
            success_counter = self.success_counter,
            failure_counter = self.failure_counter,
            "batch classified"
        );
    }

    /// Expands or shrinks every length when a counter hits its tolerance,
    /// then resets that counter.
    pub(crate) fn resize_on_thresholds(&mut self) {
        if self.success_counter >= self.success_tolerance {
            for l in &mut self.lengths {
                *l = (*l * self.scale_factor).min(self.length_max);
            }
            self.success_counter = 0;
            trace_info!(lengths = ?self.lengths, "trust region expanded");
        } else if self.failure_counter >= self.failure_tolerance {
            for l in &mut self.lengths {
                *l = (*l / self.scale_factor).max(self.length_min);
            }
            self.failure_counter = 0;
            trace_info!(lengths = ?self.lengths, "trust region shrunk");
        }
    }

    /// Builds the region `center ± half_width`, truncated to the global
    /// bounds.
    pub(crate) fn clamp_region(&self, half_widths: &[f64]) -> Result<TrustRegion> {
        let center = self.center.as_ref().ok_or(Error::NotInitialized)?;
        let mut lower = Vec::with_capacity(center.len());
        let mut upper = Vec::with_capacity(center.len());
        for ((&c, &hw), var) in center
            .iter()
            .zip(half_widths)
            .zip(self.space.variables())
        {
            lower.push((c - hw).max(var.low()));
            upper.push((c + hw).min(var.high()));
        }
        Ok(TrustRegion { lower, upper })
    }
}

/// A usable history row: feasible, complete variable values, finite
/// objective. Only these rows can supply a center.
#[derive(Clone, Debug)]
pub(crate) struct Candidate {
    pub(crate) index: usize,
    pub(crate) variables: Vec<f64>,
    pub(crate) objective: f64,
}

/// Collects candidate rows from the history in evaluation order.
pub(crate) fn collect_candidates(space: &SearchSpace, history: &[Sample]) -> Result<Vec<Candidate>> {
    if history.is_empty() {
        return Err(Error::EmptyHistory);
    }
    let mut any_feasible = false;
    let mut candidates = Vec::new();
    for (index, sample) in history.iter().enumerate() {
        if !space.is_feasible(sample) {
            continue;
        }
        any_feasible = true;
        let (Some(variables), Some(objective)) = (
            space.variable_values(sample),
            space.objective_minimize_form(sample),
        ) else {
            continue;
        };
        candidates.push(Candidate {
            index,
            variables,
            objective,
        });
    }
    if candidates.is_empty() {
        if space.has_constraints() && !any_feasible {
            return Err(Error::NoFeasiblePoints);
        }
        return Err(Error::NoObjectiveValues);
    }
    Ok(candidates)
}

/// The candidate with the smallest minimize-form objective; ties keep the
/// earliest row.
pub(crate) fn best_candidate(candidates: &[Candidate]) -> &Candidate {
    let mut best = &candidates[0];
    for c in &candidates[1..] {
        if c.objective < best.objective {
            best = c;
        }
    }
    best
}

/// Geometric mean of a positive vector. Zero or NaN when an entry is
/// non-positive or non-finite; callers treat anything that is not a
/// positive finite value as "weight uniformly".
pub(crate) fn geometric_mean(values: &[f64]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / n).exp()
}
