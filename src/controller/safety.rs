//! The constraint-driven safety variant.

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::search_space::SearchSpace;
use crate::surrogate::Surrogate;

use super::{
    Controller, ControllerState, CoreConfig, TrustRegion, best_candidate, collect_candidates,
};

/// Default feasible fraction the newest batch must exceed to count as a
/// success.
const DEFAULT_MIN_FEASIBLE_FRACTION: f64 = 0.75;

/// Trust-region controller for safety-constrained experiments.
///
/// The center is the **mean** of all feasible observed points rather than
/// the single best one, and the region half-width along dimension `i` is
/// the purely geometric `0.5 * length[i] * (high[i] - low[i])`. No
/// surrogate model is consulted; one passed to
/// [`trust_region`](Controller::trust_region) is ignored.
///
/// Success counting is conservative: the newest batch succeeds only when
/// more than `min_feasible_fraction` of its rows are feasible. An
/// infeasible row always counts against the batch, no matter how
/// attractive its objective value, so the region shrinks away from the
/// constraint boundary on danger.
///
/// # Examples
///
/// ```
/// use turbo::prelude::*;
///
/// let space = SearchSpace::builder()
///     .variable("x", 0.0, core::f64::consts::TAU)
///     .objective("f", Direction::Minimize)
///     .constraint("c", Relation::LessThan, 0.0)
///     .build()
///     .unwrap();
/// let mut controller = SafetyController::new(space).unwrap();
///
/// let history = vec![
///     Sample::from_iter([("x", 0.5), ("f", 1.0), ("c", -1.0)]),
///     Sample::from_iter([("x", 1.0), ("f", 1.0), ("c", -1.0)]),
///     Sample::from_iter([("x", 1.5), ("f", 1.0), ("c", 1.0)]),
/// ];
/// controller.update_state(&history).unwrap();
///
/// // Center is the mean of the two feasible points.
/// assert_eq!(controller.center(), Some(&[0.75][..]));
/// // The newest row is infeasible, so the batch failed.
/// assert_eq!(controller.failure_counter(), 1);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyController {
    state: ControllerState,
    min_feasible_fraction: f64,
}

impl SafetyController {
    /// Creates a controller with default settings over the given space.
    ///
    /// # Errors
    ///
    /// Propagates configuration validation; defaults are always valid.
    pub fn new(space: SearchSpace) -> Result<Self> {
        Self::builder(space).build()
    }

    /// Creates a builder for configuring the controller.
    #[must_use]
    pub fn builder(space: SearchSpace) -> SafetyControllerBuilder {
        SafetyControllerBuilder {
            space,
            config: CoreConfig::default(),
            min_feasible_fraction: DEFAULT_MIN_FEASIBLE_FRACTION,
        }
    }

    /// The feasible fraction the newest batch must exceed to succeed.
    #[must_use]
    pub fn min_feasible_fraction(&self) -> f64 {
        self.min_feasible_fraction
    }
}

impl Controller for SafetyController {
    #[allow(clippy::cast_precision_loss)]
    fn update_state(&mut self, history: &[Sample]) -> Result<()> {
        let candidates = collect_candidates(self.state.space(), history)?;

        // Center on the mean of all feasible points; best value is still
        // the feasible minimum, kept for diagnostics.
        let dim = self.state.space().dim();
        let mut center = vec![0.0; dim];
        for candidate in &candidates {
            for (acc, v) in center.iter_mut().zip(&candidate.variables) {
                *acc += v;
            }
        }
        let n = candidates.len() as f64;
        for v in &mut center {
            *v /= n;
        }
        let best = best_candidate(&candidates).objective;
        self.state.set_center(center, best);

        // Feasible-fraction rule over the newest batch, feasibility only.
        let start = self.state.recent_start(history.len());
        let recent = &history[start..];
        let feasible = recent
            .iter()
            .filter(|s| self.state.space().is_feasible(s))
            .count();
        let fraction = feasible as f64 / recent.len() as f64;
        let success = fraction > self.min_feasible_fraction;

        self.state.record(success);
        self.state.resize_on_thresholds();
        Ok(())
    }

    fn trust_region(&self, _model: Option<&dyn Surrogate>) -> Result<TrustRegion> {
        let half_widths: Vec<f64> = self
            .state
            .lengths()
            .iter()
            .zip(self.state.space().variables())
            .map(|(&length, var)| 0.5 * length * var.width())
            .collect();
        self.state.clamp_region(&half_widths)
    }

    fn space(&self) -> &SearchSpace {
        self.state.space()
    }

    fn lengths(&self) -> &[f64] {
        self.state.lengths()
    }

    fn success_counter(&self) -> usize {
        self.state.success_counter()
    }

    fn failure_counter(&self) -> usize {
        self.state.failure_counter()
    }

    fn center(&self) -> Option<&[f64]> {
        self.state.center()
    }

    fn best_value(&self) -> f64 {
        self.state.best_value()
    }
}

/// Builder for a [`SafetyController`].
///
/// Shares the [`OptimizeControllerBuilder`](super::OptimizeControllerBuilder)
/// defaults, plus:
/// - `min_feasible_fraction`: 0.75
#[derive(Debug)]
pub struct SafetyControllerBuilder {
    space: SearchSpace,
    config: CoreConfig,
    min_feasible_fraction: f64,
}

impl SafetyControllerBuilder {
    /// Sets the success streak length that triggers expansion. Default: 2.
    #[must_use]
    pub fn success_tolerance(mut self, n: usize) -> Self {
        self.config.success_tolerance = n;
        self
    }

    /// Sets the failure streak length that triggers shrinkage. Default: 2.
    #[must_use]
    pub fn failure_tolerance(mut self, n: usize) -> Self {
        self.config.failure_tolerance = n;
        self
    }

    /// Sets how many trailing history rows form the newest batch.
    /// Default: 1.
    #[must_use]
    pub fn batch_size(mut self, n: usize) -> Self {
        self.config.batch_size = n;
        self
    }

    /// Sets the starting per-dimension length, relative to normalized
    /// bounds. Default: 0.25.
    #[must_use]
    pub fn initial_length(mut self, length: f64) -> Self {
        self.config.initial_length = length;
        self
    }

    /// Sets the length floor. Default: `0.5^7`.
    #[must_use]
    pub fn length_min(mut self, length: f64) -> Self {
        self.config.length_min = length;
        self
    }

    /// Sets the length ceiling. Default: 1.0.
    #[must_use]
    pub fn length_max(mut self, length: f64) -> Self {
        self.config.length_max = length;
        self
    }

    /// Sets the multiplicative resize factor. Default: 2.0.
    #[must_use]
    pub fn scale_factor(mut self, factor: f64) -> Self {
        self.config.scale_factor = factor;
        self
    }

    /// Sets the feasible fraction the newest batch must exceed to count
    /// as a success. Default: 0.75.
    #[must_use]
    pub fn min_feasible_fraction(mut self, fraction: f64) -> Self {
        self.min_feasible_fraction = fraction;
        self
    }

    /// Builds the configured controller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTolerance`](crate::Error::InvalidTolerance)
    /// for a zero tolerance and
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) for
    /// inconsistent length, scale, or fraction settings.
    pub fn build(self) -> Result<SafetyController> {
        if !(self.min_feasible_fraction >= 0.0 && self.min_feasible_fraction < 1.0) {
            return Err(Error::InvalidConfig(
                "min_feasible_fraction must lie in [0, 1)",
            ));
        }
        Ok(SafetyController {
            state: ControllerState::new(self.space, self.config)?,
            min_feasible_fraction: self.min_feasible_fraction,
        })
    }
}
