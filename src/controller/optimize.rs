//! The model-scaled optimize variant.

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::search_space::SearchSpace;
use crate::surrogate::Surrogate;

use super::{
    Controller, ControllerState, CoreConfig, TrustRegion, best_candidate, collect_candidates,
    geometric_mean,
};

/// Trust-region controller centered on the best feasible observation,
/// with per-dimension scaling from the surrogate's length-scales.
///
/// The region half-width along dimension `i` is
/// `0.5 * length[i] * w[i] * (high[i] - low[i])` where
/// `w[i] = length_scale[i] / geometric_mean(length_scales)`: dimensions
/// the model found insensitive (large scale) get a wider region. A fitted
/// surrogate must therefore be supplied to
/// [`trust_region`](Controller::trust_region).
///
/// A batch counts as a success when its best feasible objective strictly
/// improves on the best of all earlier rows; everything else, including
/// an entirely infeasible batch, is a failure.
///
/// # Examples
///
/// ```
/// use turbo::prelude::*;
///
/// let space = SearchSpace::builder()
///     .variable("x", 0.0, 2.0)
///     .objective("f", Direction::Minimize)
///     .build()
///     .unwrap();
/// let mut controller = OptimizeController::new(space).unwrap();
///
/// let history = vec![Sample::from_iter([("x", 1.0), ("f", 0.5)])];
/// controller.update_state(&history).unwrap();
///
/// let model = FixedLengthScales::uniform(1);
/// let region = controller.trust_region(Some(&model)).unwrap();
/// // initial length 0.25 over a width-2 bound: half-width 0.25
/// assert!((region.lower()[0] - 0.75).abs() < 1e-12);
/// assert!((region.upper()[0] - 1.25).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeController {
    state: ControllerState,
}

impl OptimizeController {
    /// Creates a controller with default settings over the given space.
    ///
    /// # Errors
    ///
    /// Propagates configuration validation; with defaults this only fails
    /// if the defaults are overridden to something inconsistent, so plain
    /// `new` is effectively infallible for a valid space.
    pub fn new(space: SearchSpace) -> Result<Self> {
        Self::builder(space).build()
    }

    /// Creates a builder for configuring the controller.
    #[must_use]
    pub fn builder(space: SearchSpace) -> OptimizeControllerBuilder {
        OptimizeControllerBuilder {
            space,
            config: CoreConfig::default(),
        }
    }
}

impl Controller for OptimizeController {
    fn update_state(&mut self, history: &[Sample]) -> Result<()> {
        let candidates = collect_candidates(self.state.space(), history)?;

        let best = best_candidate(&candidates);
        self.state
            .set_center(best.variables.clone(), best.objective);

        // Strict improvement of the newest batch over everything before it.
        let start = self.state.recent_start(history.len());
        let recent_best = candidates
            .iter()
            .filter(|c| c.index >= start)
            .map(|c| c.objective)
            .fold(f64::INFINITY, f64::min);
        let prior_best = candidates
            .iter()
            .filter(|c| c.index < start)
            .map(|c| c.objective)
            .fold(f64::INFINITY, f64::min);
        let success = recent_best.is_finite() && recent_best < prior_best;

        self.state.record(success);
        self.state.resize_on_thresholds();
        Ok(())
    }

    fn trust_region(&self, model: Option<&dyn Surrogate>) -> Result<TrustRegion> {
        if self.state.center().is_none() {
            return Err(Error::NotInitialized);
        }
        let model = model.ok_or(Error::MissingModel)?;
        let scales = model.length_scales();
        let dim = self.state.space().dim();
        if scales.len() != dim {
            return Err(Error::LengthScaleDimensionMismatch {
                expected: dim,
                got: scales.len(),
            });
        }

        // Normalize scales by their geometric mean so the weights have
        // unit volume; degenerate scale vectors weight uniformly.
        let gm = geometric_mean(scales);
        let uniform = !(gm.is_finite() && gm > 0.0);

        let half_widths: Vec<f64> = self
            .state
            .lengths()
            .iter()
            .zip(self.state.space().variables())
            .enumerate()
            .map(|(i, (&length, var))| {
                let weight = if uniform { 1.0 } else { scales[i] / gm };
                0.5 * length * weight * var.width()
            })
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

/// Builder for an [`OptimizeController`].
///
/// All options have documented defaults:
/// - `success_tolerance`: 2
/// - `failure_tolerance`: 2
/// - `batch_size`: 1
/// - `initial_length`: 0.25
/// - `length_min`: `0.5^7`
/// - `length_max`: 1.0
/// - `scale_factor`: 2.0
#[derive(Debug)]
pub struct OptimizeControllerBuilder {
    space: SearchSpace,
    config: CoreConfig,
}

impl OptimizeControllerBuilder {
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

    /// Builds the configured controller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTolerance`] for a zero tolerance and
    /// [`Error::InvalidConfig`] for inconsistent length or scale settings.
    pub fn build(self) -> Result<OptimizeController> {
        Ok(OptimizeController {
            state: ControllerState::new(self.space, self.config)?,
        })
    }
}
