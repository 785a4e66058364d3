//! The surrogate-model collaborator, reduced to the narrowest capability
//! the controller needs.
//!
//! The optimize variant stretches its trust region along dimensions the
//! surrogate has learned to be insensitive (large length-scale) and
//! squeezes it along sensitive ones. Rather than coupling to any
//! particular Gaussian-process crate, the controller queries a single
//! capability: per-dimension length-scales in search-space variable order.

/// Read-only access to a fitted surrogate's per-dimension length-scales.
///
/// Implement this for whatever model type the surrounding optimization
/// loop uses; an ARD kernel's length-scale vector is the usual source.
pub trait Surrogate {
    /// Learned length-scales, one per search-space variable, in variable
    /// order. Entries are expected to be positive and finite.
    fn length_scales(&self) -> &[f64];
}

/// A [`Surrogate`] that returns a fixed length-scale vector.
///
/// Useful in tests and for callers whose model exposes length-scales as a
/// plain vector.
///
/// # Examples
///
/// ```
/// use turbo::{FixedLengthScales, Surrogate};
///
/// let model = FixedLengthScales::new(vec![1.0, 4.0]);
/// assert_eq!(model.length_scales(), &[1.0, 4.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedLengthScales {
    scales: Vec<f64>,
}

impl FixedLengthScales {
    /// Wraps a length-scale vector.
    #[must_use]
    pub fn new(scales: Vec<f64>) -> Self {
        Self { scales }
    }

    /// Unit length-scales for `dim` dimensions: every dimension weighted
    /// equally.
    #[must_use]
    pub fn uniform(dim: usize) -> Self {
        Self {
            scales: vec![1.0; dim],
        }
    }
}

impl Surrogate for FixedLengthScales {
    fn length_scales(&self) -> &[f64] {
        &self.scales
    }
}
