//! Exponential smoothing of angles on the circle.
//!
//! A linear EMA on raw angles breaks at the ±π seam: averaging 179° and
//! -179° gives 0° instead of 180°. This filter moves along the shortest arc.

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;

/// Wrap an angle in radians to `[-π, π]`.
#[inline]
pub fn wrap_angle(rad: f32) -> f32 {
    rad.sin().atan2(rad.cos())
}

/// Signed shortest arc from `from` to `to`, in `[-π, π]`.
#[inline]
pub fn circular_difference(to: f32, from: f32) -> f32 {
    wrap_angle(to - from)
}

/// Circular EMA over angles in radians.
///
/// The first sample (after construction without an initial angle, or after
/// [`Filter::reset`] of such a filter) is adopted as-is. Each later sample
/// moves the estimate by `α·Δθ`, where `Δθ` is the signed shortest arc to
/// the input.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
/// use std::f32::consts::PI;
///
/// let mut heading = AngleEma::new(0.5, None)?;
/// heading.update(PI - 0.1)?;
/// let y = heading.update(-PI + 0.1)?;
/// // Moved across the seam, not through zero.
/// assert!(y.abs() > PI - 0.01);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AngleEma {
    alpha: f32,
    initial: Option<f32>,
    estimate: Option<f32>,
    count: u64,
}

impl AngleEma {
    /// Default smoothing coefficient.
    pub const DEFAULT_ALPHA: f32 = 0.25;

    /// Create a filter with coefficient `alpha` in `(0, 1]`.
    ///
    /// With `initial = None` the first sample seeds the estimate.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `alpha` is outside `(0, 1]` or
    /// `initial` is not finite.
    pub fn new(alpha: f32, initial: Option<f32>) -> FilterResult<Self> {
        let alpha = ConfigurationError::coefficient("alpha", alpha)?;
        let initial = initial
            .map(|rad| ConfigurationError::finite("initial", rad).map(wrap_angle))
            .transpose()?;
        Ok(Self {
            alpha,
            initial,
            estimate: initial,
            count: 0,
        })
    }

    /// Current smoothing coefficient.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Replace the smoothing coefficient.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `alpha` is outside `(0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) -> FilterResult<()> {
        self.alpha = ConfigurationError::coefficient("alpha", alpha)?;
        Ok(())
    }

    /// Current estimate in `[-π, π]`, or `None` before the first sample.
    pub fn value(&self) -> Option<f32> {
        self.estimate
    }

    /// Reset and seed the estimate with `rad` (wrapped to `[-π, π]`).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `rad` is not finite.
    pub fn reset_to(&mut self, rad: f32) -> FilterResult<()> {
        let rad = ConfigurationError::finite("rad", rad)?;
        self.estimate = Some(wrap_angle(rad));
        self.count = 0;
        Ok(())
    }
}

impl Default for AngleEma {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            initial: None,
            estimate: None,
            count: 0,
        }
    }
}

impl Filter for AngleEma {
    #[inline]
    fn update(&mut self, rad: f32) -> FilterResult<f32> {
        let input = wrap_angle(rad);
        let next = match self.estimate {
            None => input,
            Some(current) => {
                let delta = circular_difference(input, current);
                wrap_angle(current + self.alpha * delta)
            }
        };
        self.estimate = Some(next);
        self.count = self.count.saturating_add(1);
        Ok(next)
    }

    fn reset(&mut self) {
        self.estimate = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}
