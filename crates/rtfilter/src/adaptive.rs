//! Exponential smoothing whose coefficient follows the input's rate of change.

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;

/// Adaptive EMA.
///
/// With `Δ = |x − x_prev|`, the per-sample coefficient is
/// `alpha_min + min(Δ/threshold, 1)·(alpha_max − alpha_min)`: slow changes
/// are smoothed heavily, fast changes are tracked. A zero threshold selects
/// `alpha_max` for any nonzero change and `alpha_min` for none.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut f = Adaptive::new(0.1, 0.9, 0.5, 0.0)?;
/// let y = f.update(1.0)?; // large jump, tracked quickly
/// assert!((y - 0.9).abs() < 1e-6);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Adaptive {
    alpha_min: f32,
    alpha_max: f32,
    threshold: f32,
    initial: f32,
    y: f32,
    x_prev: f32,
    count: u64,
}

impl Adaptive {
    /// Default lower coefficient bound.
    pub const DEFAULT_ALPHA_MIN: f32 = 0.01;
    /// Default upper coefficient bound.
    pub const DEFAULT_ALPHA_MAX: f32 = 0.9;
    /// Default rate-of-change threshold.
    pub const DEFAULT_THRESHOLD: f32 = 0.1;

    /// Create an adaptive filter.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `0 < alpha_min < 1`,
    /// `0 < alpha_max <= 1`, `alpha_min < alpha_max` and `threshold >= 0`.
    pub fn new(alpha_min: f32, alpha_max: f32, threshold: f32, initial: f32) -> FilterResult<Self> {
        let alpha_min = ConfigurationError::ensure(
            "alpha_min",
            "in (0, 1)",
            alpha_min,
            alpha_min > 0.0 && alpha_min < 1.0,
        )?;
        let alpha_max = ConfigurationError::coefficient("alpha_max", alpha_max)?;
        ConfigurationError::ensure(
            "alpha_max",
            "greater than alpha_min",
            alpha_max,
            alpha_max > alpha_min,
        )?;
        let threshold = ConfigurationError::non_negative("threshold", threshold)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            alpha_min,
            alpha_max,
            threshold,
            initial,
            y: initial,
            x_prev: initial,
            count: 0,
        })
    }

    /// Lower coefficient bound.
    pub fn alpha_min(&self) -> f32 {
        self.alpha_min
    }

    /// Upper coefficient bound.
    pub fn alpha_max(&self) -> f32 {
        self.alpha_max
    }

    /// Rate-of-change threshold at which `alpha_max` is reached.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }

    #[inline]
    fn alpha_for(&self, change: f32) -> f32 {
        if change > self.threshold {
            return self.alpha_max;
        }
        let ratio = if self.threshold > 0.0 {
            change / self.threshold
        } else {
            0.0
        };
        self.alpha_min + ratio * (self.alpha_max - self.alpha_min)
    }
}

impl Default for Adaptive {
    fn default() -> Self {
        Self {
            alpha_min: Self::DEFAULT_ALPHA_MIN,
            alpha_max: Self::DEFAULT_ALPHA_MAX,
            threshold: Self::DEFAULT_THRESHOLD,
            initial: 0.0,
            y: 0.0,
            x_prev: 0.0,
            count: 0,
        }
    }
}

impl Filter for Adaptive {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        let alpha = self.alpha_for((x - self.x_prev).abs());
        self.y = alpha * x + (1.0 - alpha) * self.y;
        self.x_prev = x;
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.y = self.initial;
        self.x_prev = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}
