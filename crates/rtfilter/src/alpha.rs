//! Exponential moving average with a directly specified coefficient.

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;

/// Exponential smoothing filter: `y = α·x + (1 − α)·y`.
///
/// `α = 1` passes the input through unchanged; smaller values smooth more.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut f = Alpha::new(0.5, 0.0)?;
/// assert_eq!(f.update(1.0)?, 0.5);
/// assert_eq!(f.update(1.0)?, 0.75);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Alpha {
    alpha: f32,
    initial: f32,
    y: f32,
    count: u64,
}

impl Alpha {
    /// Create a filter with smoothing coefficient `alpha` in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `alpha` is outside `(0, 1]` or
    /// `initial` is not finite.
    pub fn new(alpha: f32, initial: f32) -> FilterResult<Self> {
        let alpha = ConfigurationError::coefficient("alpha", alpha)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            alpha,
            initial,
            y: initial,
            count: 0,
        })
    }

    /// Current smoothing coefficient.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Replace the smoothing coefficient. The output state is kept.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `alpha` is outside `(0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) -> FilterResult<()> {
        self.alpha = ConfigurationError::coefficient("alpha", alpha)?;
        Ok(())
    }

    /// Most recent output (the initial value before any update).
    pub fn value(&self) -> f32 {
        self.y
    }
}

impl Filter for Alpha {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        self.y = self.alpha * x + (1.0 - self.alpha) * self.y;
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.y = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfilter_errors::FilterError;

    #[test]
    fn test_alpha_one_is_identity() -> Result<(), FilterError> {
        let mut f = Alpha::new(1.0, 0.0)?;
        for x in [3.0, -1.5, 0.25, 1e6] {
            assert!((f.update(x)? - x).abs() < 1e-6 * x.abs().max(1.0));
        }
        Ok(())
    }

    #[test]
    fn test_step_response() -> Result<(), FilterError> {
        let mut f = Alpha::new(0.5, 0.0)?;
        let outputs = f.process_batch(&[1.0, 1.0, 1.0])?;
        let expected = [0.5, 0.75, 0.875];
        for (y, e) in outputs.iter().zip(expected) {
            assert!((y - e).abs() < 1e-6);
        }
        assert_eq!(f.sample_count(), 3);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_alpha() {
        for alpha in [0.0, -0.1, 1.5, f32::NAN] {
            let err = Alpha::new(alpha, 0.0);
            assert!(matches!(err, Err(FilterError::Configuration(_))), "alpha {alpha}");
        }
    }

    #[test]
    fn test_set_alpha_validates_and_keeps_state() -> Result<(), FilterError> {
        let mut f = Alpha::new(0.5, 0.0)?;
        f.update(2.0)?;
        assert!(f.set_alpha(0.0).is_err());
        assert!((f.alpha() - 0.5).abs() < 1e-7);
        f.set_alpha(0.25)?;
        assert!((f.value() - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_reset_restores_initial() -> Result<(), FilterError> {
        let mut f = Alpha::new(0.2, 5.0)?;
        f.update(0.0)?;
        f.update(0.0)?;
        f.reset();
        assert!((f.value() - 5.0).abs() < 1e-7);
        assert_eq!(f.sample_count(), 0);
        Ok(())
    }
}
