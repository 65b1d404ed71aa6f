//! First-order low-pass specified by a time constant.
//!
//! Runs either at a fixed rate (`fs` configured, coefficient precomputed) or
//! at a variable rate with the caller supplying `dt` each tick. Both modes use
//! `α = dt / (τ + dt)`, so a fixed-rate filter and a variable-rate filter fed
//! `dt = 1/fs` produce identical output.

use std::f32::consts::PI;

use rtfilter_errors::{ConfigurationError, FilterResult, OperationError};

use crate::filter::{Filter, VariableRate, checked_dt};

/// Time-constant low-pass filter.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// // Variable-rate only: fixed-rate update is refused.
/// let mut f = TauLowPass::new(0.1, 0.0)?;
/// assert!(f.update(1.0).is_err());
/// let y = f.update_with_dt(1.0, 0.1)?;
/// assert!((y - 0.5).abs() < 1e-6);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TauLowPass {
    tau: f32,
    fs: Option<f32>,
    alpha_fixed: Option<f32>,
    initial: f32,
    y: f32,
    count: u64,
}

#[inline]
fn alpha_for(dt: f32, tau: f32) -> f32 {
    dt / (tau + dt)
}

impl TauLowPass {
    /// Create a variable-rate filter with time constant `tau_s` seconds.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `tau_s > 0`.
    pub fn new(tau_s: f32, initial: f32) -> FilterResult<Self> {
        let tau = ConfigurationError::positive("tau_s", tau_s)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            tau,
            fs: None,
            alpha_fixed: None,
            initial,
            y: initial,
            count: 0,
        })
    }

    /// Create a filter that can also run at the fixed rate `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `tau_s > 0` and `fs > 0`.
    pub fn with_fs(tau_s: f32, fs: f32, initial: f32) -> FilterResult<Self> {
        let fs = ConfigurationError::positive("fs", fs)?;
        let mut filter = Self::new(tau_s, initial)?;
        filter.fs = Some(fs);
        filter.alpha_fixed = Some(alpha_for(1.0 / fs, filter.tau));
        Ok(filter)
    }

    /// Time constant in seconds.
    pub fn tau(&self) -> f32 {
        self.tau
    }

    /// Configured sampling frequency, if any.
    pub fn fs(&self) -> Option<f32> {
        self.fs
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }

    /// Change the time constant. The fixed coefficient is recomputed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `tau_s > 0`.
    pub fn set_tau(&mut self, tau_s: f32) -> FilterResult<()> {
        self.tau = ConfigurationError::positive("tau_s", tau_s)?;
        self.alpha_fixed = self.fs.map(|fs| alpha_for(1.0 / fs, self.tau));
        Ok(())
    }

    /// Set the time constant from a cutoff frequency: `τ = 1 / (2π·fc)`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fc_hz > 0`.
    pub fn set_cutoff(&mut self, fc_hz: f32) -> FilterResult<()> {
        let fc = ConfigurationError::positive("fc_hz", fc_hz)?;
        self.set_tau(1.0 / (2.0 * PI * fc))
    }

    /// Enable fixed-rate operation at `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fs > 0`.
    pub fn set_fs(&mut self, fs: f32) -> FilterResult<()> {
        let fs = ConfigurationError::positive("fs", fs)?;
        self.fs = Some(fs);
        self.alpha_fixed = Some(alpha_for(1.0 / fs, self.tau));
        Ok(())
    }

    #[inline]
    fn apply(&mut self, x: f32, alpha: f32) -> f32 {
        self.y = alpha * x + (1.0 - alpha) * self.y;
        self.count = self.count.saturating_add(1);
        self.y
    }
}

impl Filter for TauLowPass {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        let alpha = self
            .alpha_fixed
            .ok_or(OperationError::FixedRateUnavailable {
                filter: "TauLowPass",
            })?;
        Ok(self.apply(x, alpha))
    }

    fn reset(&mut self) {
        self.y = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }

    fn supports_fixed_rate(&self) -> bool {
        self.alpha_fixed.is_some()
    }
}

impl VariableRate for TauLowPass {
    #[inline]
    fn update_with_dt(&mut self, x: f32, dt_s: f32) -> FilterResult<f32> {
        let dt = checked_dt(dt_s)?;
        let alpha = alpha_for(dt, self.tau);
        Ok(self.apply(x, alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfilter_errors::FilterError;

    #[test]
    fn test_fixed_update_without_fs_is_operation_error() -> Result<(), FilterError> {
        let mut f = TauLowPass::new(0.05, 0.0)?;
        let err = f.update(1.0);
        assert!(matches!(
            err,
            Err(FilterError::Operation(OperationError::FixedRateUnavailable { .. }))
        ));
        assert_eq!(f.sample_count(), 0);
        assert!(!f.supports_fixed_rate());
        Ok(())
    }

    #[test]
    fn test_fixed_and_variable_modes_agree() -> Result<(), FilterError> {
        let mut fixed = TauLowPass::with_fs(0.02, 1000.0, 0.0)?;
        let mut variable = TauLowPass::new(0.02, 0.0)?;
        for i in 0..50 {
            let x = (i as f32 * 0.2).cos();
            let a = fixed.update(x)?;
            let b = variable.update_with_dt(x, 1.0 / 1000.0)?;
            assert!((a - b).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_bad_dt_rejected_without_state_change() -> Result<(), FilterError> {
        let mut f = TauLowPass::new(0.1, 1.0)?;
        for dt in [0.0, -0.01, f32::NAN, f32::INFINITY] {
            assert!(f.update_with_dt(5.0, dt).is_err());
        }
        assert_eq!(f.sample_count(), 0);
        assert!((f.value() - 1.0).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_larger_dt_moves_further() -> Result<(), FilterError> {
        let mut a = TauLowPass::new(0.1, 0.0)?;
        let mut b = TauLowPass::new(0.1, 0.0)?;
        let small = a.update_with_dt(1.0, 0.001)?;
        let large = b.update_with_dt(1.0, 0.5)?;
        assert!(large > small);
        assert!(large < 1.0);
        Ok(())
    }

    #[test]
    fn test_set_cutoff_sets_tau() -> Result<(), FilterError> {
        let mut f = TauLowPass::with_fs(1.0, 100.0, 0.0)?;
        f.set_cutoff(1.0)?;
        assert!((f.tau() - 1.0 / (2.0 * PI)).abs() < 1e-6);
        assert!(f.set_cutoff(0.0).is_err());
        assert!(f.set_tau(-1.0).is_err());
        Ok(())
    }

    #[test]
    fn test_set_fs_enables_fixed_rate() -> Result<(), FilterError> {
        let mut f = TauLowPass::new(0.1, 0.0)?;
        f.set_fs(10.0)?;
        assert!(f.supports_fixed_rate());
        let y = f.update(1.0)?;
        assert!((y - 0.5).abs() < 1e-6);
        Ok(())
    }
}
