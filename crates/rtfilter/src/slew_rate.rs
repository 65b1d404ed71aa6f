//! Slew Rate Limiter
//!
//! This module provides a slew rate limiter that restricts how fast the
//! output may move toward the input, with independent rise and fall rates
//! and an optional deadband.

use rtfilter_errors::{ConfigurationError, FilterResult, OperationError};

use crate::filter::{Filter, VariableRate, checked_dt};

/// Rate-of-change limiter.
///
/// Each tick the error `e = x − y` is computed. If `|e| ≤ deadband` the
/// output holds; otherwise it moves toward `x` by at most `rise_per_s·dt`
/// (rising) or `fall_per_s·dt` (falling).
///
/// With `fs` configured the per-tick bounds are precomputed and
/// [`Filter::update`] is available; without it only
/// [`VariableRate::update_with_dt`] is.
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
/// let mut limiter = SlewRateLimiter::with_fs(100.0, None, 0.0, 1000.0)?;
/// let y = limiter.update(1.0)?;
/// assert!((y - 0.1).abs() < 1e-6);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlewRateLimiter {
    rise_per_s: f32,
    fall_per_s: f32,
    deadband: f32,
    fs: Option<f32>,
    /// Precomputed `(rise/fs, fall/fs)` when `fs` is set.
    step_bounds: Option<(f32, f32)>,
    initial: f32,
    y: f32,
    count: u64,
}

impl SlewRateLimiter {
    /// Create a variable-rate limiter.
    ///
    /// `fall_per_s` defaults to `rise_per_s` when `None`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless both rates are `> 0`.
    pub fn new(rise_per_s: f32, fall_per_s: Option<f32>, initial: f32) -> FilterResult<Self> {
        let rise_per_s = ConfigurationError::positive("rise_per_s", rise_per_s)?;
        let fall_per_s = ConfigurationError::positive("fall_per_s", fall_per_s.unwrap_or(rise_per_s))?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            rise_per_s,
            fall_per_s,
            deadband: 0.0,
            fs: None,
            step_bounds: None,
            initial,
            y: initial,
            count: 0,
        })
    }

    /// Create a limiter that can also run at the fixed rate `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless both rates and `fs` are `> 0`.
    pub fn with_fs(
        rise_per_s: f32,
        fall_per_s: Option<f32>,
        initial: f32,
        fs: f32,
    ) -> FilterResult<Self> {
        let mut limiter = Self::new(rise_per_s, fall_per_s, initial)?;
        limiter.set_fs(fs)?;
        Ok(limiter)
    }

    /// Builder-style deadband.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `deadband >= 0`.
    pub fn with_deadband(mut self, deadband: f32) -> FilterResult<Self> {
        self.set_deadband(deadband)?;
        Ok(self)
    }

    /// Maximum rise rate in units per second.
    pub fn rise_per_s(&self) -> f32 {
        self.rise_per_s
    }

    /// Maximum fall rate in units per second.
    pub fn fall_per_s(&self) -> f32 {
        self.fall_per_s
    }

    /// Error band inside which the output holds.
    pub fn deadband(&self) -> f32 {
        self.deadband
    }

    /// Configured sampling frequency, if any.
    pub fn fs(&self) -> Option<f32> {
        self.fs
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }

    /// Change the rise rate. Takes effect on the next update.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `rise_per_s > 0`.
    pub fn set_rise_per_s(&mut self, rise_per_s: f32) -> FilterResult<()> {
        self.rise_per_s = ConfigurationError::positive("rise_per_s", rise_per_s)?;
        self.recompute_steps();
        Ok(())
    }

    /// Change the fall rate. Takes effect on the next update.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fall_per_s > 0`.
    pub fn set_fall_per_s(&mut self, fall_per_s: f32) -> FilterResult<()> {
        self.fall_per_s = ConfigurationError::positive("fall_per_s", fall_per_s)?;
        self.recompute_steps();
        Ok(())
    }

    /// Change the deadband.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `deadband >= 0`.
    pub fn set_deadband(&mut self, deadband: f32) -> FilterResult<()> {
        self.deadband = ConfigurationError::non_negative("deadband", deadband)?;
        Ok(())
    }

    /// Enable fixed-rate operation at `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fs > 0`.
    pub fn set_fs(&mut self, fs: f32) -> FilterResult<()> {
        self.fs = Some(ConfigurationError::positive("fs", fs)?);
        self.recompute_steps();
        Ok(())
    }

    fn recompute_steps(&mut self) {
        self.step_bounds = self
            .fs
            .map(|fs| (self.rise_per_s / fs, self.fall_per_s / fs));
    }

    #[inline]
    fn limit(&mut self, x: f32, max_up: f32, max_down: f32) -> f32 {
        let change = x - self.y;
        if change.abs() > self.deadband {
            self.y += change.clamp(-max_down, max_up);
        }
        self.count = self.count.saturating_add(1);
        self.y
    }
}

impl Filter for SlewRateLimiter {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        let (up, down) = self
            .step_bounds
            .ok_or(OperationError::FixedRateUnavailable {
                filter: "SlewRateLimiter",
            })?;
        Ok(self.limit(x, up, down))
    }

    fn reset(&mut self) {
        self.y = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }

    fn supports_fixed_rate(&self) -> bool {
        self.step_bounds.is_some()
    }
}

impl VariableRate for SlewRateLimiter {
    #[inline]
    fn update_with_dt(&mut self, x: f32, dt_s: f32) -> FilterResult<f32> {
        let dt = checked_dt(dt_s)?;
        Ok(self.limit(x, self.rise_per_s * dt, self.fall_per_s * dt))
    }
}
