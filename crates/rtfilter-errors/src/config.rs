//! Configuration error type and the parameter checks built on it.
//!
//! Every constructor and mutator in the filter crate validates through these
//! helpers, so the message format is uniform:
//! `"<parameter> must be <constraint>, got <value>"`.

use crate::common::ErrorSeverity;

/// A parameter violated its documented constraint.
///
/// Carries the offending parameter name, the constraint it failed, and the
/// value that was rejected. `Copy` and allocation-free.
///
/// # Examples
///
/// ```
/// use rtfilter_errors::ConfigurationError;
///
/// let err = ConfigurationError::new("window_size", "at least 1", 0.0);
/// assert_eq!(err.to_string(), "window_size must be at least 1, got 0");
/// assert_eq!(err.parameter, "window_size");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("{parameter} must be {constraint}, got {value}")]
pub struct ConfigurationError {
    /// Name of the rejected parameter.
    pub parameter: &'static str,
    /// Human-readable constraint the value failed.
    pub constraint: &'static str,
    /// The rejected value, widened to `f64`.
    pub value: f64,
}

impl ConfigurationError {
    /// Create a configuration error.
    pub const fn new(parameter: &'static str, constraint: &'static str, value: f64) -> Self {
        Self {
            parameter,
            constraint,
            value,
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Return `value` if `ok` holds, otherwise an error naming `constraint`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when `ok` is false.
    #[inline]
    pub fn ensure(
        parameter: &'static str,
        constraint: &'static str,
        value: f32,
        ok: bool,
    ) -> Result<f32, Self> {
        if ok {
            Ok(value)
        } else {
            Err(Self::new(parameter, constraint, f64::from(value)))
        }
    }

    /// Require a finite value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for NaN or infinite values.
    pub fn finite(parameter: &'static str, value: f32) -> Result<f32, Self> {
        Self::ensure(parameter, "finite", value, value.is_finite())
    }

    /// Require a finite, strictly positive value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` unless `value > 0` and finite.
    pub fn positive(parameter: &'static str, value: f32) -> Result<f32, Self> {
        Self::ensure(parameter, "finite and > 0", value, value.is_finite() && value > 0.0)
    }

    /// Require a finite, non-negative value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` unless `value >= 0` and finite.
    pub fn non_negative(parameter: &'static str, value: f32) -> Result<f32, Self> {
        Self::ensure(
            parameter,
            "finite and >= 0",
            value,
            value.is_finite() && value >= 0.0,
        )
    }

    /// Require a smoothing coefficient in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for values outside `(0, 1]` or NaN.
    pub fn coefficient(parameter: &'static str, value: f32) -> Result<f32, Self> {
        Self::ensure(parameter, "in (0, 1]", value, value > 0.0 && value <= 1.0)
    }

    /// Require a cutoff strictly between 0 and Nyquist (`fs / 2`).
    ///
    /// `fs` must already be validated as positive.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` unless `0 < fc < fs / 2`.
    pub fn below_nyquist(parameter: &'static str, fc: f32, fs: f32) -> Result<f32, Self> {
        Self::ensure(
            parameter,
            "between 0 and fs/2 (exclusive)",
            fc,
            fc.is_finite() && fc > 0.0 && fc < fs * 0.5,
        )
    }

    /// Require a window or tap count of at least one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when `len == 0`.
    pub fn non_empty(parameter: &'static str, len: usize) -> Result<usize, Self> {
        if len == 0 {
            Err(Self::new(parameter, "at least 1", 0.0))
        } else {
            Ok(len)
        }
    }
}
