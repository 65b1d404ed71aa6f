//! Runtime precondition failures raised from the sample path.
//!
//! These are `Copy`, fixed-size, and carry a numeric code so they can be
//! reported from an interrupt or control tick without allocating.

use crate::common::ErrorSeverity;

/// An `update` call was made while a required runtime precondition is unmet.
///
/// # Examples
///
/// ```
/// use rtfilter_errors::{ErrorSeverity, OperationError};
///
/// let err = OperationError::FixedRateUnavailable { filter: "TauLowPass" };
/// assert_eq!(err.code(), 1);
/// assert_eq!(err.severity(), ErrorSeverity::Error);
/// assert!(err.to_string().contains("update_with_dt"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OperationError {
    /// Fixed-rate `update` on a filter configured only for variable-rate use.
    #[error(
        "{filter}: fixed-rate update requires a sampling frequency; use update_with_dt or configure fs"
    )]
    FixedRateUnavailable {
        /// Name of the filter type that rejected the call.
        filter: &'static str,
    },

    /// Time step was zero, negative, or not finite.
    #[error("dt must be finite and > 0, got {dt}")]
    NonPositiveDt {
        /// The rejected time step in seconds.
        dt: f32,
    },

    /// Positional access outside a chain's members.
    #[error("index {index} out of range for chain of {len} filters")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current chain length.
        len: usize,
    },
}

impl OperationError {
    /// Get the numeric error code.
    pub fn code(&self) -> u8 {
        match self {
            OperationError::FixedRateUnavailable { .. } => 1,
            OperationError::NonPositiveDt { .. } => 2,
            OperationError::IndexOutOfRange { .. } => 3,
        }
    }

    /// Get the error severity.
    ///
    /// A bad `dt` is usually a single glitched timestamp and is reported as a
    /// warning; the other variants indicate a wiring mistake.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OperationError::FixedRateUnavailable { .. } => ErrorSeverity::Error,
            OperationError::NonPositiveDt { .. } => ErrorSeverity::Warning,
            OperationError::IndexOutOfRange { .. } => ErrorSeverity::Error,
        }
    }

    /// Validate a variable-rate time step.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NonPositiveDt`] unless `dt` is finite and `> 0`.
    #[inline]
    pub fn check_dt(dt: f32) -> Result<f32, Self> {
        if dt.is_finite() && dt > 0.0 {
            Ok(dt)
        } else {
            Err(OperationError::NonPositiveDt { dt })
        }
    }
}
