//! The contract every filter implements.
//!
//! A filter is a stateful transformer: one input sample in, one output
//! sample out. `update` is the hot path and must be allocation-free with
//! bounded execution time. Everything else (construction, setters, batch
//! helpers) runs at configuration time.

use rtfilter_errors::{FilterError, FilterResult};

/// Common interface for all stateful filters.
///
/// # RT Safety
///
/// Implementations of [`Filter::update`] must not allocate, lock, or perform
/// I/O, and must run in time bounded by the filter's configuration (window
/// length, tap count).
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut ema = Alpha::new(0.5, 0.0)?;
/// assert_eq!(ema.update(1.0)?, 0.5);
/// assert_eq!(ema.sample_count(), 1);
///
/// ema.reset();
/// assert_eq!(ema.sample_count(), 0);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
pub trait Filter {
    /// Consume one input sample and return the new output.
    ///
    /// On success the sample counter advances by one. On error neither the
    /// state nor the counter changes.
    ///
    /// # Errors
    ///
    /// Returns an [`OperationError`](rtfilter_errors::OperationError) when a
    /// runtime precondition is unmet, e.g. a variable-rate-only filter was
    /// asked to run at a fixed rate.
    fn update(&mut self, x: f32) -> FilterResult<f32>;

    /// Return the filter to its post-construction state.
    ///
    /// Configuration is preserved and the sample counter returns to zero.
    fn reset(&mut self);

    /// Number of successful `update` calls since construction or the last reset.
    fn sample_count(&self) -> u64;

    /// Whether [`Filter::update`] can run without an explicit time step.
    fn supports_fixed_rate(&self) -> bool {
        true
    }

    /// Run `update` over a slice, collecting the outputs.
    ///
    /// Allocates the output vector; use [`Filter::process_into`] on the
    /// sample path.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error raised by `update`. Samples
    /// processed before the failure remain applied to the state.
    fn process_batch(&mut self, input: &[f32]) -> FilterResult<Vec<f32>> {
        let mut out = Vec::with_capacity(input.len());
        for &x in input {
            out.push(self.update(x)?);
        }
        Ok(out)
    }

    /// Run `update` over `input`, writing outputs into `output` without
    /// allocating.
    ///
    /// Processes `min(input.len(), output.len())` samples and returns that
    /// count.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error raised by `update`.
    fn process_into(&mut self, input: &[f32], output: &mut [f32]) -> FilterResult<usize> {
        let mut written = 0usize;
        for (slot, &x) in output.iter_mut().zip(input) {
            *slot = self.update(x)?;
            written += 1;
        }
        Ok(written)
    }
}

/// Filters that can also be driven with an explicit time step.
///
/// Implemented by filters whose dynamics are defined in continuous time
/// (time constants, rates per second, integral and derivative terms).
pub trait VariableRate: Filter {
    /// Consume one sample taken `dt_s` seconds after the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NonPositiveDt`](rtfilter_errors::OperationError::NonPositiveDt)
    /// when `dt_s` is zero, negative, or not finite. State is unchanged.
    fn update_with_dt(&mut self, x: f32, dt_s: f32) -> FilterResult<f32>;
}

/// Validate a time step and lift the error into [`FilterError`].
#[inline]
pub(crate) fn checked_dt(dt_s: f32) -> Result<f32, FilterError> {
    Ok(rtfilter_errors::OperationError::check_dt(dt_s)?)
}
