//! Finite impulse response filter with runtime-replaceable taps.

use rtfilter_errors::{ConfigurationError, FilterResult};
use tracing::debug;

use crate::filter::Filter;

/// Direct-form FIR: `y[n] = Σ h[k]·x[n−k]`.
///
/// The delay line is a circular buffer with one slot per tap, allocated at
/// construction. Replacing taps keeps the delay line; call
/// [`Filter::reset`] for a clean transition.
///
/// # RT Safety
///
/// - No heap allocations in `update`
/// - O(N) time complexity in the tap count
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut fir = Fir::new(vec![0.25, 0.25, 0.25, 0.25])?;
/// let out = fir.process_batch(&[4.0, 4.0, 4.0, 4.0])?;
/// assert_eq!(out, vec![1.0, 2.0, 3.0, 4.0]);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fir {
    taps: Vec<f32>,
    buf: Vec<f32>,
    /// Slot the next sample is written to.
    idx: usize,
    y: f32,
    count: u64,
}

fn validate_taps(taps: &[f32]) -> FilterResult<()> {
    ConfigurationError::non_empty("taps", taps.len())?;
    for &t in taps {
        ConfigurationError::finite("taps", t)?;
    }
    Ok(())
}

impl Fir {
    /// Create a filter from its impulse response.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `taps` is empty or holds a
    /// non-finite value.
    pub fn new(taps: Vec<f32>) -> FilterResult<Self> {
        validate_taps(&taps)?;
        Ok(Self {
            buf: vec![0.0; taps.len()],
            taps,
            idx: 0,
            y: 0.0,
            count: 0,
        })
    }

    /// Current taps.
    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always false; a filter has at least one tap.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }

    /// Replace the taps.
    ///
    /// Same length: swapped in place, delay line untouched. Different
    /// length: the delay line is resized keeping the most recent
    /// `min(old, new)` samples.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `taps` is empty or holds a
    /// non-finite value; the previous taps stay in place.
    pub fn set_taps(&mut self, taps: &[f32]) -> FilterResult<()> {
        validate_taps(taps)?;
        if taps.len() == self.taps.len() {
            self.taps.copy_from_slice(taps);
            return Ok(());
        }

        let new_len = taps.len();
        debug!(old_len = self.taps.len(), new_len, "resizing FIR delay line");
        let mut buf = vec![0.0; new_len];
        // Newest sample lands in the last slot, so the next write goes to 0.
        for (slot, &x) in buf.iter_mut().rev().zip(self.history()) {
            *slot = x;
        }
        self.buf = buf;
        self.idx = 0;
        self.taps = taps.to_vec();
        Ok(())
    }

    /// Stored samples from newest to oldest.
    fn history(&self) -> impl Iterator<Item = &f32> {
        let (older, newer) = self.buf.split_at(self.idx);
        older.iter().rev().chain(newer.iter().rev())
    }
}

impl Filter for Fir {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        if let Some(slot) = self.buf.get_mut(self.idx) {
            *slot = x;
        }
        self.idx = (self.idx + 1) % self.buf.len();

        let acc: f32 = self
            .taps
            .iter()
            .zip(self.history())
            .map(|(&h, &s)| h * s)
            .sum();
        self.y = acc;
        self.count = self.count.saturating_add(1);
        Ok(acc)
    }

    fn reset(&mut self) {
        self.buf.fill(0.0);
        self.idx = 0;
        self.y = 0.0;
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
    fn test_impulse_response_equals_taps() -> Result<(), FilterError> {
        let taps = vec![0.5, -0.25, 0.125];
        let mut fir = Fir::new(taps.clone())?;
        let out = fir.process_batch(&[1.0, 0.0, 0.0, 0.0])?;
        for (y, e) in out.iter().zip(taps.iter().chain([0.0].iter())) {
            assert!((y - e).abs() < 1e-7);
        }
        Ok(())
    }

    #[test]
    fn test_single_tap_is_gain() -> Result<(), FilterError> {
        let mut fir = Fir::new(vec![2.0])?;
        for x in [1.0, -3.0, 0.5] {
            assert!((fir.update(x)? - 2.0 * x).abs() < 1e-7);
        }
        Ok(())
    }

    #[test]
    fn test_same_length_taps_keep_delay_line() -> Result<(), FilterError> {
        let mut fir = Fir::new(vec![1.0, 0.0])?;
        fir.update(3.0)?;
        fir.set_taps(&[0.0, 1.0])?;
        // Previous sample 3.0 is still in the delay line.
        let y = fir.update(7.0)?;
        assert!((y - 3.0).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_resize_keeps_most_recent_samples() -> Result<(), FilterError> {
        let mut fir = Fir::new(vec![1.0, 0.0, 0.0])?;
        fir.process_batch(&[1.0, 2.0, 3.0, 4.0])?;

        // Shrink to two taps: history keeps 4.0 (newest) and 3.0.
        fir.set_taps(&[0.0, 1.0])?;
        let y = fir.update(5.0)?;
        assert!((y - 4.0).abs() < 1e-7);

        // Grow to four taps: history is 5, 4, 0 (only two were kept).
        fir.set_taps(&[0.0, 0.0, 1.0, 1.0])?;
        let y = fir.update(6.0)?;
        assert!((y - 4.0).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_invalid_taps_rejected_atomically() -> Result<(), FilterError> {
        assert!(Fir::new(Vec::new()).is_err());
        let mut fir = Fir::new(vec![1.0, 1.0])?;
        assert!(fir.set_taps(&[]).is_err());
        assert!(fir.set_taps(&[1.0, f32::NAN]).is_err());
        assert_eq!(fir.taps(), &[1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_reset_clears_delay_line() -> Result<(), FilterError> {
        let mut fir = Fir::new(vec![0.5, 0.5])?;
        fir.update(10.0)?;
        fir.reset();
        let y = fir.update(2.0)?;
        assert!((y - 1.0).abs() < 1e-7);
        assert_eq!(fir.sample_count(), 1);
        Ok(())
    }
}
