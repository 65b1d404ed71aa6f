//! Fixed-capacity sample window shared by the windowed statistics filters.

use rtfilter_errors::{ConfigurationError, FilterResult};

/// Circular buffer of the last `capacity` samples.
///
/// The buffer is allocated once at construction. Writes start at slot 0 and
/// advance sequentially, so while the window is filling the active samples
/// are exactly `buf[..filled]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SampleWindow {
    buf: Vec<f32>,
    head: usize,
    filled: usize,
}

impl SampleWindow {
    pub(crate) fn new(window_size: usize) -> FilterResult<Self> {
        let n = ConfigurationError::non_empty("window_size", window_size)?;
        Ok(Self {
            buf: vec![0.0; n],
            head: 0,
            filled: 0,
        })
    }

    /// Store `x`, returning the sample it displaced once the window is full.
    #[inline]
    pub(crate) fn push(&mut self, x: f32) -> Option<f32> {
        let cap = self.buf.len();
        let evicted = if self.filled == cap {
            self.buf.get(self.head).copied()
        } else {
            self.filled += 1;
            None
        };
        if let Some(slot) = self.buf.get_mut(self.head) {
            *slot = x;
        }
        self.head = (self.head + 1) % cap;
        evicted
    }

    /// Samples currently in the window, in storage order.
    #[inline]
    pub(crate) fn active(&self) -> &[f32] {
        self.buf.get(..self.filled).unwrap_or_default()
    }

    /// Exact `f64` sum of `f(x)` over the active samples. O(N), no allocation.
    pub(crate) fn sum_by(&self, f: impl Fn(f64) -> f64) -> f64 {
        self.active().iter().map(|&x| f(f64::from(x))).sum()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn clear(&mut self) {
        self.buf.fill(0.0);
        self.head = 0;
        self.filled = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfilter_errors::FilterError;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(SampleWindow::new(0).is_err());
    }

    #[test]
    fn test_fill_then_evict_oldest() -> Result<(), FilterError> {
        let mut w = SampleWindow::new(3)?;
        assert_eq!(w.push(1.0), None);
        assert_eq!(w.push(2.0), None);
        assert_eq!(w.active(), &[1.0, 2.0]);
        assert_eq!(w.push(3.0), None);
        assert_eq!(w.push(4.0), Some(1.0));
        assert_eq!(w.push(5.0), Some(2.0));
        assert_eq!(w.len(), 3);
        assert_eq!(w.capacity(), 3);
        Ok(())
    }

    #[test]
    fn test_sum_by_covers_active_samples_only() -> Result<(), FilterError> {
        let mut w = SampleWindow::new(3)?;
        w.push(2.0);
        w.push(-3.0);
        assert!((w.sum_by(|x| x) + 1.0).abs() < 1e-12);
        assert!((w.sum_by(|x| x * x) - 13.0).abs() < 1e-12);
        w.push(f32::NAN);
        w.push(1.0);
        w.push(1.0);
        assert!(w.sum_by(|x| x).is_nan());
        w.push(1.0);
        assert!((w.sum_by(|x| x) - 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_clear_empties_window() -> Result<(), FilterError> {
        let mut w = SampleWindow::new(2)?;
        w.push(7.0);
        w.clear();
        assert!(w.active().is_empty());
        assert_eq!(w.push(1.0), None);
        Ok(())
    }
}
