//! Running median over the most recent `N` samples.

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;
use crate::window::SampleWindow;

/// Median filter for impulse-noise rejection.
///
/// The active window (`min(count, N)` samples) is copied into a scratch
/// buffer allocated at construction and sorted every tick: O(N log N) per
/// sample, bounded and deterministic for a fixed `N`. Odd-sized windows
/// return the middle element, even-sized windows the mean of the two middle
/// elements.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut median = Median::new(3, 0.0)?;
/// let out = median.process_batch(&[1.0, 1.0, 100.0, 1.0, 1.0])?;
/// assert!(out.iter().all(|&y| y == 1.0));
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Median {
    window: SampleWindow,
    scratch: Vec<f32>,
    initial: f32,
    y: f32,
    count: u64,
}

impl Median {
    /// Create a median filter over `window_size` samples.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `window_size == 0`.
    pub fn new(window_size: usize, initial: f32) -> FilterResult<Self> {
        let window = SampleWindow::new(window_size)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            scratch: vec![0.0; window.capacity()],
            window,
            initial,
            y: initial,
            count: 0,
        })
    }

    /// Configured window length `N`.
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// Number of samples in the active window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True before the first sample.
    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }

    fn middle(&mut self) -> f32 {
        let active = self.window.active();
        let n = active.len();
        let Some(sorted) = self.scratch.get_mut(..n) else {
            return self.y;
        };
        sorted.copy_from_slice(active);
        sorted.sort_unstable_by(f32::total_cmp);

        let mid = n / 2;
        match (sorted.get(mid), n % 2) {
            (Some(&m), 1) => m,
            (Some(&hi), _) => sorted.get(mid.wrapping_sub(1)).map_or(hi, |&lo| lo.midpoint(hi)),
            (None, _) => self.y,
        }
    }
}

impl Filter for Median {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        self.window.push(x);
        self.y = self.middle();
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.window.clear();
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
    fn test_rejects_single_outlier() -> Result<(), FilterError> {
        let mut m = Median::new(3, 0.0)?;
        for y in m.process_batch(&[1.0, 1.0, 100.0, 1.0, 1.0])? {
            assert!((y - 1.0).abs() < 1e-7);
        }
        Ok(())
    }

    #[test]
    fn test_even_window_averages_middle_pair() -> Result<(), FilterError> {
        let mut m = Median::new(4, 0.0)?;
        let out = m.process_batch(&[4.0, 1.0, 3.0, 2.0])?;
        let expected = [4.0, 2.5, 3.0, 2.5];
        for (y, e) in out.iter().zip(expected) {
            assert!((y - e).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_output_within_window_bounds() -> Result<(), FilterError> {
        let mut m = Median::new(5, 0.0)?;
        let input = [3.0, -7.0, 12.0, 0.5, 9.0, -1.0, 4.0, 4.0, 100.0];
        for (i, &x) in input.iter().enumerate() {
            let y = m.update(x)?;
            let lo_idx = i.saturating_sub(4);
            let win = input.get(lo_idx..=i).unwrap_or_default();
            let min = win.iter().copied().fold(f32::INFINITY, f32::min);
            let max = win.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            assert!(y >= min && y <= max);
        }
        Ok(())
    }

    #[test]
    fn test_initial_before_first_sample() -> Result<(), FilterError> {
        let mut m = Median::new(3, 2.5)?;
        assert!((m.value() - 2.5).abs() < 1e-7);
        m.update(1.0)?;
        m.reset();
        assert!((m.value() - 2.5).abs() < 1e-7);
        assert!(m.is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(Median::new(0, 0.0).is_err());
    }
}
