//! Boxcar moving average over the most recent `N` samples.

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;
use crate::window::SampleWindow;

/// Moving average with an O(1) running sum.
///
/// While fewer than `N` samples have been seen the average is taken over
/// the samples seen so far, so the output ramps up to a true `N`-sample
/// average. The running sum is kept in `f64`. A non-finite sample makes the
/// output non-finite only while it is inside the window; once it is evicted
/// the sum is rebuilt from the window contents.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut ma = MovingAverage::new(4, 0.0)?;
/// let out = ma.process_batch(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])?;
/// assert_eq!(out, vec![1.0, 1.5, 2.0, 2.5, 3.5, 4.5, 5.5, 6.5]);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    window: SampleWindow,
    sum: f64,
    initial: f32,
    y: f32,
    count: u64,
}

impl MovingAverage {
    /// Create a moving average over `window_size` samples.
    ///
    /// `initial` is reported by [`MovingAverage::value`] until the first
    /// sample arrives; it does not enter the average.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `window_size == 0`.
    pub fn new(window_size: usize, initial: f32) -> FilterResult<Self> {
        let window = SampleWindow::new(window_size)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            window,
            sum: 0.0,
            initial,
            y: initial,
            count: 0,
        })
    }

    /// Configured window length `N`.
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// Number of samples currently averaged, `min(count, N)`.
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
}

impl Filter for MovingAverage {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        if let Some(old) = self.window.push(x) {
            self.sum -= f64::from(old);
        }
        self.sum += f64::from(x);
        if !self.sum.is_finite() {
            self.sum = self.window.sum_by(|v| v);
        }
        self.y = (self.sum / self.window.len() as f64) as f32;
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
        self.y = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}
