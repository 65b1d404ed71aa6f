//! Root-mean-square envelope over the most recent `N` samples.

use rtfilter_errors::FilterResult;

use crate::filter::Filter;
use crate::window::SampleWindow;

/// Windowed RMS: `y = sqrt(max(0, Σx²) / min(count, N))`.
///
/// The sum of squares is kept in `f64` and clamped at zero before the
/// square root, so round-off alone never produces a NaN. A non-finite sample
/// shows in the output only while it is inside the window; once it is
/// evicted the sum is rebuilt from the window contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Rms {
    window: SampleWindow,
    sum_sq: f64,
    y: f32,
    count: u64,
}

impl Rms {
    /// Create an RMS filter over `window_size` samples.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `window_size == 0`.
    pub fn new(window_size: usize) -> FilterResult<Self> {
        Ok(Self {
            window: SampleWindow::new(window_size)?,
            sum_sq: 0.0,
            y: 0.0,
            count: 0,
        })
    }

    /// Configured window length `N`.
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }
}

impl Filter for Rms {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        if let Some(old) = self.window.push(x) {
            let old = f64::from(old);
            self.sum_sq -= old * old;
        }
        let x64 = f64::from(x);
        self.sum_sq += x64 * x64;
        if !self.sum_sq.is_finite() {
            self.sum_sq = self.window.sum_by(|v| v * v);
        }
        // Clamp round-off only; a NaN in the window must stay visible.
        let sum_sq = if self.sum_sq < 0.0 { 0.0 } else { self.sum_sq };
        let mean_sq = sum_sq / self.window.len() as f64;
        self.y = mean_sq.sqrt() as f32;
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.window.clear();
        self.sum_sq = 0.0;
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
    use std::f32::consts::{PI, SQRT_2};

    #[test]
    fn test_sine_converges_to_amplitude_over_sqrt2() -> Result<(), FilterError> {
        // 50 samples per period, window of two full periods.
        let mut rms = Rms::new(100)?;
        let amplitude = 3.0;
        let mut y = 0.0;
        for i in 0..400 {
            let x = amplitude * (2.0 * PI * i as f32 / 50.0).sin();
            y = rms.update(x)?;
        }
        assert!((y - amplitude / SQRT_2).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_constant_input() -> Result<(), FilterError> {
        let mut rms = Rms::new(3)?;
        let out = rms.process_batch(&[-2.0, 2.0, -2.0, 2.0])?;
        for y in out {
            assert!((y - 2.0).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_never_nan_after_large_then_small() -> Result<(), FilterError> {
        let mut rms = Rms::new(2)?;
        rms.process_batch(&[1e18, 1e18])?;
        for _ in 0..4 {
            let y = rms.update(1e-6)?;
            assert!(!y.is_nan());
        }
        Ok(())
    }

    #[test]
    fn test_nan_reported_then_forgotten() -> Result<(), FilterError> {
        let mut rms = Rms::new(2)?;
        assert!(rms.update(f32::NAN)?.is_nan());
        assert!(rms.update(1.0)?.is_nan());
        assert!((rms.update(1.0)? - 1.0).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_reset() -> Result<(), FilterError> {
        let mut rms = Rms::new(4)?;
        rms.process_batch(&[5.0, 5.0])?;
        rms.reset();
        assert_eq!(rms.sample_count(), 0);
        assert!(rms.value().abs() < 1e-7);
        let y = rms.update(1.0)?;
        assert!((y - 1.0).abs() < 1e-7);
        Ok(())
    }
}
