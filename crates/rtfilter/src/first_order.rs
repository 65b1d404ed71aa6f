//! First-order low-pass and high-pass filters designed from a cutoff frequency.
//!
//! Both derive their coefficient once at construction from the same
//! prototype, so a `LowPass` and a `HighPass` with equal `(fc, fs)` are
//! complementary: their outputs sum to the input.

use std::f32::consts::PI;

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;

/// Pole of the first-order prototype, `exp(-2π·fc/fs)`.
fn prototype_pole(fc: f32, fs: f32) -> f32 {
    (-2.0 * PI * fc / fs).exp()
}

fn validate_design(fc: f32, fs: f32) -> FilterResult<(f32, f32)> {
    let fs = ConfigurationError::positive("fs", fs)?;
    let fc = ConfigurationError::below_nyquist("fc", fc, fs)?;
    Ok((fc, fs))
}

/// First-order IIR low-pass: `y = α·x + (1 − α)·y` with `α = 1 − exp(-2π·fc/fs)`.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut lp = LowPass::new(10.0, 1000.0, 0.0)?;
/// let y = lp.update(1.0)?;
/// assert!(y > 0.0 && y < 0.1);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LowPass {
    fc: f32,
    fs: f32,
    alpha: f32,
    initial: f32,
    y: f32,
    count: u64,
}

impl LowPass {
    /// Create a low-pass with cutoff `fc` Hz at sampling rate `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fs > 0` and `0 < fc < fs/2`.
    pub fn new(fc: f32, fs: f32, initial: f32) -> FilterResult<Self> {
        let (fc, fs) = validate_design(fc, fs)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            fc,
            fs,
            alpha: 1.0 - prototype_pole(fc, fs),
            initial,
            y: initial,
            count: 0,
        })
    }

    /// Cutoff frequency in Hz.
    pub fn fc(&self) -> f32 {
        self.fc
    }

    /// Sampling frequency in Hz.
    pub fn fs(&self) -> f32 {
        self.fs
    }

    /// Smoothing coefficient derived from the design.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }
}

impl Filter for LowPass {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        self.y = self.alpha * x + (1.0 - self.alpha) * self.y;
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.y = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}

/// First-order IIR high-pass: `y = a·(y + x − x_prev)` with `a = exp(-2π·fc/fs)`.
///
/// Both `y` and `x_prev` start at `initial`, so a constant input equal to
/// `initial` produces a decaying output from `initial`, not a spike.
#[derive(Debug, Clone, PartialEq)]
pub struct HighPass {
    fc: f32,
    fs: f32,
    pole: f32,
    initial: f32,
    y: f32,
    x_prev: f32,
    count: u64,
}

impl HighPass {
    /// Create a high-pass with cutoff `fc` Hz at sampling rate `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fs > 0` and `0 < fc < fs/2`.
    pub fn new(fc: f32, fs: f32, initial: f32) -> FilterResult<Self> {
        let (fc, fs) = validate_design(fc, fs)?;
        let initial = ConfigurationError::finite("initial", initial)?;
        Ok(Self {
            fc,
            fs,
            pole: prototype_pole(fc, fs),
            initial,
            y: initial,
            x_prev: initial,
            count: 0,
        })
    }

    /// Cutoff frequency in Hz.
    pub fn fc(&self) -> f32 {
        self.fc
    }

    /// Sampling frequency in Hz.
    pub fn fs(&self) -> f32 {
        self.fs
    }

    /// Pole `a` of the difference equation.
    pub fn pole(&self) -> f32 {
        self.pole
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y
    }
}

impl Filter for HighPass {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        self.y = self.pole * (self.y + x - self.x_prev);
        self.x_prev = x;
        self.count = self.count.saturating_add(1);
        Ok(self.y)
    }

    fn reset(&mut self) {
        self.y = self.initial;
        self.x_prev = self.initial;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}
