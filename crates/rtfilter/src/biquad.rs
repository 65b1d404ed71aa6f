//! Second-order IIR sections.
//!
//! [`Biquad`] is a Direct Form I section with caller-supplied coefficients.
//! [`Butterworth`] synthesizes the coefficients of a maximally flat
//! second-order low-pass or high-pass (Q = 1/√2) by the bilinear transform
//! and runs them through the same section.

use core::fmt;
use core::str::FromStr;
use std::f32::consts::{PI, SQRT_2};

use rtfilter_errors::{ConfigurationError, FilterError, FilterResult};
use serde::{Deserialize, Serialize};

use crate::filter::Filter;

/// Normalized biquad coefficients (`a0 = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadCoefficients {
    /// Numerator coefficient b0
    pub b0: f32,
    /// Numerator coefficient b1
    pub b1: f32,
    /// Numerator coefficient b2
    pub b2: f32,
    /// Denominator coefficient a1
    pub a1: f32,
    /// Denominator coefficient a2
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Pass-through section.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    fn validated(self) -> FilterResult<Self> {
        ConfigurationError::finite("b0", self.b0)?;
        ConfigurationError::finite("b1", self.b1)?;
        ConfigurationError::finite("b2", self.b2)?;
        ConfigurationError::finite("a1", self.a1)?;
        ConfigurationError::finite("a2", self.a2)?;
        Ok(self)
    }

    /// Whether both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle: `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Direct Form I biquad: `y = b0·x + b1·x1 + b2·x2 − a1·y1 − a2·y2`.
///
/// Pole stability is the caller's responsibility; see
/// [`Biquad::is_stable`]. Coefficients are never clamped.
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
/// // Two-tap moving average as a biquad.
/// let mut bq = Biquad::new(0.5, 0.5, 0.0, 0.0, 0.0)?;
/// assert_eq!(bq.update(1.0)?, 0.5);
/// assert_eq!(bq.update(1.0)?, 1.0);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Biquad {
    coeffs: BiquadCoefficients,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
    count: u64,
}

impl Biquad {
    /// Create a section from normalized coefficients.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any coefficient is not finite.
    pub fn new(b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) -> FilterResult<Self> {
        Self::from_coefficients(BiquadCoefficients { b0, b1, b2, a1, a2 })
    }

    /// Create a section from a coefficient set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any coefficient is not finite.
    pub fn from_coefficients(coeffs: BiquadCoefficients) -> FilterResult<Self> {
        Ok(Self {
            coeffs: coeffs.validated()?,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            count: 0,
        })
    }

    /// Hot-swap the coefficients. The delay line is kept.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any coefficient is not finite; the
    /// previous coefficients stay in place.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) -> FilterResult<()> {
        self.coeffs = BiquadCoefficients { b0, b1, b2, a1, a2 }.validated()?;
        Ok(())
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coeffs
    }

    /// Whether the current coefficients describe a stable section.
    pub fn is_stable(&self) -> bool {
        self.coeffs.is_stable()
    }

    /// Most recent output.
    pub fn value(&self) -> f32 {
        self.y1
    }
}

impl Filter for Biquad {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        let c = &self.coeffs;
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        self.count = self.count.saturating_add(1);
        Ok(y)
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}

/// Response type of a [`Butterworth`] section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButterworthMode {
    /// Pass frequencies below the cutoff.
    #[default]
    Lowpass,
    /// Pass frequencies above the cutoff.
    Highpass,
}

impl fmt::Display for ButterworthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButterworthMode::Lowpass => write!(f, "lowpass"),
            ButterworthMode::Highpass => write!(f, "highpass"),
        }
    }
}

impl FromStr for ButterworthMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowpass" => Ok(ButterworthMode::Lowpass),
            "highpass" => Ok(ButterworthMode::Highpass),
            other => Err(FilterError::invalid_argument(format!(
                "unknown Butterworth mode '{other}', expected 'lowpass' or 'highpass'"
            ))),
        }
    }
}

/// Second-order Butterworth low-pass or high-pass.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut lp = Butterworth::new(10.0, 1000.0, ButterworthMode::Lowpass)?;
/// assert!(lp.as_biquad().is_stable());
/// let mut y = 0.0;
/// for _ in 0..2000 {
///     y = lp.update(1.0)?;
/// }
/// assert!((y - 1.0).abs() < 1e-3);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Butterworth {
    biquad: Biquad,
    fc: f32,
    fs: f32,
    mode: ButterworthMode,
}

impl Butterworth {
    /// Design a section with cutoff `fc` Hz at sampling rate `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fs > 0` and `0 < fc < fs/2`.
    pub fn new(fc: f32, fs: f32, mode: ButterworthMode) -> FilterResult<Self> {
        let fs = ConfigurationError::positive("fs", fs)?;
        let fc = ConfigurationError::below_nyquist("fc", fc, fs)?;
        Ok(Self {
            biquad: Biquad::from_coefficients(Self::design(fc, fs, mode))?,
            fc,
            fs,
            mode,
        })
    }

    /// Bilinear-transform coefficients for the given design.
    pub fn design(fc: f32, fs: f32, mode: ButterworthMode) -> BiquadCoefficients {
        let k = (PI * fc / fs).tan();
        let k2 = k * k;
        let norm = 1.0 / (1.0 + SQRT_2 * k + k2);
        let a1 = 2.0 * (k2 - 1.0) * norm;
        let a2 = (1.0 - SQRT_2 * k + k2) * norm;
        let b0 = match mode {
            ButterworthMode::Lowpass => k2 * norm,
            ButterworthMode::Highpass => norm,
        };
        let b1 = match mode {
            ButterworthMode::Lowpass => 2.0 * b0,
            ButterworthMode::Highpass => -2.0 * b0,
        };
        BiquadCoefficients {
            b0,
            b1,
            b2: b0,
            a1,
            a2,
        }
    }

    /// Cutoff frequency in Hz.
    pub fn fc(&self) -> f32 {
        self.fc
    }

    /// Sampling frequency in Hz.
    pub fn fs(&self) -> f32 {
        self.fs
    }

    /// Response type.
    pub fn mode(&self) -> ButterworthMode {
        self.mode
    }

    /// Underlying section.
    pub fn as_biquad(&self) -> &Biquad {
        &self.biquad
    }
}

impl Filter for Butterworth {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        self.biquad.update(x)
    }

    fn reset(&mut self) {
        self.biquad.reset();
    }

    fn sample_count(&self) -> u64 {
        self.biquad.sample_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_form_one_impulse_response() -> Result<(), FilterError> {
        // y = x + 0.5·y1 : impulse response 1, 0.5, 0.25, ...
        let mut bq = Biquad::new(1.0, 0.0, 0.0, -0.5, 0.0)?;
        let out = bq.process_batch(&[1.0, 0.0, 0.0, 0.0])?;
        let expected = [1.0, 0.5, 0.25, 0.125];
        for (y, e) in out.iter().zip(expected) {
            assert!((y - e).abs() < 1e-7);
        }
        Ok(())
    }

    #[test]
    fn test_identity_passes_through() -> Result<(), FilterError> {
        let mut bq = Biquad::from_coefficients(BiquadCoefficients::default())?;
        for x in [0.25, -3.0, 7.5] {
            assert_eq!(bq.update(x)?.to_bits(), x.to_bits());
        }
        assert!(bq.is_stable());
        Ok(())
    }

    #[test]
    fn test_set_coefficients_keeps_delay_line() -> Result<(), FilterError> {
        let mut bq = Biquad::new(1.0, 0.0, 0.0, 0.0, 0.0)?;
        bq.update(2.0)?;
        bq.set_coefficients(0.0, 1.0, 0.0, 0.0, 0.0)?;
        let y = bq.update(0.0)?;
        assert!((y - 2.0).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_set_coefficients_rejects_non_finite_atomically() -> Result<(), FilterError> {
        let mut bq = Biquad::new(0.5, 0.5, 0.0, 0.0, 0.0)?;
        assert!(bq.set_coefficients(1.0, 1.0, 1.0, f32::NAN, 0.0).is_err());
        assert_eq!(bq.coefficients().b0.to_bits(), 0.5f32.to_bits());
        Ok(())
    }

    #[test]
    fn test_stability_triangle() -> Result<(), FilterError> {
        assert!(Biquad::new(1.0, 0.0, 0.0, -1.2, 0.5)?.is_stable());
        assert!(!Biquad::new(1.0, 0.0, 0.0, 0.0, 1.5)?.is_stable());
        assert!(!Biquad::new(1.0, 0.0, 0.0, -2.1, 0.9)?.is_stable());
        Ok(())
    }

    #[test]
    fn test_lowpass_unity_dc_gain() {
        let c = Butterworth::design(50.0, 1000.0, ButterworthMode::Lowpass);
        let dc = (c.b0 + c.b1 + c.b2) / (1.0 + c.a1 + c.a2);
        assert!((dc - 1.0).abs() < 1e-5);
        assert!(c.is_stable());
    }

    #[test]
    fn test_highpass_blocks_dc_passes_nyquist() {
        let c = Butterworth::design(50.0, 1000.0, ButterworthMode::Highpass);
        let dc = (c.b0 + c.b1 + c.b2) / (1.0 + c.a1 + c.a2);
        assert!(dc.abs() < 1e-5);
        let nyquist = (c.b0 - c.b1 + c.b2) / (1.0 - c.a1 + c.a2);
        assert!((nyquist - 1.0).abs() < 1e-4);
    }

    fn magnitude(c: &BiquadCoefficients, w: f32) -> f32 {
        let (s1, c1) = w.sin_cos();
        let (s2, c2) = (2.0 * w).sin_cos();
        let num_re = c.b0 + c.b1 * c1 + c.b2 * c2;
        let num_im = -(c.b1 * s1 + c.b2 * s2);
        let den_re = 1.0 + c.a1 * c1 + c.a2 * c2;
        let den_im = -(c.a1 * s1 + c.a2 * s2);
        num_re.hypot(num_im) / den_re.hypot(den_im)
    }

    #[test]
    fn test_cutoff_gain_is_minus_3db() {
        let (fc, fs) = (100.0, 1000.0);
        let w = 2.0 * PI * fc / fs;
        for mode in [ButterworthMode::Lowpass, ButterworthMode::Highpass] {
            let c = Butterworth::design(fc, fs, mode);
            let gain = magnitude(&c, w);
            assert!((gain - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4, "{mode}: {gain}");
        }
    }

    #[test]
    fn test_butterworth_rejects_bad_design() {
        assert!(Butterworth::new(500.0, 1000.0, ButterworthMode::Lowpass).is_err());
        assert!(Butterworth::new(-1.0, 1000.0, ButterworthMode::Highpass).is_err());
        assert!(Butterworth::new(10.0, 0.0, ButterworthMode::Lowpass).is_err());
    }

    #[test]
    fn test_mode_parse_and_display() -> Result<(), FilterError> {
        assert_eq!("highpass".parse::<ButterworthMode>()?, ButterworthMode::Highpass);
        assert_eq!(ButterworthMode::Lowpass.to_string(), "lowpass");
        let err = "bandpass".parse::<ButterworthMode>();
        assert!(matches!(err, Err(FilterError::InvalidArgument(_))));
        Ok(())
    }

    #[test]
    fn test_butterworth_reset() -> Result<(), FilterError> {
        let mut hp = Butterworth::new(20.0, 500.0, ButterworthMode::Highpass)?;
        let first = hp.process_batch(&[1.0, 0.0, -1.0, 0.5])?;
        hp.reset();
        assert_eq!(hp.sample_count(), 0);
        let second = hp.process_batch(&[1.0, 0.0, -1.0, 0.5])?;
        assert_eq!(first, second);
        Ok(())
    }
}
