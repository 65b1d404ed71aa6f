//! Scalar Kalman filter for a constant-value process model.
//!
//! The outlier guard is a heuristic: an innovation larger than
//! [`Kalman::OUTLIER_SIGMA`] predicted standard deviations has its gain cut
//! to [`Kalman::OUTLIER_GAIN_SCALE`] of the nominal value. It bounds the
//! damage of a single wild measurement; it is not χ²-gated rejection.

use rtfilter_errors::{ConfigurationError, FilterResult};

use crate::filter::Filter;

/// One-dimensional Kalman estimator.
///
/// Prediction is `x_pred = x`, `p_pred = p + q`. If `p_pred` exceeds the
/// covariance ceiling the covariance is re-seeded to 1 before the update,
/// which keeps a long run of rejected samples from inflating `p` without
/// bound.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut kf = Kalman::new(0.01, 0.1, 0.0)?;
/// for _ in 0..100 {
///     kf.update(1.0)?;
/// }
/// assert!((kf.estimate() - 1.0).abs() < 1e-3);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kalman {
    q: f32,
    r: f32,
    p_cap: f32,
    initial_estimate: f32,
    initial_error: f32,
    x: f32,
    p: f32,
    k: f32,
    count: u64,
}

impl Kalman {
    /// Innovations beyond this many predicted standard deviations are outliers.
    pub const OUTLIER_SIGMA: f32 = 3.0;
    /// Fraction of the nominal gain applied to an outlier.
    pub const OUTLIER_GAIN_SCALE: f32 = 0.1;
    /// Default process noise `q`.
    pub const DEFAULT_PROCESS_NOISE: f32 = 0.01;
    /// Default measurement noise `r`.
    pub const DEFAULT_MEASUREMENT_NOISE: f32 = 0.1;
    /// Default initial error covariance.
    pub const DEFAULT_INITIAL_ERROR: f32 = 1.0;
    /// Default covariance ceiling.
    pub const DEFAULT_P_CAP: f32 = 100.0;

    /// Create an estimator with process noise `q`, measurement noise `r`,
    /// and default initial error and covariance ceiling.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `q >= 0` and `r > 0`.
    pub fn new(process_noise: f32, measurement_noise: f32, initial_estimate: f32) -> FilterResult<Self> {
        Self::with_params(
            process_noise,
            measurement_noise,
            initial_estimate,
            Self::DEFAULT_INITIAL_ERROR,
            Self::DEFAULT_P_CAP,
        )
    }

    /// Create an estimator with every parameter explicit.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `q >= 0`, `r > 0`,
    /// `initial_error >= 0` and `p_cap > 0`.
    pub fn with_params(
        process_noise: f32,
        measurement_noise: f32,
        initial_estimate: f32,
        initial_error: f32,
        p_cap: f32,
    ) -> FilterResult<Self> {
        let q = ConfigurationError::non_negative("process_noise", process_noise)?;
        let r = ConfigurationError::positive("measurement_noise", measurement_noise)?;
        let initial_estimate = ConfigurationError::finite("initial_estimate", initial_estimate)?;
        let initial_error = ConfigurationError::non_negative("initial_error", initial_error)?;
        let p_cap = ConfigurationError::positive("p_cap", p_cap)?;
        Ok(Self {
            q,
            r,
            p_cap,
            initial_estimate,
            initial_error,
            x: initial_estimate,
            p: initial_error,
            k: 0.0,
            count: 0,
        })
    }

    /// Current state estimate.
    pub fn estimate(&self) -> f32 {
        self.x
    }

    /// Current error covariance. Never negative.
    pub fn covariance(&self) -> f32 {
        self.p
    }

    /// Effective gain applied on the last update.
    pub fn gain(&self) -> f32 {
        self.k
    }

    /// Process noise `q`.
    pub fn process_noise(&self) -> f32 {
        self.q
    }

    /// Measurement noise `r`.
    pub fn measurement_noise(&self) -> f32 {
        self.r
    }
}

impl Default for Kalman {
    fn default() -> Self {
        Self {
            q: Self::DEFAULT_PROCESS_NOISE,
            r: Self::DEFAULT_MEASUREMENT_NOISE,
            p_cap: Self::DEFAULT_P_CAP,
            initial_estimate: 0.0,
            initial_error: Self::DEFAULT_INITIAL_ERROR,
            x: 0.0,
            p: Self::DEFAULT_INITIAL_ERROR,
            k: 0.0,
            count: 0,
        }
    }
}

impl Filter for Kalman {
    #[inline]
    fn update(&mut self, z: f32) -> FilterResult<f32> {
        let mut p_pred = self.p + self.q;
        if p_pred > self.p_cap {
            self.p = 1.0;
            p_pred = 1.0 + self.q;
        }

        let mut k = p_pred / (p_pred + self.r);
        let innovation = z - self.x;
        if innovation.abs() > Self::OUTLIER_SIGMA * p_pred.sqrt() {
            k *= Self::OUTLIER_GAIN_SCALE;
        }

        self.x += k * innovation;
        self.p = ((1.0 - k) * p_pred).max(0.0);
        self.k = k;
        self.count = self.count.saturating_add(1);
        Ok(self.x)
    }

    fn reset(&mut self) {
        self.x = self.initial_estimate;
        self.p = self.initial_error;
        self.k = 0.0;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }
}
