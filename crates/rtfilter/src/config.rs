//! Declarative filter construction.
//!
//! A [`FilterSpec`] names a filter kind and its construction parameters. It
//! deserializes from any serde format, and [`FilterSpec::build`] runs the
//! same validating constructors as hand-written code.
//!
//! ```
//! use rtfilter::prelude::*;
//!
//! let json = r#"{
//!     "type": "chain",
//!     "stages": [
//!         { "type": "median", "window_size": 5 },
//!         { "type": "butterworth", "fc": 20.0, "fs": 1000.0 },
//!         { "type": "slew_rate", "rise_per_s": 50.0, "fs": 1000.0 }
//!     ]
//! }"#;
//! let spec: FilterSpec = serde_json::from_str(json)?;
//! let mut filter = spec.build()?;
//! assert_eq!(filter.kind(), "FilterChain");
//! filter.update(1.0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rtfilter_errors::FilterResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adaptive::Adaptive;
use crate::alpha::Alpha;
use crate::angle_ema::AngleEma;
use crate::any_filter::AnyFilter;
use crate::biquad::{Biquad, Butterworth, ButterworthMode};
use crate::chain::FilterChain;
use crate::fir::Fir;
use crate::first_order::{HighPass, LowPass};
use crate::kalman::Kalman;
use crate::median::Median;
use crate::moving_average::MovingAverage;
use crate::pid::{Pid, PidConfig};
use crate::rms::Rms;
use crate::slew_rate::SlewRateLimiter;
use crate::tau_low_pass::TauLowPass;

fn default_process_noise() -> f32 {
    Kalman::DEFAULT_PROCESS_NOISE
}

fn default_measurement_noise() -> f32 {
    Kalman::DEFAULT_MEASUREMENT_NOISE
}

fn default_initial_error() -> f32 {
    Kalman::DEFAULT_INITIAL_ERROR
}

fn default_p_cap() -> f32 {
    Kalman::DEFAULT_P_CAP
}

fn default_alpha_min() -> f32 {
    Adaptive::DEFAULT_ALPHA_MIN
}

fn default_alpha_max() -> f32 {
    Adaptive::DEFAULT_ALPHA_MAX
}

fn default_threshold() -> f32 {
    Adaptive::DEFAULT_THRESHOLD
}

fn default_angle_alpha() -> f32 {
    AngleEma::DEFAULT_ALPHA
}

/// Serializable description of one filter.
///
/// Optional parameters default to the same values as the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterSpec {
    /// [`Alpha`]
    Alpha {
        /// Smoothing coefficient in `(0, 1]`.
        alpha: f32,
        /// Initial output.
        #[serde(default)]
        initial: f32,
    },
    /// [`LowPass`]
    LowPass {
        /// Cutoff frequency in Hz.
        fc: f32,
        /// Sampling frequency in Hz.
        fs: f32,
        /// Initial output.
        #[serde(default)]
        initial: f32,
    },
    /// [`HighPass`]
    HighPass {
        /// Cutoff frequency in Hz.
        fc: f32,
        /// Sampling frequency in Hz.
        fs: f32,
        /// Initial output and previous input.
        #[serde(default)]
        initial: f32,
    },
    /// [`TauLowPass`]; needs `fs` to be usable inside a chain.
    TauLowPass {
        /// Time constant in seconds.
        tau_s: f32,
        /// Sampling frequency for fixed-rate use.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fs: Option<f32>,
        /// Initial output.
        #[serde(default)]
        initial: f32,
    },
    /// [`SlewRateLimiter`]; needs `fs` to be usable inside a chain.
    SlewRate {
        /// Rise rate in units per second.
        rise_per_s: f32,
        /// Fall rate in units per second (defaults to `rise_per_s`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fall_per_s: Option<f32>,
        /// Sampling frequency for fixed-rate use.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fs: Option<f32>,
        /// Hold band around the output.
        #[serde(default)]
        deadband: f32,
        /// Initial output.
        #[serde(default)]
        initial: f32,
    },
    /// [`MovingAverage`]
    MovingAverage {
        /// Window length.
        window_size: usize,
        /// Output before the first sample.
        #[serde(default)]
        initial: f32,
    },
    /// [`Median`]
    Median {
        /// Window length.
        window_size: usize,
        /// Output before the first sample.
        #[serde(default)]
        initial: f32,
    },
    /// [`Rms`]
    Rms {
        /// Window length.
        window_size: usize,
    },
    /// [`Kalman`]
    Kalman {
        /// Process noise `q`.
        #[serde(default = "default_process_noise")]
        process_noise: f32,
        /// Measurement noise `r`.
        #[serde(default = "default_measurement_noise")]
        measurement_noise: f32,
        /// Initial estimate.
        #[serde(default)]
        initial_estimate: f32,
        /// Initial error covariance.
        #[serde(default = "default_initial_error")]
        initial_error: f32,
        /// Covariance ceiling.
        #[serde(default = "default_p_cap")]
        p_cap: f32,
    },
    /// [`Adaptive`]
    Adaptive {
        /// Lower coefficient bound.
        #[serde(default = "default_alpha_min")]
        alpha_min: f32,
        /// Upper coefficient bound.
        #[serde(default = "default_alpha_max")]
        alpha_max: f32,
        /// Rate-of-change threshold.
        #[serde(default = "default_threshold")]
        threshold: f32,
        /// Initial output.
        #[serde(default)]
        initial: f32,
    },
    /// [`Biquad`]
    Biquad {
        /// Numerator coefficient b0
        b0: f32,
        /// Numerator coefficient b1
        b1: f32,
        /// Numerator coefficient b2
        b2: f32,
        /// Denominator coefficient a1
        a1: f32,
        /// Denominator coefficient a2
        a2: f32,
    },
    /// [`Butterworth`]
    Butterworth {
        /// Cutoff frequency in Hz.
        fc: f32,
        /// Sampling frequency in Hz.
        fs: f32,
        /// Response type.
        #[serde(default)]
        mode: ButterworthMode,
    },
    /// [`Fir`]
    Fir {
        /// Impulse response.
        taps: Vec<f32>,
    },
    /// [`AngleEma`]
    AngleEma {
        /// Smoothing coefficient in `(0, 1]`.
        #[serde(default = "default_angle_alpha")]
        alpha: f32,
        /// Seed angle in radians.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial: Option<f32>,
    },
    /// [`Pid`]; needs `config.fs` to be usable inside a chain.
    Pid {
        /// Controller parameters.
        #[serde(default)]
        config: PidConfig,
        /// Initial setpoint.
        #[serde(default)]
        setpoint: f32,
    },
    /// Nested [`FilterChain`].
    Chain {
        /// Members in processing order.
        stages: Vec<FilterSpec>,
    },
}

impl FilterSpec {
    /// Construct the described filter.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying constructor rejects.
    pub fn build(&self) -> FilterResult<AnyFilter> {
        let filter: AnyFilter = match self {
            FilterSpec::Alpha { alpha, initial } => Alpha::new(*alpha, *initial)?.into(),
            FilterSpec::LowPass { fc, fs, initial } => LowPass::new(*fc, *fs, *initial)?.into(),
            FilterSpec::HighPass { fc, fs, initial } => HighPass::new(*fc, *fs, *initial)?.into(),
            FilterSpec::TauLowPass { tau_s, fs, initial } => match fs {
                Some(fs) => TauLowPass::with_fs(*tau_s, *fs, *initial)?,
                None => TauLowPass::new(*tau_s, *initial)?,
            }
            .into(),
            FilterSpec::SlewRate {
                rise_per_s,
                fall_per_s,
                fs,
                deadband,
                initial,
            } => {
                let limiter = match fs {
                    Some(fs) => SlewRateLimiter::with_fs(*rise_per_s, *fall_per_s, *initial, *fs)?,
                    None => SlewRateLimiter::new(*rise_per_s, *fall_per_s, *initial)?,
                };
                limiter.with_deadband(*deadband)?.into()
            }
            FilterSpec::MovingAverage {
                window_size,
                initial,
            } => MovingAverage::new(*window_size, *initial)?.into(),
            FilterSpec::Median {
                window_size,
                initial,
            } => Median::new(*window_size, *initial)?.into(),
            FilterSpec::Rms { window_size } => Rms::new(*window_size)?.into(),
            FilterSpec::Kalman {
                process_noise,
                measurement_noise,
                initial_estimate,
                initial_error,
                p_cap,
            } => Kalman::with_params(
                *process_noise,
                *measurement_noise,
                *initial_estimate,
                *initial_error,
                *p_cap,
            )?
            .into(),
            FilterSpec::Adaptive {
                alpha_min,
                alpha_max,
                threshold,
                initial,
            } => Adaptive::new(*alpha_min, *alpha_max, *threshold, *initial)?.into(),
            FilterSpec::Biquad { b0, b1, b2, a1, a2 } => Biquad::new(*b0, *b1, *b2, *a1, *a2)?.into(),
            FilterSpec::Butterworth { fc, fs, mode } => Butterworth::new(*fc, *fs, *mode)?.into(),
            FilterSpec::Fir { taps } => Fir::new(taps.clone())?.into(),
            FilterSpec::AngleEma { alpha, initial } => AngleEma::new(*alpha, *initial)?.into(),
            FilterSpec::Pid { config, setpoint } => {
                let mut pid = Pid::new(*config)?;
                pid.set_setpoint(*setpoint, false)?;
                pid.into()
            }
            FilterSpec::Chain { stages } => FilterChain::from_specs(stages)?.into(),
        };
        debug!(kind = filter.kind(), "filter built from spec");
        Ok(filter)
    }
}

impl FilterChain {
    /// Build a chain from specs, in order.
    ///
    /// # Errors
    ///
    /// Returns the first member's construction error, or a configuration
    /// error if `specs` is empty or describes a variable-rate-only member.
    pub fn from_specs(specs: &[FilterSpec]) -> FilterResult<Self> {
        let filters = specs
            .iter()
            .map(FilterSpec::build)
            .collect::<FilterResult<Vec<_>>>()?;
        FilterChain::new(filters)
    }
}
