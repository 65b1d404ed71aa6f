//! Stateful real-time signal filters and a PID controller.
//!
//! Every filter owns its state, consumes one `f32` sample per
//! [`Filter::update`] call and returns one filtered sample. Construction
//! validates every parameter and fails with a [`FilterError`]; nothing is
//! silently clamped or swapped.
//!
//! # Overview
//!
//! - **Smoothing**: [`Alpha`], [`LowPass`], [`TauLowPass`], [`Adaptive`]
//! - **Rejection**: [`HighPass`], [`Median`], [`Kalman`]
//! - **Windowed statistics**: [`MovingAverage`], [`Rms`]
//! - **General LTI**: [`Biquad`], [`Butterworth`], [`Fir`]
//! - **Rate limiting**: [`SlewRateLimiter`]
//! - **Angles**: [`AngleEma`]
//! - **Control**: [`Pid`] with anti-windup, setpoint weighting and bumpless
//!   transfer
//! - **Composition**: [`FilterChain`] over [`AnyFilter`], buildable from a
//!   serializable [`FilterSpec`]
//!
//! # RT Safety
//!
//! - No heap allocation in `update`, `update_with_dt` or `process_into`
//! - Bounded execution time; windowed filters are O(window) at worst
//! - No logging on the sample path; `tracing` events are emitted only when
//!   filters are built or reconfigured
//!
//! # Example
//!
//! ```
//! use rtfilter::prelude::*;
//!
//! // Build at initialization time.
//! let mut lp = LowPass::new(10.0, 1000.0, 0.0)?;
//! let mut pid = Pid::new(PidConfig::new(0.8, 2.0, 0.0).with_fs(1000.0))?;
//! pid.set_setpoint(0.5, false)?;
//!
//! // In the 1 kHz loop.
//! let measurement = lp.update(0.1)?;
//! let u = pid.update(measurement)?;
//! assert!((-1.0..=1.0).contains(&u));
//! # Ok::<(), rtfilter::FilterError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod adaptive;
pub mod alpha;
pub mod angle_ema;
pub mod any_filter;
pub mod biquad;
pub mod chain;
pub mod config;
pub mod filter;
pub mod fir;
pub mod first_order;
pub mod kalman;
pub mod median;
pub mod moving_average;
pub mod pid;
pub mod prelude;
pub mod rms;
pub mod slew_rate;
pub mod tau_low_pass;
mod window;

pub use adaptive::Adaptive;
pub use alpha::Alpha;
pub use angle_ema::{AngleEma, circular_difference, wrap_angle};
pub use any_filter::AnyFilter;
pub use biquad::{Biquad, BiquadCoefficients, Butterworth, ButterworthMode};
pub use chain::FilterChain;
pub use config::FilterSpec;
pub use filter::{Filter, VariableRate};
pub use fir::Fir;
pub use first_order::{HighPass, LowPass};
pub use kalman::Kalman;
pub use median::Median;
pub use moving_average::MovingAverage;
pub use pid::{AntiWindup, Pid, PidConfig};
pub use rms::Rms;
pub use slew_rate::SlewRateLimiter;
pub use tau_low_pass::TauLowPass;

pub use rtfilter_errors::{ConfigurationError, FilterError, FilterResult, OperationError};
