//! Prelude for the filters crate.
//!
//! This module re-exports the filters, both traits, the composition types
//! and the error types.
//!
//! # Example
//!
//! ```
//! use rtfilter::prelude::*;
//!
//! let mut median = Median::new(3, 0.0)?;
//! for x in [1.0, 100.0, 2.0] {
//!     median.update(x)?;
//! }
//! assert_eq!(median.value(), 2.0);
//! # Ok::<(), FilterError>(())
//! ```

pub use crate::adaptive::Adaptive;
pub use crate::alpha::Alpha;
pub use crate::angle_ema::{AngleEma, circular_difference, wrap_angle};
pub use crate::any_filter::AnyFilter;
pub use crate::biquad::{Biquad, BiquadCoefficients, Butterworth, ButterworthMode};
pub use crate::chain::FilterChain;
pub use crate::config::FilterSpec;
pub use crate::filter::{Filter, VariableRate};
pub use crate::fir::Fir;
pub use crate::first_order::{HighPass, LowPass};
pub use crate::kalman::Kalman;
pub use crate::median::Median;
pub use crate::moving_average::MovingAverage;
pub use crate::pid::{AntiWindup, Pid, PidConfig};
pub use crate::rms::Rms;
pub use crate::slew_rate::SlewRateLimiter;
pub use crate::tau_low_pass::TauLowPass;

pub use rtfilter_errors::{ConfigurationError, FilterError, FilterResult, OperationError};
