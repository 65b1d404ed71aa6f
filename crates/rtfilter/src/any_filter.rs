//! Closed set of every filter in the crate, dispatched statically.
//!
//! [`AnyFilter`] lets heterogeneous filters live in one `Vec` (as in
//! [`FilterChain`]) without trait objects on the sample path.

use rtfilter_errors::FilterResult;

use crate::adaptive::Adaptive;
use crate::alpha::Alpha;
use crate::angle_ema::AngleEma;
use crate::biquad::{Biquad, Butterworth};
use crate::chain::FilterChain;
use crate::filter::Filter;
use crate::fir::Fir;
use crate::first_order::{HighPass, LowPass};
use crate::kalman::Kalman;
use crate::median::Median;
use crate::moving_average::MovingAverage;
use crate::pid::Pid;
use crate::rms::Rms;
use crate::slew_rate::SlewRateLimiter;
use crate::tau_low_pass::TauLowPass;

/// Any filter provided by this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyFilter {
    /// [`Alpha`]
    Alpha(Alpha),
    /// [`LowPass`]
    LowPass(LowPass),
    /// [`HighPass`]
    HighPass(HighPass),
    /// [`TauLowPass`]
    TauLowPass(TauLowPass),
    /// [`SlewRateLimiter`]
    SlewRate(SlewRateLimiter),
    /// [`MovingAverage`]
    MovingAverage(MovingAverage),
    /// [`Median`]
    Median(Median),
    /// [`Rms`]
    Rms(Rms),
    /// [`Kalman`]
    Kalman(Kalman),
    /// [`Adaptive`]
    Adaptive(Adaptive),
    /// [`Biquad`]
    Biquad(Biquad),
    /// [`Butterworth`]
    Butterworth(Butterworth),
    /// [`Fir`]
    Fir(Fir),
    /// [`AngleEma`]
    AngleEma(AngleEma),
    /// [`Pid`], fed measurements
    Pid(Pid),
    /// A nested [`FilterChain`]
    Chain(Box<FilterChain>),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            AnyFilter::Alpha($f) => $body,
            AnyFilter::LowPass($f) => $body,
            AnyFilter::HighPass($f) => $body,
            AnyFilter::TauLowPass($f) => $body,
            AnyFilter::SlewRate($f) => $body,
            AnyFilter::MovingAverage($f) => $body,
            AnyFilter::Median($f) => $body,
            AnyFilter::Rms($f) => $body,
            AnyFilter::Kalman($f) => $body,
            AnyFilter::Adaptive($f) => $body,
            AnyFilter::Biquad($f) => $body,
            AnyFilter::Butterworth($f) => $body,
            AnyFilter::Fir($f) => $body,
            AnyFilter::AngleEma($f) => $body,
            AnyFilter::Pid($f) => $body,
            AnyFilter::Chain($f) => $body,
        }
    };
}

impl AnyFilter {
    /// Name of the wrapped filter type.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyFilter::Alpha(_) => "Alpha",
            AnyFilter::LowPass(_) => "LowPass",
            AnyFilter::HighPass(_) => "HighPass",
            AnyFilter::TauLowPass(_) => "TauLowPass",
            AnyFilter::SlewRate(_) => "SlewRateLimiter",
            AnyFilter::MovingAverage(_) => "MovingAverage",
            AnyFilter::Median(_) => "Median",
            AnyFilter::Rms(_) => "Rms",
            AnyFilter::Kalman(_) => "Kalman",
            AnyFilter::Adaptive(_) => "Adaptive",
            AnyFilter::Biquad(_) => "Biquad",
            AnyFilter::Butterworth(_) => "Butterworth",
            AnyFilter::Fir(_) => "Fir",
            AnyFilter::AngleEma(_) => "AngleEma",
            AnyFilter::Pid(_) => "Pid",
            AnyFilter::Chain(_) => "FilterChain",
        }
    }
}

impl Filter for AnyFilter {
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        dispatch!(self, f => f.update(x))
    }

    fn reset(&mut self) {
        dispatch!(self, f => f.reset())
    }

    fn sample_count(&self) -> u64 {
        dispatch!(self, f => f.sample_count())
    }

    fn supports_fixed_rate(&self) -> bool {
        dispatch!(self, f => f.supports_fixed_rate())
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnyFilter {
                fn from(f: $ty) -> Self {
                    AnyFilter::$variant(f)
                }
            }
        )*
    };
}

impl_from!(
    Alpha(Alpha),
    LowPass(LowPass),
    HighPass(HighPass),
    TauLowPass(TauLowPass),
    SlewRate(SlewRateLimiter),
    MovingAverage(MovingAverage),
    Median(Median),
    Rms(Rms),
    Kalman(Kalman),
    Adaptive(Adaptive),
    Biquad(Biquad),
    Butterworth(Butterworth),
    Fir(Fir),
    AngleEma(AngleEma),
    Pid(Pid),
);

impl From<FilterChain> for AnyFilter {
    fn from(chain: FilterChain) -> Self {
        AnyFilter::Chain(Box::new(chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfilter_errors::FilterError;

    #[test]
    fn test_dispatch_matches_concrete_filter() -> Result<(), FilterError> {
        let mut concrete = Alpha::new(0.4, 0.0)?;
        let mut any = AnyFilter::from(Alpha::new(0.4, 0.0)?);
        for x in [1.0, 2.0, -3.0] {
            assert!((concrete.update(x)? - any.update(x)?).abs() < 1e-7);
        }
        assert_eq!(any.sample_count(), 3);
        any.reset();
        assert_eq!(any.sample_count(), 0);
        Ok(())
    }

    #[test]
    fn test_kind_names() -> Result<(), FilterError> {
        assert_eq!(AnyFilter::from(Rms::new(2)?).kind(), "Rms");
        assert_eq!(AnyFilter::from(Kalman::default()).kind(), "Kalman");
        let chain = FilterChain::new(vec![Median::new(3, 0.0)?.into()])?;
        assert_eq!(AnyFilter::from(chain).kind(), "FilterChain");
        Ok(())
    }

    #[test]
    fn test_fixed_rate_support_forwarded() -> Result<(), FilterError> {
        let variable: AnyFilter = TauLowPass::new(0.1, 0.0)?.into();
        let fixed: AnyFilter = TauLowPass::with_fs(0.1, 100.0, 0.0)?.into();
        assert!(!variable.supports_fixed_rate());
        assert!(fixed.supports_fixed_rate());
        Ok(())
    }
}
