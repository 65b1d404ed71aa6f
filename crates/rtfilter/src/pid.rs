//! PID controller with setpoint weighting, filtered derivative-on-measurement,
//! selectable anti-windup, manual tracking and bumpless setpoint changes.
//!
//! # Control law
//!
//! ```text
//! e_p = β·sp − y            (proportional, setpoint-weighted)
//! e_i = sp − y              (integral)
//! d   = −kd · dy/dt         (on measurement, optionally low-passed by tau_d)
//! u   = clamp(kp·e_p + I + d, out_min, out_max)
//! ```
//!
//! The integrator is clamped to `[i_min, i_max]` independently of the output.
//!
//! # State machine
//!
//! A fresh or reset controller has no previous measurement; its first
//! update uses `dy = 0`. Reset keeps setpoint, gains and limits.

use core::fmt;

use rtfilter_errors::{ConfigurationError, FilterError, FilterResult, OperationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::{Filter, VariableRate, checked_dt};

/// Integrator anti-windup strategy.
///
/// Codes match the controller's `AW_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AntiWindup {
    /// Integrate unconditionally (integrator limits still apply).
    None = 0,
    /// Skip integration while the unclamped output is saturated in the
    /// direction integration would push it.
    #[default]
    Clamp = 1,
    /// Bleed the integrator toward the clamped output:
    /// `I += k_aw·(u_sat − u_unsat)·dt`.
    BackCalc = 2,
}

impl AntiWindup {
    /// Numeric code of the mode.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AntiWindup {
    type Error = FilterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AntiWindup::None),
            1 => Ok(AntiWindup::Clamp),
            2 => Ok(AntiWindup::BackCalc),
            other => Err(FilterError::invalid_argument(format!(
                "unknown anti-windup code {other}, expected 0, 1 or 2"
            ))),
        }
    }
}

impl fmt::Display for AntiWindup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AntiWindup::None => write!(f, "none"),
            AntiWindup::Clamp => write!(f, "clamp"),
            AntiWindup::BackCalc => write!(f, "back_calc"),
        }
    }
}

/// Construction parameters for [`Pid`].
///
/// Unset integrator limits default to the output limits.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let config = PidConfig::new(2.0, 0.5, 0.0)
///     .with_fs(100.0)
///     .with_output_limits(-10.0, 10.0)
///     .with_anti_windup(AntiWindup::BackCalc, 0.5);
/// let pid = Pid::new(config)?;
/// assert_eq!(pid.config().i_max, Some(10.0));
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidConfig {
    /// Proportional gain, `>= 0`.
    pub kp: f32,
    /// Integral gain, `>= 0`.
    pub ki: f32,
    /// Derivative gain, `>= 0`.
    pub kd: f32,
    /// Sampling frequency for fixed-rate updates.
    pub fs: Option<f32>,
    /// Lower output limit.
    pub out_min: f32,
    /// Upper output limit, `> out_min`.
    pub out_max: f32,
    /// Lower integrator limit (defaults to `out_min`).
    pub i_min: Option<f32>,
    /// Upper integrator limit (defaults to `out_max`).
    pub i_max: Option<f32>,
    /// Setpoint weight on the proportional term, in `[0, 1]`.
    pub beta: f32,
    /// Derivative low-pass time constant in seconds; 0 disables it.
    pub tau_d: f32,
    /// Anti-windup strategy.
    pub aw_mode: AntiWindup,
    /// Back-calculation gain, `>= 0`.
    pub k_aw: f32,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            fs: None,
            out_min: -1.0,
            out_max: 1.0,
            i_min: None,
            i_max: None,
            beta: 1.0,
            tau_d: 0.0,
            aw_mode: AntiWindup::Clamp,
            k_aw: 1.0,
        }
    }
}

impl PidConfig {
    /// Defaults with the given gains.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            ..Self::default()
        }
    }

    /// Set the fixed sampling frequency.
    pub fn with_fs(mut self, fs: f32) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Set the output limits.
    pub fn with_output_limits(mut self, out_min: f32, out_max: f32) -> Self {
        self.out_min = out_min;
        self.out_max = out_max;
        self
    }

    /// Set explicit integrator limits.
    pub fn with_integrator_limits(mut self, i_min: f32, i_max: f32) -> Self {
        self.i_min = Some(i_min);
        self.i_max = Some(i_max);
        self
    }

    /// Set the setpoint weight.
    pub fn with_beta(mut self, beta: f32) -> Self {
        self.beta = beta;
        self
    }

    /// Set the derivative filter time constant.
    pub fn with_tau_d(mut self, tau_d: f32) -> Self {
        self.tau_d = tau_d;
        self
    }

    /// Set the anti-windup strategy and back-calculation gain.
    pub fn with_anti_windup(mut self, aw_mode: AntiWindup, k_aw: f32) -> Self {
        self.aw_mode = aw_mode;
        self.k_aw = k_aw;
        self
    }

    /// Check every constraint without building a controller.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> FilterResult<()> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> FilterResult<Limits> {
        ConfigurationError::non_negative("kp", self.kp)?;
        ConfigurationError::non_negative("ki", self.ki)?;
        ConfigurationError::non_negative("kd", self.kd)?;
        if let Some(fs) = self.fs {
            ConfigurationError::positive("fs", fs)?;
        }
        let output = Limits::output(self.out_min, self.out_max)?;
        let limits = Limits::integrator(
            output,
            self.i_min.unwrap_or(self.out_min),
            self.i_max.unwrap_or(self.out_max),
        )?;
        check_beta(self.beta)?;
        ConfigurationError::non_negative("tau_d", self.tau_d)?;
        ConfigurationError::non_negative("k_aw", self.k_aw)?;
        Ok(limits)
    }
}

fn check_beta(beta: f32) -> FilterResult<f32> {
    Ok(ConfigurationError::ensure(
        "beta",
        "in [0, 1]",
        beta,
        (0.0..=1.0).contains(&beta),
    )?)
}

/// Validated output and integrator bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Limits {
    out_min: f32,
    out_max: f32,
    i_min: f32,
    i_max: f32,
}

impl Limits {
    fn output(out_min: f32, out_max: f32) -> FilterResult<Self> {
        let out_min = ConfigurationError::finite("out_min", out_min)?;
        let out_max = ConfigurationError::finite("out_max", out_max)?;
        ConfigurationError::ensure("out_max", "greater than out_min", out_max, out_max > out_min)?;
        Ok(Self {
            out_min,
            out_max,
            i_min: out_min,
            i_max: out_max,
        })
    }

    fn integrator(self, i_min: f32, i_max: f32) -> FilterResult<Self> {
        let i_min = ConfigurationError::finite("i_min", i_min)?;
        let i_max = ConfigurationError::finite("i_max", i_max)?;
        ConfigurationError::ensure("i_max", "at least i_min", i_max, i_max >= i_min)?;
        Ok(Self {
            i_min,
            i_max,
            ..self
        })
    }

    #[inline]
    fn clamp_output(&self, u: f32) -> f32 {
        u.clamp(self.out_min, self.out_max)
    }

    #[inline]
    fn clamp_integrator(&self, i: f32) -> f32 {
        i.clamp(self.i_min, self.i_max)
    }
}

/// PID controller.
///
/// Fixed-rate [`Filter::update`] needs `fs`; [`VariableRate::update_with_dt`]
/// always works.
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut pid = Pid::new(PidConfig::new(1.0, 0.0, 0.0).with_fs(100.0))?;
/// pid.set_setpoint(0.5, false)?;
/// let u = pid.update(0.0)?;
/// assert!((u - 0.5).abs() < 1e-6);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    kp: f32,
    ki: f32,
    kd: f32,
    fs: Option<f32>,
    dt_fixed: Option<f32>,
    limits: Limits,
    beta: f32,
    tau_d: f32,
    aw_mode: AntiWindup,
    k_aw: f32,

    setpoint: f32,
    integrator: f32,
    y_prev: Option<f32>,
    d_filt: f32,
    u: f32,
    tracking: Option<f32>,
    count: u64,
}

impl Pid {
    /// Code 0: no anti-windup.
    pub const AW_NONE: AntiWindup = AntiWindup::None;
    /// Code 1: conditional integration.
    pub const AW_CLAMP: AntiWindup = AntiWindup::Clamp;
    /// Code 2: back-calculation.
    pub const AW_BACKCALC: AntiWindup = AntiWindup::BackCalc;

    /// Build a controller from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first configuration constraint violated.
    pub fn new(config: PidConfig) -> FilterResult<Self> {
        let limits = config.resolve()?;
        Ok(Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            fs: config.fs,
            dt_fixed: config.fs.map(|fs| 1.0 / fs),
            limits,
            beta: config.beta,
            tau_d: config.tau_d,
            aw_mode: config.aw_mode,
            k_aw: config.k_aw,
            setpoint: 0.0,
            integrator: 0.0,
            y_prev: None,
            d_filt: 0.0,
            u: 0.0,
            tracking: None,
            count: 0,
        })
    }

    /// Current configuration with integrator limits resolved.
    pub fn config(&self) -> PidConfig {
        PidConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            fs: self.fs,
            out_min: self.limits.out_min,
            out_max: self.limits.out_max,
            i_min: Some(self.limits.i_min),
            i_max: Some(self.limits.i_max),
            beta: self.beta,
            tau_d: self.tau_d,
            aw_mode: self.aw_mode,
            k_aw: self.k_aw,
        }
    }

    /// Current setpoint.
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// Most recent (clamped) output.
    pub fn output(&self) -> f32 {
        self.u
    }

    /// Current integrator value.
    pub fn integrator(&self) -> f32 {
        self.integrator
    }

    /// Whether manual tracking is active.
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Change the setpoint.
    ///
    /// With `keep_output` and a known previous measurement, the integrator
    /// is re-seeded so the next output for that same measurement equals the
    /// current output (bumpless change, subject to the integrator limits).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `setpoint` is not finite.
    pub fn set_setpoint(&mut self, setpoint: f32, keep_output: bool) -> FilterResult<()> {
        let setpoint = ConfigurationError::finite("setpoint", setpoint)?;
        if keep_output && let Some(y_prev) = self.y_prev {
            let e_p = self.beta * setpoint - y_prev;
            self.integrator = self.limits.clamp_integrator(self.u - self.kp * e_p);
            debug!(
                setpoint,
                integrator = self.integrator,
                "bumpless setpoint change"
            );
        }
        self.setpoint = setpoint;
        Ok(())
    }

    /// Replace any subset of the gains. All given values are validated
    /// before any is applied.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a given gain is negative or not finite.
    pub fn set_gains(&mut self, kp: Option<f32>, ki: Option<f32>, kd: Option<f32>) -> FilterResult<()> {
        let kp = kp.map(|v| ConfigurationError::non_negative("kp", v)).transpose()?;
        let ki = ki.map(|v| ConfigurationError::non_negative("ki", v)).transpose()?;
        let kd = kd.map(|v| ConfigurationError::non_negative("kd", v)).transpose()?;
        self.kp = kp.unwrap_or(self.kp);
        self.ki = ki.unwrap_or(self.ki);
        self.kd = kd.unwrap_or(self.kd);
        debug!(kp = self.kp, ki = self.ki, kd = self.kd, "PID gains updated");
        Ok(())
    }

    /// Replace the output limits.
    ///
    /// Integrator limits are pulled into the new output range. With
    /// `clamp_integrator` the integrator is clamped to them as well.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless both limits are finite and
    /// `out_max > out_min`.
    pub fn set_output_limits(&mut self, out_min: f32, out_max: f32, clamp_integrator: bool) -> FilterResult<()> {
        let output = Limits::output(out_min, out_max)?;
        let i_min = self.limits.i_min.clamp(output.out_min, output.out_max);
        let i_max = self.limits.i_max.clamp(output.out_min, output.out_max);
        self.limits = output.integrator(i_min, i_max)?;
        if clamp_integrator {
            self.integrator = self.limits.clamp_integrator(self.integrator);
        }
        debug!(out_min, out_max, i_min, i_max, "PID output limits updated");
        Ok(())
    }

    /// Replace the integrator limits and clamp the integrator into them.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless both limits are finite and
    /// `i_max >= i_min`.
    pub fn set_integrator_limits(&mut self, i_min: f32, i_max: f32) -> FilterResult<()> {
        self.limits = self.limits.integrator(i_min, i_max)?;
        self.integrator = self.limits.clamp_integrator(self.integrator);
        debug!(i_min, i_max, "PID integrator limits updated");
        Ok(())
    }

    /// Set the setpoint weight.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `beta` is in `[0, 1]`.
    pub fn set_beta(&mut self, beta: f32) -> FilterResult<()> {
        self.beta = check_beta(beta)?;
        Ok(())
    }

    /// Set the derivative filter time constant (0 disables filtering).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `tau_d` is negative or not finite.
    pub fn set_tau_d(&mut self, tau_d: f32) -> FilterResult<()> {
        self.tau_d = ConfigurationError::non_negative("tau_d", tau_d)?;
        Ok(())
    }

    /// Change the anti-windup mode and/or back-calculation gain.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `k_aw` is negative or not finite.
    pub fn set_aw(&mut self, mode: Option<AntiWindup>, k_aw: Option<f32>) -> FilterResult<()> {
        let k_aw = k_aw
            .map(|v| ConfigurationError::non_negative("k_aw", v))
            .transpose()?;
        self.aw_mode = mode.unwrap_or(self.aw_mode);
        self.k_aw = k_aw.unwrap_or(self.k_aw);
        debug!(mode = %self.aw_mode, k_aw = self.k_aw, "PID anti-windup updated");
        Ok(())
    }

    /// Enable fixed-rate updates at `fs` Hz.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `fs > 0`.
    pub fn set_fs(&mut self, fs: f32) -> FilterResult<()> {
        let fs = ConfigurationError::positive("fs", fs)?;
        self.fs = Some(fs);
        self.dt_fixed = Some(1.0 / fs);
        Ok(())
    }

    /// Load the integrator directly, clamped to its limits.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `value` is not finite.
    pub fn preload_integrator(&mut self, value: f32) -> FilterResult<()> {
        let value = ConfigurationError::finite("integrator", value)?;
        self.integrator = self.limits.clamp_integrator(value);
        Ok(())
    }

    /// Enter manual tracking: updates report `u_manual` and back-solve the
    /// integrator so leaving tracking is bumpless.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `u_manual` is not finite.
    pub fn start_tracking(&mut self, u_manual: f32) -> FilterResult<()> {
        let u_manual = ConfigurationError::finite("u_manual", u_manual)?;
        self.tracking = Some(u_manual);
        debug!(u_manual, "PID tracking started");
        Ok(())
    }

    /// Leave manual tracking. The integrator keeps its back-solved value.
    pub fn stop_tracking(&mut self) {
        if self.tracking.take().is_some() {
            debug!(integrator = self.integrator, "PID tracking stopped");
        }
    }

    #[inline]
    fn derivative_term(&mut self, y: f32, dt: f32) -> f32 {
        let dy = self.y_prev.map_or(0.0, |prev| (y - prev) / dt);
        let d = if self.tau_d > 0.0 {
            let a = dt / (self.tau_d + dt);
            self.d_filt = (1.0 - a) * self.d_filt + a * dy;
            self.d_filt
        } else {
            dy
        };
        -self.kd * d
    }

    #[inline]
    fn integrate(&mut self, e_i: f32, u_unsat: f32, dt: f32) {
        let lim = self.limits;
        match self.aw_mode {
            AntiWindup::None => {
                self.integrator = lim.clamp_integrator(self.integrator + self.ki * e_i * dt);
            }
            AntiWindup::Clamp => {
                let i_next = self.integrator + self.ki * e_i * dt;
                let winding_up = u_unsat > lim.out_max && i_next > self.integrator;
                let winding_down = u_unsat < lim.out_min && i_next < self.integrator;
                if !(winding_up || winding_down) {
                    self.integrator = lim.clamp_integrator(i_next);
                }
            }
            AntiWindup::BackCalc => {
                let u_sat = lim.clamp_output(u_unsat);
                let i_next =
                    self.integrator + self.ki * e_i * dt + self.k_aw * (u_sat - u_unsat) * dt;
                self.integrator = lim.clamp_integrator(i_next);
            }
        }
    }

    #[inline]
    fn step(&mut self, y: f32, dt: f32) -> f32 {
        let u_d = self.derivative_term(y, dt);
        let u_p = self.kp * (self.beta * self.setpoint - y);

        self.u = match self.tracking {
            Some(u_track) => {
                self.integrator = self.limits.clamp_integrator(u_track - u_p - u_d);
                self.limits.clamp_output(u_track)
            }
            None => {
                let u_unsat = u_p + self.integrator + u_d;
                self.integrate(self.setpoint - y, u_unsat, dt);
                self.limits.clamp_output(u_p + self.integrator + u_d)
            }
        };
        self.y_prev = Some(y);
        self.count = self.count.saturating_add(1);
        self.u
    }
}

impl Filter for Pid {
    /// Run one fixed-rate control step on measurement `meas`.
    #[inline]
    fn update(&mut self, meas: f32) -> FilterResult<f32> {
        let dt = self
            .dt_fixed
            .ok_or(OperationError::FixedRateUnavailable { filter: "Pid" })?;
        Ok(self.step(meas, dt))
    }

    fn reset(&mut self) {
        self.integrator = 0.0;
        self.y_prev = None;
        self.d_filt = 0.0;
        self.u = 0.0;
        self.tracking = None;
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }

    fn supports_fixed_rate(&self) -> bool {
        self.dt_fixed.is_some()
    }
}

impl VariableRate for Pid {
    #[inline]
    fn update_with_dt(&mut self, meas: f32, dt_s: f32) -> FilterResult<f32> {
        let dt = checked_dt(dt_s)?;
        Ok(self.step(meas, dt))
    }
}
