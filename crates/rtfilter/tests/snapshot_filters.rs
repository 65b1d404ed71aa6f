//! Insta snapshot tests for filter outputs.
//!
//! Each test feeds a known input sequence through a filter and captures the
//! exact output. Inputs are chosen so every output is exactly representable
//! in `f32`, keeping snapshots platform-stable.

use insta::assert_snapshot;
use rtfilter::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn run<F: Filter>(filter: &mut F, input: &[f32]) -> Result<String, FilterError> {
    Ok(format!("{:?}", filter.process_batch(input)?))
}

#[test]
fn moving_average_ramp_snapshot() -> TestResult {
    let mut ma = MovingAverage::new(4, 0.0)?;
    let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    assert_snapshot!(run(&mut ma, &input)?, @"[1.0, 1.5, 2.0, 2.5, 3.5, 4.5, 5.5, 6.5]");
    Ok(())
}

#[test]
fn median_spike_rejection_snapshot() -> TestResult {
    let mut median = Median::new(3, 0.0)?;
    let input = [1.0, 100.0, 2.0, 3.0, -50.0, 4.0, 5.0];
    assert_snapshot!(run(&mut median, &input)?, @"[1.0, 50.5, 2.0, 3.0, 2.0, 3.0, 4.0]");
    Ok(())
}

#[test]
fn slew_rate_asymmetric_snapshot() -> TestResult {
    let mut limiter = SlewRateLimiter::with_fs(10.0, Some(20.0), 0.0, 10.0)?;
    let input = [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0];
    assert_snapshot!(
        run(&mut limiter, &input)?,
        @"[1.0, 2.0, 3.0, 4.0, 5.0, 5.0, 3.0, 1.0, 0.0, 0.0]"
    );
    Ok(())
}

#[test]
fn slew_rate_deadband_snapshot() -> TestResult {
    let mut limiter = SlewRateLimiter::with_fs(10.0, None, 0.0, 10.0)?.with_deadband(0.5)?;
    let input = [0.25, 0.5, 2.0, 2.25, 1.0];
    assert_snapshot!(run(&mut limiter, &input)?, @"[0.0, 0.0, 1.0, 2.0, 1.0]");
    Ok(())
}

#[test]
fn fir_impulse_response_snapshot() -> TestResult {
    let mut fir = Fir::new(vec![1.0, 2.0, 3.0])?;
    let input = [1.0, 0.0, 0.0, 0.0, 0.0];
    assert_snapshot!(run(&mut fir, &input)?, @"[1.0, 2.0, 3.0, 0.0, 0.0]");
    Ok(())
}

#[test]
fn alpha_step_response_snapshot() -> TestResult {
    let mut alpha = Alpha::new(0.5, 0.0)?;
    let input = [1.0; 5];
    assert_snapshot!(run(&mut alpha, &input)?, @"[0.5, 0.75, 0.875, 0.9375, 0.96875]");
    Ok(())
}

#[test]
fn mode_names_snapshot() {
    let names = format!(
        "{} {} {} | {} {}",
        AntiWindup::None,
        AntiWindup::Clamp,
        AntiWindup::BackCalc,
        ButterworthMode::Lowpass,
        ButterworthMode::Highpass,
    );
    assert_snapshot!(names, @"none clamp back_calc | lowpass highpass");
}

#[test]
fn fixed_rate_unavailable_message_snapshot() -> TestResult {
    let mut tau = TauLowPass::new(0.1, 0.0)?;
    let err = tau.update(1.0).err().ok_or("expected an error")?;
    assert_snapshot!(
        err.to_string(),
        @"operation error: TauLowPass: fixed-rate update requires a sampling frequency; use update_with_dt or configure fs"
    );
    Ok(())
}

#[test]
fn invalid_alpha_message_snapshot() {
    let message = Alpha::new(1.5, 0.0).err().map(|e| e.to_string()).unwrap_or_default();
    assert_snapshot!(message, @"configuration error: alpha must be in (0, 1], got 1.5");
}

#[test]
fn slew_rate_spec_json_snapshot() -> TestResult {
    let spec = FilterSpec::SlewRate {
        rise_per_s: 10.0,
        fall_per_s: None,
        fs: Some(1000.0),
        deadband: 0.0,
        initial: 0.0,
    };
    assert_snapshot!(serde_json::to_string_pretty(&spec)?, @r#"
    {
      "type": "slew_rate",
      "rise_per_s": 10.0,
      "fs": 1000.0,
      "deadband": 0.0,
      "initial": 0.0
    }
    "#);
    Ok(())
}

#[test]
fn pid_spec_json_snapshot() -> TestResult {
    let spec = FilterSpec::Pid {
        config: PidConfig::new(2.0, 0.5, 0.0).with_fs(100.0),
        setpoint: 1.0,
    };
    assert_snapshot!(serde_json::to_string_pretty(&spec)?, @r#"
    {
      "type": "pid",
      "config": {
        "kp": 2.0,
        "ki": 0.5,
        "kd": 0.0,
        "fs": 100.0,
        "out_min": -1.0,
        "out_max": 1.0,
        "i_min": null,
        "i_max": null,
        "beta": 1.0,
        "tau_d": 0.0,
        "aw_mode": "clamp",
        "k_aw": 1.0
      },
      "setpoint": 1.0
    }
    "#);
    Ok(())
}
