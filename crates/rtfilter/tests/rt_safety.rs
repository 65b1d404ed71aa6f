//! Sample-path allocation checks.
//!
//! Every filter is built before the guard opens; only `update`,
//! `update_with_dt`, `process_into` and `reset` run inside it.

use rtfilter::prelude::*;
use rtfilter_test_helpers::prelude::*;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn drive<F: Filter>(filter: &mut F, input: &[f32]) -> Result<f32, FilterError> {
    let mut last = 0.0;
    for &x in input {
        last = filter.update(x)?;
    }
    Ok(last)
}

#[test]
fn test_every_filter_updates_without_allocating() -> TestResult {
    let input = sine(1.0, 7.0, 1000.0, 256);
    let mut filters: Vec<AnyFilter> = vec![
        Alpha::new(0.3, 0.0)?.into(),
        LowPass::new(10.0, 1000.0, 0.0)?.into(),
        HighPass::new(10.0, 1000.0, 0.0)?.into(),
        TauLowPass::with_fs(0.05, 1000.0, 0.0)?.into(),
        SlewRateLimiter::with_fs(10.0, None, 0.0, 1000.0)?.into(),
        MovingAverage::new(16, 0.0)?.into(),
        Median::new(9, 0.0)?.into(),
        Rms::new(16)?.into(),
        Kalman::default().into(),
        Adaptive::default().into(),
        Butterworth::new(50.0, 1000.0, ButterworthMode::Lowpass)?.into(),
        Fir::new(vec![0.1; 32])?.into(),
        AngleEma::default().into(),
        Pid::new(PidConfig::new(1.0, 2.0, 0.05).with_fs(1000.0).with_tau_d(0.005))?.into(),
    ];

    for filter in &mut filters {
        let guard = track();
        drive(filter, &input)?;
        filter.reset();
        drive(filter, &input)?;
        assert_no_alloc!(guard, filter.kind());
    }
    Ok(())
}

#[test]
fn test_chain_update_without_allocating() -> TestResult {
    let input = noise(7, 512, 1.0);
    let mut chain = FilterChain::new(vec![
        Median::new(5, 0.0)?.into(),
        Butterworth::new(40.0, 1000.0, ButterworthMode::Lowpass)?.into(),
        SlewRateLimiter::with_fs(200.0, None, 0.0, 1000.0)?.into(),
    ])?;
    let mut nested = FilterChain::new(vec![chain.clone().into(), Kalman::default().into()])?;

    let guard = track();
    drive(&mut chain, &input)?;
    drive(&mut nested, &input)?;
    assert_no_alloc!(guard, "FilterChain::update");
    Ok(())
}

#[test]
fn test_process_into_without_allocating() -> TestResult {
    let input = ramp(128, 0.0, 0.01);
    let mut output = vec![0.0f32; input.len()];
    let mut ma = MovingAverage::new(8, 0.0)?;

    let guard = track();
    let written = ma.process_into(&input, &mut output)?;
    assert_no_alloc!(guard, "process_into");
    assert_eq!(written, input.len());
    Ok(())
}

#[test]
fn test_variable_rate_updates_without_allocating() -> TestResult {
    let mut tau = TauLowPass::new(0.1, 0.0)?;
    let mut limiter = SlewRateLimiter::new(5.0, Some(2.0), 0.0)?;
    let mut pid = Pid::new(PidConfig::new(0.5, 2.0, 0.0).with_anti_windup(AntiWindup::BackCalc, 1.0))?;
    pid.set_setpoint(0.8, false)?;
    let mut plant = FirstOrderPlant::new(1.0, 1.0, 0.0);

    let guard = track();
    for i in 0..500u16 {
        let dt = 0.001 + f32::from(i % 5) * 0.0005;
        tau.update_with_dt(1.0, dt)?;
        limiter.update_with_dt(1.0, dt)?;
        let u = pid.update_with_dt(plant.y, dt)?;
        plant.step(u, dt);
    }
    assert_no_alloc!(guard, "update_with_dt");
    Ok(())
}

#[test]
fn test_fir_same_length_retune_without_allocating() -> TestResult {
    let mut fir = Fir::new(vec![0.25; 4])?;
    let taps = [0.1, 0.2, 0.3, 0.4];
    drive(&mut fir, &[1.0, 2.0, 3.0])?;

    let guard = track();
    fir.update(4.0)?;
    assert_no_alloc!(guard, "Fir::update");
    drop(guard);

    fir.set_taps(&taps)?;
    assert_approx_eq!(fir.update(0.0)?, 0.2 * 4.0 + 0.3 * 3.0 + 0.4 * 2.0, 1e-5);
    Ok(())
}

#[test]
fn test_tracker_sees_allocations() {
    let guard = track();
    let v: Vec<u64> = std::hint::black_box(Vec::with_capacity(64));
    assert!(guard.has_allocations());
    assert!(guard.bytes() >= 64 * 8);
    drop(v);
}
