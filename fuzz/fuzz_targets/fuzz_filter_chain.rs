//! Fuzzes filter construction from JSON specs and a full chain with
//! arbitrary sample streams, including NaN and infinities.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_filter_chain
#![no_main]
use libfuzzer_sys::fuzz_target;
use rtfilter::prelude::*;

fn samples(data: &[u8]) -> impl Iterator<Item = f32> + '_ {
    data.chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
}

fn chain() -> FilterResult<FilterChain> {
    FilterChain::new(vec![
        Median::new(5, 0.0)?.into(),
        Kalman::default().into(),
        Butterworth::new(25.0, 1000.0, ButterworthMode::Lowpass)?.into(),
        Fir::new(vec![0.25, 0.5, 0.25])?.into(),
        AngleEma::default().into(),
        SlewRateLimiter::with_fs(20.0, None, 0.0, 1000.0)?.into(),
        Pid::new(PidConfig::new(1.0, 2.0, 0.01).with_fs(1000.0))?.into(),
    ])
}

/// Windows are allocated up front; keep fuzzed sizes within memory.
fn bounded(spec: &FilterSpec) -> bool {
    match spec {
        FilterSpec::MovingAverage { window_size, .. }
        | FilterSpec::Median { window_size, .. }
        | FilterSpec::Rms { window_size } => *window_size <= 4096,
        FilterSpec::Chain { stages } => stages.iter().all(bounded),
        _ => true,
    }
}

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON must either fail to parse, fail to build, or run.
    if let Ok(spec) = serde_json::from_slice::<FilterSpec>(data)
        && bounded(&spec)
    {
        if let Ok(mut filter) = spec.build() {
            let _ = filter.update(0.5);
            let _ = filter.update(f32::NAN);
            filter.reset();
        }
    }

    let Ok(mut chain) = chain() else {
        return;
    };
    for x in samples(data) {
        let _ = chain.update(x);
    }
    chain.reset();
    assert_eq!(chain.sample_count(), 0);
});
