//! Deterministic test signals and plant models.
//!
//! Everything here is reproducible from its arguments (noise is seeded), so
//! tests that feed these into filters stay stable across runs.

use std::f32::consts::TAU;

/// `n` samples of `amplitude * sin(2π·freq_hz·t)` sampled at `fs`.
pub fn sine(amplitude: f32, freq_hz: f32, fs: f32, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| amplitude * (TAU * freq_hz * i as f32 / fs).sin())
        .collect()
}

/// `n` samples at `low`, switching to `high` from index `at` onward.
pub fn step(n: usize, at: usize, low: f32, high: f32) -> Vec<f32> {
    (0..n).map(|i| if i < at { low } else { high }).collect()
}

/// `n` samples of `start + slope·i`.
pub fn ramp(n: usize, start: f32, slope: f32) -> Vec<f32> {
    (0..n).map(|i| start + slope * i as f32).collect()
}

/// `n` samples of uniform noise in `[-amplitude, amplitude]` from a seeded RNG.
pub fn noise(seed: u64, n: usize, amplitude: f32) -> Vec<f32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n)
        .map(|_| (rng.f32() * 2.0 - 1.0) * amplitude)
        .collect()
}

/// First-order lag plant `τ·dy/dt = K·u − y`, integrated with forward Euler.
///
/// A slow plant (large `tau`) is what makes integrator windup visible in
/// controller tests.
#[derive(Debug, Clone, Copy)]
pub struct FirstOrderPlant {
    /// Static gain `K`.
    pub gain: f32,
    /// Time constant in seconds.
    pub tau: f32,
    /// Current plant output.
    pub y: f32,
}

impl FirstOrderPlant {
    /// Plant at rest with output `y0`.
    pub fn new(gain: f32, tau: f32, y0: f32) -> Self {
        Self { gain, tau, y: y0 }
    }

    /// Advance the plant by `dt` seconds under input `u`; returns the new output.
    pub fn step(&mut self, u: f32, dt: f32) -> f32 {
        self.y += dt * (self.gain * u - self.y) / self.tau;
        self.y
    }
}
