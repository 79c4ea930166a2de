//! Synthetic landmark traces for demos.
//!
//! Pose pipelines report a landmark's vertical position once per video frame.
//! These generators mimic that: a resting level, cycles of a given period, and
//! tracking jitter.

#![allow(dead_code)] // Not every demo uses every generator

use std::f64::consts::PI;

/// Generates `reps` raised-cosine cycles of `period` frames starting and
/// ending at `rest`, with peak height `rest + amplitude`.
pub fn rep_cycles(reps: usize, period: usize, rest: f64, amplitude: f64) -> Vec<f64> {
    (0..reps * period)
        .map(|i| {
            let phase = 2.0 * PI * (i % period) as f64 / period as f64;
            rest + amplitude * 0.5 * (1.0 - phase.cos())
        })
        .collect()
}

/// Generates a triangle wave in [0, amplitude] that starts at 0.
///
/// # Arguments
/// * `samples` - Number of samples to generate
/// * `period` - Period in samples (even)
/// * `amplitude` - Peak value
pub fn triangle_wave(samples: usize, period: usize, amplitude: f64) -> Vec<f64> {
    let half = (period / 2).max(1);
    (0..samples)
        .map(|i| {
            let p = i % period;
            let rising = if p <= half { p } else { period - p };
            amplitude * rising as f64 / half as f64
        })
        .collect()
}

/// Generates white noise using a simple LCG random number generator.
///
/// # Arguments
/// * `samples` - Number of samples to generate
/// * `amplitude` - Peak amplitude (noise will be in range [-amplitude, amplitude])
/// * `seed` - Random seed for reproducibility
pub fn white_noise(samples: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..samples)
        .map(|_| {
            // Simple LCG: x_{n+1} = (a * x_n + c) mod m
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let normalized = (state as f64 / u64::MAX as f64) * 2.0 - 1.0;
            amplitude * normalized
        })
        .collect()
}

/// Builds a session: `lead_in` frames at rest, the rep cycles, then
/// `lead_out` frames at rest, all with additive tracking jitter.
pub fn session(
    lead_in: usize,
    reps: usize,
    period: usize,
    lead_out: usize,
    amplitude: f64,
    jitter: f64,
    seed: u64,
) -> Vec<f64> {
    let mut signal = vec![0.0; lead_in];
    signal.extend(rep_cycles(reps, period, 0.0, amplitude));
    signal.extend(std::iter::repeat(0.0).take(lead_out));

    if jitter > 0.0 {
        let noise = white_noise(signal.len(), jitter, seed);
        for (s, n) in signal.iter_mut().zip(noise) {
            *s += n;
        }
    }

    signal
}
