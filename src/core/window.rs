//! Analysis/synthesis window for the phase vocoder.
//!
//! The window is a Hann window of length `2 * size + 1` sampled at its odd
//! indices only. That gives `size` samples that taper towards zero at both
//! ends without touching zero at either edge, and whose squares overlap-add
//! to a constant at a hop of `size / 4`.

use std::f64::consts::PI;

/// Generates the odd-sampled Hann window of the given size.
pub fn generate_window(size: usize) -> Vec<f32> {
    if size == 0 {
        return vec![];
    }
    let full_len = 2 * size + 1;
    let denom = (full_len - 1) as f64;
    (0..size)
        .map(|i| {
            let n = (2 * i + 1) as f64;
            (0.5 - 0.5 * (2.0 * PI * n / denom).cos()) as f32
        })
        .collect()
}

/// Energy-normalizing gain for a window of `window_size` samples advanced
/// by `hop`: `1 / sqrt((window_size / hop) / 2)`.
///
/// `hop` must be non-zero.
#[inline]
pub fn normalization_gain(window_size: usize, hop: usize) -> f32 {
    let overlap = window_size as f64 / hop as f64;
    (1.0 / (overlap / 2.0).sqrt()) as f32
}

/// Applies a window function and a scalar gain in one pass.
#[inline]
pub fn apply_scaled_window(data: &mut [f32], window: &[f32], gain: f32) {
    for (sample, &w) in data.iter_mut().zip(window.iter()) {
        *sample *= w * gain;
    }
}
