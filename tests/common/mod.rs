#![allow(dead_code)]

use std::f32::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

pub fn gen_sine(freq_hz: f32, sr: u32, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (2.0 * PI * freq_hz * i as f32 / sr as f32).sin())
        .collect()
}

pub fn gen_two_tone(freq_a: f32, amp_a: f32, freq_b: f32, amp_b: f32, sr: u32, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f32 / sr as f32;
            amp_a * (2.0 * PI * freq_a * t).sin() + amp_b * (2.0 * PI * freq_b * t).sin()
        })
        .collect()
}

/// Deterministic white noise in [-1, 1).
pub fn gen_noise(n: usize, seed: u32) -> Vec<f32> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
        })
        .collect()
}

pub fn rms(signal: &[f32]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = signal.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / signal.len() as f64).sqrt()
}

/// Frequency of the strongest spectral peak, using a Hann-windowed FFT
/// with parabolic interpolation around the peak bin.
pub fn dominant_freq(signal: &[f32], sr: u32) -> f64 {
    let n = signal.len();
    if n < 4 {
        return 0.0;
    }
    let mut buf: Vec<Complex<f64>> = signal
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos();
            Complex::new(s as f64 * w, 0.0)
        })
        .collect();
    FftPlanner::new().plan_fft_forward(n).process(&mut buf);

    let mags: Vec<f64> = buf[..n / 2].iter().map(|c| c.norm()).collect();
    let peak = (1..mags.len() - 1)
        .max_by(|&a, &b| mags[a].total_cmp(&mags[b]))
        .unwrap_or(1);

    let (l, c, r) = (mags[peak - 1], mags[peak], mags[peak + 1]);
    let denom = l - 2.0 * c + r;
    let offset = if denom.abs() > 1e-12 { 0.5 * (l - r) / denom } else { 0.0 };
    (peak as f64 + offset) * sr as f64 / n as f64
}
