//! Time-domain and frequency-domain buffer types and the transform between them.
//!
//! [`RealSamples`] and [`ComplexSpectrum`] are kept as distinct types; the
//! only way to go from one to the other is through [`SpectralTransform`].

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Zero-valued complex number, used for FFT buffer initialization.
pub const COMPLEX_ZERO: Complex<f32> = Complex::new(0.0, 0.0);

/// A block of real-valued time-domain samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RealSamples(Vec<f32>);

impl RealSamples {
    pub fn new(samples: Vec<f32>) -> Self {
        Self(samples)
    }
}

impl Deref for RealSamples {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl DerefMut for RealSamples {
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.0
    }
}

impl From<Vec<f32>> for RealSamples {
    fn from(samples: Vec<f32>) -> Self {
        Self(samples)
    }
}

/// A full-length complex spectrum, one coefficient per bin `0..n`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexSpectrum(Vec<Complex<f32>>);

impl ComplexSpectrum {
    /// Builds a spectrum bin by bin from polar coordinates.
    pub fn from_polar(magnitudes: &[f32], phases: &[f32]) -> Self {
        Self(
            magnitudes
                .iter()
                .zip(phases.iter())
                .map(|(&m, &p)| Complex::from_polar(m, p))
                .collect(),
        )
    }

    /// Per-bin magnitude.
    pub fn magnitudes(&self) -> Vec<f32> {
        self.0.iter().map(|c| c.norm()).collect()
    }

    /// Per-bin phase angle, `atan2(im, re)`.
    pub fn phases(&self) -> Vec<f32> {
        self.0.iter().map(|c| c.arg()).collect()
    }
}

impl Deref for ComplexSpectrum {
    type Target = [Complex<f32>];

    fn deref(&self) -> &[Complex<f32>] {
        &self.0
    }
}

/// Forward and inverse DFT of a fixed size.
///
/// Plans are created once and reused for every frame.
pub struct SpectralTransform {
    size: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
}

impl SpectralTransform {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
            buffer: vec![COMPLEX_ZERO; size],
        }
    }

    /// Forward DFT of a real block. Inputs shorter than the transform size
    /// are zero-padded, longer ones truncated.
    pub fn forward(&mut self, samples: &RealSamples) -> ComplexSpectrum {
        self.buffer.iter_mut().for_each(|c| *c = COMPLEX_ZERO);
        for (slot, &s) in self.buffer.iter_mut().zip(samples.iter()) {
            *slot = Complex::new(s, 0.0);
        }
        self.forward.process(&mut self.buffer);
        ComplexSpectrum(self.buffer.clone())
    }

    /// Inverse DFT, scaled by `1/n`, keeping only the real part.
    pub fn inverse(&mut self, spectrum: &ComplexSpectrum) -> RealSamples {
        self.buffer.iter_mut().for_each(|c| *c = COMPLEX_ZERO);
        for (slot, &c) in self.buffer.iter_mut().zip(spectrum.iter()) {
            *slot = c;
        }
        self.inverse.process(&mut self.buffer);
        let norm = 1.0 / self.size as f32;
        RealSamples(self.buffer.iter().map(|c| c.re * norm).collect())
    }
}
