//! Core types, window function, and spectral transform.

pub mod fft;
pub mod types;
pub mod window;

pub use fft::{ComplexSpectrum, RealSamples, SpectralTransform};
pub use types::*;
pub use window::{apply_scaled_window, generate_window, normalization_gain};
