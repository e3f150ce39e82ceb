//! Phase vocoder analysis/resynthesis engine.
//!
//! Each frame is windowed and transformed, its per-bin instantaneous
//! frequency is estimated from the phase difference to the previous frame,
//! and the output phase is advanced by that frequency over the synthesis
//! hop. Magnitudes pass through untouched.

use std::f32::consts::PI;
use std::f64::consts::TAU;

use crate::core::fft::{ComplexSpectrum, RealSamples, SpectralTransform};
use crate::core::window::{apply_scaled_window, generate_window, normalization_gain};
use crate::error::StretchError;
use crate::stretch::frames::FrameMatrix;
use crate::stretch::params::AlgorithmParams;

const TWO_PI: f32 = 2.0 * PI;

/// Per-bin results of analysing one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    /// Magnitude spectrum of the windowed frame.
    pub magnitudes: Vec<f32>,
    /// Phase advance minus the bin's nominal advance, wrapped to `(-pi, pi]`.
    pub deviations: Vec<f32>,
    /// Estimated instantaneous angular frequency in radians per sample.
    pub true_freq: Vec<f32>,
}

/// Phase vocoder state for one channel's pass.
///
/// Phase state is private to the instance; create one per channel.
pub struct PhaseVocoder {
    window_size: usize,
    hop_analysis: usize,
    hop_synthesis: usize,
    window: Vec<f32>,
    analysis_gain: f32,
    synthesis_gain: f32,
    transform: SpectralTransform,
    /// Nominal angular frequency per bin, `2 pi k / N`.
    bin_frequency: Vec<f32>,
    /// Nominal phase advance per analysis hop, reduced mod 2 pi.
    expected_phase_advance: Vec<f32>,
    /// Nominal phase advance per synthesis hop, reduced mod 2 pi.
    synthesis_phase_advance: Vec<f32>,
    /// Previous analysis phase.
    prev_phase: Vec<f32>,
    /// Phase accumulator for resynthesis, kept in `[0, 2 pi)`.
    phase_accum: Vec<f32>,
    frames_processed: usize,
}

impl PhaseVocoder {
    /// Creates a new phase vocoder from validated parameters.
    pub fn new(params: AlgorithmParams) -> Self {
        let AlgorithmParams {
            window_size,
            hop_analysis,
            hop_synthesis,
            ..
        } = params;

        let n = window_size as f64;
        let bin_frequency = (0..window_size)
            .map(|bin| (TAU * bin as f64 / n) as f32)
            .collect();
        let advance = |hop: usize| -> Vec<f32> {
            (0..window_size)
                .map(|bin| ((TAU * bin as f64 * hop as f64 / n) % TAU) as f32)
                .collect()
        };

        Self {
            window_size,
            hop_analysis,
            hop_synthesis,
            window: generate_window(window_size),
            analysis_gain: normalization_gain(window_size, hop_analysis),
            synthesis_gain: normalization_gain(window_size, hop_synthesis),
            transform: SpectralTransform::new(window_size),
            bin_frequency,
            expected_phase_advance: advance(hop_analysis),
            synthesis_phase_advance: advance(hop_synthesis),
            prev_phase: vec![0.0; window_size],
            phase_accum: vec![0.0; window_size],
            frames_processed: 0,
        }
    }

    /// Validates the framing and creates a phase vocoder.
    pub fn with_framing(
        window_size: usize,
        hop_analysis: usize,
        stretch_ratio: f64,
    ) -> Result<Self, StretchError> {
        AlgorithmParams::new(window_size, hop_analysis, stretch_ratio).map(Self::new)
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    pub fn hop_analysis(&self) -> usize {
        self.hop_analysis
    }

    #[inline]
    pub fn hop_synthesis(&self) -> usize {
        self.hop_synthesis
    }

    /// Number of frames processed since creation or the last [`reset`](Self::reset).
    #[inline]
    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// Clears phase state so the next frame is treated as the first.
    pub fn reset(&mut self) {
        self.prev_phase.iter_mut().for_each(|x| *x = 0.0);
        self.phase_accum.iter_mut().for_each(|x| *x = 0.0);
        self.frames_processed = 0;
    }

    /// Windows and transforms one frame, estimates per-bin instantaneous
    /// frequency, and records this frame's phase for the next call.
    pub fn analyze(&mut self, frame: &[f32]) -> Result<FrameAnalysis, StretchError> {
        if frame.len() != self.window_size {
            return Err(StretchError::FrameLengthMismatch {
                expected: self.window_size,
                actual: frame.len(),
            });
        }

        let mut windowed = RealSamples::new(frame.to_vec());
        apply_scaled_window(&mut windowed, &self.window, self.analysis_gain);
        let spectrum = self.transform.forward(&windowed);

        let magnitudes = spectrum.magnitudes();
        let phases = spectrum.phases();
        let hop = self.hop_analysis as f32;

        let mut deviations = Vec::with_capacity(self.window_size);
        let mut true_freq = Vec::with_capacity(self.window_size);
        for (bin, &phase) in phases.iter().enumerate() {
            let phase_diff = phase - self.prev_phase[bin];
            let deviation = wrap_phase(phase_diff - self.expected_phase_advance[bin]);
            deviations.push(deviation);
            true_freq.push(self.bin_frequency[bin] + deviation / hop);
        }
        self.prev_phase.copy_from_slice(&phases);

        Ok(FrameAnalysis {
            magnitudes,
            deviations,
            true_freq,
        })
    }

    /// Advances the output phase of every bin by `hop_synthesis * true_freq`.
    fn accumulate_phase(&mut self, analysis: &FrameAnalysis) {
        let hop_ratio = self.hop_synthesis as f32 / self.hop_analysis as f32;
        for (bin, acc) in self.phase_accum.iter_mut().enumerate() {
            let advance = self.synthesis_phase_advance[bin] + analysis.deviations[bin] * hop_ratio;
            *acc = (*acc + advance).rem_euclid(TWO_PI);
        }
    }

    /// Inverse-transforms the analysed magnitudes with the accumulated phase.
    fn synthesize(&mut self, magnitudes: &[f32]) -> RealSamples {
        let spectrum = ComplexSpectrum::from_polar(magnitudes, &self.phase_accum);
        self.transform.inverse(&spectrum)
    }

    /// Runs the full analysis/resynthesis pipeline on one frame and returns
    /// the windowed output frame.
    pub fn process_frame(&mut self, frame: &[f32]) -> Result<RealSamples, StretchError> {
        let analysis = self.analyze(frame)?;
        self.accumulate_phase(&analysis);
        let mut output = self.synthesize(&analysis.magnitudes);
        apply_scaled_window(&mut output, &self.window, self.synthesis_gain);

        tracing::trace!(frame = self.frames_processed, "phase vocoder frame");
        self.frames_processed += 1;
        Ok(output)
    }

    /// Processes every frame in order, returning the output frames.
    pub fn process(&mut self, frames: &FrameMatrix) -> Result<FrameMatrix, StretchError> {
        if frames.frame_len() != self.window_size {
            return Err(StretchError::FrameLengthMismatch {
                expected: self.window_size,
                actual: frames.frame_len(),
            });
        }
        let mut output = FrameMatrix::with_capacity(self.window_size, frames.num_frames());
        for frame in frames.rows() {
            let out = self.process_frame(frame)?;
            output.push_row(&out)?;
        }
        Ok(output)
    }
}

/// Time-stretches a frame matrix taken at analysis hop `hop` by `stretch_ratio`.
///
/// Output row `i` is meant to be overlap-added at `i * round(stretch_ratio * hop)`.
///
/// # Errors
/// Invalid framing or ratio is rejected before any frame is processed.
pub fn stretch_frames(
    frames: &FrameMatrix,
    hop: usize,
    stretch_ratio: f64,
) -> Result<FrameMatrix, StretchError> {
    let mut pv = PhaseVocoder::with_framing(frames.frame_len(), hop, stretch_ratio)?;
    tracing::debug!(
        frames = frames.num_frames(),
        window_size = pv.window_size(),
        hop_analysis = pv.hop_analysis(),
        hop_synthesis = pv.hop_synthesis(),
        "phase vocoder pass"
    );
    pv.process(frames)
}

/// Wraps a phase value to `(-pi, pi]`.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = (phase + PI).rem_euclid(TWO_PI) - PI;
    if wrapped <= -PI {
        wrapped + TWO_PI
    } else {
        wrapped.min(PI)
    }
}
