#![forbid(unsafe_code)]
//! Phase-vocoder time stretching in pure Rust.
//!
//! `pvstretch` changes the duration of audio without altering its pitch.
//! A signal is cut into overlapping windowed frames, each frame's per-bin
//! instantaneous frequency is estimated from its phase progression, and the
//! frames are resynthesized and overlap-added at a new hop.
//!
//! # Quick Start
//!
//! ```
//! use pvstretch::StretchParams;
//!
//! // 1 second of 440 Hz sine at 44.1 kHz
//! let input: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//!
//! let params = StretchParams::new(1.5);
//! let output = pvstretch::stretch(&input, &params).unwrap();
//! assert!(output.len() > input.len()); // ~1.5x longer
//! ```
//!
//! # Building blocks
//!
//! The pipeline behind [`stretch_mono`] is exposed piece by piece:
//! [`stretch::frame`] cuts a signal into a [`FrameMatrix`],
//! [`stretch::stretch_frames`] runs the phase vocoder over it, and
//! [`stretch::reconstruct`] overlap-adds the result.

pub mod core;
pub mod error;
pub mod io;
pub mod stretch;

use rayon::prelude::*;

pub use crate::core::types::{AudioBuffer, Sample, StretchParams};
pub use error::{Result, StretchError};
pub use io::WavFormat;
pub use stretch::{AlgorithmParams, FrameMatrix, PhaseVocoder};

/// Number of analysis hops of silence prepended before framing, so the
/// first real samples fall under fully overlapped windows.
pub const LEADING_PAD_HOPS: usize = 3;

/// Deinterleaves multi-channel audio into separate per-channel vectors.
#[inline]
fn deinterleave(input: &[f32], num_channels: usize) -> Vec<Vec<f32>> {
    (0..num_channels)
        .map(|ch| {
            input
                .iter()
                .skip(ch)
                .step_by(num_channels)
                .copied()
                .collect()
        })
        .collect()
}

/// Interleaves per-channel vectors into a single buffer, truncating to the shortest channel.
#[inline]
fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let min_len = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..min_len)
        .flat_map(|i| channels.iter().map(move |ch| ch[i]))
        .collect()
}

/// Stretches a single channel.
///
/// The signal is prefixed with [`LEADING_PAD_HOPS`] hops of silence, framed,
/// run through a fresh [`PhaseVocoder`], and overlap-added at the synthesis
/// hop. The result has exactly [`StretchParams::output_length`] samples.
///
/// # Errors
///
/// Invalid parameters are rejected before any processing. Returns
/// [`StretchError::InputTooShort`] if the padded signal is shorter than one
/// window.
pub fn stretch_mono(input: &[f32], params: &StretchParams) -> Result<Vec<f32>> {
    let algo = AlgorithmParams::from_stretch_params(params)?;
    let hop = algo.hop_analysis;

    let pad = LEADING_PAD_HOPS * hop;
    let mut padded = Vec::with_capacity(pad + input.len());
    padded.resize(pad, 0.0);
    padded.extend_from_slice(input);

    let frames = stretch::frame(&padded, hop, algo.window_size)?;
    tracing::debug!(
        input_len = input.len(),
        padded_len = padded.len(),
        frames = frames.num_frames(),
        "framed signal"
    );

    let mut vocoder = PhaseVocoder::new(algo);
    let stretched = vocoder.process(&frames)?;
    let output = stretch::reconstruct(&stretched, algo.hop_synthesis)?;

    tracing::debug!(
        output_len = output.len(),
        ratio = algo.stretch_ratio,
        hop_analysis = algo.hop_analysis,
        hop_synthesis = algo.hop_synthesis,
        "reconstructed signal"
    );
    Ok(output)
}

/// Stretches audio samples by the given parameters.
///
/// For multichannel input, provide interleaved samples and set
/// `params.channels`. Each channel runs through its own phase vocoder, in
/// parallel, and the results are re-interleaved.
///
/// # Errors
///
/// Returns [`StretchError::InvalidChannels`] if the input length is not a
/// multiple of the channel count, plus any error from [`stretch_mono`].
///
/// # Example
///
/// ```
/// use pvstretch::StretchParams;
///
/// let mono: Vec<f32> = (0..8192).map(|i| (i as f32 * 0.05).sin()).collect();
/// let stereo: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();
///
/// let params = StretchParams::new(2.0).with_channels(2);
/// let output = pvstretch::stretch(&stereo, &params).unwrap();
/// assert_eq!(output.len(), 2 * params.output_length(mono.len()));
/// ```
pub fn stretch(input: &[f32], params: &StretchParams) -> Result<Vec<f32>> {
    params.validate()?;

    let num_channels = params.channels as usize;
    if input.len() % num_channels != 0 {
        return Err(StretchError::InvalidChannels(params.channels));
    }
    if num_channels == 1 {
        return stretch_mono(input, params);
    }

    let channels = deinterleave(input, num_channels);
    let outputs = channels
        .par_iter()
        .map(|channel| stretch_mono(channel, params))
        .collect::<Result<Vec<_>>>()?;

    Ok(interleave(&outputs))
}

/// Stretches an [`AudioBuffer`], keeping its sample rate and channel count.
pub fn stretch_buffer(buffer: &AudioBuffer, params: &StretchParams) -> Result<AudioBuffer> {
    let params = params.clone().with_channels(buffer.channels);
    let data = stretch(&buffer.data, &params)?;
    AudioBuffer::new(data, buffer.channels, buffer.sample_rate)
}

/// Reads a WAV file, stretches every channel, and writes the result.
///
/// The channel count is taken from the file.
pub fn stretch_wav_file<P, Q>(
    input_path: P,
    output_path: Q,
    params: &StretchParams,
    format: WavFormat,
) -> Result<AudioBuffer>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
{
    let input = io::read_wav_file(input_path)?;
    let output = stretch_buffer(&input, params)?;
    io::write_wav_file(output_path, &output, format)?;
    Ok(output)
}
