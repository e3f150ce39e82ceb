//! Error types for the pvstretch crate.

use thiserror::Error;

/// Errors that can occur during time stretching.
#[derive(Error, Debug)]
pub enum StretchError {
    /// Window size must be non-zero.
    #[error("invalid window size: {0} (must be greater than 0)")]
    InvalidWindowSize(usize),
    /// Analysis hop must be non-zero.
    #[error("invalid hop size: {0} (must be greater than 0)")]
    InvalidHopSize(usize),
    /// Stretch ratio must be positive and finite.
    #[error("invalid stretch ratio: {0} (must be positive and finite)")]
    InvalidRatio(f64),
    /// `round(ratio * hop)` came out as zero or does not fit in a `usize`.
    #[error("stretch ratio {ratio} with hop {hop} gives an unusable synthesis hop")]
    InvalidSynthesisHop { ratio: f64, hop: usize },
    /// The overlap-added output length does not fit in memory.
    #[error("output too long: {frames} frames at a synthesis hop of {hop}")]
    OutputTooLong { frames: usize, hop: usize },
    /// Input too short for the given parameters.
    #[error("input too short: {provided} samples provided, {minimum} required")]
    InputTooShort { provided: usize, minimum: usize },
    /// Channel count is zero or does not divide the interleaved data.
    #[error("invalid channel layout: {0} channels")]
    InvalidChannels(u16),
    /// A frame matrix row length does not match the configured window size.
    #[error("frame length mismatch: expected {expected} samples per frame, got {actual}")]
    FrameLengthMismatch { expected: usize, actual: usize },
    /// Unsupported audio format.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    /// WAV decode/encode failure.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, StretchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_input_too_short() {
        let err = StretchError::InputTooShort {
            provided: 100,
            minimum: 1024,
        };
        assert_eq!(
            err.to_string(),
            "input too short: 100 samples provided, 1024 required"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.wav");
        let err: StretchError = io.into();
        assert!(matches!(err, StretchError::Io(_)));
    }
}
