//! Splitting a signal into overlapping fixed-size frames.

use crate::error::StretchError;

/// Equal-length frames stored row-major in one contiguous buffer.
///
/// Row `i` starts at sample offset `i * hop` of the signal it was cut from
/// (or will be overlap-added into).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrix {
    data: Vec<f32>,
    frame_len: usize,
}

impl FrameMatrix {
    /// Creates an empty matrix whose rows will hold `frame_len` samples.
    pub fn with_capacity(frame_len: usize, num_frames: usize) -> Self {
        Self {
            data: Vec::with_capacity(frame_len * num_frames),
            frame_len,
        }
    }

    /// Builds a matrix from a flat row-major buffer.
    ///
    /// # Errors
    /// Returns `FrameLengthMismatch` if `data` is not a whole number of rows.
    pub fn from_flat(data: Vec<f32>, frame_len: usize) -> Result<Self, StretchError> {
        if frame_len == 0 {
            return Err(StretchError::InvalidWindowSize(frame_len));
        }
        if data.len() % frame_len != 0 {
            return Err(StretchError::FrameLengthMismatch {
                expected: frame_len,
                actual: data.len() % frame_len,
            });
        }
        Ok(Self { data, frame_len })
    }

    /// Appends one row.
    ///
    /// # Errors
    /// Returns `FrameLengthMismatch` if the row has the wrong length.
    pub fn push_row(&mut self, row: &[f32]) -> Result<(), StretchError> {
        if row.len() != self.frame_len {
            return Err(StretchError::FrameLengthMismatch {
                expected: self.frame_len,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        if self.frame_len == 0 {
            return 0;
        }
        self.data.len() / self.frame_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns row `i`, or `None` past the last frame.
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let start = i.checked_mul(self.frame_len)?;
        self.data.get(start..start + self.frame_len)
    }

    /// Iterates rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on 0; an empty matrix of zero-length rows has no rows
        self.data.chunks_exact(self.frame_len.max(1))
    }
}

/// Number of whole frames the framer extracts: `floor((len - window_size) / hop)`.
///
/// Returns `None` when the signal is shorter than one window.
#[inline]
pub fn frame_count(signal_len: usize, hop: usize, window_size: usize) -> Option<usize> {
    signal_len.checked_sub(window_size).map(|span| span / hop)
}

/// Splits `signal` into overlapping frames of `window_size` samples taken
/// every `hop` samples.
///
/// The matrix holds exactly `floor((len - window_size) / hop)` rows; trailing
/// samples that do not complete a further frame are dropped.
///
/// # Errors
/// Rejects a zero `hop` or `window_size`, and signals shorter than one window.
pub fn frame(signal: &[f32], hop: usize, window_size: usize) -> Result<FrameMatrix, StretchError> {
    if window_size == 0 {
        return Err(StretchError::InvalidWindowSize(window_size));
    }
    if hop == 0 {
        return Err(StretchError::InvalidHopSize(hop));
    }
    let num_frames =
        frame_count(signal.len(), hop, window_size).ok_or(StretchError::InputTooShort {
            provided: signal.len(),
            minimum: window_size,
        })?;

    let mut frames = FrameMatrix::with_capacity(window_size, num_frames);
    for i in 0..num_frames {
        let start = i * hop;
        frames.push_row(&signal[start..start + window_size])?;
    }
    Ok(frames)
}
