//! Overlap-add reconstruction of a signal from hop-shifted frames.

use crate::error::StretchError;
use crate::stretch::frames::FrameMatrix;

/// Length of the signal rebuilt from `num_frames` frames of `frame_len`
/// samples placed every `hop` samples: `num_frames * hop - hop + frame_len`.
///
/// Zero frames rebuild to an empty signal. Returns `None` if the length
/// overflows a `usize`.
#[inline]
pub fn output_length(num_frames: usize, hop: usize, frame_len: usize) -> Option<usize> {
    if num_frames == 0 {
        return Some(0);
    }
    (num_frames - 1).checked_mul(hop)?.checked_add(frame_len)
}

/// Sums each frame into the output at offset `i * hop`.
///
/// No normalization is applied; frames are expected to carry their own
/// window gain.
///
/// # Errors
/// Returns `InvalidHopSize` if `hop` is zero and `OutputTooLong` if the
/// output cannot be allocated.
pub fn reconstruct(frames: &FrameMatrix, hop: usize) -> Result<Vec<f32>, StretchError> {
    if hop == 0 {
        return Err(StretchError::InvalidHopSize(hop));
    }
    let frame_len = frames.frame_len();
    let too_long = || StretchError::OutputTooLong {
        frames: frames.num_frames(),
        hop,
    };
    let len = output_length(frames.num_frames(), hop, frame_len).ok_or_else(too_long)?;
    let mut output = Vec::new();
    output.try_reserve_exact(len).map_err(|_| too_long())?;
    output.resize(len, 0.0f32);

    for (i, frame) in frames.rows().enumerate() {
        let start = i * hop;
        for (out, &s) in output[start..start + frame_len].iter_mut().zip(frame.iter()) {
            *out += s;
        }
    }
    Ok(output)
}
