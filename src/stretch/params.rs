//! Integer framing derived from user-facing stretch parameters.

use crate::core::types::StretchParams;
use crate::error::StretchError;

/// Validated integer framing derived from user-facing [`StretchParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmParams {
    pub window_size: usize,
    pub hop_analysis: usize,
    pub hop_synthesis: usize,
    pub stretch_ratio: f64,
}

impl AlgorithmParams {
    /// Validates the raw framing values and derives the synthesis hop.
    pub fn new(
        window_size: usize,
        hop_analysis: usize,
        stretch_ratio: f64,
    ) -> Result<Self, StretchError> {
        if window_size == 0 {
            return Err(StretchError::InvalidWindowSize(window_size));
        }
        if hop_analysis == 0 {
            return Err(StretchError::InvalidHopSize(hop_analysis));
        }
        let hop_synthesis = synthesis_hop(stretch_ratio, hop_analysis)?;

        if !window_size.is_power_of_two() {
            tracing::warn!(window_size, "window size is not a power of two; FFT will be slower");
        }
        if hop_analysis > window_size {
            tracing::warn!(
                hop_analysis,
                window_size,
                "hop exceeds window size; samples between frames are skipped"
            );
        }

        Ok(Self {
            window_size,
            hop_analysis,
            hop_synthesis,
            stretch_ratio,
        })
    }

    /// Create algorithm parameters from user-facing parameters.
    pub fn from_stretch_params(params: &StretchParams) -> Result<Self, StretchError> {
        Self::new(
            params.window_size,
            params.effective_hop_size(),
            params.stretch_ratio,
        )
    }
}

/// Synthesis hop for a stretch ratio: `round(ratio * hop)`, which must be at
/// least one sample and representable as a `usize`.
pub fn synthesis_hop(stretch_ratio: f64, hop_analysis: usize) -> Result<usize, StretchError> {
    if !stretch_ratio.is_finite() || stretch_ratio <= 0.0 {
        return Err(StretchError::InvalidRatio(stretch_ratio));
    }
    if hop_analysis == 0 {
        return Err(StretchError::InvalidHopSize(hop_analysis));
    }
    let hop = (stretch_ratio * hop_analysis as f64).round();
    if hop < 1.0 || hop >= usize::MAX as f64 {
        return Err(StretchError::InvalidSynthesisHop {
            ratio: stretch_ratio,
            hop: hop_analysis,
        });
    }
    Ok(hop as usize)
}
