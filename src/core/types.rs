//! Audio buffers and user-facing stretch parameters.

use crate::error::StretchError;

/// A single audio sample (32-bit float, nominal range -1.0 to 1.0).
pub type Sample = f32;

/// Default analysis window length in samples.
pub const DEFAULT_WINDOW_SIZE: usize = 1024;

/// Buffer holding audio samples in interleaved format.
///
/// For mono audio, samples are stored sequentially: `[s0, s1, s2, ...]`
/// For multichannel audio, samples are interleaved: `[L0, R0, L1, R1, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Raw interleaved sample data.
    pub data: Vec<Sample>,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new audio buffer.
    ///
    /// # Errors
    /// Returns `StretchError::InvalidChannels` if `channels` is 0 or does not
    /// divide the data length.
    pub fn new(data: Vec<Sample>, channels: u16, sample_rate: u32) -> Result<Self, StretchError> {
        if channels == 0 || data.len() % channels as usize != 0 {
            return Err(StretchError::InvalidChannels(channels));
        }
        Ok(Self {
            data,
            channels,
            sample_rate,
        })
    }

    /// Create a mono buffer.
    pub fn from_mono(data: Vec<Sample>, sample_rate: u32) -> Self {
        Self {
            data,
            channels: 1,
            sample_rate,
        }
    }

    /// Number of frames in the buffer (total samples / channels).
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.data.len() / self.channels as usize
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Returns true if the buffer contains no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a single channel's data as a new vector.
    pub fn channel_data(&self, channel: u16) -> Vec<Sample> {
        if channel >= self.channels {
            return Vec::new();
        }
        self.data
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// Create an `AudioBuffer` from separate channel vectors.
    ///
    /// # Errors
    /// Returns an error if no channels are given or their lengths differ.
    pub fn from_channels(
        channels_data: &[Vec<Sample>],
        sample_rate: u32,
    ) -> Result<Self, StretchError> {
        let num_channels = u16::try_from(channels_data.len())
            .map_err(|_| StretchError::InvalidChannels(u16::MAX))?;
        let Some(first) = channels_data.first() else {
            return Err(StretchError::InvalidChannels(0));
        };
        let num_frames = first.len();
        if let Some(ch) = channels_data.iter().find(|ch| ch.len() != num_frames) {
            return Err(StretchError::FrameLengthMismatch {
                expected: num_frames,
                actual: ch.len(),
            });
        }
        let mut data = Vec::with_capacity(num_frames * channels_data.len());
        for i in 0..num_frames {
            for ch in channels_data {
                data.push(ch[i]);
            }
        }
        AudioBuffer::new(data, num_channels, sample_rate)
    }
}

/// Parameters controlling the time stretch operation.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchParams {
    /// Stretch ratio: >1.0 = slower (longer), <1.0 = faster (shorter).
    pub stretch_ratio: f64,
    /// Analysis window length in samples (default: 1024).
    pub window_size: usize,
    /// Analysis hop in samples (default: window_size / 4).
    pub hop_size: Option<usize>,
    /// Number of interleaved channels (default: 1).
    pub channels: u16,
}

impl StretchParams {
    /// Create new stretch parameters with the given ratio and default framing.
    pub fn new(stretch_ratio: f64) -> Self {
        Self {
            stretch_ratio,
            window_size: DEFAULT_WINDOW_SIZE,
            hop_size: None,
            channels: 1,
        }
    }

    /// Set the analysis window size.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the analysis hop size.
    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = Some(hop_size);
        self
    }

    /// Set the number of channels.
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Get the effective analysis hop size.
    pub fn effective_hop_size(&self) -> usize {
        self.hop_size.unwrap_or(self.window_size / 4)
    }

    /// Synthesis hop, `round(stretch_ratio * hop)`.
    ///
    /// # Errors
    /// Fails for the same reasons as [`StretchParams::validate`].
    pub fn synthesis_hop(&self) -> Result<usize, StretchError> {
        self.validate()?;
        crate::stretch::params::synthesis_hop(self.stretch_ratio, self.effective_hop_size())
    }

    /// Exact number of samples [`crate::stretch_mono`] returns for an input
    /// of `input_len` samples.
    ///
    /// Returns 0 whenever `stretch_mono` would fail instead: invalid
    /// parameters, an input too short to frame, or an output too long to hold.
    pub fn output_length(&self, input_len: usize) -> usize {
        let Ok(hop_out) = self.synthesis_hop() else {
            return 0;
        };
        let hop = self.effective_hop_size();
        let Some(padded) = crate::LEADING_PAD_HOPS
            .checked_mul(hop)
            .and_then(|pad| pad.checked_add(input_len))
        else {
            return 0;
        };
        if padded < self.window_size {
            return 0;
        }
        let num_frames = (padded - self.window_size) / hop;
        crate::stretch::overlap_add::output_length(num_frames, hop_out, self.window_size)
            .unwrap_or(0)
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), StretchError> {
        if self.window_size == 0 {
            return Err(StretchError::InvalidWindowSize(self.window_size));
        }
        let hop = self.effective_hop_size();
        if hop == 0 {
            return Err(StretchError::InvalidHopSize(hop));
        }
        if !self.stretch_ratio.is_finite() || self.stretch_ratio <= 0.0 {
            return Err(StretchError::InvalidRatio(self.stretch_ratio));
        }
        if self.channels == 0 {
            return Err(StretchError::InvalidChannels(self.channels));
        }
        crate::stretch::params::synthesis_hop(self.stretch_ratio, hop)?;
        Ok(())
    }
}

impl std::fmt::Display for StretchParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ratio={:.4}, window={}, hop={}, channels={}",
            self.stretch_ratio,
            self.window_size,
            self.effective_hop_size(),
            self.channels
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_buffer_mono() {
        let buf = AudioBuffer::new(vec![0.1, 0.2, 0.3], 1, 44100).unwrap();
        assert_eq!(buf.num_frames(), 3);
        assert!((buf.duration_secs() - 3.0 / 44100.0).abs() < 1e-10);
    }

    #[test]
    fn test_audio_buffer_invalid_channels() {
        assert!(AudioBuffer::new(vec![0.1], 0, 44100).is_err());
        // 3 samples cannot be split across 2 channels
        assert!(AudioBuffer::new(vec![0.1, 0.2, 0.3], 2, 44100).is_err());
    }

    #[test]
    fn test_audio_buffer_channel_data() {
        let buf = AudioBuffer::new(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 2, 44100).unwrap();
        assert_eq!(buf.channel_data(0), vec![0.1, 0.3, 0.5]);
        assert_eq!(buf.channel_data(1), vec![0.2, 0.4, 0.6]);
        assert!(buf.channel_data(2).is_empty());
    }

    #[test]
    fn test_audio_buffer_from_channels() {
        let left = vec![0.1, 0.3, 0.5];
        let right = vec![0.2, 0.4, 0.6];
        let buf = AudioBuffer::from_channels(&[left, right], 44100).unwrap();
        assert_eq!(buf.channels, 2);
        assert_eq!(buf.data, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_audio_buffer_from_channels_mismatched() {
        let left = vec![0.1, 0.3];
        let right = vec![0.2, 0.4, 0.6];
        assert!(AudioBuffer::from_channels(&[left, right], 44100).is_err());
        assert!(AudioBuffer::from_channels(&[], 44100).is_err());
    }

    #[test]
    fn test_stretch_params_defaults() {
        let params = StretchParams::new(1.5);
        assert_eq!(params.window_size, 1024);
        assert_eq!(params.effective_hop_size(), 256);
        assert_eq!(params.channels, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_stretch_params_invalid() {
        assert!(matches!(
            StretchParams::new(0.0).validate(),
            Err(StretchError::InvalidRatio(_))
        ));
        assert!(StretchParams::new(-1.0).validate().is_err());
        assert!(StretchParams::new(f64::NAN).validate().is_err());
        assert!(matches!(
            StretchParams::new(1.0).with_window_size(0).validate(),
            Err(StretchError::InvalidWindowSize(0))
        ));
        assert!(matches!(
            StretchParams::new(1.0).with_hop_size(0).validate(),
            Err(StretchError::InvalidHopSize(0))
        ));
        assert!(matches!(
            StretchParams::new(1.0).with_channels(0).validate(),
            Err(StretchError::InvalidChannels(0))
        ));
    }

    #[test]
    fn test_tiny_ratio_rejected_by_synthesis_hop() {
        // 0.001 * 256 rounds to 0
        let params = StretchParams::new(0.001);
        assert!(matches!(
            params.validate(),
            Err(StretchError::InvalidSynthesisHop { .. })
        ));
    }

    #[test]
    fn test_output_length() {
        // 4096 + 768 padded, 15 frames, hop_out 512
        let params = StretchParams::new(2.0);
        assert_eq!(params.output_length(4096), 15 * 512 - 512 + 1024);
        assert_eq!(StretchParams::new(0.0).output_length(4096), 0);
        assert_eq!(StretchParams::new(1e18).output_length(5000), 0);
    }

    #[test]
    fn test_display() {
        let s = StretchParams::new(1.5).with_channels(2).to_string();
        assert!(s.contains("ratio=1.5000"));
        assert!(s.contains("hop=256"));
    }
}
