//! WAV file reading and writing through `hound`.

use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::core::types::{AudioBuffer, Sample};
use crate::error::StretchError;

/// Output sample encoding for WAV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavFormat {
    /// 16-bit integer PCM.
    Pcm16,
    /// 24-bit integer PCM.
    Pcm24,
    /// 32-bit IEEE float.
    #[default]
    Float32,
}

impl WavFormat {
    fn spec(self, channels: u16, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            WavFormat::Pcm16 => (16, hound::SampleFormat::Int),
            WavFormat::Pcm24 => (24, hound::SampleFormat::Int),
            WavFormat::Float32 => (32, hound::SampleFormat::Float),
        };
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

impl std::str::FromStr for WavFormat {
    type Err = StretchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pcm16" | "16" => Ok(WavFormat::Pcm16),
            "pcm24" | "24" => Ok(WavFormat::Pcm24),
            "float" | "f32" | "32" => Ok(WavFormat::Float32),
            other => Err(StretchError::InvalidFormat(format!(
                "unknown WAV format '{}' (use pcm16, pcm24 or float)",
                other
            ))),
        }
    }
}

/// Reads WAV data from any reader. Integer samples are scaled to `[-1, 1)`.
pub fn read_wav<R: Read>(reader: R) -> Result<AudioBuffer, StretchError> {
    let reader = hound::WavReader::new(reader)?;
    let spec = reader.spec();

    let samples: Vec<Sample> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, bits @ 1..=32) => {
            let scale = 1.0 / (1u64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
        (hound::SampleFormat::Float, 32) => {
            reader.into_samples::<f32>().collect::<Result<_, _>>()?
        }
        (fmt, bits) => {
            return Err(StretchError::InvalidFormat(format!(
                "unsupported WAV sample format: {:?}, {} bits",
                fmt, bits
            )))
        }
    };

    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "decoded WAV"
    );
    AudioBuffer::new(samples, spec.channels, spec.sample_rate)
}

/// Reads a WAV file from disk.
pub fn read_wav_file<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, StretchError> {
    let file = std::fs::File::open(path)?;
    read_wav(std::io::BufReader::new(file))
}

/// Writes an audio buffer as WAV to any seekable writer.
pub fn write_wav<W: Write + Seek>(
    writer: W,
    buffer: &AudioBuffer,
    format: WavFormat,
) -> Result<(), StretchError> {
    let spec = format.spec(buffer.channels, buffer.sample_rate);
    let mut writer = hound::WavWriter::new(writer, spec)?;

    match format {
        WavFormat::Pcm16 => {
            for &sample in &buffer.data {
                writer.write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16)?;
            }
        }
        WavFormat::Pcm24 => {
            for &sample in &buffer.data {
                writer.write_sample((sample.clamp(-1.0, 1.0) * 8_388_607.0) as i32)?;
            }
        }
        WavFormat::Float32 => {
            for &sample in &buffer.data {
                writer.write_sample(sample)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}

/// Writes a WAV file to disk.
pub fn write_wav_file<P: AsRef<Path>>(
    path: P,
    buffer: &AudioBuffer,
    format: WavFormat,
) -> Result<(), StretchError> {
    let file = std::fs::File::create(path)?;
    write_wav(std::io::BufWriter::new(file), buffer, format)
}
