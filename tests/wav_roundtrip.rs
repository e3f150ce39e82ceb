//! File-level pipeline: write WAV, stretch file to file, read back.

mod common;

use common::gen_sine;
use pvstretch::io::{read_wav_file, write_wav_file};
use pvstretch::{stretch_buffer, stretch_wav_file, AudioBuffer, StretchError, StretchParams, WavFormat};

fn stereo_fixture(sample_rate: u32) -> AudioBuffer {
    let left = gen_sine(440.0, sample_rate, 8000);
    let right = gen_sine(880.0, sample_rate, 8000);
    AudioBuffer::from_channels(&[left, right], sample_rate).unwrap()
}

#[test]
fn test_stretch_wav_file_float() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");

    let input = stereo_fixture(44100);
    write_wav_file(&input_path, &input, WavFormat::Float32).unwrap();

    let params = StretchParams::new(1.5);
    let written = stretch_wav_file(&input_path, &output_path, &params, WavFormat::Float32).unwrap();
    let decoded = read_wav_file(&output_path).unwrap();

    assert_eq!(decoded.channels, 2);
    assert_eq!(decoded.sample_rate, 44100);
    assert_eq!(decoded.num_frames(), params.output_length(8000));
    assert_eq!(decoded, written);
    assert_eq!(decoded, stretch_buffer(&input, &params).unwrap());
}

#[test]
fn test_stretch_wav_file_16bit_from_16bit() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in16.wav");
    let output_path = dir.path().join("out16.wav");

    let input = AudioBuffer::from_mono(gen_sine(1000.0, 22050, 6000), 22050);
    write_wav_file(&input_path, &input, WavFormat::Pcm16).unwrap();

    let params = StretchParams::new(0.75);
    stretch_wav_file(&input_path, &output_path, &params, WavFormat::Pcm16).unwrap();
    let decoded = read_wav_file(&output_path).unwrap();

    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.sample_rate, 22050);
    assert_eq!(decoded.num_frames(), params.output_length(6000));
    assert!(decoded.data.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = stretch_wav_file(
        dir.path().join("missing.wav"),
        dir.path().join("out.wav"),
        &StretchParams::new(1.0),
        WavFormat::Float32,
    );
    assert!(matches!(result, Err(StretchError::Io(_))));
}

#[test]
fn test_invalid_ratio_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_wav_file(&input_path, &stereo_fixture(44100), WavFormat::Float32).unwrap();

    let result = stretch_wav_file(&input_path, &output_path, &StretchParams::new(0.0), WavFormat::Float32);
    assert!(matches!(result, Err(StretchError::InvalidRatio(_))));
    assert!(!output_path.exists());
}
