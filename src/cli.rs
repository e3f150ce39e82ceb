use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pvstretch::{StretchParams, WavFormat};
use tracing_subscriber::EnvFilter;

/// Change the duration of a WAV file without changing its pitch.
#[derive(Parser, Debug)]
#[command(name = "pvstretch-cli", version, about)]
struct Args {
    /// Input WAV file.
    input: PathBuf,

    /// Output WAV file.
    output: PathBuf,

    /// Stretch ratio (1.5 = 50% longer, 0.5 = twice as fast).
    ratio: f64,

    /// Analysis window size in samples.
    #[arg(long, default_value_t = pvstretch::core::DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Analysis hop in samples [default: window size / 4].
    #[arg(long)]
    hop_size: Option<usize>,

    /// Output sample format: float, pcm16 or pcm24.
    #[arg(long, default_value = "float")]
    format: WavFormat,

    /// Show detailed processing parameters and timing.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_params(args: &Args) -> StretchParams {
    let params = StretchParams::new(args.ratio).with_window_size(args.window_size);
    match args.hop_size {
        Some(hop) => params.with_hop_size(hop),
        None => params,
    }
}

fn run(args: &Args) -> Result<()> {
    let params = build_params(args);
    params.validate().context("invalid stretch parameters")?;

    let buffer = pvstretch::io::read_wav_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    tracing::info!(
        frames = buffer.num_frames(),
        sample_rate = buffer.sample_rate,
        channels = buffer.channels,
        duration_secs = buffer.duration_secs(),
        "input"
    );
    tracing::debug!(%params, "parameters");

    let start = Instant::now();
    let output = pvstretch::stretch_buffer(&buffer, &params).context("stretching failed")?;
    let elapsed = start.elapsed();

    let ratio = if buffer.num_frames() > 0 {
        output.num_frames() as f64 / buffer.num_frames() as f64
    } else {
        0.0
    };
    tracing::info!(
        frames = output.num_frames(),
        duration_secs = output.duration_secs(),
        ratio,
        "output"
    );

    let processing_secs = elapsed.as_secs_f64();
    let realtime_factor = if processing_secs > 0.0 {
        buffer.duration_secs() / processing_secs
    } else {
        f64::INFINITY
    };
    tracing::debug!(processing_secs, realtime_factor, "timing");

    pvstretch::io::write_wav_file(&args.output, &output, args.format)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!("written to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_ratio() {
        let args = Args::try_parse_from(["pvstretch-cli", "in.wav", "out.wav", "1.5"]).unwrap();
        assert_eq!(args.ratio, 1.5);
        assert_eq!(args.window_size, 1024);
        assert_eq!(args.format, WavFormat::Float32);
        let params = build_params(&args);
        assert_eq!(params.effective_hop_size(), 256);
    }

    #[test]
    fn test_framing_options() {
        let args = Args::try_parse_from([
            "pvstretch-cli",
            "in.wav",
            "out.wav",
            "0.8",
            "--window-size",
            "2048",
            "--hop-size",
            "256",
            "--format",
            "pcm24",
        ])
        .unwrap();
        let params = build_params(&args);
        assert_eq!(params.window_size, 2048);
        assert_eq!(params.effective_hop_size(), 256);
        assert_eq!(args.format, WavFormat::Pcm24);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from([
            "pvstretch-cli",
            "in.wav",
            "out.wav",
            "1.0",
            "--format",
            "mp3"
        ])
        .is_err());
    }

    #[test]
    fn test_invalid_ratio_is_reported() {
        let args = Args::try_parse_from(["pvstretch-cli", "in.wav", "out.wav", "0"]).unwrap();
        assert!(run(&args).is_err());
    }
}
