//! Tone command implementation
//!
//! Writes a sine test tone through the streaming WAV writer.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::f64::consts::TAU;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use wavewrite::{WavFormat, WaveFileWriter};

/// Number of frames converted per `write_samples` call.
const CHUNK_FRAMES: usize = 1024;

/// Tone parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneOptions {
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Peak amplitude, normally in `[0.0, 1.0]`.
    pub amplitude: f64,
    /// Output format.
    pub format: WavFormat,
}

/// Run the tone command
///
/// # Arguments
/// * `output` - Destination WAV path
/// * `options` - Tone and format parameters
///
/// # Returns
/// Exit code: 0 success
pub fn run(output: &str, options: &ToneOptions) -> Result<ExitCode> {
    let frames = write_tone(Path::new(output), options)?;

    println!(
        "{} {} ({} frames, {} Hz, {} ch, {}-bit)",
        "Wrote".green().bold(),
        output,
        frames,
        options.format.sample_rate,
        options.format.channels,
        options.format.bits_per_sample
    );
    Ok(ExitCode::SUCCESS)
}

/// Writes the tone to `path` and returns the number of frames written.
pub fn write_tone(path: &Path, options: &ToneOptions) -> Result<u64> {
    if !(options.duration.is_finite() && options.duration >= 0.0) {
        bail!("duration must be a non-negative number of seconds");
    }
    if !(options.frequency.is_finite() && options.frequency > 0.0) {
        bail!("frequency must be positive");
    }

    let format = options.format;
    let frames = (options.duration * f64::from(format.sample_rate)).round() as u64;
    let channels = usize::from(format.channels);

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = WaveFileWriter::with_format(file, format)?;

    info!(
        path = %path.display(),
        frames,
        frequency = options.frequency,
        "writing tone"
    );

    let step = TAU * options.frequency / f64::from(format.sample_rate);
    let mut chunk = Vec::with_capacity(CHUNK_FRAMES * channels);
    let mut frame = 0u64;
    while frame < frames {
        chunk.clear();
        let end = (frame + CHUNK_FRAMES as u64).min(frames);
        for i in frame..end {
            let value = (options.amplitude * (step * i as f64).sin()) as f32;
            chunk.extend(std::iter::repeat(value).take(channels));
        }
        writer.write_samples(&chunk, 0, chunk.len())?;
        frame = end;
    }

    writer
        .close()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;
    Ok(frames)
}
