//! Format configuration loading.
//!
//! A format comes from an optional JSON file (any subset of
//! `sample_rate`, `channels`, `bits_per_sample`), then individual command
//! line flags override the file values.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wavewrite::WavFormat;

/// Per-field overrides taken from command line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOverrides {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub bits_per_sample: Option<u16>,
}

/// Loads a format from `config` (if any) and applies `overrides`.
///
/// The result is validated, so an 8-bit request fails here before any
/// output file is created.
pub fn load_format(config: Option<&Path>, overrides: FormatOverrides) -> Result<WavFormat> {
    let mut format = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read format config: {}", path.display()))?;
            serde_json::from_str::<WavFormat>(&text)
                .with_context(|| format!("Failed to parse format config: {}", path.display()))?
        }
        None => WavFormat::default(),
    };

    if let Some(rate) = overrides.sample_rate {
        format.sample_rate = rate;
    }
    if let Some(channels) = overrides.channels {
        format.channels = channels;
    }
    if let Some(bits) = overrides.bits_per_sample {
        format.bits_per_sample = bits;
    }

    format.validate().context("Invalid WAV format")?;
    Ok(format)
}
