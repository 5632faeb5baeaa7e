//! Inspect command implementation
//!
//! Parses a WAV header and checks the declared sizes against the file.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use wavewrite::{compute_pcm_hash, WavHeader};

/// Machine-readable inspect report.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    /// Inspected file path.
    pub file: String,
    /// File length in bytes.
    pub file_size: u64,
    /// Parsed header.
    pub header: WavHeader,
    /// Whether the placeholder sizes were patched.
    pub finalized: bool,
    /// Whether the declared sizes match the file length.
    pub consistent: bool,
    /// Number of sample frames.
    pub frames: u64,
    /// Duration in seconds.
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM data, when the data chunk is readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}

/// Builds the report for `path`.
pub fn inspect_file(path: &Path) -> Result<InspectReport> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read WAV file: {}", path.display()))?;
    let header = WavHeader::parse(&bytes)
        .with_context(|| format!("Failed to parse WAV header: {}", path.display()))?;
    let file_size = bytes.len() as u64;

    Ok(InspectReport {
        file: path.display().to_string(),
        file_size,
        header,
        finalized: header.is_finalized(),
        consistent: header.is_consistent(file_size),
        frames: header.frame_count(),
        duration_seconds: header.duration_seconds(),
        pcm_hash: compute_pcm_hash(&bytes),
    })
}

/// Run the inspect command
///
/// # Arguments
/// * `input` - WAV file to inspect
/// * `json_output` - Print the report as JSON instead of colored text
///
/// # Returns
/// Exit code: 0 if the declared sizes are consistent, 1 otherwise
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let report = inspect_file(Path::new(input))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }

    if report.consistent {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_human(report: &InspectReport) {
    let format = &report.header.format;
    println!("{} {}", "Inspecting:".cyan().bold(), report.file);
    println!("  {} {} Hz", "Sample rate:".dimmed(), format.sample_rate);
    println!("  {} {}", "Channels:".dimmed(), format.channels);
    println!("  {} {}", "Bits:".dimmed(), format.bits_per_sample);
    println!(
        "  {} {} ({:.3} s)",
        "Frames:".dimmed(),
        report.frames,
        report.duration_seconds
    );
    println!(
        "  {} riff={} data={} file={}",
        "Sizes:".dimmed(),
        report.header.riff_size,
        report.header.data_size,
        report.file_size
    );
    if let Some(hash) = &report.pcm_hash {
        println!("  {} {}", "PCM hash:".dimmed(), hash);
    }

    if report.consistent {
        println!("{}", "ok sizes consistent".green());
    } else if !report.finalized {
        println!("{}", "!! sizes never patched (writer not closed?)".yellow());
    } else {
        println!("{}", "!! declared sizes do not match file length".red());
    }
}
