//! Hash command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;
use wavewrite::compute_pcm_hash;

/// Run the hash command
///
/// Prints the BLAKE3 hash of the file's PCM data.
///
/// # Returns
/// Exit code: 0 success, 1 if no complete data chunk was found
pub fn run(input: &str) -> Result<ExitCode> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read WAV file: {}", input))?;
    match compute_pcm_hash(&bytes) {
        Some(hash) => {
            println!("{}", hash);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{}: no complete data chunk in {}", "error".red(), input);
            Ok(ExitCode::from(1))
        }
    }
}
