//! wavewrite CLI - write and inspect PCM WAV capture files
//!
//! Set `RUST_LOG=debug` to see header and size-patching events.

use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use wavewrite_cli::commands;
use wavewrite_cli::commands::tone::ToneOptions;
use wavewrite_cli::input::{load_format, FormatOverrides};

/// wavewrite - streaming 16/24-bit PCM WAV writer
#[derive(Parser)]
#[command(name = "wavewrite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sine test tone to a WAV file
    Tone {
        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Tone frequency in Hz
        #[arg(short, long, default_value_t = 1000.0)]
        frequency: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Peak amplitude (1.0 = full scale)
        #[arg(short, long, default_value_t = 0.5)]
        amplitude: f64,

        /// JSON file with sample_rate / channels / bits_per_sample
        #[arg(long)]
        config: Option<String>,

        /// Frame rate in Hz (overrides --config)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Channel count (overrides --config)
        #[arg(long)]
        channels: Option<u16>,

        /// Bits per sample, 16 or 24 (overrides --config)
        #[arg(long)]
        bits: Option<u16>,
    },

    /// Print a WAV file's header and check its declared sizes
    Inspect {
        /// WAV file to inspect
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the BLAKE3 hash of a WAV file's PCM data
    Hash {
        /// WAV file to hash
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tone {
            output,
            frequency,
            duration,
            amplitude,
            config,
            sample_rate,
            channels,
            bits,
        } => load_format(
            config.as_deref().map(Path::new),
            FormatOverrides {
                sample_rate,
                channels,
                bits_per_sample: bits,
            },
        )
        .and_then(|format| {
            commands::tone::run(
                &output,
                &ToneOptions {
                    frequency,
                    duration,
                    amplitude,
                    format,
                },
            )
        }),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Hash { input } => commands::hash::run(&input),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
