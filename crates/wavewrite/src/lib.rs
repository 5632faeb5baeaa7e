//! Streaming RIFF/WAVE writer for 16-bit and 24-bit integer PCM.
//!
//! Captured audio arrives as normalized `f32` samples in `[-1.0, 1.0]`. The
//! [`WaveFileWriter`] converts each sample to integer PCM as it is written,
//! emitting the canonical 44-byte header lazily on the first sample and
//! patching the chunk sizes when the writer is closed.
//!
//! # Crate Structure
//!
//! - [`writer`] - The streaming [`WaveFileWriter`] and its lifecycle
//! - [`format`] - [`WavFormat`] parameters and derived sizes
//! - [`pcm`] - Sample quantization and PCM data hashing
//! - [`header`] - Canonical header layout and [`WavHeader`] parsing
//! - [`error`] - [`WavError`] and [`WavResult`]

pub mod error;
pub mod format;
pub mod header;
pub mod pcm;
pub mod writer;

// Re-export public API
pub use error::{WavError, WavResult};
pub use format::WavFormat;
pub use header::{WavHeader, HEADER_SIZE};
pub use pcm::{
    compute_pcm_hash, encode_sample, extract_pcm_data, pcm16_from_sample, pcm24_from_sample,
    samples_to_pcm,
};
pub use writer::{WaveFileWriter, WriterState};
