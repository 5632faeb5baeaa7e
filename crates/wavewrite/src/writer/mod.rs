//! Streaming WAV writer.
//!
//! The header is written speculatively on the first sample with placeholder
//! sizes, samples are appended as they arrive, and [`WaveFileWriter::close`]
//! seeks back to patch the RIFF and data chunk sizes.
//!
//! ```no_run
//! use wavewrite::WaveFileWriter;
//!
//! let mut writer = WaveFileWriter::create("capture.wav")?;
//! writer.configure(48000, 2, 24)?;
//! writer.write_buffer(&[0.0, 0.25, -0.25, 0.5])?;
//! writer.close()?;
//! # Ok::<(), wavewrite::WavError>(())
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;

use crate::error::{WavError, WavResult};
use crate::format::{check_bits_per_sample, WavFormat};
use crate::header::{
    write_data_chunk_header, write_format_chunk, write_riff_header, DATA_SIZE_OFFSET,
    RIFF_SIZE_OFFSET,
};
use crate::pcm::encode_sample;

/// Lifecycle of a writer. A closed writer no longer exists: `close` consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// No format set yet; the defaults (44100 Hz, mono, 16-bit) apply.
    Unconfigured,
    /// Format set, header not yet written.
    Configured,
    /// Header written; the format is frozen.
    Writing,
}

/// Writes normalized float samples to a 16-bit or 24-bit PCM WAV stream.
pub struct WaveFileWriter<W: Write + Seek> {
    out: BufWriter<W>,
    format: WavFormat,
    state: WriterState,
    start_position: u64,
    riff_size_position: u64,
    data_size_position: u64,
    bytes_written: u64,
}

impl WaveFileWriter<File> {
    /// Creates (or truncates) `path` and returns a writer bound to it.
    pub fn create(path: impl AsRef<Path>) -> WavResult<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Seek> WaveFileWriter<W> {
    /// Wraps a seekable sink. Nothing is written until the first sample.
    pub fn new(sink: W) -> Self {
        Self {
            out: BufWriter::new(sink),
            format: WavFormat::default(),
            state: WriterState::Unconfigured,
            start_position: 0,
            riff_size_position: 0,
            data_size_position: 0,
            bytes_written: 0,
        }
    }

    /// Wraps a seekable sink with a format fixed up front.
    pub fn with_format(sink: W, format: WavFormat) -> WavResult<Self> {
        format.validate()?;
        let mut writer = Self::new(sink);
        writer.format = format;
        writer.state = WriterState::Configured;
        Ok(writer)
    }

    /// Sets frame rate, channel count and bit depth in one step.
    ///
    /// Fails without writing anything if `bits_per_sample` is not 16 or 24.
    pub fn configure(
        &mut self,
        frame_rate: u32,
        channel_count: u16,
        bits_per_sample: u16,
    ) -> WavResult<()> {
        self.update_format(WavFormat {
            channels: channel_count,
            sample_rate: frame_rate,
            bits_per_sample,
        })
    }

    /// Sets the frame rate in Hz. Default is 44100.
    pub fn set_frame_rate(&mut self, frame_rate: u32) -> WavResult<()> {
        self.update_format(WavFormat {
            sample_rate: frame_rate,
            ..self.format
        })
    }

    /// Sets the number of samples per frame. For stereo use 2. Default is 1.
    pub fn set_samples_per_frame(&mut self, samples_per_frame: u16) -> WavResult<()> {
        self.update_format(WavFormat {
            channels: samples_per_frame,
            ..self.format
        })
    }

    /// Sets the bit depth; only 16 and 24 are accepted. Default is 16.
    pub fn set_bits_per_sample(&mut self, bits: u16) -> WavResult<()> {
        check_bits_per_sample(bits)?;
        self.update_format(WavFormat {
            bits_per_sample: bits,
            ..self.format
        })
    }

    fn update_format(&mut self, format: WavFormat) -> WavResult<()> {
        check_bits_per_sample(format.bits_per_sample)?;
        if self.state == WriterState::Writing {
            return Err(WavError::HeaderAlreadyWritten);
        }
        format.validate()?;
        self.format = format;
        self.state = WriterState::Configured;
        Ok(())
    }

    /// Frame rate in Hz.
    pub fn frame_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Samples per frame (channel count).
    pub fn samples_per_frame(&self) -> u16 {
        self.format.channels
    }

    /// Bits per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample
    }

    /// Current format.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Total bytes written so far, header included.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Writes one sample, emitting the header first if needed.
    pub fn write_sample(&mut self, value: f32) -> WavResult<()> {
        if self.state != WriterState::Writing {
            self.write_header()?;
        }
        let n = encode_sample(&mut self.out, value, self.format.bits_per_sample)?;
        self.bytes_written += n as u64;
        Ok(())
    }

    /// Writes `count` samples of `buffer` starting at `start`, in order.
    pub fn write_samples(&mut self, buffer: &[f32], start: usize, count: usize) -> WavResult<()> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= buffer.len())
            .ok_or_else(|| {
                WavError::invalid_param(
                    "count",
                    format!(
                        "range {}..{}+{} exceeds buffer of {} samples",
                        start,
                        start,
                        count,
                        buffer.len()
                    ),
                )
            })?;
        for &value in &buffer[start..end] {
            self.write_sample(value)?;
        }
        Ok(())
    }

    /// Writes an entire buffer of samples.
    pub fn write_buffer(&mut self, buffer: &[f32]) -> WavResult<()> {
        self.write_samples(buffer, 0, buffer.len())
    }

    fn write_header(&mut self) -> WavResult<()> {
        // The buffer is empty here, so this does not reorder any output.
        self.start_position = self.out.stream_position()?;
        write_riff_header(&mut self.out)?;
        write_format_chunk(&mut self.out, &self.format)?;
        write_data_chunk_header(&mut self.out)?;
        self.out.flush()?;

        self.riff_size_position = self.start_position + RIFF_SIZE_OFFSET;
        self.data_size_position = self.start_position + DATA_SIZE_OFFSET;
        self.bytes_written = DATA_SIZE_OFFSET + 4;
        self.state = WriterState::Writing;

        debug!(
            sample_rate = self.format.sample_rate,
            channels = self.format.channels,
            bits_per_sample = self.format.bits_per_sample,
            "wrote WAV header"
        );
        Ok(())
    }

    /// Flushes the stream and patches the RIFF and data chunk sizes.
    ///
    /// A writer closed before any sample still gets a header, so the result
    /// is always a valid (possibly empty) WAV stream. The data chunk must be
    /// the last chunk. Returns the underlying sink, positioned at the end.
    pub fn close(mut self) -> WavResult<W> {
        if self.state != WriterState::Writing {
            self.write_header()?;
        }
        self.out.flush()?;

        let end = self.start_position + self.bytes_written;
        let riff_size = chunk_size(end, self.riff_size_position, self.bytes_written)?;
        let data_size = chunk_size(end, self.data_size_position, self.bytes_written)?;

        let Self {
            out,
            riff_size_position,
            data_size_position,
            ..
        } = self;
        let mut sink = out.into_inner().map_err(|e| WavError::Io(e.into_error()))?;

        sink.seek(SeekFrom::Start(riff_size_position))?;
        sink.write_u32::<LittleEndian>(riff_size)?;
        sink.seek(SeekFrom::Start(data_size_position))?;
        sink.write_u32::<LittleEndian>(data_size)?;
        sink.seek(SeekFrom::Start(end))?;
        sink.flush()?;

        debug!(riff_size, data_size, "patched WAV chunk sizes");
        Ok(sink)
    }
}

/// Size of the chunk whose size field sits at `field_position`, up to `end`.
fn chunk_size(end: u64, field_position: u64, bytes_written: u64) -> WavResult<u32> {
    u32::try_from(end - field_position - 4).map_err(|_| WavError::TooLarge {
        bytes: bytes_written,
    })
}

impl<W: Write + Seek> fmt::Debug for WaveFileWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveFileWriter")
            .field("format", &self.format)
            .field("state", &self.state)
            .field("bytes_written", &self.bytes_written)
            .finish_non_exhaustive()
    }
}
