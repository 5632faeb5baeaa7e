//! Canonical 44-byte PCM header layout and parsing.

use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use serde::Serialize;

use crate::error::{WavError, WavResult};
use crate::format::WavFormat;

/// Size of the canonical header written before the sample data.
pub const HEADER_SIZE: usize = 44;

/// Size of the PCM `fmt ` chunk payload.
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Format tag for integer PCM.
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Value written into size fields until the stream is closed.
pub const PLACEHOLDER_SIZE: u32 = i32::MAX as u32;

/// Byte offset of the RIFF size field.
pub const RIFF_SIZE_OFFSET: u64 = 4;

/// Byte offset of the data chunk size field.
pub const DATA_SIZE_OFFSET: u64 = 40;

/// Writes the `RIFF` id, a placeholder size and the `WAVE` id.
pub(crate) fn write_riff_header<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"RIFF")?;
    w.write_u32::<LittleEndian>(PLACEHOLDER_SIZE)?;
    w.write_all(b"WAVE")
}

/// Writes the `fmt ` chunk describing integer PCM in `format`.
pub(crate) fn write_format_chunk<W: Write>(w: &mut W, format: &WavFormat) -> io::Result<()> {
    w.write_all(b"fmt ")?;
    w.write_u32::<LittleEndian>(FMT_CHUNK_SIZE)?;
    w.write_u16::<LittleEndian>(WAVE_FORMAT_PCM)?;
    w.write_u16::<LittleEndian>(format.channels)?;
    w.write_u32::<LittleEndian>(format.sample_rate)?;
    w.write_u32::<LittleEndian>(format.byte_rate())?;
    w.write_u16::<LittleEndian>(format.block_align())?;
    w.write_u16::<LittleEndian>(format.bits_per_sample)
}

/// Writes the `data` chunk id and a placeholder size.
pub(crate) fn write_data_chunk_header<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"data")?;
    w.write_u32::<LittleEndian>(PLACEHOLDER_SIZE)
}

/// Parsed canonical WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    /// Declared RIFF chunk size (file size minus 8 when finalized).
    pub riff_size: u32,
    /// Format parameters from the `fmt ` chunk.
    pub format: WavFormat,
    /// Declared byte rate.
    pub byte_rate: u32,
    /// Declared block align.
    pub block_align: u16,
    /// Declared data chunk size.
    pub data_size: u32,
}

impl WavHeader {
    /// Parses the canonical layout: `RIFF`, `WAVE`, a 16-byte PCM `fmt `
    /// chunk, then the `data` chunk header at byte 36.
    pub fn parse(bytes: &[u8]) -> WavResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(WavError::invalid_header(format!(
                "expected at least {} bytes, found {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }
        expect_id(bytes, 0, b"RIFF")?;
        expect_id(bytes, 8, b"WAVE")?;
        expect_id(bytes, 12, b"fmt ")?;
        expect_id(bytes, 36, b"data")?;

        let fmt_size = LittleEndian::read_u32(&bytes[16..20]);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(WavError::invalid_header(format!(
                "fmt chunk size {} is not {}",
                fmt_size, FMT_CHUNK_SIZE
            )));
        }
        let tag = LittleEndian::read_u16(&bytes[20..22]);
        if tag != WAVE_FORMAT_PCM {
            return Err(WavError::invalid_header(format!(
                "format tag {} is not PCM",
                tag
            )));
        }

        Ok(Self {
            riff_size: LittleEndian::read_u32(&bytes[4..8]),
            format: WavFormat {
                channels: LittleEndian::read_u16(&bytes[22..24]),
                sample_rate: LittleEndian::read_u32(&bytes[24..28]),
                bits_per_sample: LittleEndian::read_u16(&bytes[34..36]),
            },
            byte_rate: LittleEndian::read_u32(&bytes[28..32]),
            block_align: LittleEndian::read_u16(&bytes[32..34]),
            data_size: LittleEndian::read_u32(&bytes[40..44]),
        })
    }

    /// Returns true once the placeholder sizes have been patched.
    pub fn is_finalized(&self) -> bool {
        self.riff_size != PLACEHOLDER_SIZE && self.data_size != PLACEHOLDER_SIZE
    }

    /// Checks the declared sizes against the real file length.
    pub fn is_consistent(&self, file_len: u64) -> bool {
        u64::from(self.riff_size) + 8 == file_len
            && u64::from(self.data_size) + HEADER_SIZE as u64 == file_len
            && self.format.checked_block_align() == Some(self.block_align)
            && self.format.checked_byte_rate() == Some(self.byte_rate)
    }

    /// Number of complete sample frames in the data chunk.
    pub fn frame_count(&self) -> u64 {
        match self.block_align {
            0 => 0,
            align => u64::from(self.data_size) / u64::from(align),
        }
    }

    /// Duration of the data chunk in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / f64::from(self.format.sample_rate)
    }
}

fn expect_id(bytes: &[u8], offset: usize, id: &[u8; 4]) -> WavResult<()> {
    let found = &bytes[offset..offset + 4];
    if found == id {
        Ok(())
    } else {
        Err(WavError::invalid_header(format!(
            "expected '{}' at byte {}, found {:?}",
            String::from_utf8_lossy(id),
            offset,
            String::from_utf8_lossy(found)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn placeholder_header(format: &WavFormat) -> Vec<u8> {
        let mut out = Vec::new();
        write_riff_header(&mut out).unwrap();
        write_format_chunk(&mut out, format).unwrap();
        write_data_chunk_header(&mut out).unwrap();
        out
    }

    #[test]
    fn test_header_layout_offsets() {
        let bytes = placeholder_header(&WavFormat::stereo(44100));
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[4..8], &[0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(&bytes[16..20], &16u32.to_le_bytes());
        assert_eq!(&bytes[20..22], &1u16.to_le_bytes());
        assert_eq!(&bytes[22..24], &2u16.to_le_bytes());
        assert_eq!(&bytes[24..28], &44100u32.to_le_bytes());
        assert_eq!(&bytes[28..32], &176400u32.to_le_bytes());
        assert_eq!(&bytes[32..34], &4u16.to_le_bytes());
        assert_eq!(&bytes[34..36], &16u16.to_le_bytes());
        assert_eq!(&bytes[36..40], b"data");
    }

    #[test]
    fn test_parse_placeholder_header() {
        let format = WavFormat::new(22050, 1, 24).unwrap();
        let header = WavHeader::parse(&placeholder_header(&format)).unwrap();
        assert_eq!(header.format, format);
        assert_eq!(header.byte_rate, 66150);
        assert_eq!(header.block_align, 3);
        assert!(!header.is_finalized());
        assert!(!header.is_consistent(44));
    }

    #[test]
    fn test_parse_rejects_short_input() {
        let err = WavHeader::parse(b"RIFF").unwrap_err();
        assert!(matches!(err, WavError::InvalidHeader { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_magic() {
        let mut bytes = placeholder_header(&WavFormat::default());
        bytes[8..12].copy_from_slice(b"AVI ");
        let err = WavHeader::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("WAVE"));
    }

    #[test]
    fn test_parse_rejects_non_pcm_tag() {
        let mut bytes = placeholder_header(&WavFormat::default());
        bytes[20..22].copy_from_slice(&3u16.to_le_bytes());
        assert!(WavHeader::parse(&bytes).is_err());
    }

    #[test]
    fn test_oversized_format_is_inconsistent() {
        let mut bytes = placeholder_header(&WavFormat::default());
        bytes[4..8].copy_from_slice(&36u32.to_le_bytes());
        bytes[22..24].copy_from_slice(&u16::MAX.to_le_bytes());
        bytes[34..36].copy_from_slice(&u16::MAX.to_le_bytes());
        bytes[40..44].copy_from_slice(&0u32.to_le_bytes());

        let header = WavHeader::parse(&bytes).unwrap();
        assert_eq!(header.format.channels, u16::MAX);
        assert!(!header.is_consistent(44));
    }

    #[test]
    fn test_frame_count_and_duration() {
        let header = WavHeader {
            riff_size: 36 + 8820,
            format: WavFormat::mono(44100),
            byte_rate: 88200,
            block_align: 2,
            data_size: 8820,
        };
        assert_eq!(header.frame_count(), 4410);
        assert!((header.duration_seconds() - 0.1).abs() < 1e-12);
        assert!(header.is_consistent(44 + 8820));
    }
}
