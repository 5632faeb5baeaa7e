//! PCM sample conversion and data-chunk hashing.
//!
//! Samples are normalized floats in `[-1.0, 1.0]`. Conversion rounds to the
//! nearest integer by adding `0.5` to a value first shifted above zero, then
//! truncating, so tiny signals land on zero instead of `-1`. Results are
//! clipped to the range of the target bit depth.

use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::WavResult;
use crate::format::check_bits_per_sample;

/// Smallest 24-bit PCM value.
pub const PCM24_MIN: i32 = -(1 << 23);

/// Largest 24-bit PCM value.
pub const PCM24_MAX: i32 = (1 << 23) - 1;

/// Scales, rounds and clips a sample into `[min, max]`.
fn quantize(value: f32, min: i32, max: i32) -> i32 {
    // Offset before truncating so `as` never has to round a negative number.
    let biased = f64::from(max) * f64::from(value) + 0.5 - f64::from(min);
    let sample = (biased as i64).saturating_add(i64::from(min));
    sample.clamp(i64::from(min), i64::from(max)) as i32
}

/// Converts a normalized sample to 16-bit PCM.
pub fn pcm16_from_sample(value: f32) -> i16 {
    quantize(value, i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Converts a normalized sample to 24-bit PCM, returned in the low 24 bits of an `i32`.
pub fn pcm24_from_sample(value: f32) -> i32 {
    quantize(value, PCM24_MIN, PCM24_MAX)
}

/// Writes one sample at the given bit depth in little-endian order.
///
/// Returns the number of bytes written (2 or 3). `bits_per_sample` must
/// already have been validated; anything other than 24 is encoded as 16-bit.
pub fn encode_sample<W: Write>(
    writer: &mut W,
    value: f32,
    bits_per_sample: u16,
) -> io::Result<usize> {
    if bits_per_sample == 24 {
        writer.write_i24::<LittleEndian>(pcm24_from_sample(value))?;
        Ok(3)
    } else {
        writer.write_i16::<LittleEndian>(pcm16_from_sample(value))?;
        Ok(2)
    }
}

/// Converts a buffer of normalized samples to raw PCM bytes.
pub fn samples_to_pcm(samples: &[f32], bits_per_sample: u16) -> WavResult<Vec<u8>> {
    check_bits_per_sample(bits_per_sample)?;
    let mut pcm = Vec::with_capacity(samples.len() * usize::from(bits_per_sample / 8));
    for &sample in samples {
        encode_sample(&mut pcm, sample, bits_per_sample)?;
    }
    Ok(pcm)
}

/// Decodes a little-endian 24-bit PCM value, sign-extending to `i32`.
pub fn pcm24_from_bytes(bytes: &[u8]) -> i32 {
    LittleEndian::read_i24(bytes)
}

/// Extracts PCM data from a WAV file buffer.
///
/// Walks the chunk list after the `WAVE` id and returns the payload of the
/// first `data` chunk, or None if the buffer is not a RIFF/WAVE file or the
/// chunk runs past the end of the buffer.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 44 {
        return None;
    }

    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = LittleEndian::read_u32(&wav_data[pos + 4..pos + 8]) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.checked_add(chunk_size)?;
            return wav_data.get(data_start..data_end);
        }

        pos = pos.checked_add(8 + chunk_size)?;
        // Chunks are word aligned
        if chunk_size % 2 != 0 {
            pos += 1;
        }
    }

    None
}

/// Computes the BLAKE3 hash of a WAV file's PCM data.
///
/// Two captures with identical audio hash the same regardless of header
/// differences. Returns None if the data chunk cannot be located.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
