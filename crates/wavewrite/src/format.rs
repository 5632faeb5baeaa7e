//! WAV file format parameters.

use serde::{Deserialize, Serialize};

use crate::error::{WavError, WavResult};

/// Default frame rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default number of channels.
pub const DEFAULT_CHANNELS: u16 = 1;

/// Default bits per sample.
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (16 or 24).
    pub bits_per_sample: u16,
}

impl Default for WavFormat {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
        }
    }
}

impl WavFormat {
    /// Creates a validated format.
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> WavResult<Self> {
        let format = Self {
            channels,
            sample_rate,
            bits_per_sample,
        };
        format.validate()?;
        Ok(format)
    }

    /// Creates a 16-bit mono WAV format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Creates a 16-bit stereo WAV format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Checks that the format can be encoded.
    pub fn validate(&self) -> WavResult<()> {
        check_bits_per_sample(self.bits_per_sample)?;
        if self.channels == 0 {
            return Err(WavError::invalid_param("channels", "must be at least 1"));
        }
        if self.sample_rate == 0 {
            return Err(WavError::invalid_param("sample_rate", "must be non-zero"));
        }
        if self.checked_block_align().is_none() {
            return Err(WavError::invalid_param(
                "channels",
                format!(
                    "{} channels of {} bytes exceed the 16-bit block align field",
                    self.channels,
                    self.bytes_per_sample()
                ),
            ));
        }
        if self.checked_byte_rate().is_none() {
            return Err(WavError::invalid_param(
                "sample_rate",
                format!(
                    "{} Hz exceeds the 32-bit byte rate field",
                    self.sample_rate
                ),
            ));
        }
        Ok(())
    }

    /// Calculates bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Calculates block align (bytes per sample frame).
    ///
    /// Only meaningful for a validated format; saturates otherwise.
    pub fn block_align(&self) -> u16 {
        self.checked_block_align().unwrap_or(u16::MAX)
    }

    /// Calculates byte rate (bytes per second).
    ///
    /// Only meaningful for a validated format; saturates otherwise.
    pub fn byte_rate(&self) -> u32 {
        self.checked_byte_rate().unwrap_or(u32::MAX)
    }

    /// Block align, or None if it does not fit the header field.
    pub fn checked_block_align(&self) -> Option<u16> {
        self.channels.checked_mul(self.bytes_per_sample())
    }

    /// Byte rate, or None if it does not fit the header field.
    pub fn checked_byte_rate(&self) -> Option<u32> {
        self.sample_rate
            .checked_mul(u32::from(self.checked_block_align()?))
    }
}

/// Rejects any bit depth the encoder cannot produce.
pub(crate) fn check_bits_per_sample(bits: u16) -> WavResult<()> {
    match bits {
        16 | 24 => Ok(()),
        _ => Err(WavError::UnsupportedBitDepth { bits }),
    }
}
