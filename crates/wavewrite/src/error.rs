//! Error types for the WAV writer.

use thiserror::Error;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while configuring, writing or inspecting a WAV file.
#[derive(Debug, Error)]
pub enum WavError {
    /// Bit depth other than 16 or 24.
    #[error("only 16 or 24 bits per sample allowed, not {bits}")]
    UnsupportedBitDepth {
        /// The rejected bit depth.
        bits: u16,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The format was changed after the header had been emitted.
    #[error("format cannot change after the WAV header has been written")]
    HeaderAlreadyWritten,

    /// Chunk sizes no longer fit in the 32-bit RIFF size fields.
    #[error("WAV stream too large: {bytes} bytes exceeds the RIFF size limit")]
    TooLarge {
        /// Total bytes written.
        bytes: u64,
    },

    /// Input bytes are not a canonical PCM WAV header.
    #[error("invalid WAV header: {message}")]
    InvalidHeader {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::UnsupportedBitDepth { .. } => "WAV_001",
            WavError::InvalidParameter { .. } => "WAV_002",
            WavError::HeaderAlreadyWritten => "WAV_003",
            WavError::TooLarge { .. } => "WAV_004",
            WavError::InvalidHeader { .. } => "WAV_005",
            WavError::Io(_) => "WAV_006",
        }
    }

    /// Returns true for errors raised while validating the format, before any I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            WavError::UnsupportedBitDepth { .. }
                | WavError::InvalidParameter { .. }
                | WavError::HeaderAlreadyWritten
        )
    }
}
