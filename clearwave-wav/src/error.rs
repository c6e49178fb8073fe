//! WAV codec error types.

use thiserror::Error;

/// Errors produced while parsing a WAV payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WavError {
    /// File shorter than the 12-byte RIFF/WAVE preamble.
    #[error("file too short to be a WAV file")]
    TooShort,

    /// Missing the ASCII "RIFF" signature.
    #[error("missing RIFF header")]
    MissingRiff,

    /// Missing the ASCII "WAVE" form identifier.
    #[error("missing WAVE identifier")]
    MissingWave,

    /// No `fmt ` chunk before the end of the file.
    #[error("no fmt chunk found")]
    MissingFmt,

    /// No `data` chunk before the end of the file.
    #[error("no data chunk found")]
    MissingData,

    /// `fmt ` chunk declared smaller than the 16 bytes PCM requires.
    #[error("fmt chunk too small ({0} bytes)")]
    FmtTooSmall(usize),

    /// `fmt ` chunk extends past the end of the file.
    #[error("fmt chunk truncated")]
    FmtTruncated,

    /// Audio format code other than 1 (PCM).
    #[error("unsupported audio format {0} (only PCM/1 supported)")]
    UnsupportedFormat(u16),

    /// Channel count other than mono or stereo.
    #[error("unsupported channel count {0} (only 1 or 2 supported)")]
    UnsupportedChannels(u16),

    /// Bit depth other than 16.
    #[error("unsupported bits per sample {0} (only 16 supported)")]
    UnsupportedBitDepth(u16),
}

/// WAV codec result type.
pub type Result<T> = std::result::Result<T, WavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(WavError::UnsupportedFormat(3)
            .to_string()
            .contains("unsupported audio format 3"));
        assert!(WavError::UnsupportedBitDepth(24).to_string().contains("24"));
    }
}
