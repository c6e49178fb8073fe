//! RIFF/WAVE parsing for 16-bit PCM payloads.
//!
//! The reader walks the chunk list rather than assuming the canonical
//! 44-byte layout: `fmt ` and `data` may appear in any order, unknown
//! chunks (LIST, fact, cue, bext, ...) are skipped using their declared
//! size with word-alignment padding, and a truncated `data` chunk is read
//! up to end of file.

use crate::error::{Result, WavError};
use byteorder::{ByteOrder, LittleEndian};

/// Decoded mono audio plus the header metadata it came from.
#[derive(Debug, Clone)]
pub struct WavAudio {
    /// Mono samples normalized to [-1.0, +1.0]. Stereo sources are mixed
    /// down by averaging left and right.
    pub samples: Vec<f64>,
    /// Sample rate from the `fmt ` chunk.
    pub sample_rate: u32,
    /// Channel count of the source file (1 or 2).
    pub channels: u16,
}

impl WavAudio {
    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Format parameters from the `fmt ` chunk.
#[derive(Debug, Clone, Copy)]
struct FmtChunk {
    channels: u16,
    sample_rate: u32,
}

/// Parse a 16-bit PCM WAV file from raw bytes.
pub fn decode(data: &[u8]) -> Result<WavAudio> {
    if data.len() < 12 {
        return Err(WavError::TooShort);
    }
    if &data[0..4] != b"RIFF" {
        return Err(WavError::MissingRiff);
    }
    if &data[8..12] != b"WAVE" {
        return Err(WavError::MissingWave);
    }

    let mut fmt: Option<FmtChunk> = None;
    let mut pcm: Option<&[u8]> = None;

    let mut pos = 12;
    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = LittleEndian::read_u32(&data[pos + 4..pos + 8]) as usize;
        let chunk_start = pos + 8;

        match chunk_id {
            b"fmt " => fmt = Some(parse_fmt(data, chunk_start, chunk_size)?),
            b"data" => {
                // Tolerate a data chunk whose declared size runs past the
                // end of the file.
                let end = chunk_start.saturating_add(chunk_size).min(data.len());
                pcm = Some(&data[chunk_start.min(data.len())..end]);
            }
            _ => {}
        }

        // Chunks are word-aligned; odd sizes carry a padding byte.
        pos = chunk_start.saturating_add(chunk_size);
        if chunk_size % 2 != 0 {
            pos += 1;
        }
    }

    let fmt = fmt.ok_or(WavError::MissingFmt)?;
    let pcm = pcm.ok_or(WavError::MissingData)?;

    let mut raw = Vec::with_capacity(pcm.len() / 2);
    for chunk in pcm.chunks_exact(2) {
        raw.push(LittleEndian::read_i16(chunk) as f64 / 32768.0);
    }

    let samples = if fmt.channels == 2 {
        raw.chunks_exact(2).map(|lr| (lr[0] + lr[1]) / 2.0).collect()
    } else {
        raw
    };

    Ok(WavAudio {
        samples,
        sample_rate: fmt.sample_rate,
        channels: fmt.channels,
    })
}

fn parse_fmt(data: &[u8], start: usize, size: usize) -> Result<FmtChunk> {
    if size < 16 {
        return Err(WavError::FmtTooSmall(size));
    }
    if start + 16 > data.len() {
        return Err(WavError::FmtTruncated);
    }

    let audio_format = LittleEndian::read_u16(&data[start..start + 2]);
    if audio_format != 1 {
        return Err(WavError::UnsupportedFormat(audio_format));
    }

    let channels = LittleEndian::read_u16(&data[start + 2..start + 4]);
    if channels != 1 && channels != 2 {
        return Err(WavError::UnsupportedChannels(channels));
    }

    let sample_rate = LittleEndian::read_u32(&data[start + 4..start + 8]);

    let bits_per_sample = LittleEndian::read_u16(&data[start + 14..start + 16]);
    if bits_per_sample != 16 {
        return Err(WavError::UnsupportedBitDepth(bits_per_sample));
    }

    Ok(FmtChunk {
        channels,
        sample_rate,
    })
}
