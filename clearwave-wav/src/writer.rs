//! Mono 16-bit PCM WAV encoding.

use byteorder::{ByteOrder, LittleEndian};

/// Encode mono samples (normalized to [-1.0, +1.0]) as a 16-bit PCM WAV
/// file at the given sample rate.
///
/// Samples are clamped to [-1, +1] before quantization. Positive values
/// scale by 32767 and negative by 32768, so both full-scale extremes map
/// onto representable int16 values without overflow.
pub fn encode(samples: &[f64], sample_rate: u32) -> Vec<u8> {
    let data_size = samples.len() * 2;
    let file_size = 36 + data_size; // total minus the 8-byte RIFF preamble

    let mut buf = Vec::with_capacity(44 + data_size);
    let mut scratch = [0u8; 4];

    buf.extend_from_slice(b"RIFF");
    LittleEndian::write_u32(&mut scratch, file_size as u32);
    buf.extend_from_slice(&scratch);
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    LittleEndian::write_u32(&mut scratch, 16);
    buf.extend_from_slice(&scratch);
    LittleEndian::write_u16(&mut scratch[..2], 1); // PCM
    buf.extend_from_slice(&scratch[..2]);
    LittleEndian::write_u16(&mut scratch[..2], 1); // mono
    buf.extend_from_slice(&scratch[..2]);
    LittleEndian::write_u32(&mut scratch, sample_rate);
    buf.extend_from_slice(&scratch);
    LittleEndian::write_u32(&mut scratch, sample_rate * 2); // byte rate
    buf.extend_from_slice(&scratch);
    LittleEndian::write_u16(&mut scratch[..2], 2); // block align
    buf.extend_from_slice(&scratch[..2]);
    LittleEndian::write_u16(&mut scratch[..2], 16); // bits per sample
    buf.extend_from_slice(&scratch[..2]);

    buf.extend_from_slice(b"data");
    LittleEndian::write_u32(&mut scratch, data_size as u32);
    buf.extend_from_slice(&scratch);

    for &s in samples {
        let s = s.clamp(-1.0, 1.0);
        let val = if s >= 0.0 {
            (s * 32767.0).round() as i16
        } else {
            (s * 32768.0).round() as i16
        };
        LittleEndian::write_i16(&mut scratch[..2], val);
        buf.extend_from_slice(&scratch[..2]);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::decode;

    #[test]
    fn test_header_layout() {
        let data = encode(&[0.0; 10], 48000);
        assert_eq!(data.len(), 44 + 20);
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WAVE");
        assert_eq!(&data[12..16], b"fmt ");
        assert_eq!(&data[36..40], b"data");
        assert_eq!(LittleEndian::read_u32(&data[4..8]), 36 + 20);
        assert_eq!(LittleEndian::read_u32(&data[24..28]), 48000);
        assert_eq!(LittleEndian::read_u32(&data[40..44]), 20);
    }

    #[test]
    fn test_full_scale_does_not_overflow() {
        let data = encode(&[1.0, -1.0, 2.0, -2.0], 44100);
        let pcm = &data[44..];
        assert_eq!(LittleEndian::read_i16(&pcm[0..2]), 32767);
        assert_eq!(LittleEndian::read_i16(&pcm[2..4]), -32768);
        // Out-of-range input is clamped, not wrapped.
        assert_eq!(LittleEndian::read_i16(&pcm[4..6]), 32767);
        assert_eq!(LittleEndian::read_i16(&pcm[6..8]), -32768);
    }

    #[test]
    fn test_roundtrip_within_quantization() {
        let samples: Vec<f64> = (0..1000)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 100.0).sin())
            .collect();

        let data = encode(&samples, 44100);
        let audio = decode(&data).unwrap();

        assert_eq!(audio.sample_rate, 44100);
        assert_eq!(audio.samples.len(), 1000);
        for (a, b) in samples.iter().zip(&audio.samples) {
            assert!((a - b).abs() <= 0.001, "quantization error {} too large", (a - b).abs());
        }
    }

    #[test]
    fn test_empty_input() {
        let data = encode(&[], 44100);
        assert_eq!(data.len(), 44);
        let audio = decode(&data).unwrap();
        assert!(audio.samples.is_empty());
    }
}
