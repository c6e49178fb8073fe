//! # clearwave-wav
//!
//! 16-bit PCM RIFF/WAVE boundary codec for the clearwave denoiser.
//!
//! The reader accepts mono or stereo 16-bit PCM, mixes stereo down to
//! mono, normalizes samples to [-1.0, +1.0], skips unknown chunks and
//! tolerates truncated data chunks. The writer always emits mono 16-bit
//! PCM at the rate the reader observed.
//!
//! ## Example
//!
//! ```
//! use clearwave_wav::{decode, encode};
//!
//! let bytes = encode(&[0.0, 0.5, -0.5], 44100);
//! let audio = decode(&bytes).unwrap();
//! assert_eq!(audio.sample_rate, 44100);
//! assert_eq!(audio.samples.len(), 3);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{Result, WavError};
pub use reader::{decode, WavAudio};
pub use writer::encode;
