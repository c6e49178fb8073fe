//! # clearwave-dsp
//!
//! Offline spectral-subtraction denoising engine for mono voice
//! recordings.
//!
//! The crate is three cooperating layers:
//!
//! - **FFT kernel** ([`fft`], [`ifft`]): in-place iterative Cooley-Tukey
//!   radix-2 decimation-in-time over power-of-two buffers, inverse via the
//!   conjugate identity.
//! - **Window and framing utilities** ([`window`]): Hann window, frame
//!   extraction with zero padding, peak normalization, RMS.
//! - **Denoise pipeline** ([`Denoiser`], [`denoise`]): a two-pass STFT
//!   that averages the leading frames into a noise-magnitude template,
//!   subtracts the scaled template from every frame while preserving
//!   phase, and reconstructs by weighted overlap-add.
//!
//! The pipeline is a single-threaded, purely functional batch computation:
//! no shared state, no failure modes, buffers owned per call.
//!
//! ## Example
//!
//! ```
//! use clearwave_dsp::denoise;
//!
//! // One second of silence at 44.1 kHz comes back unchanged.
//! let cleaned = denoise(&vec![0.0; 44100], 44100);
//! assert!(cleaned.iter().all(|&s| s == 0.0));
//! ```

pub mod complex;
pub mod denoise;
pub mod fft;
pub mod window;

pub use complex::Complex;
pub use denoise::{denoise, DenoiseConfig, Denoiser};
pub use fft::{fft, ifft, next_power_of_two};
pub use window::{
    apply_window, extract_frame, hann_window, magnitude_spectrum, normalize_peak,
    real_to_complex, rms,
};
