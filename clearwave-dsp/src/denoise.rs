//! Two-pass spectral-subtraction denoising over an STFT.
//!
//! Pass 1 averages the magnitude spectra of the leading frames into a noise
//! template; pass 2 subtracts a scaled template from every frame's magnitude
//! while keeping the original phase, then reconstructs by weighted
//! overlap-add. The recording is assumed to open with background noise only
//! (the capture side starts before the user speaks); if it does not, the
//! template absorbs voice energy and those bins are over-subtracted; the
//! output is merely less clean, never corrupt.

use crate::complex::Complex;
use crate::fft::{fft, ifft};
use crate::window::{
    apply_window, extract_frame, hann_window, normalize_peak, real_to_complex,
};

/// Tuning constants for the denoise pipeline.
///
/// The hop size is deliberately not an independent field: Hann analysis and
/// synthesis windows reconstruct to a constant only at 50% overlap, so
/// [`DenoiseConfig::hop_size`] derives it from the frame size.
#[derive(Debug, Clone, Copy)]
pub struct DenoiseConfig {
    /// Samples per STFT frame. Must be a power of two. At 44.1 kHz the
    /// default of 2048 is ~46 ms per frame, giving 21.5 Hz frequency
    /// resolution, a good fit for voice.
    pub frame_size: usize,

    /// Number of leading frames averaged into the noise template. With the
    /// default frame and hop this covers ~230 ms at 44.1 kHz, assumed to
    /// hold only room tone.
    pub noise_frames: usize,

    /// Lower bound on retained magnitude as a fraction of the bin's
    /// pre-subtraction magnitude. Keeps bins from collapsing to zero in
    /// uncorrelated patterns across frames, which the ear hears as
    /// "musical noise".
    pub spectral_floor: f64,

    /// Scalar applied to the noise template before subtraction. Subtracting
    /// more than the estimate compensates for estimation variance; typical
    /// range 1.0-4.0.
    pub over_subtract: f64,

    /// Peak amplitude after final normalization.
    pub peak_target: f64,
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            noise_frames: 10,
            spectral_floor: 0.02,
            over_subtract: 2.0,
            peak_target: 0.95,
        }
    }
}

impl DenoiseConfig {
    /// Step between consecutive frames: half the frame size (50% overlap,
    /// required by the Hann COLA property).
    pub fn hop_size(&self) -> usize {
        self.frame_size / 2
    }
}

/// Spectral-subtraction denoiser.
///
/// Owns nothing but configuration; every call to [`Denoiser::process`]
/// allocates and releases its own buffers, so a single instance can serve
/// concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Denoiser {
    config: DenoiseConfig,
}

impl Denoiser {
    /// Create a denoiser with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `frame_size` is not a power of two.
    pub fn new(config: DenoiseConfig) -> Self {
        assert!(
            config.frame_size.is_power_of_two(),
            "denoise: frame size {} is not a power of two",
            config.frame_size
        );
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DenoiseConfig {
        &self.config
    }

    /// Denoise mono samples normalized to [-1, +1].
    ///
    /// `sample_rate` is carried for logging only; the algorithm is
    /// rate-agnostic since all constants are expressed in samples and
    /// frames. The output has the input's length, except that inputs
    /// shorter than one frame are zero-padded to exactly one frame and the
    /// padded length is returned. Empty input returns empty output; this
    /// routine has no failure modes.
    pub fn process(&self, samples: &[f64], sample_rate: u32) -> Vec<f64> {
        if samples.is_empty() {
            return Vec::new();
        }

        let frame_size = self.config.frame_size;
        let hop = self.config.hop_size();

        // Inputs shorter than one frame are right-padded with zeros.
        let padded;
        let samples = if samples.len() < frame_size {
            let mut buf = vec![0.0; frame_size];
            buf[..samples.len()].copy_from_slice(samples);
            padded = buf;
            &padded[..]
        } else {
            samples
        };
        let n = samples.len();

        let total_frames = (n - frame_size) / hop + 1;
        let noise_frames = self.config.noise_frames.min(total_frames);

        tracing::debug!(
            samples = n,
            sample_rate,
            frames = total_frames,
            noise_frames,
            "denoising {:.2} s of audio",
            n as f64 / sample_rate.max(1) as f64
        );

        let window = hann_window(frame_size);

        // Pass 1: average the magnitude spectra of the leading frames into
        // the noise template.
        let mut noise_mag = vec![0.0f64; frame_size];
        for fi in 0..noise_frames {
            let spectrum = self.frame_spectrum(samples, fi * hop, &window);
            for (acc, z) in noise_mag.iter_mut().zip(&spectrum) {
                *acc += z.abs();
            }
        }
        for m in &mut noise_mag {
            *m /= noise_frames as f64;
        }

        // Pass 2: subtract the scaled template from every frame's
        // magnitude, keep the original phase, and overlap-add the inverse
        // transforms under a second Hann window (total weight w^2 per
        // frame).
        let mut output = vec![0.0f64; n];
        let mut window_sum = vec![0.0f64; n];

        for fi in 0..total_frames {
            let start = fi * hop;
            let mut spectrum = self.frame_spectrum(samples, start, &window);

            for (z, noise) in spectrum.iter_mut().zip(&noise_mag) {
                let mag = z.abs();
                let phase = z.arg();

                // The floor is proportional to the current bin magnitude,
                // not a constant; a hard zero here produces musical noise.
                let clean_mag = (mag - self.config.over_subtract * noise)
                    .max(self.config.spectral_floor * mag);

                *z = Complex::from_polar(clean_mag, phase);
            }

            let cleaned = ifft(&spectrum);
            for (j, z) in cleaned.iter().enumerate() {
                let idx = start + j;
                if idx < n {
                    // The imaginary residue is numerical noise; only the
                    // real part carries signal.
                    output[idx] += z.re * window[j];
                    window_sum[idx] += window[j] * window[j];
                }
            }
        }

        // Pass 3: divide out the accumulated window energy, then bring the
        // peak to the target level.
        for (s, ws) in output.iter_mut().zip(&window_sum) {
            if *ws > 1e-8 {
                *s /= *ws;
            }
        }
        normalize_peak(&mut output, self.config.peak_target);

        output
    }

    /// Extract a frame at `start`, window it, and forward-transform it.
    fn frame_spectrum(&self, samples: &[f64], start: usize, window: &[f64]) -> Vec<Complex> {
        let mut frame = extract_frame(samples, start, self.config.frame_size);
        apply_window(&mut frame, window);
        fft(&real_to_complex(&frame))
    }
}

/// Denoise with the default configuration.
///
/// Convenience wrapper over [`Denoiser::process`]; see there for the
/// length, padding and silence semantics.
pub fn denoise(samples: &[f64], sample_rate: u32) -> Vec<f64> {
    Denoiser::default().process(samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(denoise(&[], 44100).is_empty());
    }

    #[test]
    fn test_short_input_padded_to_frame() {
        let out = denoise(&vec![0.25; 100], 44100);
        assert_eq!(out.len(), 2048);
    }

    #[test]
    fn test_length_preserved_above_frame() {
        let n = 44100;
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44100.0).sin() * 0.5)
            .collect();
        assert_eq!(denoise(&samples, 44100).len(), n);
    }

    #[test]
    fn test_silence_stays_silent() {
        // No normalization amplification of silence.
        let out = denoise(&vec![0.0; 8192], 44100);
        assert_eq!(out.len(), 8192);
        assert!(out.iter().all(|&s| s.abs() <= 1e-12));
    }

    #[test]
    fn test_peak_bounded_by_target() {
        let samples: Vec<f64> = (0..22050)
            .map(|i| (2.0 * std::f64::consts::PI * 330.0 * i as f64 / 44100.0).sin() * 1.7)
            .collect();
        let out = denoise(&samples, 44100);
        let peak = out.iter().fold(0.0f64, |p, &s| p.max(s.abs()));
        assert!(peak <= 0.95 + 1e-9, "peak {peak} exceeds target");
    }

    #[test]
    fn test_default_config() {
        let config = DenoiseConfig::default();
        assert_eq!(config.frame_size, 2048);
        assert_eq!(config.hop_size(), 1024);
        assert_eq!(config.noise_frames, 10);
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn test_non_power_of_two_frame_rejected() {
        let _ = Denoiser::new(DenoiseConfig {
            frame_size: 1000,
            ..Default::default()
        });
    }
}
