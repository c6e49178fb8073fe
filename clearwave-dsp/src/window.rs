//! Window generation, framing, and numeric utilities for the STFT loop.

use crate::complex::Complex;

/// Hann (raised-cosine) window of length `n`:
///
/// `w[i] = 0.5 * (1 - cos(2*pi*i / (n-1)))`
///
/// Endpoints are zero. With 50% overlap the squared window sums to a
/// constant across frames, which is what makes overlap-add reconstruction
/// artifact-free. For `n <= 1` the window is the single value 1.0.
pub fn hann_window(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos()))
        .collect()
}

/// Copy `size` samples starting at `start` out of `src`, zero-padding
/// whatever extends past the end.
pub fn extract_frame(src: &[f64], start: usize, size: usize) -> Vec<f64> {
    let mut frame = vec![0.0; size];
    if start < src.len() {
        let end = (start + size).min(src.len());
        frame[..end - start].copy_from_slice(&src[start..end]);
    }
    frame
}

/// Multiply each frame sample by the matching window value, in place.
pub fn apply_window(frame: &mut [f64], window: &[f64]) {
    for (sample, w) in frame.iter_mut().zip(window) {
        *sample *= w;
    }
}

/// Promote real samples to complex values with zero imaginary part.
pub fn real_to_complex(x: &[f64]) -> Vec<Complex> {
    x.iter().map(|&v| Complex::from_real(v)).collect()
}

/// Per-bin magnitudes of a complex spectrum.
pub fn magnitude_spectrum(x: &[Complex]) -> Vec<f64> {
    x.iter().map(|z| z.abs()).collect()
}

/// Scale the buffer so its peak absolute value equals `target`.
///
/// A peak below 1e-10 is treated as silence and left untouched, so an
/// all-zero buffer is never amplified into noise.
pub fn normalize_peak(samples: &mut [f64], target: f64) {
    let peak = samples.iter().fold(0.0f64, |p, &s| p.max(s.abs()));
    if peak < 1e-10 {
        return;
    }

    let gain = target / peak;
    for s in samples.iter_mut() {
        *s *= gain;
    }
}

/// Root mean square of the buffer; zero for an empty buffer.
pub fn rms(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let sum: f64 = x.iter().map(|&v| v * v).sum();
    (sum / x.len() as f64).sqrt()
}
