//! Radix-2 fast Fourier transform.
//!
//! Iterative Cooley-Tukey decimation-in-time: bit-reversal permutation
//! followed by log2(N) butterfly stages. The inverse transform reuses the
//! forward kernel through the conjugate identity, which keeps the numerical
//! behavior of both directions symmetric.

use crate::complex::Complex;
use std::f64::consts::PI;

/// Forward discrete Fourier transform of a power-of-two-length buffer.
///
/// Computes `X[k] = sum_n x[n] * exp(-j*2*pi*k*n/N)`. The input is copied,
/// never mutated. An empty input yields an empty output; a single-element
/// input is returned unchanged.
///
/// # Panics
///
/// Panics if the length is not a power of two. Callers own this
/// precondition; the denoise pipeline satisfies it by construction since
/// its frame size is a configured power of two.
pub fn fft(input: &[Complex]) -> Vec<Complex> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    assert!(
        n.is_power_of_two(),
        "fft: length {n} is not a power of two"
    );

    let mut out = input.to_vec();
    bit_reverse(&mut out);

    // Butterfly stages: stage s spans m = 2^s points with twiddle
    // wm = exp(-j*2*pi/m) walked multiplicatively within each span.
    let stages = n.trailing_zeros();
    for s in 1..=stages {
        let m = 1usize << s;
        let wm = Complex::from_polar(1.0, -2.0 * PI / m as f64);

        for k in (0..n).step_by(m) {
            let mut w = Complex::new(1.0, 0.0);
            for j in 0..m / 2 {
                let t = w * out[k + j + m / 2];
                let u = out[k + j];
                out[k + j] = u + t;
                out[k + j + m / 2] = u - t;
                w = w * wm;
            }
        }
    }

    out
}

/// Inverse discrete Fourier transform.
///
/// Computes `x[n] = (1/N) * sum_k X[k] * exp(+j*2*pi*k*n/N)` via
/// `ifft(X) = conj(fft(conj(X))) / N`.
///
/// # Panics
///
/// Panics if the length is not a power of two (see [`fft`]).
pub fn ifft(spectrum: &[Complex]) -> Vec<Complex> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }

    let conjugated: Vec<Complex> = spectrum.iter().map(|z| z.conj()).collect();
    let mut out = fft(&conjugated);

    let scale = 1.0 / n as f64;
    for z in &mut out {
        *z = z.conj().scale(scale);
    }

    out
}

/// Smallest power of two greater than or equal to `n`. Returns 1 for
/// `n <= 1`.
pub fn next_power_of_two(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        n.next_power_of_two()
    }
}

/// Reorder elements by bit-reversing their indices.
fn bit_reverse(x: &mut [Complex]) {
    let n = x.len();
    let bits = n.trailing_zeros();

    for i in 0..n {
        let j = reverse_bits(i, bits);
        if j > i {
            x.swap(i, j);
        }
    }
}

/// Reverse the lowest `bits` bits of `v`.
fn reverse_bits(v: usize, bits: u32) -> usize {
    let mut v = v;
    let mut r = 0;
    for _ in 0..bits {
        r = (r << 1) | (v & 1);
        v >>= 1;
    }
    r
}
