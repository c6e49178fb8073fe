//! Minimal complex arithmetic for the FFT kernel.
//!
//! The transform only needs add/sub/mul, conjugation and polar conversion,
//! so a pair of `f64`s with a handful of methods covers it without pulling
//! in a numerics dependency.

use std::ops::{Add, Mul, Sub};

/// A complex number as a pair of `f64`s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// The additive identity.
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    /// Create a complex number from real and imaginary parts.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Promote a real number (imaginary part zero).
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Build from polar form: `mag * exp(j * phase)`.
    pub fn from_polar(mag: f64, phase: f64) -> Self {
        let (sin, cos) = phase.sin_cos();
        Self {
            re: mag * cos,
            im: mag * sin,
        }
    }

    /// Complex conjugate.
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Magnitude, computed as `hypot(re, im)` for robustness near the
    /// extremes of the exponent range.
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Phase angle in radians, in (-pi, pi].
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Multiply both parts by a real scalar.
    pub fn scale(self, s: f64) -> Self {
        Self {
            re: self.re * s,
            im: self.im * s,
        }
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);

        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        // (1 + 2j)(3 - j) = 3 - j + 6j + 2 = 5 + 5j
        assert_eq!(a * b, Complex::new(5.0, 5.0));
    }

    #[test]
    fn test_conj() {
        let z = Complex::new(2.0, -3.0);
        assert_eq!(z.conj(), Complex::new(2.0, 3.0));
    }

    #[test]
    fn test_polar_roundtrip() {
        let z = Complex::from_polar(2.0, PI / 3.0);
        assert!((z.abs() - 2.0).abs() < 1e-12);
        assert!((z.arg() - PI / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_magnitude_reconstruction() {
        // from_polar with zero magnitude recovers zero for any phase,
        // including the undefined phase of the zero vector.
        let z = Complex::from_polar(0.0, Complex::ZERO.arg());
        assert_eq!(z, Complex::ZERO);
    }
}
