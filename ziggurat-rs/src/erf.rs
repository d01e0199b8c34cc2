//! Error function approximation.
//!
//! Hastings' rational/exponential approximation as popularised by Numerical
//! Recipes. Maximum absolute error is about 1.2e-7 over the real line, which
//! is plenty for sizing the Ziggurat tail.

use crate::constants::ERFC_COEFFS;

/// Approximate error function erf(x) = (2/√π) ∫₀ˣ e^{−t²} dt.
///
/// The magnitude is clamped to `[0, 1]` before the sign of `x` is applied,
/// so the result is exactly odd and `erf(0) == 0`.
#[inline]
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }

    let ax = x.abs();
    let t = 1.0 / (1.0 + 0.5 * ax);

    // Horner evaluation of the exponent polynomial in t
    let mut poly = ERFC_COEFFS[9];
    for &c in ERFC_COEFFS[1..9].iter().rev() {
        poly = poly * t + c;
    }
    let exponent = poly * t + ERFC_COEFFS[0] - ax * ax;

    let magnitude = (1.0 - t * exponent.exp()).clamp(0.0, 1.0);
    if x >= 0.0 { magnitude } else { -magnitude }
}

/// Complementary error function erfc(x) = 1 − erf(x), clamped to `[0, 2]`.
#[inline]
pub fn erfc(x: f64) -> f64 {
    (1.0 - erf(x)).clamp(0.0, 2.0)
}
