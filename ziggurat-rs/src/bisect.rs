//! Bracketed root finding by interval halving.

use log::trace;
use thiserror::Error;

use crate::constants::{X1_EPS, X1_MAX_ITER};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BisectError {
    /// The interval endpoints do not straddle a sign change
    #[error("no sign change between {lo} and {hi}")]
    NoSignChange { lo: f64, hi: f64 },

    #[error("no convergence after {0} iterations")]
    MaxIterations(usize),
}

/// Settings for [`bisect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectSettings {
    /// Stop once the half-width of the bracket drops below this
    pub eps: f64,
    /// Maximum number of halvings
    pub max_iter: usize,
}

impl Default for BisectSettings {
    fn default() -> Self {
        Self {
            eps: X1_EPS,
            max_iter: X1_MAX_ITER,
        }
    }
}

#[inline]
fn straddles(fa: f64, fb: f64) -> bool {
    if fa.is_nan() || fb.is_nan() {
        return false;
    }
    fa == 0.0 || fb == 0.0 || (fa < 0.0) != (fb < 0.0)
}

/// Find a root of `f` between `a` and `b` (in either order).
///
/// Returns the midpoint of the bracket once `f(mid) == 0` or the half-width
/// is below `eps`. Never extrapolates: a bracket without a sign change at
/// the start, or one lost along the way to a NaN, is an error.
///
/// # Example
///
/// ```
/// use ziggurat_rs::bisect;
///
/// let r = bisect(|x| x * x - 2.0, 1e-9, 100, 0.0, 2.0).unwrap();
/// assert!((r - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisect(
    mut f: impl FnMut(f64) -> f64,
    eps: f64,
    max_iter: usize,
    a: f64,
    b: f64,
) -> Result<f64, BisectError> {
    try_bisect(|x| Ok::<_, BisectError>(f(x)), eps, max_iter, a, b)
}

/// [`bisect`] over a fallible objective; the first objective error aborts
/// the search and is returned unchanged.
pub fn try_bisect<E>(
    mut f: impl FnMut(f64) -> Result<f64, E>,
    eps: f64,
    max_iter: usize,
    a: f64,
    b: f64,
) -> Result<f64, E>
where
    E: From<BisectError>,
{
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if !straddles(f_lo, f_hi) {
        return Err(BisectError::NoSignChange { lo, hi }.into());
    }

    for iter in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        let half = 0.5 * (hi - lo);
        let f_mid = f(mid)?;
        trace!("bisect iter {}: [{}, {}] f({}) = {}", iter, lo, hi, mid, f_mid);

        if f_mid == 0.0 || half < eps {
            return Ok(mid);
        }

        if straddles(f_lo, f_mid) {
            hi = mid;
        } else if f_mid.is_nan() {
            return Err(BisectError::NoSignChange { lo, hi }.into());
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(BisectError::MaxIterations(max_iter).into())
}
