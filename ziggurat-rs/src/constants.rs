//! Constants for the Ziggurat algorithm

/// Number of strips in the standard normal table
pub const ZIGGURAT_TABLE_SIZE: usize = 256;

// Calibration search for the base/tail boundary
pub const X1_SEARCH_LO: f64 = 0.0;
pub const X1_SEARCH_HI: f64 = 100.0;
pub const X1_EPS: f64 = 1e-5;
pub const X1_MAX_ITER: usize = 100;

/// Tail boundary hard-wired into the tail-only reference entry point
pub const REFERENCE_TAIL_X1: f64 = 3.5;

// Normal density constants
pub const SQRT_2PI: f64 = 2.506_628_274_631_000_5;
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// Hastings / Numerical Recipes erfc coefficients, lowest order first
pub const ERFC_COEFFS: [f64; 10] = [
    -1.26551223,
    1.00002368,
    0.37409196,
    0.09678418,
    -0.18628806,
    0.27886807,
    -1.13520398,
    1.48851587,
    -0.82215223,
    0.17087277,
];
