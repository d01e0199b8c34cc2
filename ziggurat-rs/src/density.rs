//! Gaussian density and its inverse on the decreasing branch.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::{
    constants::{FRAC_1_SQRT_2PI, SQRT_2PI},
    erf::erfc,
    error::{Result, ZigguratError},
};

/// A monotone-decreasing density on `[0, ∞)` that a Ziggurat can be built over.
pub trait DensityCurve {
    /// Density at `x`
    fn density(&self, x: f64) -> f64;

    /// Inverse of the density restricted to the decreasing branch
    fn inverse_density(&self, y: f64) -> Result<f64>;

    /// Value of the density at the mode
    fn peak(&self) -> f64;

    /// Area credited to the tail beyond `x1` when calibrating the base region
    fn tail_area(&self, x1: f64) -> f64;

    /// Actual area under the curve beyond `x1`, used when sampling
    fn tail_mass(&self, x1: f64) -> f64;
}

/// Normal density with mean `mu` and standard deviation `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mu: f64,
    sigma: f64,
    factor: f64,
}

impl Gaussian {
    pub const STANDARD: Gaussian = Gaussian {
        mu: 0.0,
        sigma: 1.0,
        factor: FRAC_1_SQRT_2PI,
    };

    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(ZigguratError::Domain {
                what: "mean",
                value: mu,
            });
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ZigguratError::Domain {
                what: "standard deviation",
                value: sigma,
            });
        }
        Ok(Self {
            mu,
            sigma,
            factor: 1.0 / (sigma * SQRT_2PI),
        })
    }

    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Maps a standard normal deviate onto this distribution
    #[inline]
    pub fn scale(&self, z: f64) -> f64 {
        self.mu + self.sigma * z
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DensityCurve for Gaussian {
    #[inline]
    fn density(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        self.factor * (-0.5 * z * z).exp()
    }

    fn inverse_density(&self, y: f64) -> Result<f64> {
        // NaN fails this test too
        if !(y > 0.0 && y <= self.factor) {
            return Err(ZigguratError::Domain {
                what: "inverse density argument",
                value: y,
            });
        }
        // Rounding can push the log a hair above zero at the peak
        let radicand = (-2.0 * (y / self.factor).ln()).max(0.0);
        Ok(self.mu + self.sigma * radicand.sqrt())
    }

    #[inline]
    fn peak(&self) -> f64 {
        self.factor
    }

    /// `erfc(x1)`, not the tail probability `erfc(x1/√2)/2`; calibrated
    /// tables depend on exactly this value.
    #[inline]
    fn tail_area(&self, x1: f64) -> f64 {
        erfc(x1)
    }

    #[inline]
    fn tail_mass(&self, x1: f64) -> f64 {
        0.5 * erfc((x1 - self.mu) / self.sigma * FRAC_1_SQRT_2)
    }
}

/// `(1/(σ√(2π))) e^{−(x−μ)²/(2σ²)}`
#[inline]
pub fn density(mu: f64, sigma: f64, x: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * SQRT_2PI)
}

/// Inverse of [`density`] on `x >= mu`, defined for `0 < y <= 1/(σ√(2π))`.
pub fn inverse_density(mu: f64, sigma: f64, y: f64) -> Result<f64> {
    Gaussian::new(mu, sigma)?.inverse_density(y)
}
