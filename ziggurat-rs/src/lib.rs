//! # Ziggurat: Standard Normal Deviates from Calibrated Tables
//!
//! Marsaglia and Tsang's Ziggurat method covers the half-normal density with
//! `n` horizontal strips of equal area plus a base region that runs out into
//! the unbounded tail. A uniform draw picks a region, a second one a point in
//! it; most points land under the curve and are accepted immediately, the
//! rest get an exact density check, and the base region hands off to
//! Marsaglia's exponential-rejection tail sampler. A fair sign draw turns
//! the magnitude into a symmetric standard normal variate.
//!
//! Instead of shipping precomputed constants, the table is calibrated at
//! run time: [`bisect`] finds the tail boundary `x1` at which the top strip
//! and the base region have the same area, and [`generate_table`] walks the
//! strips up from there. The standard `n = 256` table is built once per
//! process by [`standard_table`].
//!
//! ## Performance
//!
//! About 99% of draws are accepted on the fast path, which costs three
//! uniform draws, a table lookup, a multiply and a compare.
//!
//! A deviate `z` maps onto `N(mu, sigma²)` as `mu + sigma * z`, see
//! [`Gaussian::scale`].

mod bisect;
mod constants;
mod density;
mod erf;
mod error;
mod sampler;
mod source;
mod table;

pub use bisect::{BisectError, BisectSettings, bisect, try_bisect};
pub use constants::{REFERENCE_TAIL_X1, ZIGGURAT_TABLE_SIZE};
pub use density::{DensityCurve, Gaussian, density, inverse_density};
pub use erf::{erf, erfc};
pub use error::{Result, ZigguratError};
pub use sampler::{
    StandardNormal, ZigguratSampler, reference_tail_only, sample_tail, sample_tail_capped,
    standard_normal,
};
pub use source::{SequenceSource, UniformSource};
pub use table::{
    LayerBoundary, ZigguratTable, area_diff, base_area, calibrate, generate_table, solve_x1,
    standard_table,
};

use rand::{SeedableRng, rngs::StdRng};

/// Standard normal generator bundling a uniform source with the shared table
pub struct Ziggurat<S = StdRng> {
    source: S,
    sampler: ZigguratSampler<'static>,
}

impl Ziggurat<StdRng> {
    /// Create a new generator seeded with `seed`
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_source(StdRng::seed_from_u64(seed))
    }
}

impl<S: UniformSource> Ziggurat<S> {
    /// Create a generator drawing its uniforms from `source`
    pub fn with_source(source: S) -> Result<Self> {
        Ok(Self {
            source,
            sampler: ZigguratSampler::standard()?,
        })
    }

    /// Generate a uniform random number in [0, 1)
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.source.next_float()
    }

    /// Generate a standard normal (Gaussian) random variable (mean=0, stddev=1)
    #[inline]
    pub fn normal(&mut self) -> f64 {
        self.sampler.sample(&mut self.source)
    }

    /// Generate a Gaussian random variable with given standard deviation
    #[inline]
    pub fn gaussian(&mut self, sigma: f64) -> f64 {
        self.normal() * sigma
    }

    /// Borrow the uniform source, e.g. to reseed it or draw from it directly
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Give back the uniform source, with every draw made so far consumed
    pub fn into_source(self) -> S {
        self.source
    }
}
