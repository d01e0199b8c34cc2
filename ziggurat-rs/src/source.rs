//! Uniform random sources consumed by the sampler.

use rand::{Rng, distr::Open01};

use crate::error::{Result, ZigguratError};

/// A supply of independent uniform draws.
///
/// Any [`rand::Rng`] is a `UniformSource`.
pub trait UniformSource {
    /// Uniform draw from `[0, 1)`
    fn next_float(&mut self) -> f64;

    /// Two independent draws from `[0, 1)`
    #[inline]
    fn next_pair(&mut self) -> (f64, f64) {
        let a = self.next_float();
        (a, self.next_float())
    }

    /// Uniform draw from `(0, 1)`, safe to take the logarithm of
    #[inline]
    fn next_open_float(&mut self) -> f64 {
        loop {
            let u = self.next_float();
            if u > 0.0 {
                return u;
            }
        }
    }

    #[inline]
    fn next_open_pair(&mut self) -> (f64, f64) {
        let a = self.next_open_float();
        (a, self.next_open_float())
    }
}

impl<R: Rng + ?Sized> UniformSource for R {
    #[inline]
    fn next_float(&mut self) -> f64 {
        self.random::<f64>()
    }

    #[inline]
    fn next_open_float(&mut self) -> f64 {
        self.sample(Open01)
    }
}

/// Replays a fixed sequence of uniform draws, wrapping around at the end.
///
/// Feeding the same sequence through the sampler always produces the same
/// deviates.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    /// Every value must lie in `[0, 1)` and at least one must be non-zero.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if let Some(&bad) = values.iter().find(|u| !(0.0..1.0).contains(*u)) {
            return Err(ZigguratError::Domain {
                what: "uniform draw",
                value: bad,
            });
        }
        if values.iter().all(|&u| u == 0.0) {
            return Err(ZigguratError::Domain {
                what: "uniform sequence without a non-zero draw",
                value: 0.0,
            });
        }
        Ok(Self { values, pos: 0 })
    }

    /// Number of draws taken so far
    #[inline]
    pub fn draws(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

impl UniformSource for SequenceSource {
    #[inline]
    fn next_float(&mut self) -> f64 {
        let u = self.values[self.pos % self.values.len()];
        self.pos += 1;
        u
    }
}
