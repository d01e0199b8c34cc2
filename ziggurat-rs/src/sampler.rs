//! Normal deviates from a calibrated table and a uniform source.
//!
//! Each attempt draws, in order: a region `v = u * (n + w)`, where `w` is
//! the base region's area in strip units (`v < w` is the base region,
//! otherwise strip `floor(v - w)`), a horizontal position, and for wedge
//! points one more draw for the height. An accepted magnitude then takes
//! one draw for its sign. Tail iterations take pairs from
//! [`UniformSource::next_open_pair`].

use rand::{Rng, distr::Distribution};

use crate::{
    constants::REFERENCE_TAIL_X1,
    density::{DensityCurve, Gaussian},
    error::{Result, ZigguratError},
    source::UniformSource,
    table::{ZigguratTable, standard_table},
};

/// One round of Marsaglia's tail method; `None` on rejection.
#[inline]
fn tail_attempt<S: UniformSource + ?Sized>(source: &mut S, x1: f64) -> Option<f64> {
    let (u1, u2) = source.next_open_pair();
    let x = -u1.ln() / x1;
    let y = -u2.ln();
    if y + y > x * x { Some(x1 + x) } else { None }
}

/// `x1` must be finite and positive.
fn tail_loop<S: UniformSource + ?Sized>(source: &mut S, x1: f64) -> f64 {
    loop {
        if let Some(x) = tail_attempt(source, x1) {
            return x;
        }
    }
}

fn check_tail_boundary(x1: f64) -> Result<()> {
    if x1.is_finite() && x1 > 0.0 {
        Ok(())
    } else {
        Err(ZigguratError::Domain {
            what: "tail boundary",
            value: x1,
        })
    }
}

/// Sample the standard normal tail beyond `x1 > 0`.
///
/// Generates `x = -ln(u1)/x1`, `y = -ln(u2)` until `2y > x²` and returns
/// `x1 + x`. The result is never below `x1`. A boundary that is zero,
/// negative or not finite is a `Domain` error.
pub fn sample_tail<S: UniformSource + ?Sized>(source: &mut S, x1: f64) -> Result<f64> {
    check_tail_boundary(x1)?;
    Ok(tail_loop(source, x1))
}

/// [`sample_tail`] giving up after `max_iter` rejections.
pub fn sample_tail_capped<S: UniformSource + ?Sized>(
    source: &mut S,
    x1: f64,
    max_iter: usize,
) -> Result<f64> {
    check_tail_boundary(x1)?;
    for _ in 0..max_iter {
        if let Some(x) = tail_attempt(source, x1) {
            return Ok(x);
        }
    }
    Err(ZigguratError::RetriesExhausted(max_iter))
}

/// Tail-only entry point with a fixed boundary of 3.5.
///
/// This is the shortcut some Ziggurat ports ship as their normal generator:
/// it never visits the strips and never flips the sign, so every value is
/// at least 3.5. It is not a standard normal sampler; use
/// [`ZigguratSampler`] or [`StandardNormal`] for that.
pub fn reference_tail_only<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    tail_loop(source, REFERENCE_TAIL_X1)
}

enum Attempt {
    Accept(f64),
    Reject,
    Tail,
}

/// Full Ziggurat rejection sampler over a standard normal table
#[derive(Debug, Clone, Copy)]
pub struct ZigguratSampler<'t> {
    table: &'t ZigguratTable,
}

impl<'t> ZigguratSampler<'t> {
    /// `table` must have been calibrated over the standard normal density.
    pub fn new(table: &'t ZigguratTable) -> Self {
        Self { table }
    }

    /// Sampler over the process-wide standard table
    pub fn standard() -> Result<ZigguratSampler<'static>> {
        Ok(ZigguratSampler::new(standard_table()?))
    }

    #[inline]
    pub fn table(&self) -> &'t ZigguratTable {
        self.table
    }

    #[inline]
    fn attempt<S: UniformSource + ?Sized>(&self, source: &mut S) -> Attempt {
        let t = self.table;
        let n = t.layers();
        let w = t.base_weight();
        let v = source.next_float() * (n as f64 + w);

        if v < w {
            let x = source.next_float() * t.base_width();
            return if x < t.x1() {
                Attempt::Accept(x)
            } else {
                Attempt::Tail
            };
        }

        let i = ((v - w) as usize).min(n - 1);
        let lo = t.boundary(i);
        let hi = t.boundary(i + 1);
        let x = source.next_float() * lo.x;
        if x < hi.x {
            return Attempt::Accept(x);
        }

        // Wedge: compare against the curve itself
        let y = lo.y + source.next_float() * (hi.y - lo.y);
        if y < Gaussian::STANDARD.density(x) {
            Attempt::Accept(x)
        } else {
            Attempt::Reject
        }
    }

    /// Half-normal draw, `>= 0`
    pub fn sample_magnitude<S: UniformSource + ?Sized>(&self, source: &mut S) -> f64 {
        loop {
            match self.attempt(source) {
                Attempt::Accept(x) => return x,
                Attempt::Tail => return tail_loop(source, self.table.x1()),
                Attempt::Reject => (),
            }
        }
    }

    /// Standard normal draw
    #[inline]
    pub fn sample<S: UniformSource + ?Sized>(&self, source: &mut S) -> f64 {
        let m = self.sample_magnitude(source);
        with_sign(m, source)
    }

    /// [`Self::sample`] with at most `max_attempts` rejections in the strips
    /// and at most `max_attempts` more in the tail.
    pub fn try_sample<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        max_attempts: usize,
    ) -> Result<f64> {
        for _ in 0..max_attempts {
            match self.attempt(source) {
                Attempt::Accept(x) => return Ok(with_sign(x, source)),
                Attempt::Tail => {
                    let x = sample_tail_capped(source, self.table.x1(), max_attempts)?;
                    return Ok(with_sign(x, source));
                }
                Attempt::Reject => (),
            }
        }
        Err(ZigguratError::RetriesExhausted(max_attempts))
    }
}

#[inline]
fn with_sign<S: UniformSource + ?Sized>(m: f64, source: &mut S) -> f64 {
    if source.next_float() < 0.5 { -m } else { m }
}

/// Standard normal distribution backed by the process-wide table
#[derive(Debug, Clone, Copy)]
pub struct StandardNormal {
    sampler: ZigguratSampler<'static>,
}

impl StandardNormal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            sampler: ZigguratSampler::standard()?,
        })
    }
}

impl Distribution<f64> for StandardNormal {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

/// One standard normal deviate from `source`
pub fn standard_normal<S: UniformSource + ?Sized>(source: &mut S) -> Result<f64> {
    Ok(ZigguratSampler::standard()?.sample(source))
}
