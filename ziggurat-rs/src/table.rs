//! Ziggurat table calibration and generation.
//!
//! A table for `n` strips holds `n + 1` boundaries `(x_i, y_i)`. Strip `i`
//! is the rectangle `[0, x_i] x [y_i, y_{i+1}]`; boundary `n` is pinned to
//! `(0, peak)`. Below strip 0 sits the base region, the rectangle
//! `[0, x1] x [0, y1]` joined with the tail beyond `x1`. Calibration sizes
//! every strip to `layer_area`; the base region's true area, with the real
//! tail mass, is kept separately so the sampler can weight it correctly.

use std::sync::LazyLock;

use log::{debug, warn};

use crate::{
    bisect::{BisectSettings, try_bisect},
    constants::{X1_SEARCH_HI, X1_SEARCH_LO, ZIGGURAT_TABLE_SIZE},
    density::{DensityCurve, Gaussian},
    error::{Result, ZigguratError},
};

/// Right edge and height of one strip
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LayerBoundary {
    pub x: f64,
    pub y: f64,
}

/// Immutable, calibrated Ziggurat geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ZigguratTable {
    boundaries: Vec<LayerBoundary>,
    layer_area: f64,
    base_area: f64,
}

impl ZigguratTable {
    /// Number of strips, excluding the base region
    #[inline]
    pub fn layers(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Boundary between the base region and the tail
    #[inline]
    pub fn x1(&self) -> f64 {
        self.boundaries[0].x
    }

    /// Height of the base region
    #[inline]
    pub fn y1(&self) -> f64 {
        self.boundaries[0].y
    }

    /// Common area of every strip
    #[inline]
    pub fn layer_area(&self) -> f64 {
        self.layer_area
    }

    /// Rectangle below `y1` plus the actual tail mass beyond `x1`
    #[inline]
    pub fn base_area(&self) -> f64 {
        self.base_area
    }

    /// Base region area in units of `layer_area`
    #[inline]
    pub fn base_weight(&self) -> f64 {
        self.base_area / self.layer_area
    }

    /// Width of a rectangle of height `y1` with the base region's area
    #[inline]
    pub fn base_width(&self) -> f64 {
        self.base_area / self.y1()
    }

    #[inline]
    pub fn boundaries(&self) -> &[LayerBoundary] {
        &self.boundaries
    }

    #[inline]
    pub fn boundary(&self, i: usize) -> LayerBoundary {
        self.boundaries[i]
    }

    /// Area of every strip, bottom to top
    pub fn strip_areas(&self) -> impl Iterator<Item = f64> + '_ {
        self.boundaries.windows(2).map(|w| w[0].x * (w[1].y - w[0].y))
    }

    /// Checks `x` strictly decreasing and `y` strictly increasing.
    pub fn validate(&self) -> Result<()> {
        for (i, w) in self.boundaries.windows(2).enumerate() {
            let (lo, hi) = (w[0], w[1]);
            if !(hi.x < lo.x && hi.y > lo.y) {
                return Err(ZigguratError::NonMonotonic { index: i + 1 });
            }
        }
        Ok(())
    }
}

/// Runs the recurrence `y' = y + area / x`, `x' = f⁻¹(y')` from `y1` and
/// hands every boundary `0 .. n` to `visit`. Fails with `TruncatedTable`
/// when a step climbs past the peak.
fn walk<C: DensityCurve + ?Sized>(
    n: usize,
    y1: f64,
    layer_area: f64,
    curve: &C,
    mut visit: impl FnMut(LayerBoundary),
) -> Result<LayerBoundary> {
    let mut b = LayerBoundary {
        x: curve.inverse_density(y1)?,
        y: y1,
    };
    visit(b);

    for generated in 1..n {
        let y = b.y + layer_area / b.x;
        let x = curve
            .inverse_density(y)
            .map_err(|_| ZigguratError::TruncatedTable {
                expected: n + 1,
                generated,
            })?;
        b = LayerBoundary { x, y };
        visit(b);
    }
    Ok(b)
}

/// Builds the `n + 1` boundaries for `n` strips of `layer_area`, starting
/// from the base height `y1`.
pub fn generate_table<C: DensityCurve + ?Sized>(
    n: usize,
    y1: f64,
    layer_area: f64,
    curve: &C,
) -> Result<ZigguratTable> {
    if n < 2 {
        return Err(ZigguratError::InvalidLayerCount(n));
    }

    let mut boundaries = Vec::with_capacity(n + 1);
    walk(n, y1, layer_area, curve, |b| boundaries.push(b))?;
    boundaries.push(LayerBoundary {
        x: 0.0,
        y: curve.peak(),
    });

    let base = boundaries[0];
    let table = ZigguratTable {
        boundaries,
        layer_area,
        base_area: base.x * base.y + curve.tail_mass(base.x),
    };
    table.validate()?;
    Ok(table)
}

/// Base region area used to size the strips for a candidate tail boundary
#[inline]
pub fn base_area<C: DensityCurve + ?Sized>(x1: f64, curve: &C) -> f64 {
    x1 * curve.density(x1) + curve.tail_area(x1)
}

/// Top strip area minus base region area for a candidate `x1`.
///
/// Candidates whose strips overshoot the peak before the top are too
/// small, and report the negated base area.
pub fn area_diff<C: DensityCurve + ?Sized>(x1: f64, n: usize, curve: &C) -> Result<f64> {
    if n < 2 {
        return Err(ZigguratError::InvalidLayerCount(n));
    }

    let y1 = curve.density(x1);
    let base = base_area(x1, curve);
    if y1 <= 0.0 {
        // Density underflowed: every strip is flat and the top spans the curve
        return Ok(x1 * curve.peak() - base);
    }

    match walk(n, y1, base, curve, |_| ()) {
        Ok(top) => Ok(top.x * (curve.peak() - top.y) - base),
        Err(ZigguratError::TruncatedTable { .. }) => Ok(-base),
        Err(e) => Err(e),
    }
}

/// Finds the tail boundary at which the top strip and the base region have
/// equal area.
pub fn solve_x1<C: DensityCurve + ?Sized>(
    n: usize,
    curve: &C,
    settings: &BisectSettings,
) -> Result<f64> {
    try_bisect(
        |x1| area_diff(x1, n, curve),
        settings.eps,
        settings.max_iter,
        X1_SEARCH_LO,
        X1_SEARCH_HI,
    )
}

/// Solves for `x1` and builds the matching table.
pub fn calibrate<C: DensityCurve + ?Sized>(
    n: usize,
    curve: &C,
    settings: &BisectSettings,
) -> Result<ZigguratTable> {
    if n < 2 {
        return Err(ZigguratError::InvalidLayerCount(n));
    }

    let x1 = solve_x1(n, curve, settings)?;
    let y1 = curve.density(x1);
    let table = generate_table(n, y1, base_area(x1, curve), curve)?;
    debug!(
        "calibrated {} strips: x1 = {}, y1 = {}, layer area = {}",
        n,
        table.x1(),
        table.y1(),
        table.layer_area()
    );
    Ok(table)
}

static STANDARD_TABLE: LazyLock<Result<ZigguratTable>> = LazyLock::new(|| {
    let table = calibrate(
        ZIGGURAT_TABLE_SIZE,
        &Gaussian::STANDARD,
        &BisectSettings::default(),
    );
    if let Err(e) = &table {
        warn!("standard normal calibration failed: {}", e);
    }
    table
});

/// The process-wide standard normal table, calibrated on first use.
pub fn standard_table() -> Result<&'static ZigguratTable> {
    STANDARD_TABLE.as_ref().map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bisect::BisectError;

    fn standard() -> &'static ZigguratTable {
        standard_table().expect("standard table calibrates")
    }

    #[test]
    fn test_standard_geometry() {
        let t = standard();
        assert_eq!(t.layers(), 256);
        assert_eq!(t.boundaries().len(), 257);
        assert!((t.x1() - 3.635_305).abs() < 1e-4, "x1 = {}", t.x1());
        assert!(
            (t.layer_area() - 0.001_958_008).abs() < 1e-7,
            "layer area = {}",
            t.layer_area()
        );
        assert_eq!(
            t.boundary(256),
            LayerBoundary {
                x: 0.0,
                y: Gaussian::STANDARD.peak()
            }
        );
    }

    #[test]
    fn test_standard_monotonic() {
        let t = standard();
        assert_eq!(t.validate(), Ok(()));
        for w in t.boundaries().windows(2) {
            assert!(w[1].x < w[0].x);
            assert!(w[1].y > w[0].y);
        }
    }

    #[test]
    fn test_equal_strip_areas() {
        let t = standard();
        let areas: Vec<f64> = t.strip_areas().collect();
        assert_eq!(areas.len(), 256);
        for (i, a) in areas[..255].iter().enumerate() {
            assert!(
                (a - t.layer_area()).abs() < 1e-6,
                "strip {} has area {}",
                i,
                a
            );
        }
        // The pinned top strip is only as good as the calibration
        assert!((areas[255] - t.layer_area()).abs() < 1e-4);
    }

    #[test]
    fn test_base_area_matches() {
        let t = standard();
        let g = Gaussian::STANDARD;
        let sized = t.x1() * t.y1() + g.tail_area(t.x1());
        assert!((sized - t.layer_area()).abs() < 1e-12);

        let actual = t.x1() * t.y1() + g.tail_mass(t.x1());
        assert!((actual - t.base_area()).abs() < 1e-15);
        assert!((t.base_area() - 0.002_096_560_479).abs() < 1e-9);
        assert!((t.base_weight() - 1.070_762).abs() < 1e-5);
        assert!(t.base_width() > t.x1());
    }

    #[test]
    fn test_calibrated_area_diff() {
        let x1 = solve_x1(256, &Gaussian::STANDARD, &BisectSettings::default()).unwrap();
        let diff = area_diff(x1, 256, &Gaussian::STANDARD).unwrap();
        assert!(diff.abs() < 1e-4, "area diff = {}", diff);
    }

    #[test]
    fn test_area_diff_signs() {
        let g = Gaussian::STANDARD;
        // Overshooting candidates and the underflowed far end bracket the root
        assert!(area_diff(0.0, 256, &g).unwrap() < 0.0);
        assert!(area_diff(3.0, 256, &g).unwrap() < 0.0);
        assert!(area_diff(5.0, 256, &g).unwrap() > 0.0);
        assert!(area_diff(100.0, 256, &g).unwrap() > 0.0);
    }

    #[test]
    fn test_other_layer_counts() {
        let g = Gaussian::STANDARD;
        let mut last_x1 = 0.0;
        for n in [2, 8, 64, 128, 512] {
            let t = calibrate(n, &g, &BisectSettings::default()).unwrap();
            assert_eq!(t.layers(), n);
            assert!(t.x1() > last_x1, "x1 grows with the strip count");
            last_x1 = t.x1();
        }
    }

    #[test]
    fn test_invalid_layer_count() {
        let g = Gaussian::STANDARD;
        let s = BisectSettings::default();
        assert_eq!(calibrate(0, &g, &s), Err(ZigguratError::InvalidLayerCount(0)));
        assert_eq!(calibrate(1, &g, &s), Err(ZigguratError::InvalidLayerCount(1)));
        assert_eq!(
            generate_table(1, 0.01, 0.01, &g),
            Err(ZigguratError::InvalidLayerCount(1))
        );
    }

    #[test]
    fn test_truncated_table() {
        let g = Gaussian::STANDARD;
        let y1 = g.density(3.0);
        let r = generate_table(256, y1, base_area(3.0, &g), &g);
        assert!(
            matches!(r, Err(ZigguratError::TruncatedTable { expected: 257, generated }) if generated < 256),
            "got {:?}",
            r
        );
    }

    #[test]
    fn test_seed_outside_domain() {
        let g = Gaussian::STANDARD;
        let r = generate_table(8, 2.0 * g.peak(), 0.01, &g);
        assert!(matches!(r, Err(ZigguratError::Domain { .. })));
    }

    #[test]
    fn test_root_not_found() {
        let s = BisectSettings {
            eps: 1e-12,
            max_iter: 3,
        };
        let r = calibrate(256, &Gaussian::STANDARD, &s);
        assert_eq!(r, Err(ZigguratError::RootNotFound(BisectError::MaxIterations(3))));
    }

    #[test]
    fn test_standard_table_is_shared() {
        let a = standard_table().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| standard_table().unwrap() as *const ZigguratTable as usize))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), a as *const ZigguratTable as usize);
        }
        let fresh = calibrate(256, &Gaussian::STANDARD, &BisectSettings::default()).unwrap();
        assert_eq!(&fresh, a);
    }
}
