//! Error types for calibration and sampling

use thiserror::Error;

use crate::bisect::BisectError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZigguratError {
    /// A density inverse or logarithm was asked for outside its valid range
    #[error("{what} is outside its domain: {value}")]
    Domain { what: &'static str, value: f64 },

    #[error("could not calibrate the tail boundary: {0}")]
    RootNotFound(#[from] BisectError),

    #[error("a Ziggurat needs at least 2 strips, got {0}")]
    InvalidLayerCount(usize),

    #[error("table generation stopped after {generated} of {expected} boundaries")]
    TruncatedTable { expected: usize, generated: usize },

    #[error("table boundaries are not monotonic at index {index}")]
    NonMonotonic { index: usize },

    #[error("tail sampling gave up after {0} rejections")]
    RetriesExhausted(usize),
}

pub type Result<T> = std::result::Result<T, ZigguratError>;
