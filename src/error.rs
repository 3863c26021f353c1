//! Error types for segmentation sessions.
//!
//! Every failure is reported as a typed value; none of them is fatal to the
//! process. A failed `compute` leaves the previous preview in place so the
//! caller can decide whether to keep showing it.

/// Tolerance update or configuration rejected by the tolerance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ToleranceError {
    /// Value outside the configured `[min, max]` range. The stored
    /// tolerance is unchanged.
    #[error("tolerance {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange { value: i64, min: u32, max: u32 },

    /// Bounds with `min > max`.
    #[error("invalid tolerance bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: u32, max: u32 },
}

/// Seed coordinate outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("seed ({row}, {col}) is outside the {height}x{width} image")]
pub struct SeedOutOfBounds {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

/// Image or mask with an unusable shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageShapeError {
    #[error("image must have at least one row and one column, got {height}x{width}")]
    Empty { height: usize, width: usize },

    #[error("image must be 2-dimensional, got {ndim} dimensions")]
    NotTwoDimensional { ndim: usize },

    #[error("mask shape {found:?} does not match expected shape {expected:?}")]
    Mismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Failure to construct a [`Session`](crate::selection::Session).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidImageShape(#[from] ImageShapeError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),
}
