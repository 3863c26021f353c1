//! Seed coordinates.

use crate::error::SeedOutOfBounds;

/// Pixel coordinate a region is grown from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed {
    pub row: usize,
    pub col: usize,
}

impl Seed {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the seed if it lies inside an image of shape `(height, width)`.
    pub fn check(self, (height, width): (usize, usize)) -> Result<Self, SeedOutOfBounds> {
        if self.row < height && self.col < width {
            Ok(self)
        } else {
            Err(SeedOutOfBounds {
                row: self.row,
                col: self.col,
                height,
                width,
            })
        }
    }

    /// Convert a continuous cursor position `[row, col]` to a seed.
    ///
    /// Each coordinate is rounded (ties to even) and clipped into
    /// `[0, height - 1]` / `[0, width - 1]`, so a cursor hovering just past
    /// the canvas edge still selects the nearest edge pixel.
    ///
    /// Returns `None` for non-finite coordinates or an empty shape.
    pub fn from_position(position: [f64; 2], (height, width): (usize, usize)) -> Option<Self> {
        if height == 0 || width == 0 {
            return None;
        }
        let [row, col] = position;
        if !row.is_finite() || !col.is_finite() {
            return None;
        }

        let clip = |v: f64, len: usize| v.round_ties_even().clamp(0.0, (len - 1) as f64) as usize;
        Some(Self::new(clip(row, height), clip(col, width)))
    }
}

impl From<(usize, usize)> for Seed {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<[usize; 2]> for Seed {
    fn from([row, col]: [usize; 2]) -> Self {
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert_eq!(Seed::new(3, 3).check((4, 4)), Ok(Seed::new(3, 3)));
        assert_eq!(
            Seed::new(4, 0).check((4, 4)),
            Err(SeedOutOfBounds { row: 4, col: 0, height: 4, width: 4 })
        );
        assert!(Seed::new(0, 4).check((4, 4)).is_err());
        assert!(Seed::new(0, 0).check((0, 0)).is_err());
    }

    #[test]
    fn test_from_position_rounds() {
        assert_eq!(Seed::from_position([1.4, 2.6], (10, 10)), Some(Seed::new(1, 3)));
        assert_eq!(Seed::from_position([2.5, 3.5], (10, 10)), Some(Seed::new(2, 4)));
    }

    #[test]
    fn test_from_position_clips_to_image() {
        assert_eq!(Seed::from_position([-3.0, 42.7], (5, 8)), Some(Seed::new(0, 7)));
        assert_eq!(Seed::from_position([4.6, -0.4], (5, 8)), Some(Seed::new(4, 0)));
    }

    #[test]
    fn test_from_position_rejects_non_finite() {
        assert_eq!(Seed::from_position([f64::NAN, 0.0], (5, 5)), None);
        assert_eq!(Seed::from_position([0.0, f64::INFINITY], (5, 5)), None);
        assert_eq!(Seed::from_position([0.0, 0.0], (0, 5)), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Seed::from((2, 1)), Seed::new(2, 1));
        assert_eq!(Seed::from([2, 1]), Seed::new(2, 1));
    }
}
