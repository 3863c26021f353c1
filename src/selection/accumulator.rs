//! Persistent mask of committed regions.
//!
//! Committing merges a region mask with `clip(accumulator + mask, 0, 1)`.
//! The merge is an idempotent union: coverage never shrinks and values
//! never exceed 1. There is no erase operation.

use ndarray::{Array2, ArrayView2, ArrayViewMut2, Zip};

use crate::error::ImageShapeError;

/// Merge `mask` into `accumulator` in place.
///
/// Any non-zero mask sample counts as selected.
pub fn merge_into(
    mut accumulator: ArrayViewMut2<u8>,
    mask: ArrayView2<u8>,
) -> Result<(), ImageShapeError> {
    if accumulator.dim() != mask.dim() {
        return Err(ImageShapeError::Mismatch {
            expected: accumulator.dim(),
            found: mask.dim(),
        });
    }

    Zip::from(&mut accumulator)
        .and(&mask)
        .par_for_each(|acc, &m| *acc = acc.saturating_add(m).min(1));
    Ok(())
}

/// Committed segmentation for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    data: Array2<u8>,
}

impl Accumulator {
    /// Empty accumulator of shape `(height, width)`.
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            data: Array2::zeros(shape),
        }
    }

    /// Merge a region mask into the committed data.
    pub fn commit(&mut self, mask: ArrayView2<u8>) -> Result<(), ImageShapeError> {
        merge_into(self.data.view_mut(), mask)?;
        tracing::debug!(coverage = self.coverage(), "region committed");
        Ok(())
    }

    pub fn data(&self) -> ArrayView2<'_, u8> {
        self.data.view()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Number of committed pixels.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn into_inner(self) -> Array2<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_commit_is_union() {
        let mut acc = Accumulator::new((2, 3));
        acc.commit(arr2(&[[1u8, 1, 0], [0, 0, 0]]).view()).unwrap();
        acc.commit(arr2(&[[0u8, 1, 1], [0, 0, 1]]).view()).unwrap();

        assert_eq!(acc.data(), arr2(&[[1u8, 1, 1], [0, 0, 1]]));
        assert_eq!(acc.coverage(), 4);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mask = arr2(&[[1u8, 0], [1, 1]]);
        let mut once = Accumulator::new((2, 2));
        once.commit(arr2(&[[0u8, 1], [0, 0]]).view()).unwrap();
        let mut twice = once.clone();

        once.commit(mask.view()).unwrap();
        twice.commit(mask.view()).unwrap();
        twice.commit(mask.view()).unwrap();

        assert_eq!(once, twice);
        assert!(twice.data().iter().all(|&v| v <= 1));
    }

    #[test]
    fn test_values_clipped_to_one() {
        let mut data = arr2(&[[1u8, 0], [0, 1]]);
        merge_into(data.view_mut(), arr2(&[[255u8, 2], [0, 1]]).view()).unwrap();
        assert_eq!(data, arr2(&[[1u8, 1], [0, 1]]));
    }

    #[test]
    fn test_empty_mask_changes_nothing() {
        let mut acc = Accumulator::new((3, 3));
        acc.commit(arr2(&[[0u8, 0, 0], [0, 1, 0], [0, 0, 0]]).view()).unwrap();
        let before = acc.clone();
        acc.commit(Array2::<u8>::zeros((3, 3)).view()).unwrap();
        assert_eq!(acc, before);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut acc = Accumulator::new((2, 2));
        let err = acc.commit(Array2::<u8>::ones((2, 3)).view()).unwrap_err();
        assert_eq!(err, ImageShapeError::Mismatch { expected: (2, 2), found: (2, 3) });
        assert_eq!(acc.coverage(), 0);
    }
}
