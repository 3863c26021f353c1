//! Seeded region growing using flood fill.
//!
//! Selects the 4-connected region of pixels whose value lies within
//! `tolerance` of the seed's value. Every candidate is compared against the
//! seed value itself, never against the neighbor it was reached from, so a
//! slow gradient cannot walk the region arbitrarily far from the seed.

use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2};

use super::sample::Sample;
use super::seed::Seed;
use crate::error::SeedOutOfBounds;

/// 4-connected neighborhood as (row, col) offsets.
const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Inclusive bounding box of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl RegionBounds {
    fn at(row: usize, col: usize) -> Self {
        Self {
            top: row,
            left: col,
            bottom: row,
            right: col,
        }
    }

    #[inline]
    fn include(&mut self, row: usize, col: usize) {
        self.top = self.top.min(row);
        self.left = self.left.min(col);
        self.bottom = self.bottom.max(row);
        self.right = self.right.max(col);
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }
}

/// Region growing result with metadata.
#[derive(Debug, Clone)]
pub struct RegionResult {
    /// Region mask (1 = in region, 0 = outside)
    pub mask: Array2<u8>,
    /// Bounds of the region. Always contains at least the seed.
    pub bounds: RegionBounds,
    /// Number of region pixels
    pub pixel_count: usize,
}

/// Grow a region from `seed` and return only the mask.
pub fn grow<T: Sample>(
    image: ArrayView2<T>,
    seed: Seed,
    tolerance: u32,
) -> Result<Array2<u8>, SeedOutOfBounds> {
    grow_region(image, seed, tolerance).map(|region| region.mask)
}

/// Grow a region from `seed` with detailed results.
///
/// The seed pixel is always part of the region, even when its own value is
/// NaN. Pixels are marked when they enter the queue, so the mask doubles as
/// the visited set and no pixel is enqueued twice. Work is proportional to
/// the region size plus its outer boundary.
pub fn grow_region<T: Sample>(
    image: ArrayView2<T>,
    seed: Seed,
    tolerance: u32,
) -> Result<RegionResult, SeedOutOfBounds> {
    let (height, width) = image.dim();
    let seed = seed.check((height, width))?;

    let reference = image[[seed.row, seed.col]];
    let mut mask = Array2::<u8>::zeros((height, width));
    let mut bounds = RegionBounds::at(seed.row, seed.col);
    let mut pixel_count = 0;

    let mut queue = VecDeque::new();
    mask[[seed.row, seed.col]] = 1;
    queue.push_back((seed.row, seed.col));

    while let Some((row, col)) = queue.pop_front() {
        pixel_count += 1;
        bounds.include(row, col);

        for &(dr, dc) in &NEIGHBORS {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if nr >= height || nc >= width {
                continue;
            }
            if mask[[nr, nc]] == 0 && image[[nr, nc]].within(reference, tolerance) {
                mask[[nr, nc]] = 1;
                queue.push_back((nr, nc));
            }
        }
    }

    Ok(RegionResult {
        mask,
        bounds,
        pixel_count,
    })
}
