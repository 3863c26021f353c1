//! Contour extraction from region masks.
//!
//! A contour pixel is a selected pixel with at least one 4-connected
//! neighbor that is unselected or outside the image. The result is the
//! inner boundary of the region, so every contour pixel is also a region
//! pixel.

use std::ops::Range;

use ndarray::{s, Array2, ArrayView2, Axis};
use rayon::prelude::*;

use super::region_grow::RegionBounds;

/// Extract the contour of a whole mask.
///
/// # Arguments
/// * `mask` - Region mask (0 = outside, >0 = selected)
///
/// # Returns
/// Contour mask of the same shape (1 = contour, 0 = elsewhere)
pub fn extract(mask: ArrayView2<u8>) -> Array2<u8> {
    let (height, width) = mask.dim();
    extract_ranges(mask, 0..height, 0..width)
}

/// Extract the contour, scanning only inside `bounds`.
///
/// `bounds` must contain every selected pixel of `mask`; the result is then
/// identical to [`extract`]. Bounds reaching past the mask are clipped.
pub fn extract_within(mask: ArrayView2<u8>, bounds: RegionBounds) -> Array2<u8> {
    let (height, width) = mask.dim();
    let rows = bounds.top.min(height)..bounds.bottom.saturating_add(1).min(height);
    let cols = bounds.left.min(width)..bounds.right.saturating_add(1).min(width);
    extract_ranges(mask, rows, cols)
}

fn extract_ranges(mask: ArrayView2<u8>, rows: Range<usize>, cols: Range<usize>) -> Array2<u8> {
    let mut contour = Array2::<u8>::zeros(mask.dim());
    if rows.is_empty() || cols.is_empty() {
        return contour;
    }

    let row_offset = rows.start;
    contour
        .slice_mut(s![rows, ..])
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut out)| {
            let row = (row_offset + i) as isize;
            for col in cols.clone() {
                if is_boundary(&mask, row, col as isize) {
                    out[col] = 1;
                }
            }
        });

    contour
}

/// Check if pixel is selected (treating out-of-bounds as unselected).
#[inline]
fn is_selected(mask: &ArrayView2<u8>, row: isize, col: isize) -> bool {
    if row < 0 || col < 0 {
        return false;
    }
    mask.get((row as usize, col as usize)).is_some_and(|&v| v > 0)
}

/// Check if a pixel is on the boundary (selected with at least one unselected neighbor).
#[inline]
fn is_boundary(mask: &ArrayView2<u8>, row: isize, col: isize) -> bool {
    if !is_selected(mask, row, col) {
        return false;
    }
    !is_selected(mask, row - 1, col)
        || !is_selected(mask, row + 1, col)
        || !is_selected(mask, row, col - 1)
        || !is_selected(mask, row, col + 1)
}
