//! WebAssembly exports for seeded region growing.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Images are flat row-major `f32` buffers of length `width * height`;
//! masks are flat `u8` buffers of the same length holding 0 or 1.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use wasm_bindgen::prelude::*;

use crate::selection::{self, Seed, Session, SessionConfig, ToleranceBounds};

fn view<'a, T>(data: &'a [T], width: usize, height: usize) -> Result<ArrayView2<'a, T>, JsError> {
    ArrayView2::from_shape((height, width), data)
        .map_err(|err| JsError::new(&format!("invalid dimensions {width}x{height}: {err}")))
}

// ============================================================================
// Stateless functions
// ============================================================================

/// Grow a region from (row, col) and return the mask.
///
/// # Arguments
/// * `data` - Flat array of samples (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `row`, `col` - Seed coordinate
/// * `tolerance` - Maximum absolute difference from the seed value
#[wasm_bindgen]
pub fn grow_region_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    row: usize,
    col: usize,
    tolerance: u32,
) -> Result<Vec<u8>, JsError> {
    let image = view(data, width, height)?;
    let mask = selection::grow(image, Seed::new(row, col), tolerance)?;
    Ok(mask.into_raw_vec_and_offset().0)
}

/// Return the inner boundary of a mask.
#[wasm_bindgen]
pub fn extract_contour_wasm(mask: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let mask = view(mask, width, height)?;
    Ok(selection::extract_contour(mask).into_raw_vec_and_offset().0)
}

/// Merge `mask` into `accumulator` in place (union, clipped to 1).
#[wasm_bindgen]
pub fn merge_masks_wasm(accumulator: &mut [u8], mask: &[u8]) -> Result<(), JsError> {
    // Both buffers are row-major, so a single-row view keeps pixel order
    let len = accumulator.len();
    let accumulator = ArrayViewMut2::from_shape((1, len), accumulator)
        .map_err(|err| JsError::new(&format!("invalid accumulator buffer: {err}")))?;
    let mask = view(mask, mask.len(), 1)?;
    selection::merge_into(accumulator, mask)?;
    Ok(())
}

// ============================================================================
// Session
// ============================================================================

/// Interactive session kept alive on the JavaScript side.
#[wasm_bindgen]
pub struct SegmentationSession {
    inner: Session<f32>,
}

#[wasm_bindgen]
impl SegmentationSession {
    #[wasm_bindgen(constructor)]
    pub fn new(
        data: &[f32],
        width: usize,
        height: usize,
        tolerance: u32,
        min_tolerance: u32,
        max_tolerance: u32,
    ) -> Result<SegmentationSession, JsError> {
        let image: Array2<f32> = view(data, width, height)?.to_owned();
        let config = SessionConfig {
            bounds: ToleranceBounds::new(min_tolerance, max_tolerance)?,
            initial_tolerance: tolerance,
        };
        Ok(Self {
            inner: Session::with_config(image, config)?,
        })
    }

    pub fn compute(&mut self, row: usize, col: usize) -> Result<(), JsError> {
        Ok(self.inner.compute((row, col))?)
    }

    /// Compute from a cursor position. Returns false for a non-finite position.
    #[wasm_bindgen(js_name = computeAt)]
    pub fn compute_at(&mut self, row: f64, col: f64) -> bool {
        self.inner.compute_at([row, col]).is_some()
    }

    #[wasm_bindgen(js_name = updateTolerance)]
    pub fn update_tolerance(&mut self, value: u32) -> Result<(), JsError> {
        Ok(self.inner.update_tolerance(value)?)
    }

    #[wasm_bindgen(getter)]
    pub fn tolerance(&self) -> u32 {
        self.inner.tolerance()
    }

    /// Current region mask as a flat row-major buffer.
    pub fn mask(&self) -> Vec<u8> {
        self.inner.mask().iter().copied().collect()
    }

    /// Current contour mask as a flat row-major buffer.
    pub fn contour(&self) -> Vec<u8> {
        self.inner.contour().iter().copied().collect()
    }

    #[wasm_bindgen(js_name = regionSize, getter)]
    pub fn region_size(&self) -> usize {
        self.inner.region_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_masks_is_clipped_union() {
        let mut accumulator = vec![1u8, 0, 0, 1, 0, 0];
        merge_masks_wasm(&mut accumulator, &[0, 1, 0, 255, 0, 1]).unwrap();
        assert_eq!(accumulator, vec![1u8, 1, 0, 1, 0, 1]);

        merge_masks_wasm(&mut accumulator, &[0, 1, 0, 255, 0, 1]).unwrap();
        assert_eq!(accumulator, vec![1u8, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_grow_and_contour_on_flat_buffers() {
        let mut data = vec![0.0f32; 16];
        data[5] = 10.0;
        let mask = grow_region_wasm(&data, 4, 4, 0, 0, 1).unwrap();
        assert_eq!(mask.iter().filter(|&&v| v == 1).count(), 15);
        assert_eq!(mask[5], 0);

        let contour = extract_contour_wasm(&mask, 4, 4).unwrap();
        assert_eq!(contour[10], 0);
        assert_eq!(contour.iter().filter(|&&v| v == 1).count(), 14);
    }
}
