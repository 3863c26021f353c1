//! SeedSeg Rust Extensions
//!
//! Tolerance-bounded seeded region growing for interactive segmentation,
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Workflow
//! A viewer creates a [`selection::Session`] for a 2-D image, then on every
//! mouse move calls `compute(seed)` and renders `contour()` as a live
//! preview. On commit it merges `mask()` into a
//! [`selection::Accumulator`].
//!
//! ## Image Format
//! Images are single-channel 2-D arrays `(height, width)` of any integer or
//! float sample type. Tolerance is compared in the sample's native units.
//! Masks are `u8` arrays holding 0 or 1.

pub mod error;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ImageShapeError, SeedOutOfBounds, SessionError, ToleranceError};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, ToPyArray};
    use pyo3::exceptions::{PyIndexError, PyValueError};
    use pyo3::prelude::*;

    use crate::error::{ImageShapeError, SeedOutOfBounds, SessionError, ToleranceError};
    use crate::selection::{self, Accumulator, DynSession, Seed, SessionConfig, ToleranceBounds};

    fn tolerance_err(err: ToleranceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn seed_err(err: SeedOutOfBounds) -> PyErr {
        PyIndexError::new_err(err.to_string())
    }

    fn shape_err(err: ImageShapeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn session_err(err: SessionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Images
    // ========================================================================

    /// 2-D numpy image of any supported dtype, compared in its own type.
    #[derive(FromPyObject)]
    pub enum ImageArray<'py> {
        U8(PyReadonlyArray2<'py, u8>),
        U16(PyReadonlyArray2<'py, u16>),
        U32(PyReadonlyArray2<'py, u32>),
        U64(PyReadonlyArray2<'py, u64>),
        I8(PyReadonlyArray2<'py, i8>),
        I16(PyReadonlyArray2<'py, i16>),
        I32(PyReadonlyArray2<'py, i32>),
        I64(PyReadonlyArray2<'py, i64>),
        F32(PyReadonlyArray2<'py, f32>),
        F64(PyReadonlyArray2<'py, f64>),
    }

    macro_rules! with_image {
        ($image:expr, |$array:ident| $body:expr) => {
            match $image {
                ImageArray::U8($array) => $body,
                ImageArray::U16($array) => $body,
                ImageArray::U32($array) => $body,
                ImageArray::U64($array) => $body,
                ImageArray::I8($array) => $body,
                ImageArray::I16($array) => $body,
                ImageArray::I32($array) => $body,
                ImageArray::I64($array) => $body,
                ImageArray::F32($array) => $body,
                ImageArray::F64($array) => $body,
            }
        };
    }

    impl ImageArray<'_> {
        fn into_session(self, config: SessionConfig) -> Result<Box<dyn DynSession>, SessionError> {
            with_image!(self, |array| selection::boxed_session(array.as_array().to_owned(), config))
        }

        fn grow(&self, seed: Seed, tolerance: u32) -> Result<ndarray::Array2<u8>, SeedOutOfBounds> {
            with_image!(self, |array| selection::grow(array.as_array(), seed, tolerance))
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Seeded region-growing session over a 2-D image.
    ///
    /// Accepts uint8..uint64, int8..int64, float32 and float64 images; values
    /// are compared in the image's own dtype, never cast.
    ///
    /// Call `compute(row, col)` on every mouse move and render `contour`;
    /// commit `mask` into an `Accumulator` on double click.
    #[pyclass(name = "Session", module = "seedseg_rust")]
    pub struct PySession {
        inner: Box<dyn DynSession>,
    }

    #[pymethods]
    impl PySession {
        #[new]
        #[pyo3(signature = (image, tolerance=10, min_tolerance=1, max_tolerance=50))]
        fn new(image: ImageArray<'_>, tolerance: u32, min_tolerance: u32, max_tolerance: u32) -> PyResult<Self> {
            let config = SessionConfig {
                bounds: ToleranceBounds::new(min_tolerance, max_tolerance).map_err(tolerance_err)?,
                initial_tolerance: tolerance,
            };
            let inner = image.into_session(config).map_err(session_err)?;
            Ok(Self { inner })
        }

        /// Grow a region from (row, col). Raises IndexError if out of bounds.
        fn compute(&mut self, row: usize, col: usize) -> PyResult<()> {
            self.inner.compute(Seed::new(row, col)).map_err(seed_err)
        }

        /// Grow a region from a cursor position, rounded and clipped into the image.
        ///
        /// Returns the (row, col) seed used, or None for a non-finite position.
        fn compute_at(&mut self, row: f64, col: f64) -> Option<(usize, usize)> {
            self.inner
                .compute_at([row, col])
                .map(|seed| (seed.row, seed.col))
        }

        /// Recompute from the last seed. Returns False if there is none.
        fn recompute(&mut self) -> bool {
            self.inner.recompute()
        }

        /// Set the tolerance for subsequent computations. Raises ValueError if out of range.
        fn update_tolerance(&mut self, value: i64) -> PyResult<()> {
            let value = self.inner.tolerance_bounds().check(value).map_err(tolerance_err)?;
            self.inner.update_tolerance(value).map_err(tolerance_err)
        }

        #[getter]
        fn tolerance(&self) -> u32 {
            self.inner.tolerance()
        }

        #[getter]
        fn mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
            self.inner.mask().to_pyarray(py)
        }

        #[getter]
        fn contour<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
            self.inner.contour().to_pyarray(py)
        }

        #[getter]
        fn last_seed(&self) -> Option<(usize, usize)> {
            self.inner.last_seed().map(|seed| (seed.row, seed.col))
        }

        #[getter]
        fn region_size(&self) -> usize {
            self.inner.region_size()
        }

        #[getter]
        fn shape(&self) -> (usize, usize) {
            self.inner.shape()
        }

        fn __repr__(&self) -> String {
            let (height, width) = self.inner.shape();
            format!("Session(shape=({height}, {width}), tolerance={})", self.inner.tolerance())
        }
    }

    // ========================================================================
    // Accumulator
    // ========================================================================

    /// Union of committed regions.
    #[pyclass(name = "Accumulator", module = "seedseg_rust")]
    pub struct PyAccumulator {
        inner: Accumulator,
    }

    #[pymethods]
    impl PyAccumulator {
        #[new]
        fn new(height: usize, width: usize) -> Self {
            Self {
                inner: Accumulator::new((height, width)),
            }
        }

        /// Merge the session's current mask.
        fn commit(&mut self, session: PyRef<'_, PySession>) -> PyResult<()> {
            self.inner.commit(session.inner.mask()).map_err(shape_err)
        }

        /// Merge an arbitrary uint8 mask; any non-zero value counts as selected.
        fn commit_mask(&mut self, mask: PyReadonlyArray2<'_, u8>) -> PyResult<()> {
            self.inner.commit(mask.as_array()).map_err(shape_err)
        }

        #[getter]
        fn data<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
            self.inner.data().to_pyarray(py)
        }

        #[getter]
        fn coverage(&self) -> usize {
            self.inner.coverage()
        }
    }

    // ========================================================================
    // Stateless functions
    // ========================================================================

    /// Grow a region from (row, col) and return the 0/1 mask.
    ///
    /// Accepts the same integer and float dtypes as `Session`.
    #[pyfunction]
    pub fn grow_region<'py>(
        py: Python<'py>,
        image: ImageArray<'py>,
        row: usize,
        col: usize,
        tolerance: u32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let mask = image.grow(Seed::new(row, col), tolerance).map_err(seed_err)?;
        Ok(mask.into_pyarray(py))
    }

    /// Return the inner boundary of a mask as a 0/1 array.
    #[pyfunction]
    pub fn extract_contour<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, u8>,
    ) -> Bound<'py, PyArray2<u8>> {
        selection::extract_contour(mask.as_array()).into_pyarray(py)
    }

    /// SeedSeg Rust extension module
    #[pymodule]
    pub fn seedseg_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PySession>()?;
        m.add_class::<PyAccumulator>()?;

        m.add_function(wrap_pyfunction!(grow_region, m)?)?;
        m.add_function(wrap_pyfunction!(extract_contour, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::seedseg_rust;
