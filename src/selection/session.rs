//! Interactive segmentation session.
//!
//! A [`Session`] owns one image for its whole lifetime and recomputes the
//! region and its contour from scratch on every [`compute`](Session::compute)
//! call, typically once per mouse move. The latest mask and contour are
//! always replaced together, so a reader never sees a contour that belongs
//! to a different seed than the mask.

use ndarray::{Array2, ArrayD, ArrayView2, Ix2};

use super::contour;
use super::region_grow::{self, RegionBounds};
use super::sample::Sample;
use super::seed::Seed;
use super::tolerance::{ToleranceBounds, TolerancePolicy, DEFAULT_TOLERANCE};
use crate::error::{ImageShapeError, SeedOutOfBounds, SessionError, ToleranceError};

/// Construction parameters for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub bounds: ToleranceBounds,
    pub initial_tolerance: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bounds: ToleranceBounds::default(),
            initial_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Wall-clock timer for debug logs.
///
/// `Instant::now` panics on `wasm32-unknown-unknown`, where no time is reported.
struct Timer {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Timer {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    fn elapsed_us(&self) -> Option<u64> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Some(self.start.elapsed().as_micros() as u64)
        }
        #[cfg(target_arch = "wasm32")]
        {
            None
        }
    }
}

/// Mask and contour computed from the same seed.
#[derive(Debug, Clone)]
struct Segmentation {
    mask: Array2<u8>,
    contour: Array2<u8>,
    pixel_count: usize,
    bounds: Option<RegionBounds>,
}

impl Segmentation {
    fn empty(shape: (usize, usize)) -> Self {
        Self {
            mask: Array2::zeros(shape),
            contour: Array2::zeros(shape),
            pixel_count: 0,
            bounds: None,
        }
    }
}

/// Seeded region-growing session over a single 2-D image.
#[derive(Debug, Clone)]
pub struct Session<T: Sample> {
    image: Array2<T>,
    tolerance: TolerancePolicy,
    current: Segmentation,
    last_seed: Option<Seed>,
}

impl<T: Sample> Session<T> {
    /// Create a session with the default tolerance bounds `[1, 50]`.
    pub fn new(image: Array2<T>, initial_tolerance: u32) -> Result<Self, SessionError> {
        Self::with_config(
            image,
            SessionConfig {
                initial_tolerance,
                ..SessionConfig::default()
            },
        )
    }

    pub fn with_config(image: Array2<T>, config: SessionConfig) -> Result<Self, SessionError> {
        let (height, width) = image.dim();
        if height == 0 || width == 0 {
            return Err(ImageShapeError::Empty { height, width }.into());
        }
        let tolerance = TolerancePolicy::new(config.initial_tolerance, config.bounds)?;

        tracing::debug!(height, width, tolerance = tolerance.get(), "segmentation session created");

        Ok(Self {
            current: Segmentation::empty((height, width)),
            image,
            tolerance,
            last_seed: None,
        })
    }

    /// Create a session from an array of unknown dimensionality.
    ///
    /// Only 2-dimensional images are accepted.
    pub fn from_dyn(image: ArrayD<T>, config: SessionConfig) -> Result<Self, SessionError> {
        let ndim = image.ndim();
        let image = image
            .into_dimensionality::<Ix2>()
            .map_err(|_| ImageShapeError::NotTwoDimensional { ndim })?;
        Self::with_config(image, config)
    }

    /// Grow a region from `seed` with the current tolerance.
    ///
    /// On failure the previous mask and contour stay in place.
    pub fn compute(&mut self, seed: impl Into<Seed>) -> Result<(), SeedOutOfBounds> {
        let seed = seed.into();
        let tolerance = self.tolerance.get();
        let _span = tracing::debug_span!("compute", row = seed.row, col = seed.col, tolerance).entered();
        let timer = Timer::start();

        let region = region_grow::grow_region(self.image.view(), seed, tolerance).map_err(|err| {
            tracing::trace!("{err}");
            err
        })?;
        let contour = contour::extract_within(region.mask.view(), region.bounds);

        tracing::debug!(
            pixels = region.pixel_count,
            elapsed_us = timer.elapsed_us(),
            "region computed"
        );

        self.current = Segmentation {
            mask: region.mask,
            contour,
            pixel_count: region.pixel_count,
            bounds: Some(region.bounds),
        };
        self.last_seed = Some(seed);
        Ok(())
    }

    /// Compute from a continuous cursor position `[row, col]`.
    ///
    /// The position is rounded and clipped into the image, see
    /// [`Seed::from_position`]. Returns the seed used, or `None` without
    /// touching the current result if the position is not finite.
    pub fn compute_at(&mut self, position: [f64; 2]) -> Option<Seed> {
        let seed = Seed::from_position(position, self.shape())?;
        self.compute(seed).ok().map(|()| seed)
    }

    /// Recompute from the last seed, e.g. after a tolerance change.
    ///
    /// Returns false if nothing has been computed yet.
    pub fn recompute(&mut self) -> bool {
        match self.last_seed {
            Some(seed) => self.compute(seed).is_ok(),
            None => false,
        }
    }

    /// Change the tolerance used by subsequent computations.
    ///
    /// Does not recompute the current result.
    pub fn update_tolerance(&mut self, value: u32) -> Result<(), ToleranceError> {
        self.tolerance.set(value)?;
        tracing::debug!(tolerance = value, "tolerance updated");
        Ok(())
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance.get()
    }

    pub fn tolerance_bounds(&self) -> ToleranceBounds {
        self.tolerance.bounds()
    }

    /// Latest region mask (all zero before the first successful compute).
    pub fn mask(&self) -> ArrayView2<'_, u8> {
        self.current.mask.view()
    }

    /// Latest contour mask, paired with [`mask`](Self::mask).
    pub fn contour(&self) -> ArrayView2<'_, u8> {
        self.current.contour.view()
    }

    pub fn image(&self) -> ArrayView2<'_, T> {
        self.image.view()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.image.dim()
    }

    pub fn last_seed(&self) -> Option<Seed> {
        self.last_seed
    }

    /// True once at least one compute has succeeded.
    pub fn has_result(&self) -> bool {
        self.last_seed.is_some()
    }

    /// Number of pixels in the latest region.
    pub fn region_size(&self) -> usize {
        self.current.pixel_count
    }

    pub fn region_bounds(&self) -> Option<RegionBounds> {
        self.current.bounds
    }
}

/// Sample-type-erased view of a [`Session`].
///
/// Lets a caller pick the sample type at runtime (e.g. from a numpy dtype)
/// and then drive every session the same way.
pub trait DynSession: Send + Sync {
    fn compute(&mut self, seed: Seed) -> Result<(), SeedOutOfBounds>;
    fn compute_at(&mut self, position: [f64; 2]) -> Option<Seed>;
    fn recompute(&mut self) -> bool;
    fn update_tolerance(&mut self, value: u32) -> Result<(), ToleranceError>;
    fn tolerance(&self) -> u32;
    fn tolerance_bounds(&self) -> ToleranceBounds;
    fn mask(&self) -> ArrayView2<'_, u8>;
    fn contour(&self) -> ArrayView2<'_, u8>;
    fn last_seed(&self) -> Option<Seed>;
    fn region_size(&self) -> usize;
    fn shape(&self) -> (usize, usize);
}

impl<T: Sample> DynSession for Session<T> {
    fn compute(&mut self, seed: Seed) -> Result<(), SeedOutOfBounds> {
        Session::compute(self, seed)
    }

    fn compute_at(&mut self, position: [f64; 2]) -> Option<Seed> {
        Session::compute_at(self, position)
    }

    fn recompute(&mut self) -> bool {
        Session::recompute(self)
    }

    fn update_tolerance(&mut self, value: u32) -> Result<(), ToleranceError> {
        Session::update_tolerance(self, value)
    }

    fn tolerance(&self) -> u32 {
        Session::tolerance(self)
    }

    fn tolerance_bounds(&self) -> ToleranceBounds {
        Session::tolerance_bounds(self)
    }

    fn mask(&self) -> ArrayView2<'_, u8> {
        Session::mask(self)
    }

    fn contour(&self) -> ArrayView2<'_, u8> {
        Session::contour(self)
    }

    fn last_seed(&self) -> Option<Seed> {
        Session::last_seed(self)
    }

    fn region_size(&self) -> usize {
        Session::region_size(self)
    }

    fn shape(&self) -> (usize, usize) {
        Session::shape(self)
    }
}

/// Box a new session for any sample type.
pub fn boxed_session<T: Sample>(
    image: Array2<T>,
    config: SessionConfig,
) -> Result<Box<dyn DynSession>, SessionError> {
    Ok(Box::new(Session::with_config(image, config)?))
}
