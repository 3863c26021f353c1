//! Seeded region growing for interactive segmentation.
//!
//! This module provides:
//! - **Region growing**: 4-connected flood fill bounded by a tolerance around the seed value
//! - **Contour extraction**: inner boundary of a region mask
//! - **Session**: image, tolerance and the latest mask/contour pair, driven per mouse move
//! - **Accumulator**: union of committed regions
//!
//! Masks are `Array2<u8>` holding 0 or 1.

pub mod accumulator;
pub mod contour;
pub mod region_grow;
pub mod sample;
pub mod seed;
pub mod session;
pub mod tolerance;

pub use accumulator::{merge_into, Accumulator};
pub use contour::extract as extract_contour;
pub use region_grow::{grow, grow_region, RegionBounds, RegionResult};
pub use sample::Sample;
pub use seed::Seed;
pub use session::{boxed_session, DynSession, Session, SessionConfig};
pub use tolerance::{ToleranceBounds, TolerancePolicy};
