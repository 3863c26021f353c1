//! Numeric sample types accepted by the region-growing engine.
//!
//! Similarity is an absolute-difference band test evaluated in the sample's
//! own numeric domain. Values are never normalized, so a tolerance of 10 on
//! a `u16` image means ten raw counts, not ten percent of the range.

use std::fmt::Debug;

/// A scalar image sample.
pub trait Sample: Copy + Send + Sync + Debug + 'static {
    /// Returns true if `|self - reference| <= tolerance`.
    ///
    /// Must return false whenever either operand is NaN.
    fn within(self, reference: Self, tolerance: u32) -> bool;
}

// i128 holds the difference of any two 64-bit integers without overflow.
macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn within(self, reference: Self, tolerance: u32) -> bool {
                    (self as i128 - reference as i128).unsigned_abs() <= tolerance as u128
                }
            }
        )*
    };
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn within(self, reference: Self, tolerance: u32) -> bool {
                    // Equal infinities have a NaN difference but are identical.
                    // NaN compares false everywhere, so it is never similar.
                    self == reference || (self - reference).abs() <= tolerance as $t
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, u32, u64, i8, i16, i32, i64);
impl_float_sample!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_band_is_inclusive() {
        assert!(10u8.within(11, 1));
        assert!(11u8.within(10, 1));
        assert!(!12u8.within(10, 1));
        assert!(7u16.within(7, 0));
    }

    #[test]
    fn test_integer_extremes_do_not_wrap() {
        assert!(!0u8.within(255, 254));
        assert!(0u8.within(255, 255));
        assert!(!i8::MIN.within(i8::MAX, 254));
        assert!(i8::MIN.within(i8::MAX, 255));
        assert!(!u64::MAX.within(0, u32::MAX));
        assert!(!i64::MIN.within(i64::MAX, u32::MAX));
    }

    #[test]
    fn test_float_nan_never_matches() {
        assert!(!f32::NAN.within(0.0, 50));
        assert!(!0.0f64.within(f64::NAN, 50));
        assert!(!f64::NAN.within(f64::NAN, 50));
    }

    #[test]
    fn test_float_band() {
        assert!(0.5f32.within(1.5, 1));
        assert!(!0.49f32.within(1.5, 1));
        assert!((-3.0f64).within(-3.0, 0));
    }

    #[test]
    fn test_float_infinities() {
        assert!(f64::INFINITY.within(f64::INFINITY, 0));
        assert!(f32::NEG_INFINITY.within(f32::NEG_INFINITY, 0));
        assert!(!f64::INFINITY.within(f64::NEG_INFINITY, 50));
        assert!(!f32::INFINITY.within(1.0e30, 50));
        assert!(!f32::MAX.within(f32::INFINITY, 50));
    }
}
