//! Tolerance policy for seeded region growing.
//!
//! The policy is the single writer of the tolerance value. Updates outside
//! the configured bounds are rejected rather than clamped, and a rejected
//! update leaves the stored value untouched.

use crate::error::ToleranceError;

/// Default lower tolerance bound.
pub const DEFAULT_MIN_TOLERANCE: u32 = 1;
/// Default upper tolerance bound.
pub const DEFAULT_MAX_TOLERANCE: u32 = 50;
/// Default starting tolerance.
pub const DEFAULT_TOLERANCE: u32 = 10;

/// Inclusive `[min, max]` range a tolerance must lie in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceBounds {
    min: u32,
    max: u32,
}

impl ToleranceBounds {
    pub fn new(min: u32, max: u32) -> Result<Self, ToleranceError> {
        if min > max {
            return Err(ToleranceError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check `value` against the bounds.
    ///
    /// Takes an `i64` so negative input coming from bindings is reported as
    /// out of range instead of failing to convert.
    pub fn check(&self, value: i64) -> Result<u32, ToleranceError> {
        match u32::try_from(value) {
            Ok(v) if self.contains(v) => Ok(v),
            _ => Err(ToleranceError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            }),
        }
    }
}

impl Default for ToleranceBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TOLERANCE,
            max: DEFAULT_MAX_TOLERANCE,
        }
    }
}

/// Current tolerance together with the bounds it is validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TolerancePolicy {
    value: u32,
    bounds: ToleranceBounds,
}

impl TolerancePolicy {
    pub fn new(initial: u32, bounds: ToleranceBounds) -> Result<Self, ToleranceError> {
        let value = bounds.check(i64::from(initial))?;
        Ok(Self { value, bounds })
    }

    /// Store a new tolerance. Does not trigger any recomputation.
    pub fn set(&mut self, value: u32) -> Result<(), ToleranceError> {
        self.set_checked(i64::from(value))
    }

    /// Like [`set`](Self::set) but accepts signed input.
    pub fn set_checked(&mut self, value: i64) -> Result<(), ToleranceError> {
        self.value = self.bounds.check(value)?;
        Ok(())
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn bounds(&self) -> ToleranceBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let bounds = ToleranceBounds::default();
        assert_eq!((bounds.min(), bounds.max()), (1, 50));
        assert!(bounds.contains(1));
        assert!(bounds.contains(50));
        assert!(!bounds.contains(0));
        assert!(!bounds.contains(51));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert_eq!(
            ToleranceBounds::new(10, 5),
            Err(ToleranceError::InvalidBounds { min: 10, max: 5 })
        );
        assert!(ToleranceBounds::new(0, 0).is_ok());
    }

    #[test]
    fn test_initial_value_validated() {
        let err = TolerancePolicy::new(0, ToleranceBounds::default()).unwrap_err();
        assert_eq!(err, ToleranceError::OutOfRange { value: 0, min: 1, max: 50 });

        let policy = TolerancePolicy::new(DEFAULT_TOLERANCE, ToleranceBounds::default()).unwrap();
        assert_eq!(policy.get(), 10);
    }

    #[test]
    fn test_set_within_bounds() {
        let mut policy = TolerancePolicy::new(10, ToleranceBounds::default()).unwrap();
        policy.set(1).unwrap();
        assert_eq!(policy.get(), 1);
        policy.set(50).unwrap();
        assert_eq!(policy.get(), 50);
    }

    #[test]
    fn test_rejected_update_keeps_previous_value() {
        let mut policy = TolerancePolicy::new(10, ToleranceBounds::default()).unwrap();

        assert_eq!(
            policy.set(51),
            Err(ToleranceError::OutOfRange { value: 51, min: 1, max: 50 })
        );
        assert_eq!(policy.get(), 10);

        assert!(policy.set(0).is_err());
        assert_eq!(policy.get(), 10);
    }

    #[test]
    fn test_negative_input_is_out_of_range() {
        let mut policy = TolerancePolicy::new(3, ToleranceBounds::new(0, 5).unwrap()).unwrap();
        assert_eq!(
            policy.set_checked(-1),
            Err(ToleranceError::OutOfRange { value: -1, min: 0, max: 5 })
        );
        assert_eq!(
            policy.set_checked(i64::from(u32::MAX) + 1),
            Err(ToleranceError::OutOfRange { value: i64::from(u32::MAX) + 1, min: 0, max: 5 })
        );
        assert_eq!(policy.get(), 3);
    }
}
