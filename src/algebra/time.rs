//! Filtration Times: Grading of Rows, Columns and Intervals
//!
//! A filtration time is a totally ordered scalar with two sentinels:
//!
//! - `UNDEFINED`: "no time assigned yet"; comparing or adding it is a bug
//! - `INFINITY`: "never", used for the death of essential classes
//!
//! Two representations are provided: `DiscreteTime` counts filtration steps
//! and `ContinuousTime` carries a real magnitude such as a radius.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Capability set of a filtration time
pub trait FiltrationTime:
    Copy + fmt::Debug + fmt::Display + Ord + Add<Output = Self> + Sub<Output = Self> + 'static
{
    /// Sentinel for a time that was never assigned
    const UNDEFINED: Self;
    /// Sentinel for "never happens"
    const INFINITY: Self;
    /// Origin of the filtration
    const ZERO: Self;

    fn is_undefined(&self) -> bool;

    fn is_infinite(&self) -> bool;

    fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    /// `self - other` is only meaningful when `other <= self`
    fn can_subtract(&self, other: &Self) -> bool {
        other <= self
    }

    /// Real-valued view, used for lifetime statistics
    fn to_f64(&self) -> f64;
}

/// Filtration time counted in discrete steps
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteTime(u32);

impl DiscreteTime {
    pub const UNDEFINED: Self = Self(u32::MAX);
    pub const INFINITY: Self = Self(u32::MAX - 1);

    pub fn new(step: u32) -> Self {
        assert!(
            step < Self::INFINITY.0,
            "step {} collides with a time sentinel",
            step
        );
        Self(step)
    }

    /// Raw step count (sentinels included)
    pub fn step(&self) -> u32 {
        self.0
    }

    /// Convenience for literal gradings: `DiscreteTime::steps(&[0, 0, 1])`
    pub fn steps(values: &[u32]) -> Vec<Self> {
        values.iter().map(|&v| Self::new(v)).collect()
    }
}

impl FiltrationTime for DiscreteTime {
    const UNDEFINED: Self = DiscreteTime::UNDEFINED;
    const INFINITY: Self = DiscreteTime::INFINITY;
    const ZERO: Self = Self(0);

    fn is_undefined(&self) -> bool {
        *self == Self::UNDEFINED
    }

    fn is_infinite(&self) -> bool {
        *self == Self::INFINITY
    }

    fn to_f64(&self) -> f64 {
        assert!(self.is_defined(), "undefined time has no magnitude");
        if self.is_infinite() {
            f64::INFINITY
        } else {
            self.0 as f64
        }
    }
}

impl Default for DiscreteTime {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl From<u32> for DiscreteTime {
    fn from(step: u32) -> Self {
        Self::new(step)
    }
}

impl PartialEq<u32> for DiscreteTime {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl Ord for DiscreteTime {
    fn cmp(&self, other: &Self) -> Ordering {
        assert!(
            self.is_defined() && other.is_defined(),
            "comparison against an undefined time"
        );
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for DiscreteTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for DiscreteTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        assert!(self.is_defined() && rhs.is_defined(), "arithmetic on an undefined time");
        if self.is_infinite() || rhs.is_infinite() {
            return Self::INFINITY;
        }
        let sum = self.0.checked_add(rhs.0).filter(|s| *s < Self::INFINITY.0);
        Self(sum.unwrap_or(Self::INFINITY.0))
    }
}

impl Sub for DiscreteTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        assert!(self.is_defined() && rhs.is_defined(), "arithmetic on an undefined time");
        assert!(self.can_subtract(&rhs), "cannot subtract {} from {}", rhs, self);
        if self.is_infinite() {
            assert!(!rhs.is_infinite(), "inf - inf is not a time");
            return Self::INFINITY;
        }
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for DiscreteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "undefined")
        } else if self.is_infinite() {
            write!(f, "inf")
        } else {
            write!(f, "t{}", self.0)
        }
    }
}

impl fmt::Debug for DiscreteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Filtration time carried by a real magnitude (e.g. a radius)
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousTime(f64);

impl ContinuousTime {
    pub const UNDEFINED: Self = Self(f64::MAX);
    pub const INFINITY: Self = Self(f64::INFINITY);

    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "NaN is not a filtration time");
        assert!(value != f64::MAX, "value {} collides with a time sentinel", value);
        // -0.0 + 0.0 == +0.0, keeps total_cmp consistent with ==
        Self(value + 0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FiltrationTime for ContinuousTime {
    const UNDEFINED: Self = ContinuousTime::UNDEFINED;
    const INFINITY: Self = ContinuousTime::INFINITY;
    const ZERO: Self = Self(0.0);

    fn is_undefined(&self) -> bool {
        self.0 == f64::MAX
    }

    fn is_infinite(&self) -> bool {
        self.0 == f64::INFINITY
    }

    fn to_f64(&self) -> f64 {
        assert!(self.is_defined(), "undefined time has no magnitude");
        self.0
    }
}

impl Eq for ContinuousTime {}

impl Default for ContinuousTime {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl From<f64> for ContinuousTime {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq<f64> for ContinuousTime {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl Ord for ContinuousTime {
    fn cmp(&self, other: &Self) -> Ordering {
        assert!(
            self.is_defined() && other.is_defined(),
            "comparison against an undefined time"
        );
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for ContinuousTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for ContinuousTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        assert!(self.is_defined() && rhs.is_defined(), "arithmetic on an undefined time");
        Self(self.0 + rhs.0)
    }
}

impl Sub for ContinuousTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        assert!(self.is_defined() && rhs.is_defined(), "arithmetic on an undefined time");
        assert!(self.can_subtract(&rhs), "cannot subtract {} from {}", rhs, self);
        if self.is_infinite() {
            assert!(!rhs.is_infinite(), "inf - inf is not a time");
            return Self::INFINITY;
        }
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for ContinuousTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "undefined")
        } else if self.is_infinite() {
            write!(f, "inf")
        } else {
            write!(f, "t{}", self.0)
        }
    }
}

impl fmt::Debug for ContinuousTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete_order_and_arithmetic() {
        let a = DiscreteTime::new(2);
        let b = DiscreteTime::new(5);

        assert!(a < b);
        assert!(a <= a);
        assert_eq!(b - a, DiscreteTime::new(3));
        assert_eq!(a + b, DiscreteTime::new(7));
        assert!(b.can_subtract(&a));
        assert!(!a.can_subtract(&b));
        assert!(b < DiscreteTime::INFINITY);
        assert_eq!(DiscreteTime::INFINITY - b, DiscreteTime::INFINITY);
    }

    #[test]
    fn test_continuous_order_and_arithmetic() {
        let a = ContinuousTime::new(0.5);
        let b = ContinuousTime::new(1.25);

        assert!(a < b);
        assert_eq!((b - a).value(), 0.75);
        assert!(b < ContinuousTime::INFINITY);
        assert!(ContinuousTime::INFINITY.is_infinite());
        assert_eq!(ContinuousTime::INFINITY.to_f64(), f64::INFINITY);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiscreteTime::new(4).to_string(), "t4");
        assert_eq!(DiscreteTime::INFINITY.to_string(), "inf");
        assert_eq!(DiscreteTime::UNDEFINED.to_string(), "undefined");
        assert_eq!(ContinuousTime::new(1.5).to_string(), "t1.5");
        assert_eq!(ContinuousTime::INFINITY.to_string(), "inf");
    }

    #[test]
    fn test_default_is_undefined() {
        assert!(DiscreteTime::default().is_undefined());
        assert!(ContinuousTime::default().is_undefined());
    }

    #[test]
    #[should_panic(expected = "undefined")]
    fn test_compare_undefined_panics() {
        let _ = DiscreteTime::UNDEFINED < DiscreteTime::new(1);
    }

    #[test]
    #[should_panic(expected = "cannot subtract")]
    fn test_negative_difference_panics() {
        let _ = ContinuousTime::new(1.0) - ContinuousTime::new(2.0);
    }

    #[test]
    #[should_panic(expected = "collides with a time sentinel")]
    fn test_continuous_sentinel_rejected() {
        let _ = ContinuousTime::new(f64::MAX);
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn test_nan_rejected() {
        let _ = ContinuousTime::new(f64::NAN);
    }
}
