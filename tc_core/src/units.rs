//! # Exact Units
//!
//! Lightweight value types for the arithmetic that every timecode conversion
//! rests on. Frame rates such as 29.97 are exactly 30000/1001; storing them as
//! `f64` drifts by whole frames over a long program, so nothing in this crate
//! multiplies or divides a frame count by a float.
//!
//! - [`Ratio`] - exact rational (frame rates, elapsed seconds)
//! - [`Offset`] - signed frame delta with no rate of its own
//! - [`div_floor`], [`div_ceil`], [`div_round`] - integer division with an
//!   explicit rounding direction, on `i128` so intermediate products of
//!   frame counts, sample rates and rate ratios cannot overflow
//!
//! ## Example
//!
//! ```rust
//! use tc_core::units::{div_round, Offset, Ratio};
//!
//! let ntsc = Ratio::new(30000, 1001).unwrap();
//! assert_eq!(ntsc.to_string(), "30000/1001");
//!
//! // 90 frames at 29.97 is 3.003 seconds, i.e. 3003 ms
//! assert_eq!(div_round(90 * 1001 * 1000, 30000), 3003);
//!
//! let back = Offset(10) - Offset(25);
//! assert_eq!(back, Offset(-15));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

// ============================================================================
// Ratio
// ============================================================================

/// Exact rational number with a positive denominator, always reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    num: i64,
    den: i64,
}

impl Ratio {
    /// Build a reduced ratio. Returns `None` for a zero denominator or when
    /// moving the sign to the numerator overflows.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let (num, den) = if den < 0 {
            (num.checked_neg()?, den.checked_neg()?)
        } else {
            (num, den)
        };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
        Some(Ratio {
            num: num / g,
            den: den / g,
        })
    }

    /// Build a ratio that is already reduced. Only for compile-time constants.
    pub(crate) const fn new_unchecked(num: i64, den: i64) -> Self {
        Ratio { num, den }
    }

    /// Whole number as a ratio
    pub const fn from_int(n: i64) -> Self {
        Ratio { num: n, den: 1 }
    }

    /// Numerator
    pub const fn num(self) -> i64 {
        self.num
    }

    /// Denominator (always positive)
    pub const fn den(self) -> i64 {
        self.den
    }

    /// Whether the value is a whole number
    pub fn is_integer(self) -> bool {
        self.den == 1
    }

    /// Lossy conversion for display only.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.max(1)
}

// ============================================================================
// Rounded division
// ============================================================================

/// `floor(a / b)` for `b > 0`.
pub fn div_floor(a: i128, b: i128) -> i128 {
    debug_assert!(b > 0);
    a.div_euclid(b)
}

/// `ceil(a / b)` for `b > 0`.
pub fn div_ceil(a: i128, b: i128) -> i128 {
    -div_floor(-a, b)
}

/// `a / b` rounded half away from zero, for `b > 0`.
pub fn div_round(a: i128, b: i128) -> i128 {
    debug_assert!(b > 0);
    if a >= 0 {
        (2 * a + b) / (2 * b)
    } else {
        -((-2 * a + b) / (2 * b))
    }
}

// ============================================================================
// Offset
// ============================================================================

/// Signed frame delta applied to a timecode.
///
/// Carries no frame rate: it is read at the rate of the timecode it is
/// applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offset(pub i64);

impl Offset {
    /// Get the raw frame delta
    pub fn frames(self) -> i64 {
        self.0
    }
}

impl From<i64> for Offset {
    fn from(frames: i64) -> Self {
        Offset(frames)
    }
}

impl Add for Offset {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Offset(self.0 + rhs.0)
    }
}

impl Sub for Offset {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset(self.0 - rhs.0)
    }
}

impl Neg for Offset {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Offset(-self.0)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} frames", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ratio_reduces_and_normalizes_sign() {
        let r = Ratio::new(2400, -30).unwrap();
        assert_eq!((r.num(), r.den()), (-80, 1));
        assert!(r.is_integer());
        assert!(Ratio::new(1, 0).is_none());
    }

    #[test]
    fn test_ratio_sign_overflow_is_none() {
        assert!(Ratio::new(i64::MIN, -1).is_none());
        assert!(Ratio::new(1, i64::MIN).is_none());
        let r = Ratio::new(i64::MIN, 1).unwrap();
        assert_eq!((r.num(), r.den()), (i64::MIN, 1));
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(Ratio::new(24000, 1001).unwrap().to_string(), "24000/1001");
        assert_eq!(Ratio::from_int(25).to_string(), "25");
    }

    #[test]
    fn test_rounded_division() {
        assert_eq!(div_floor(7, 2), 3);
        assert_eq!(div_floor(-7, 2), -4);
        assert_eq!(div_ceil(7, 2), 4);
        assert_eq!(div_ceil(-7, 2), -3);
        assert_eq!(div_ceil(8, 2), 4);
        assert_eq!(div_round(5, 2), 3);
        assert_eq!(div_round(-5, 2), -3);
        assert_eq!(div_round(4, 3), 1);
        assert_eq!(div_round(-4, 3), -1);
    }

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(Offset(10) + Offset(5), Offset(15));
        assert_eq!(Offset(10) - Offset(15), Offset(-5));
        assert_eq!(-Offset(3), Offset(-3));
        assert_eq!(Offset::from(-934).frames(), -934);
        assert_eq!(Offset(-934).to_string(), "-934 frames");
    }

    #[test]
    fn test_offset_serialization() {
        let json = serde_json::to_string(&Offset(146)).unwrap();
        assert_eq!(json, "146");
        let roundtrip: Offset = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Offset(146));
    }
}
