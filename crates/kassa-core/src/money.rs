//! # Money Module
//!
//! Provides the `Kronor` type for cash-drawer amounts.
//!
//! ## Why Whole Kronor?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A CASH DRAWER ONLY HOLDS WHOLE KRONOR                                  │
//! │                                                                         │
//! │  The smallest Swedish coin is 1 krona (öre coins were withdrawn).       │
//! │  Every denomination is an integer number of kronor, every count is an   │
//! │  integer, so every subtotal and total is an integer too.                │
//! │                                                                         │
//! │    10-krona × 3 = 30 kr                                                 │
//! │    500-lapp × 1 + 100-lapp × 2 = 700 kr                                 │
//! │                                                                         │
//! │  No floats, no rounding, no negative amounts.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kassa_core::money::Kronor;
//!
//! let value = Kronor::new(500);
//! let subtotal = value.multiply_count(3);
//! assert_eq!(subtotal.kronor(), 1500);
//! assert_eq!(subtotal.to_string(), "1 500 kr");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Kronor Type
// =============================================================================

/// An amount of Swedish kronor.
///
/// Serialized as a bare integer so export documents read `"grandTotal": 730`.
/// All arithmetic saturates at `u64::MAX` instead of overflowing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Kronor(u64);

impl Kronor {
    /// Creates an amount from whole kronor.
    #[inline]
    pub const fn new(kronor: u64) -> Self {
        Kronor(kronor)
    }

    /// Returns the amount in whole kronor.
    #[inline]
    pub const fn kronor(&self) -> u64 {
        self.0
    }

    /// Returns zero kronor.
    #[inline]
    pub const fn zero() -> Self {
        Kronor(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a denomination value by a count of physical items.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::money::Kronor;
    ///
    /// let coin = Kronor::new(10);
    /// assert_eq!(coin.multiply_count(3).kronor(), 30);
    /// ```
    #[inline]
    pub const fn multiply_count(&self, count: u64) -> Self {
        Kronor(self.0.saturating_mul(count))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Swedish display: groups of three digits separated by a space, then " kr".
///
/// `Intl.NumberFormat("sv-SE")` uses U+00A0 for both gaps; reports are meant
/// for pasting into plain-text fields, so a regular space is used instead.
impl fmt::Display for Kronor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let len = digits.len();
        let mut grouped = String::with_capacity(len + len / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        write!(f, "{grouped} kr")
    }
}

impl Add for Kronor {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Kronor(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Kronor {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u64> for Kronor {
    type Output = Self;

    #[inline]
    fn mul(self, count: u64) -> Self {
        self.multiply_count(count)
    }
}

impl Sum for Kronor {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Kronor::zero(), Add::add)
    }
}

impl From<u32> for Kronor {
    fn from(value: u32) -> Self {
        Kronor(u64::from(value))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_small_amounts() {
        assert_eq!(Kronor::new(0).to_string(), "0 kr");
        assert_eq!(Kronor::new(5).to_string(), "5 kr");
        assert_eq!(Kronor::new(730).to_string(), "730 kr");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Kronor::new(1000).to_string(), "1 000 kr");
        assert_eq!(Kronor::new(12345).to_string(), "12 345 kr");
        assert_eq!(Kronor::new(1234567).to_string(), "1 234 567 kr");
    }

    #[test]
    fn test_arithmetic() {
        let a = Kronor::new(500);
        let b = Kronor::new(200);

        assert_eq!((a + b).kronor(), 700);
        assert_eq!((a * 3).kronor(), 1500);

        let mut total = Kronor::zero();
        total += a;
        total += b;
        assert_eq!(total.kronor(), 700);
    }

    #[test]
    fn test_sum() {
        let total: Kronor = [10, 20, 30].into_iter().map(Kronor::new).sum();
        assert_eq!(total.kronor(), 60);
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let huge = Kronor::new(u64::MAX / 2);
        assert_eq!(huge.multiply_count(3).kronor(), u64::MAX);
        assert_eq!((huge + huge + huge).kronor(), u64::MAX);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Kronor::new(730)).unwrap();
        assert_eq!(json, "730");
    }
}
