//! # Money Module
//!
//! Monetary values as integer cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                  │
//! │                                                              │
//! │  0.1 + 0.2 = 0.30000000000000004  ❌                         │
//! │                                                              │
//! │  OUR SOLUTION: integer cents                                 │
//! │  10.99 is stored as 1099; every column, every calculation,   │
//! │  every API value is cents. Only a UI converts for display.   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! let total = price * 3;
//! assert_eq!(total.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and adjustments can be negative
/// - **Single-field tuple struct**: zero-cost wrapper over i64
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the number of whole currency units, truncated toward zero.
    #[inline]
    pub const fn whole_units(&self) -> i64 {
        self.0 / 100
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks whether the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks whether the amount is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl fmt::Display for Money {
    /// Formats as `major.minor`, e.g. `10.99` or `-5.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Loyalty Rule
// =============================================================================

/// Loyalty points accrued by a completed purchase: one point per ten whole
/// currency units, truncated.
///
/// ## Example
/// ```rust
/// use shop_core::money::{loyalty_points_for, Money};
///
/// assert_eq!(loyalty_points_for(Money::from_cents(10_000)), 10); // 100.00
/// assert_eq!(loyalty_points_for(Money::from_cents(9_999)), 9);
/// ```
#[inline]
pub const fn loyalty_points_for(total: Money) -> i64 {
    total.whole_units() / 10
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1099);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1599);
        assert_eq!((a - b).cents(), 599);
        assert_eq!((a * 3).cents(), 3297);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2099);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_loyalty_points() {
        assert_eq!(loyalty_points_for(Money::from_cents(0)), 0);
        assert_eq!(loyalty_points_for(Money::from_cents(999)), 0);
        assert_eq!(loyalty_points_for(Money::from_cents(1_000)), 1);
        assert_eq!(loyalty_points_for(Money::from_cents(10_000)), 10);
        assert_eq!(loyalty_points_for(Money::from_cents(10_999)), 10);
    }
}
