//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The mobile app computed cart totals in floats and rounded each one    │
//! │  to 2 decimals for display. We keep integer cents instead:             │
//! │    R150.00 × 15% VAT = 2250 cents, exactly. Nothing to round away.     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use medcart_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(5999); // R59.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // R119.98
//! let total = price + Money::from_cents(500); // R64.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(59.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for ZAR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and savings deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartItem.unit_price_cents ──► line totals
///                                      │
///                                      ▼
/// Cart subtotal ──► VAT calculation ──► delivery fee ──► summary total
///
/// EVERY monetary value in the system flows through cents; this type
/// carries the arithmetic that needs rounding rules (VAT).
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use medcart_core::money::Money;
    ///
    /// let price = Money::from_cents(5999); // Represents R59.99
    /// assert_eq!(price.cents(), 5999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rand) portion.
    ///
    /// ## Example
    /// ```rust
    /// use medcart_core::money::Money;
    ///
    /// let price = Money::from_cents(5999);
    /// assert_eq!(price.rand(), 59);
    /// ```
    #[inline]
    pub const fn rand(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds half away from zero, matching the 2-decimal
    /// rounding the cart summary always displayed.
    ///
    /// ## Example
    /// ```rust
    /// use medcart_core::money::Money;
    /// use medcart_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(15000); // R150.00
    /// let rate = TaxRate::from_bps(1500);      // 15% VAT
    ///
    /// let vat = subtotal.calculate_tax(rate);
    /// assert_eq!(vat.cents(), 2250); // R22.50
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use medcart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999); // R29.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 8997); // R89.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and issue strings. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R{}.{:02}", sign, self.rand().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (for line-total folds).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(5999);
        assert_eq!(money.cents(), 5999);
        assert_eq!(money.rand(), 59);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(5999)), "R59.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "R5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "R0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_vat_calculation_basic() {
        // R150.00 at 15% = R22.50
        let amount = Money::from_cents(15000);
        let rate = TaxRate::from_bps(1500);
        let vat = amount.calculate_tax(rate);
        assert_eq!(vat.cents(), 2250);
    }

    #[test]
    fn test_vat_calculation_with_rounding() {
        // R0.99 at 15% = R0.1485 → R0.15
        let amount = Money::from_cents(99);
        let rate = TaxRate::from_bps(1500);
        let vat = amount.calculate_tax(rate);
        assert_eq!(vat.cents(), 15);

        // R0.03 at 15% = R0.0045 → R0.00 (rounds down)
        let tiny = Money::from_cents(3);
        assert_eq!(tiny.calculate_tax(rate).cents(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(2999);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 8997);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 1000);
    }
}
