//! # Money Module
//!
//! Provides the `Money` type for monetary values in whole Korean won.
//!
//! ## Why Integer Won?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  120,000 × 0.1 = 12000.000000000002  ❌ not an integer                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer won, integer VAT                                 │
//! │    (120,000 × 1000 + 5000) / 10000 = 12,000 exactly                     │
//! │                                                                         │
//! │  The won has no minor unit in practice, so there is no "cents" part.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fieldfix_core::money::Money;
//!
//! let unit_price = Money::from_won(35_000);
//! let line_total = unit_price * 2_i64;
//! assert_eq!(line_total.won(), 70_000);
//! assert_eq!(line_total.to_string(), "70,000원");
//! ```

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::VatRate;

/// Currency unit appended to every formatted amount.
pub const CURRENCY_SUFFIX: &str = "원";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole won.
///
/// ## Design Decisions
/// - **i64 (signed)**: the calculator does not reject negative inputs, it
///   carries them through arithmetically, so the type must represent them
/// - **Saturating arithmetic**: every operator clamps at `i64::MIN` /
///   `i64::MAX` instead of overflowing
/// - **Single field tuple struct**: serializes as a bare JSON number
///
/// ## Where Money is Used
/// ```text
/// PartLine.unit_price ──► × quantity ──► parts_total ─┐
/// LaborSelection.rate ──────────────────► labor_total ├─► subtotal ─► VAT ─► grand_total
/// TravelRate.rate ──────────────────────► travel_cost ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    ///
    /// ## Example
    /// ```rust
    /// use fieldfix_core::money::Money;
    ///
    /// let rate = Money::from_won(30_000);
    /// assert_eq!(rate.won(), 30_000);
    /// ```
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
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

    /// Multiplies money by a quantity, saturating at the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use fieldfix_core::money::Money;
    ///
    /// let unit_price = Money::from_won(35_000);
    /// assert_eq!(unit_price.multiply_quantity(2).won(), 70_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Clamps a wide intermediate result into the i64 range.
    #[inline]
    fn saturate(wide: i128) -> Self {
        Money(wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Calculates VAT on this amount, rounding half up.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (not Bankers Rounding)                               │
    /// │                                                                     │
    /// │  vat = floor(amount × rate + 0.5)                                   │
    /// │                                                                     │
    /// │    amount 5  at 10% → 0.5 → 1                                       │
    /// │    amount 15 at 10% → 1.5 → 2                                       │
    /// │    amount 25 at 10% → 2.5 → 3   (bankers would give 2)              │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math: `floor((amount * bps + 5000) / 10000)`.
    /// `div_euclid` floors toward negative infinity, so the formula holds for
    /// negative (out-of-contract) amounts as well.
    ///
    /// ## Example
    /// ```rust
    /// use fieldfix_core::money::Money;
    /// use fieldfix_core::types::VatRate;
    ///
    /// let subtotal = Money::from_won(120_000);
    /// assert_eq!(subtotal.calculate_vat(VatRate::STANDARD).won(), 12_000);
    /// assert_eq!(Money::from_won(25).calculate_vat(VatRate::STANDARD).won(), 3);
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Money {
        // i128 prevents overflow on the intermediate product
        let scaled = self.0 as i128 * rate.bps() as i128 + 5000;
        Money::saturate(scaled.div_euclid(10000))
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders an amount the way Korean invoices show it: `1,000,000원`.
///
/// Digits are grouped by thousands with `,` and the currency unit follows
/// immediately, with no space in between.
///
/// ## Example
/// ```rust
/// use fieldfix_core::money::{format_currency, Money};
///
/// assert_eq!(format_currency(Money::from_won(1_000_000)), "1,000,000원");
/// assert_eq!(format_currency(Money::from_won(0)), "0원");
/// ```
pub fn format_currency(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    // unsigned_abs keeps i64::MIN from overflowing
    let digits = amount.won().unsigned_abs().to_formatted_string(&Locale::ko);
    format!("{sign}{digits}{CURRENCY_SUFFIX}")
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(*self))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Accumulates in i128 and clamps once, so the result does not depend on
/// the order of the terms.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money::saturate(iter.map(|m| m.0 as i128).sum())
    }
}

impl From<i64> for Money {
    fn from(won: i64) -> Self {
        Money::from_won(won)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_won() {
        let money = Money::from_won(35_000);
        assert_eq!(money.won(), 35_000);
        assert!(money.is_positive());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(1000);
        let b = Money::from_won(500);

        assert_eq!((a + b).won(), 1500);
        assert_eq!((a - b).won(), 500);
        assert_eq!((a * 3_i64).won(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.won(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_won(i64::MAX);
        let min = Money::from_won(i64::MIN);

        assert_eq!(max + Money::from_won(1), max);
        assert_eq!(min - Money::from_won(1), min);
        assert_eq!(Money::from_won(4_000_000_000).multiply_quantity(4_000_000_000), max);
        assert_eq!(Money::from_won(-4_000_000_000) * 4_000_000_000_i64, min);

        let mut acc = max;
        acc += Money::from_won(10);
        assert_eq!(acc, max);
        acc -= max;
        assert!(acc.is_zero());

        // the intermediate overflow cancels out
        let total: Money = vec![max, Money::from_won(1), Money::from_won(-1)].into_iter().sum();
        assert_eq!(total, max);
        let total: Money = vec![max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_vat_saturates() {
        let vat = Money::from_won(i64::MAX).calculate_vat(VatRate::from_bps(20_000));
        assert_eq!(vat.won(), i64::MAX);
    }

    #[test]
    fn test_vat_basic() {
        let subtotal = Money::from_won(120_000);
        assert_eq!(subtotal.calculate_vat(VatRate::STANDARD).won(), 12_000);
    }

    #[test]
    fn test_vat_rounds_half_up() {
        // x.5 always goes up, including even integer parts
        assert_eq!(Money::from_won(5).calculate_vat(VatRate::STANDARD).won(), 1);
        assert_eq!(Money::from_won(15).calculate_vat(VatRate::STANDARD).won(), 2);
        assert_eq!(Money::from_won(25).calculate_vat(VatRate::STANDARD).won(), 3);
        assert_eq!(Money::from_won(24).calculate_vat(VatRate::STANDARD).won(), 2);
        assert_eq!(Money::from_won(4).calculate_vat(VatRate::STANDARD).won(), 0);
    }

    #[test]
    fn test_vat_matches_floor_formula() {
        for subtotal in 0..2_000_i64 {
            let expected = (subtotal as f64 * 0.10 + 0.5).floor() as i64;
            let vat = Money::from_won(subtotal).calculate_vat(VatRate::STANDARD);
            assert_eq!(vat.won(), expected, "subtotal {subtotal}");
        }
    }

    #[test]
    fn test_vat_on_negative_amount_floors() {
        // -2.5 → -2 and -2.6 → -3, the same as floor(x + 0.5)
        assert_eq!(Money::from_won(-25).calculate_vat(VatRate::STANDARD).won(), -2);
        assert_eq!(Money::from_won(-26).calculate_vat(VatRate::STANDARD).won(), -3);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::from_won(1_000_000)), "1,000,000원");
        assert_eq!(format_currency(Money::from_won(132_000)), "132,000원");
        assert_eq!(format_currency(Money::from_won(999)), "999원");
        assert_eq!(format_currency(Money::from_won(0)), "0원");
        assert_eq!(format_currency(Money::from_won(-20_000)), "-20,000원");
    }

    #[test]
    fn test_format_currency_is_exact_beyond_f64_precision() {
        // 2^53 + 1 has no exact f64 representation
        assert_eq!(
            format_currency(Money::from_won(9_007_199_254_740_993)),
            "9,007,199,254,740,993원"
        );
        assert_eq!(
            format_currency(Money::from_won(12_345_678_901_234_567)),
            "12,345,678,901,234,567원"
        );
        assert_eq!(
            format_currency(Money::from_won(i64::MAX)),
            "9,223,372,036,854,775,807원"
        );
        assert_eq!(
            format_currency(Money::from_won(i64::MIN)),
            "-9,223,372,036,854,775,808원"
        );
    }

    #[test]
    fn test_display_uses_currency_format() {
        assert_eq!(Money::from_won(1_234_567).to_string(), "1,234,567원");
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_won(70_000)).unwrap();
        assert_eq!(json, "70000");
    }
}
