//! # Estimate Calculator
//!
//! Turns a part list, selected labor, a travel cost and a VAT flag into an
//! [`EstimateBreakdown`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parts ────► parts_total  = Σ quantity × unit_price                     │
//! │  labor ────► labor_total  = Σ rate            (no dedup, see below)     │
//! │  travel ───► travel_cost                                                │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │              subtotal = parts_total + labor_total + travel_cost         │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │              vat = include_vat ? floor(subtotal × 10% + 0.5) : 0        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │              grand_total = subtotal + vat                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: no validation, no errors, no hidden state.
//! Checking that the inputs are billable is the job of
//! [`crate::validation::validate_estimate`].

use crate::money::Money;
use crate::types::{EstimateBreakdown, LaborSelection, PartLine, VatRate};

pub use crate::money::format_currency;

/// Sum of `quantity × unit_price` over all lines. Zero for an empty list.
///
/// Lines are not validated: a zero quantity contributes nothing and a
/// negative one subtracts.
pub fn parts_total(parts: &[PartLine]) -> Money {
    parts.iter().map(PartLine::line_total).sum()
}

/// Sum of the selected labor rates. Zero for an empty selection.
///
/// The selection is expected to be unique by id. Duplicates are NOT removed
/// and count once per occurrence.
pub fn labor_total(labor: &[LaborSelection]) -> Money {
    labor.iter().map(|l| l.rate).sum()
}

/// Calculates the full estimate breakdown.
///
/// ## Example
/// ```rust
/// use fieldfix_core::estimate::calculate_estimate;
/// use fieldfix_core::{LaborSelection, Money, PartLine};
///
/// let parts = vec![PartLine::new("ic-5000", "점화 코일", 2, Money::from_won(35_000))];
/// let labor = vec![LaborSelection::new("simple", "부품교체(단순)", Money::from_won(30_000))];
///
/// let breakdown = calculate_estimate(&parts, &labor, Money::from_won(20_000), true);
/// assert_eq!(breakdown.subtotal.won(), 120_000);
/// assert_eq!(breakdown.vat.won(), 12_000);
/// assert_eq!(breakdown.grand_total.won(), 132_000);
/// ```
pub fn calculate_estimate(
    parts: &[PartLine],
    labor: &[LaborSelection],
    travel_cost: Money,
    include_vat: bool,
) -> EstimateBreakdown {
    let parts_total = parts_total(parts);
    let labor_total = labor_total(labor);
    let subtotal = parts_total + labor_total + travel_cost;
    let vat = if include_vat {
        subtotal.calculate_vat(VatRate::STANDARD)
    } else {
        Money::zero()
    };

    EstimateBreakdown {
        parts_total,
        labor_total,
        travel_cost,
        subtotal,
        vat,
        grand_total: subtotal + vat,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn won(v: i64) -> Money {
        Money::from_won(v)
    }

    fn ignition_coil(quantity: i64) -> PartLine {
        PartLine::new("ic-5000", "점화 코일", quantity, won(35_000))
    }

    fn simple_replacement() -> LaborSelection {
        LaborSelection::new("labor-simple", "부품교체(단순)", won(30_000))
    }

    #[test]
    fn test_parts_total_empty_is_zero() {
        assert_eq!(parts_total(&[]), Money::zero());
    }

    #[test]
    fn test_parts_total_sums_lines() {
        let parts = vec![
            ignition_coil(2),
            PartLine::new("gv-200", "가스 밸브", 1, won(85_000)),
            PartLine::new("bc-50", "버너 캡", 3, won(15_000)),
        ];
        assert_eq!(parts_total(&parts).won(), 70_000 + 85_000 + 45_000);
    }

    #[test]
    fn test_labor_total_counts_duplicates() {
        let labor = vec![simple_replacement(), simple_replacement()];
        assert_eq!(labor_total(&labor).won(), 60_000);
        assert_eq!(labor_total(&[]), Money::zero());
    }

    #[test]
    fn test_without_vat() {
        let b = calculate_estimate(&[ignition_coil(2)], &[simple_replacement()], won(20_000), false);
        assert_eq!(b.parts_total.won(), 70_000);
        assert_eq!(b.labor_total.won(), 30_000);
        assert_eq!(b.travel_cost.won(), 20_000);
        assert_eq!(b.subtotal.won(), 120_000);
        assert_eq!(b.vat.won(), 0);
        assert_eq!(b.grand_total.won(), 120_000);
        assert!(!b.has_vat_amount());
    }

    #[test]
    fn test_with_vat() {
        let b = calculate_estimate(&[ignition_coil(2)], &[simple_replacement()], won(20_000), true);
        assert_eq!(b.vat.won(), 12_000);
        assert_eq!(b.grand_total.won(), 132_000);
        assert!(b.has_vat_amount());
    }

    #[test]
    fn test_tiny_subtotal_with_vat_has_no_vat_amount() {
        let parts = vec![PartLine::new("washer", "와셔", 1, won(4))];
        let b = calculate_estimate(&parts, &[], Money::zero(), true);
        assert_eq!(b.vat, Money::zero());
        assert!(!b.has_vat_amount());
    }

    #[test]
    fn test_huge_line_saturates_instead_of_panicking() {
        let parts = vec![PartLine::new("p", "p", 4_000_000_000, won(4_000_000_000))];
        let labor = vec![simple_replacement()];

        let b = calculate_estimate(&parts, &labor, won(20_000), true);
        assert_eq!(b.parts_total, won(i64::MAX));
        assert_eq!(b.subtotal, won(i64::MAX));
        assert_eq!(b.grand_total, won(i64::MAX));
        assert!(b.vat.is_positive());
    }

    #[test]
    fn test_vat_rounds_half_up_on_subtotal() {
        let parts = vec![PartLine::new("x", "x", 1, won(25))];
        let b = calculate_estimate(&parts, &[], Money::zero(), true);
        assert_eq!(b.subtotal.won(), 25);
        assert_eq!(b.vat.won(), 3);
        assert_eq!(b.grand_total.won(), 28);
    }

    #[test]
    fn test_zero_quantity_is_not_rejected() {
        let parts = vec![PartLine::new("x", "x", 0, won(1000))];
        let b = calculate_estimate(&parts, &[simple_replacement()], Money::zero(), false);
        assert_eq!(b.parts_total.won(), 0);
        assert_eq!(b.grand_total.won(), 30_000);
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        let parts = vec![PartLine::new("x", "x", 1, won(-1000))];
        let b = calculate_estimate(&parts, &[], won(-500), false);
        assert_eq!(b.subtotal.won(), -1500);
        assert_eq!(b.grand_total.won(), -1500);
    }
}
