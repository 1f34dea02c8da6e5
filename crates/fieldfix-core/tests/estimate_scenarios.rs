//! End-to-end checks of the estimate calculator and validator working
//! together on realistic inputs.

use fieldfix_core::estimate::{calculate_estimate, format_currency, parts_total};
use fieldfix_core::validation::validate_estimate;
use fieldfix_core::{LaborSelection, Money, PartLine};

fn won(v: i64) -> Money {
    Money::from_won(v)
}

fn ignition_coils(quantity: i64) -> Vec<PartLine> {
    vec![PartLine::new("ic-5000", "점화 코일", quantity, won(35_000))]
}

fn simple_replacement() -> Vec<LaborSelection> {
    vec![LaborSelection::new("labor-1", "부품교체(단순)", won(30_000))]
}

#[test]
fn two_coils_with_travel_and_no_vat() {
    let b = calculate_estimate(&ignition_coils(2), &simple_replacement(), won(20_000), false);

    assert_eq!(b.parts_total, won(70_000));
    assert_eq!(b.labor_total, won(30_000));
    assert_eq!(b.subtotal, won(120_000));
    assert_eq!(b.vat, won(0));
    assert_eq!(b.grand_total, won(120_000));
}

#[test]
fn two_coils_with_travel_and_vat() {
    let b = calculate_estimate(&ignition_coils(2), &simple_replacement(), won(20_000), true);

    assert_eq!(b.vat, won(12_000));
    assert_eq!(b.grand_total, won(132_000));
}

#[test]
fn empty_parts_fail_with_single_message() {
    let result = validate_estimate(&[], &simple_replacement(), won(0));

    assert!(!result.valid);
    assert_eq!(result.errors, vec!["select at least one part."]);
}

#[test]
fn zero_quantity_fails_validation_but_still_calculates() {
    let parts = vec![PartLine::new("p", "부품", 0, won(1000))];

    let result = validate_estimate(&parts, &simple_replacement(), won(0));
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["part quantity must be at least 1"]);

    let b = calculate_estimate(&parts, &simple_replacement(), won(0), false);
    assert_eq!(b.parts_total, won(0));
}

#[test]
fn removing_the_only_part_invalidates_the_estimate() {
    let valid = validate_estimate(&ignition_coils(1), &simple_replacement(), won(0));
    assert!(valid.valid);
    assert!(valid.errors.is_empty());

    let invalid = validate_estimate(&[], &simple_replacement(), won(0));
    assert!(!invalid.valid);
    assert!(invalid
        .errors
        .iter()
        .any(|e| e == "select at least one part."));
}

#[test]
fn calculation_is_idempotent() {
    let parts = ignition_coils(3);
    let labor = simple_replacement();

    let first = calculate_estimate(&parts, &labor, won(40_000), true);
    let second = calculate_estimate(&parts, &labor, won(40_000), true);
    assert_eq!(first, second);
}

#[test]
fn each_extra_unit_adds_its_unit_price() {
    let labor = simple_replacement();

    for include_vat in [false, true] {
        let mut previous = calculate_estimate(&ignition_coils(1), &labor, won(20_000), include_vat);
        for quantity in 2..=10 {
            let next = calculate_estimate(&ignition_coils(quantity), &labor, won(20_000), include_vat);
            let delta = (next.grand_total - previous.grand_total).won();
            assert!(next.grand_total > previous.grand_total);

            if include_vat {
                // 35,000 + 10% VAT, give or take one won of rounding
                assert!((delta - 38_500).abs() <= 1, "delta {delta}");
            } else {
                assert_eq!(delta, 35_000);
            }
            previous = next;
        }
    }
}

#[test]
fn vat_is_zero_whenever_disabled() {
    for travel in [0, 1, 5, 15, 99_995, 1_234_567] {
        let b = calculate_estimate(&ignition_coils(1), &simple_replacement(), won(travel), false);
        assert_eq!(b.vat, won(0));
        assert_eq!(b.grand_total, b.subtotal);
    }
}

#[test]
fn vat_follows_round_half_up() {
    for subtotal in [0_i64, 4, 5, 14, 15, 25, 35, 99_995, 1_000_005] {
        let parts = vec![PartLine::new("p", "부품", 1, won(subtotal))];
        let b = calculate_estimate(&parts, &[], won(0), true);
        let expected = (subtotal * 1000 + 5000).div_euclid(10_000);
        assert_eq!(b.vat.won(), expected, "subtotal {subtotal}");
    }
}

#[test]
fn parts_total_matches_manual_sum() {
    let parts = vec![
        PartLine::new("cp-1200", "컴프레서", 1, won(580_000)),
        PartLine::new("dg-180", "도어 가스켓", 2, won(45_000)),
        PartLine::new("tc-350", "온도 조절기", 3, won(95_000)),
    ];
    let manual: i64 = parts.iter().map(|p| p.quantity * p.unit_price.won()).sum();
    assert_eq!(parts_total(&parts).won(), manual);
    assert_eq!(parts_total(&[]).won(), 0);
}

#[test]
fn currency_format_groups_thousands_with_suffix() {
    let formatted = format_currency(won(1_000_000));
    assert_eq!(formatted, "1,000,000원");
    assert!(!formatted.contains(' '));
}
