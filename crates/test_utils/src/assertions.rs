//! Custom Test Assertions
//!
//! Assertion helpers that give more meaningful messages than plain
//! `assert_eq!` on money values.

use rust_decimal::Decimal;

use core_kernel::Money;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies differ or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value renders with two decimals as expected
pub fn assert_displays_as(money: &Money, expected: &str) {
    assert_eq!(
        money.formatted_amount(),
        expected,
        "Expected {} to display as {}",
        money,
        expected
    );
}
