//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating currencies, amounts and
//! rates that respect the data model's invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};

/// Strategy for generating valid three-letter currencies
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    "[A-Z]{3}".prop_filter_map("valid code", |code| Currency::new(&code, code.clone()).ok())
}

/// Strategy for amounts with two decimals, positive or negative
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for strictly positive rates with up to six decimals
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

pub fn money_strategy() -> impl Strategy<Value = Money> {
    (amount_strategy(), currency_strategy()).prop_map(|(amount, currency)| Money::new(amount, currency))
}

/// Strategy for text a user might type into the amount field
pub fn amount_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        amount_strategy().prop_map(|amount| amount.to_string()),
        Just(String::new()),
        "[a-z ]{1,8}",
    ]
}

/// Strategy for bursts of desk edits
pub fn edit_burst_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(amount_text_strategy(), 1..20)
}
