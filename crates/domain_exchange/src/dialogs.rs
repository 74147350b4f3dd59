//! Dialog and display capabilities
//!
//! The exchange command never talks to a form, a terminal or a test
//! harness directly. It asks a `MoneyDialog` for the money to convert, a
//! `CurrencyDialog` for the destination, and hands the result to a
//! `MoneyDisplay`. Any value implementing these single-method traits can
//! drive the command, including plain closures:
//!
//! ```rust
//! use core_kernel::{Currency, Money};
//! use domain_exchange::{CurrencyDialog, MoneyDialog, MoneyDisplay};
//! use rust_decimal::Decimal;
//!
//! let usd = Currency::new("USD", "USA").unwrap();
//! let eur = Currency::new("EUR", "Europa").unwrap();
//!
//! let money_dialog = move || Some(Money::new(Decimal::ONE_HUNDRED, usd.clone()));
//! let currency_dialog = move || Some(eur.clone());
//! let display = |money: &Money| println!("{money}");
//!
//! assert!(MoneyDialog::get(&money_dialog).is_some());
//! assert_eq!(CurrencyDialog::get(&currency_dialog).unwrap().code(), "EUR");
//! display.show(&Money::zero(Currency::new("GBP", "UK").unwrap()));
//! ```

use core_kernel::{Currency, Money};

/// Supplies the money the user wants to convert
pub trait MoneyDialog: Send + Sync {
    /// Returns the current money, or `None` when no source currency is selected
    fn get(&self) -> Option<Money>;
}

/// Supplies the destination currency
pub trait CurrencyDialog: Send + Sync {
    /// Returns the selected currency, or `None` when nothing is selected
    fn get(&self) -> Option<Currency>;
}

/// Receives the converted money
pub trait MoneyDisplay: Send + Sync {
    fn show(&self, money: &Money);
}

impl<F> MoneyDialog for F
where
    F: Fn() -> Option<Money> + Send + Sync,
{
    fn get(&self) -> Option<Money> {
        self()
    }
}

impl<F> CurrencyDialog for F
where
    F: Fn() -> Option<Currency> + Send + Sync,
{
    fn get(&self) -> Option<Currency> {
        self()
    }
}

impl<F> MoneyDisplay for F
where
    F: Fn(&Money) + Send + Sync,
{
    fn show(&self, money: &Money) {
        self(money)
    }
}

/// A dialog that always answers with the same money
#[derive(Debug, Clone)]
pub struct FixedMoneyDialog(pub Money);

impl MoneyDialog for FixedMoneyDialog {
    fn get(&self) -> Option<Money> {
        Some(self.0.clone())
    }
}

/// A dialog that always answers with the same currency
#[derive(Debug, Clone)]
pub struct FixedCurrencyDialog(pub Currency);

impl CurrencyDialog for FixedCurrencyDialog {
    fn get(&self) -> Option<Currency> {
        Some(self.0.clone())
    }
}
