//! Exchange form state
//!
//! The form holds what the user has typed and selected. Evaluations never
//! read the live form: they work on a `FormSnapshot` frozen at the moment
//! the evaluation was issued, so a later edit cannot change a request that
//! is already in flight.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, CurrencyCatalog, Money};
use domain_exchange::{amount_or_zero, CurrencyDialog, MoneyDialog};

/// The editable conversion form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeForm {
    amount_text: String,
    source: Option<Currency>,
    target: Option<Currency>,
}

impl ExchangeForm {
    /// Creates an empty form with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form with the catalog's default selection
    ///
    /// The source is the first currency and the target the second, or the
    /// first again when the catalog holds a single currency.
    pub fn from_catalog(catalog: &CurrencyCatalog) -> Self {
        let source = catalog.first().cloned();
        let target = catalog.get(1).or_else(|| catalog.first()).cloned();
        Self {
            amount_text: String::new(),
            source,
            target,
        }
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn source(&self) -> Option<&Currency> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Currency> {
        self.target.as_ref()
    }

    /// Amount as entered, zero when the text is not a number
    pub fn amount(&self) -> Decimal {
        amount_or_zero(Some(&self.amount_text))
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount_text = text.into();
    }

    pub fn select_source(&mut self, currency: Option<Currency>) {
        self.source = currency;
    }

    pub fn select_target(&mut self, currency: Option<Currency>) {
        self.target = currency;
    }

    /// Exchanges source and target
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            amount: self.amount(),
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}

/// An immutable copy of the form taken when an evaluation is issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    amount: Decimal,
    source: Option<Currency>,
    target: Option<Currency>,
}

impl FormSnapshot {
    pub fn new(amount: Decimal, source: Option<Currency>, target: Option<Currency>) -> Self {
        Self {
            amount,
            source,
            target,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The money to convert, if a source currency is selected
    pub fn money(&self) -> Option<Money> {
        self.source
            .as_ref()
            .map(|currency| Money::new(self.amount, currency.clone()))
    }

    pub fn target(&self) -> Option<&Currency> {
        self.target.as_ref()
    }

    /// True when both currencies are selected
    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}

impl MoneyDialog for FormSnapshot {
    fn get(&self) -> Option<Money> {
        self.money()
    }
}

impl CurrencyDialog for FormSnapshot {
    fn get(&self) -> Option<Currency> {
        self.target.clone()
    }
}
