//! Money types with precise decimal arithmetic
//!
//! This module provides the value types every conversion flows through:
//! a `Currency` identified by its code, a `Money` amount tagged with its
//! currency, and the `ExchangeRate` quoted between two currencies.
//! Amounts and rates use rust_decimal so a conversion is an exact product.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Number of decimal places used when presenting an amount
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A currency as published by the currency catalog
///
/// The code is the identity of a currency: equality, hashing and display
/// all use the code alone. The display name is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    code: String,
    name: String,
}

impl Currency {
    /// Creates a currency, normalising the code to upper case
    pub fn new(code: impl AsRef<str>, name: impl Into<String>) -> Result<Self, MoneyError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(MoneyError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self {
            code: code.to_ascii_uppercase(),
            name: name.into(),
        })
    }

    /// Returns the currency code (e.g. "USD")
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name (e.g. "USA")
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// A monetary amount with associated currency
///
/// Amounts are kept at full precision; rounding only happens when the
/// amount is presented. Zero and negative amounts are valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Converts this amount with the given rate
    ///
    /// The rate must be quoted from this money's currency. The result is
    /// expressed in the rate's target currency.
    pub fn convert(&self, rate: &ExchangeRate) -> Result<Money, MoneyError> {
        if rate.from() != &self.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                rate.from().to_string(),
            ));
        }
        let amount = self
            .amount
            .checked_mul(rate.rate())
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, rate.to().clone()))
    }

    /// Returns the amount rounded for presentation (half away from zero)
    pub fn rounded_amount(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns the amount formatted with two decimals, e.g. "92.00"
    pub fn formatted_amount(&self) -> String {
        format!(
            "{:.dp$}",
            self.rounded_amount(),
            dp = DISPLAY_DECIMAL_PLACES as usize
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.formatted_amount(), self.currency)
    }
}

/// A quotation of one currency in terms of another on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    date: NaiveDate,
    from: Currency,
    to: Currency,
    rate: Decimal,
}

impl ExchangeRate {
    /// Creates an exchange rate. The rate must be strictly positive.
    pub fn new(
        date: NaiveDate,
        from: Currency,
        to: Currency,
        rate: Decimal,
    ) -> Result<Self, MoneyError> {
        if rate <= Decimal::ZERO {
            return Err(MoneyError::InvalidRate(format!(
                "{} -> {} quoted at {}",
                from, to, rate
            )));
        }
        Ok(Self {
            date,
            from,
            to,
            rate,
        })
    }

    /// The unit rate between a currency and itself
    pub fn identity(date: NaiveDate, currency: Currency) -> Self {
        Self {
            date,
            from: currency.clone(),
            to: currency,
            rate: Decimal::ONE,
        }
    }

    /// Returns the rate quoted for the reversed pair
    pub fn inverse(&self) -> Result<Self, MoneyError> {
        let rate = Decimal::ONE
            .checked_div(self.rate)
            .ok_or(MoneyError::Overflow)?;
        Self::new(self.date, self.to.clone(), self.from.clone(), rate)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn from(&self) -> &Currency {
        &self.from
    }

    pub fn to(&self) -> &Currency {
        &self.to
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {} ({})", self.from, self.rate, self.to, self.date)
    }
}
