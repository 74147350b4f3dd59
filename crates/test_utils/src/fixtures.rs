//! Pre-built Test Fixtures
//!
//! Provides ready-to-use currencies, money and rates. The catalog matches
//! the mock currency loader so fixtures and mocks can be mixed freely.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, CurrencyCatalog, ExchangeRate, Money};

/// Fixture for Currency test data
pub struct CurrencyFixtures;

impl CurrencyFixtures {
    pub fn usd() -> Currency {
        Self::currency("USD", "USA")
    }

    pub fn eur() -> Currency {
        Self::currency("EUR", "Europa")
    }

    pub fn gbp() -> Currency {
        Self::currency("GBP", "United Kingdom")
    }

    pub fn jpy() -> Currency {
        Self::currency("JPY", "Japan")
    }

    /// Builds a currency, panicking on an invalid code
    pub fn currency(code: &str, name: &str) -> Currency {
        Currency::new(code, name).unwrap_or_else(|e| panic!("invalid fixture currency {code}: {e}"))
    }

    /// USD and EUR, the mock loader's catalog
    pub fn catalog() -> CurrencyCatalog {
        CurrencyCatalog::new(vec![Self::usd(), Self::eur()])
    }

    /// USD, EUR, GBP and JPY
    pub fn wide_catalog() -> CurrencyCatalog {
        CurrencyCatalog::new(vec![Self::usd(), Self::eur(), Self::gbp(), Self::jpy()])
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard conversion input
    pub fn usd_100() -> Money {
        Money::new(dec!(100), CurrencyFixtures::usd())
    }

    /// `usd_100` converted at `RateFixtures::usd_eur`
    pub fn eur_92() -> Money {
        Money::new(dec!(92.00), CurrencyFixtures::eur())
    }

    pub fn usd_zero() -> Money {
        Money::zero(CurrencyFixtures::usd())
    }

    /// Negative amount; conversions allow it
    pub fn usd_refund() -> Money {
        Money::new(dec!(-50.00), CurrencyFixtures::usd())
    }
}

/// Fixture for ExchangeRate test data
pub struct RateFixtures;

impl RateFixtures {
    pub fn quote_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    /// USD -> EUR at 0.92
    pub fn usd_eur() -> ExchangeRate {
        ExchangeRate::new(
            Self::quote_date(),
            CurrencyFixtures::usd(),
            CurrencyFixtures::eur(),
            dec!(0.92),
        )
        .unwrap_or_else(|e| panic!("invalid fixture rate: {e}"))
    }
}
