//! Exchange Domain Ports
//!
//! This module defines where the exchange domain gets its data from:
//!
//! - **CurrencyLoader**: the list of currencies offered for selection
//! - **ExchangeRateLoader**: a fresh quotation for an ordered currency pair
//!
//! Adapters implement these traits against the remote quotation service
//! (`infra_rates`) or the in-memory tables in [`mock`].

use async_trait::async_trait;
use tracing::warn;

use core_kernel::{Currency, CurrencyCatalog, DomainPort, ExchangeRate, PortError};

/// Source of the currency catalog
///
/// Implementations must not fail the caller: when the underlying source is
/// unavailable they log the failure and return an empty list.
#[async_trait]
pub trait CurrencyLoader: DomainPort {
    async fn load_all(&self) -> Vec<Currency>;
}

/// Source of exchange rates
///
/// Every call performs a fresh lookup; nothing is cached.
#[async_trait]
pub trait ExchangeRateLoader: DomainPort {
    async fn load(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError>;
}

/// Loads the session catalog through the given loader
///
/// An empty result is kept as an empty catalog; callers decide whether an
/// empty catalog is fatal.
pub async fn load_catalog(loader: &dyn CurrencyLoader) -> CurrencyCatalog {
    let currencies = loader.load_all().await;
    if currencies.is_empty() {
        warn!("Currency catalog is empty; selectors will have no options");
    }
    CurrencyCatalog::new(currencies)
}

/// In-memory loaders for demos and tests
pub mod mock {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use parking_lot::RwLock;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Serves the fixed two-currency catalog
    #[derive(Debug, Clone, Default)]
    pub struct MockCurrencyLoader;

    impl MockCurrencyLoader {
        pub fn currencies() -> Vec<Currency> {
            [("USD", "USA"), ("EUR", "Europa")]
                .into_iter()
                .filter_map(|(code, name)| Currency::new(code, name).ok())
                .collect()
        }
    }

    impl DomainPort for MockCurrencyLoader {}

    #[async_trait]
    impl CurrencyLoader for MockCurrencyLoader {
        async fn load_all(&self) -> Vec<Currency> {
            Self::currencies()
        }
    }

    /// Serves rates from an in-memory table
    ///
    /// Same-currency pairs are answered with rate 1 and a reversed pair is
    /// answered with the inverse of the stored quotation. Any other pair is
    /// reported as not found.
    #[derive(Debug, Clone)]
    pub struct MockExchangeRateLoader {
        rates: Arc<RwLock<HashMap<(String, String), Decimal>>>,
        date: NaiveDate,
    }

    impl MockExchangeRateLoader {
        /// Creates an empty table quoted today
        pub fn new() -> Self {
            Self::dated(Utc::now().date_naive())
        }

        /// Creates an empty table quoted on the given date
        pub fn dated(date: NaiveDate) -> Self {
            Self {
                rates: Arc::new(RwLock::new(HashMap::new())),
                date,
            }
        }

        /// Adds a quotation, replacing any previous one for the pair
        pub fn with_rate(self, from: &str, to: &str, rate: Decimal) -> Self {
            self.set_rate(from, to, rate);
            self
        }

        /// Replaces the quotation for a pair at runtime
        pub fn set_rate(&self, from: &str, to: &str, rate: Decimal) {
            self.rates.write().insert(Self::key(from, to), rate);
        }

        fn key(from: &str, to: &str) -> (String, String) {
            (from.to_ascii_uppercase(), to.to_ascii_uppercase())
        }
    }

    impl Default for MockExchangeRateLoader {
        /// The table used by the demo: 1 USD = 0.92 EUR
        fn default() -> Self {
            Self::new().with_rate("USD", "EUR", Decimal::new(92, 2))
        }
    }

    impl DomainPort for MockExchangeRateLoader {}

    #[async_trait]
    impl ExchangeRateLoader for MockExchangeRateLoader {
        async fn load(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
            if from == to {
                return Ok(ExchangeRate::identity(self.date, from.clone()));
            }

            let rates = self.rates.read();
            if let Some(rate) = rates.get(&Self::key(from.code(), to.code())) {
                return ExchangeRate::new(self.date, from.clone(), to.clone(), *rate)
                    .map_err(|e| PortError::transformation(e.to_string()));
            }
            if let Some(rate) = rates.get(&Self::key(to.code(), from.code())) {
                return ExchangeRate::new(self.date, to.clone(), from.clone(), *rate)
                    .and_then(|quote| quote.inverse())
                    .map_err(|e| PortError::transformation(e.to_string()));
            }

            Err(PortError::not_found("ExchangeRate", format!("{}/{}", from, to)))
        }
    }
}
