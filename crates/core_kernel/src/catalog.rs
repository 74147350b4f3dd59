//! The session's currency catalog
//!
//! Loaded once at startup and then shared read-only by every component
//! that offers currencies for selection.

use std::sync::Arc;

use crate::error::CoreError;
use crate::money::Currency;

/// An ordered, immutable list of currencies
///
/// Cloning is cheap: every clone shares the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCatalog {
    currencies: Arc<[Currency]>,
}

impl CurrencyCatalog {
    /// Creates a catalog preserving the given order
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self {
            currencies: currencies.into(),
        }
    }

    /// A catalog with no currencies, used when the source is unavailable
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Currency> {
        self.currencies.get(index)
    }

    pub fn first(&self) -> Option<&Currency> {
        self.currencies.first()
    }

    /// Looks up a currency by code, ignoring case
    pub fn find(&self, code: &str) -> Result<Currency, CoreError> {
        let code = code.trim();
        self.currencies
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .cloned()
            .ok_or_else(|| CoreError::not_found(format!("Currency {}", code)))
    }

    pub fn contains(&self, currency: &Currency) -> bool {
        self.currencies.contains(currency)
    }
}

impl From<Vec<Currency>> for CurrencyCatalog {
    fn from(currencies: Vec<Currency>) -> Self {
        Self::new(currencies)
    }
}
