//! Exchange domain errors

use thiserror::Error;

use core_kernel::{Currency, MoneyError, PortError};

/// Errors that can occur while exchanging money
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("No {0} currency selected")]
    MissingSelection(Selection),

    #[error("Exchange rate {from} -> {to} unavailable: {source}")]
    RateUnavailable {
        from: Currency,
        to: Currency,
        #[source]
        source: PortError,
    },

    #[error("Invalid numeric input: {0:?}")]
    InvalidNumericInput(String),

    #[error("Currency catalog unavailable")]
    CatalogUnavailable,

    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Which side of the conversion is missing a currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Source,
    Target,
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Source => f.write_str("source"),
            Selection::Target => f.write_str("target"),
        }
    }
}

impl ExchangeError {
    pub fn rate_unavailable(from: &Currency, to: &Currency, source: PortError) -> Self {
        ExchangeError::RateUnavailable {
            from: from.clone(),
            to: to.clone(),
            source,
        }
    }

    /// Returns true if the failure came from the rate source
    pub fn is_rate_unavailable(&self) -> bool {
        matches!(self, ExchangeError::RateUnavailable { .. })
    }

    /// Returns true if the failure only means the form is incomplete
    pub fn is_missing_selection(&self) -> bool {
        matches!(self, ExchangeError::MissingSelection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(error: &ExchangeError) -> &'static str {
        match error {
            ExchangeError::MissingSelection(_) => "selection",
            ExchangeError::RateUnavailable { .. } => "rate",
            ExchangeError::InvalidNumericInput(_) => "input",
            ExchangeError::CatalogUnavailable => "catalog",
            ExchangeError::Money(_) => "money",
        }
    }

    fn convert() -> Result<(), ExchangeError> {
        Err(MoneyError::Overflow)?
    }

    #[test]
    fn test_money_errors_convert_with_question_mark() {
        let error = convert().unwrap_err();
        assert_eq!(kind(&error), "money");
        assert!(!error.is_rate_unavailable());
    }

    #[test]
    fn test_predicates() {
        let usd = Currency::new("USD", "USA").unwrap();
        let eur = Currency::new("EUR", "Europa").unwrap();
        let error = ExchangeError::rate_unavailable(&usd, &eur, PortError::not_found("Rate", "USD/EUR"));
        assert_eq!(kind(&error), "rate");
        assert!(error.is_rate_unavailable());
        assert!(ExchangeError::MissingSelection(Selection::Target).is_missing_selection());
        assert_eq!(
            ExchangeError::MissingSelection(Selection::Source).to_string(),
            "No source currency selected"
        );
    }
}
