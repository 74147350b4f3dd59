//! Parsing of user-entered amounts
//!
//! Amount text that cannot be read as a number is not an error for the
//! conversion: it counts as zero. `parse_amount` exposes the strict parse
//! for callers that want to report the problem instead.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::error::ExchangeError;

/// Parses an amount, accepting plain and scientific notation
pub fn parse_amount(text: &str) -> Result<Decimal, ExchangeError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ExchangeError::InvalidNumericInput(text.to_string()))
}

/// Parses an amount, coercing missing or invalid text to zero
pub fn amount_or_zero(text: Option<&str>) -> Decimal {
    let Some(text) = text else {
        return Decimal::ZERO;
    };
    match parse_amount(text) {
        Ok(amount) => amount,
        Err(error) => {
            debug!(%error, "Treating amount as zero");
            Decimal::ZERO
        }
    }
}
