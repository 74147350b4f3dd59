//! Response shapes of the exchange rate service
//!
//! ```text
//! GET {base}/{key}/codes
//!   {"result":"success","supported_codes":[["USD","United States Dollar"],...]}
//! GET {base}/{key}/pair/USD/EUR
//!   {"result":"success","conversion_rate":0.92,"time_last_update_unix":1716940801,...}
//! error bodies
//!   {"result":"error","error-type":"unsupported-code"}
//! ```

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{Currency, ExchangeRate, MoneyError};

use crate::error::RatesError;

/// Fields shared by every response
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub result: String,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
}

impl Envelope {
    /// Turns an error envelope into `RatesError::Api`
    pub fn check(&self) -> Result<(), RatesError> {
        if self.result == "success" {
            return Ok(());
        }
        Err(RatesError::Api {
            error_type: self
                .error_type
                .clone()
                .unwrap_or_else(|| self.result.clone()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CodesResponse {
    #[serde(flatten)]
    envelope: Envelope,
    #[serde(default)]
    supported_codes: Option<Vec<(String, String)>>,
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    #[serde(flatten)]
    envelope: Envelope,
    conversion_rate: Option<f64>,
    time_last_update_unix: Option<i64>,
}

/// Reads the error envelope of a failed response, if the body has one
pub fn parse_error(body: &str) -> Option<RatesError> {
    let envelope: Envelope = serde_json::from_str(body).ok()?;
    envelope.check().err()
}

/// Decodes the supported codes listing, preserving the service's order
///
/// Entries with an empty code are skipped.
pub fn parse_codes(body: &str) -> Result<Vec<Currency>, RatesError> {
    let response: CodesResponse = serde_json::from_str(body)?;
    response.envelope.check()?;
    let codes = response
        .supported_codes
        .ok_or(RatesError::MissingField("supported_codes"))?;
    Ok(codes
        .into_iter()
        .filter_map(|(code, name)| Currency::new(code, name).ok())
        .collect())
}

/// Decodes a pair quotation
///
/// The quotation date is the service's last update when present, otherwise
/// `today`.
pub fn parse_pair(
    body: &str,
    from: &Currency,
    to: &Currency,
    today: NaiveDate,
) -> Result<ExchangeRate, RatesError> {
    let response: PairResponse = serde_json::from_str(body)?;
    response.envelope.check()?;
    let rate = response
        .conversion_rate
        .ok_or(RatesError::MissingField("conversion_rate"))?;
    let rate = Decimal::try_from(rate)
        .map_err(|_| MoneyError::InvalidRate(format!("{} -> {} quoted at {}", from, to, rate)))?;
    let date = response
        .time_last_update_unix
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|instant| instant.date_naive())
        .unwrap_or(today);

    Ok(ExchangeRate::new(date, from.clone(), to.clone(), rate)?)
}
