//! Rate Quotation Infrastructure
//!
//! This crate talks to the remote exchange rate service and exposes it to
//! the exchange domain through the `CurrencyLoader` and
//! `ExchangeRateLoader` ports.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_rates::{ExchangeRateApiAdapter, ExchangeRateApiConfig};
//!
//! let adapter = ExchangeRateApiAdapter::new(ExchangeRateApiConfig::new("my-key"))?;
//! let currencies = adapter.load_all().await;
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod wire;

pub use adapters::ExchangeRateApiAdapter;
pub use config::{ExchangeRateApiConfig, DEFAULT_BASE_URL};
pub use error::RatesError;
