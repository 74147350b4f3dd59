//! Quotation Adapters
//!
//! Implementations of the exchange domain's loader ports backed by a
//! remote service.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_rates::adapters::ExchangeRateApiAdapter;
//! use domain_exchange::ExchangeRateLoader;
//! use std::sync::Arc;
//!
//! let adapter = ExchangeRateApiAdapter::new(config)?;
//! let rates: Arc<dyn ExchangeRateLoader> = Arc::new(adapter);
//! ```

pub mod exchange_rate_api;

pub use exchange_rate_api::ExchangeRateApiAdapter;
