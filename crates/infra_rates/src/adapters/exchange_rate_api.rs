//! Exchange Rate Service Adapter
//!
//! This module connects the exchange domain to the remote quotation
//! service over HTTP. A single adapter implements both domain ports:
//!
//! - `CurrencyLoader` via `GET {base}/{key}/codes`
//! - `ExchangeRateLoader` via `GET {base}/{key}/pair/{FROM}/{TO}`
//!
//! # Error Handling
//!
//! Failures are translated to `PortError` at this boundary:
//! - 401/403, `invalid-key` -> `PortError::Unauthorized`
//! - 404, `unsupported-code` -> `PortError::NotFound`
//! - 429, `quota-reached` -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Undecodable bodies -> `PortError::Transformation`
//!
//! The currency listing never fails its caller: on error it logs and
//! returns an empty list. Nothing is retried or cached.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, Currency, DomainPort, ExchangeRate, HealthCheckResult, HealthCheckable,
    PortError,
};
use domain_exchange::{CurrencyLoader, ExchangeRateLoader};

use crate::config::ExchangeRateApiConfig;
use crate::error::RatesError;
use crate::wire;

/// REST adapter for the exchange rate service
///
/// # Example
///
/// ```rust,ignore
/// use infra_rates::{ExchangeRateApiAdapter, ExchangeRateApiConfig};
/// use domain_exchange::ExchangeRateLoader;
///
/// let adapter = ExchangeRateApiAdapter::new(ExchangeRateApiConfig::new(api_key))?;
/// let rate = adapter.load(&usd, &eur).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ExchangeRateApiAdapter {
    client: Client,
    config: ExchangeRateApiConfig,
}

impl ExchangeRateApiAdapter {
    /// Builds the HTTP client with the configured request timeout
    pub fn new(config: ExchangeRateApiConfig) -> Result<Self, RatesError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExchangeRateApiConfig {
        &self.config
    }

    /// Fetches the supported currencies, surfacing failures
    #[instrument(skip(self))]
    pub async fn fetch_currencies(&self) -> Result<Vec<Currency>, PortError> {
        let body = self
            .get(&self.config.codes_url())
            .await
            .map_err(|e| e.into_port_error("codes", self.config.timeout()))?;
        let currencies = wire::parse_codes(&body)
            .map_err(|e| e.into_port_error("codes", self.config.timeout()))?;
        debug!(count = currencies.len(), "Loaded supported currencies");
        Ok(currencies)
    }

    /// Fetches a fresh quotation for the pair
    #[instrument(skip(self), fields(from = %from, to = %to))]
    pub async fn fetch_rate(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
        let operation = format!("pair {}/{}", from, to);
        let body = self
            .get(&self.config.pair_url(from.code(), to.code()))
            .await
            .map_err(|e| e.into_port_error(&operation, self.config.timeout()))?;
        let rate = wire::parse_pair(&body, from, to, Utc::now().date_naive())
            .map_err(|e| e.into_port_error(&operation, self.config.timeout()))?;
        debug!(rate = %rate.rate(), date = %rate.date(), "Loaded exchange rate");
        Ok(rate)
    }

    async fn get(&self, url: &str) -> Result<String, RatesError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(wire::parse_error(&body).unwrap_or(RatesError::Status {
                status: status.as_u16(),
            }));
        }
        Ok(body)
    }
}

impl DomainPort for ExchangeRateApiAdapter {}

#[async_trait]
impl CurrencyLoader for ExchangeRateApiAdapter {
    async fn load_all(&self) -> Vec<Currency> {
        match self.fetch_currencies().await {
            Ok(currencies) => currencies,
            Err(error) => {
                warn!(%error, "Currency catalog unavailable");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ExchangeRateLoader for ExchangeRateApiAdapter {
    async fn load(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
        self.fetch_rate(from, to).await
    }
}

#[async_trait]
impl HealthCheckable for ExchangeRateApiAdapter {
    /// Checks that the codes listing answers with the configured key
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.fetch_currencies().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(currencies) if currencies.is_empty() => (
                AdapterHealth::Degraded,
                Some("Service returned no currencies".to_string()),
            ),
            Ok(currencies) => (
                AdapterHealth::Healthy,
                Some(format!("{} currencies available", currencies.len())),
            ),
            Err(error) if error.is_transient() => {
                (AdapterHealth::Degraded, Some(error.to_string()))
            }
            Err(error) => (AdapterHealth::Unhealthy, Some(error.to_string())),
        };

        HealthCheckResult {
            adapter_id: crate::error::SERVICE_NAME.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}
