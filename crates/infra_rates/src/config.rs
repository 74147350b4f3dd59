//! Rate service configuration

use serde::Deserialize;
use std::time::Duration;

/// Default endpoint of the exchange rate service (v6 API)
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Configuration for the exchange rate service adapter
#[derive(Clone, Deserialize)]
pub struct ExchangeRateApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// API key inserted into every request path
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ExchangeRateApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl ExchangeRateApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of the supported codes listing
    pub fn codes_url(&self) -> String {
        self.endpoint("codes")
    }

    /// URL of the quotation for an ordered pair
    pub fn pair_url(&self, from: &str, to: &str) -> String {
        self.endpoint(&format!("pair/{}/{}", from, to))
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            path
        )
    }
}

// The key is part of every URL; keep it out of logs.
impl std::fmt::Debug for ExchangeRateApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRateApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_embed_key() {
        let config = ExchangeRateApiConfig::new("k3y");
        assert_eq!(config.codes_url(), "https://v6.exchangerate-api.com/v6/k3y/codes");
        assert_eq!(
            config.pair_url("USD", "EUR"),
            "https://v6.exchangerate-api.com/v6/k3y/pair/USD/EUR"
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = ExchangeRateApiConfig {
            base_url: "http://localhost:8080/v6/".to_string(),
            api_key: "k".to_string(),
            timeout_secs: 5,
        };
        assert_eq!(config.codes_url(), "http://localhost:8080/v6/k/codes");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", ExchangeRateApiConfig::new("secret"));
        assert!(!rendered.contains("secret"));
    }
}
