//! Application configuration

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use core_kernel::CoreError;
use infra_rates::{ExchangeRateApiConfig, DEFAULT_BASE_URL};

/// Prefix of every configuration variable, e.g. `MONEY_API_KEY`
pub const ENV_PREFIX: &str = "MONEY";

/// Application configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the exchange rate service
    pub api_base_url: String,
    /// Key for the exchange rate service
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Quiet period before a preview runs, in milliseconds
    pub debounce_ms: u64,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines instead of plain text
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            debounce_ms: 300,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `MONEY_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::build(None)
    }

    /// Loads configuration from an explicit variable map instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::build(Some(vars))
    }

    fn build(source: Option<HashMap<String, String>>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(source),
            )
            .build()?
            .try_deserialize()
    }

    /// Checks the settings needed by the selected mode
    pub fn validate(&self, live: bool) -> Result<(), CoreError> {
        if live && self.api_key.trim().is_empty() {
            return Err(CoreError::configuration(
                "MONEY_API_KEY is required unless --mock is given",
            ));
        }
        if live && self.api_base_url.trim().is_empty() {
            return Err(CoreError::configuration("MONEY_API_BASE_URL must not be empty"));
        }
        if self.debounce_ms == 0 {
            return Err(CoreError::configuration("MONEY_DEBOUNCE_MS must be positive"));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::configuration("MONEY_TIMEOUT_SECS must be positive"));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn rates_config(&self) -> ExchangeRateApiConfig {
        ExchangeRateApiConfig {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .field("debounce_ms", &self.debounce_ms)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_reads_json_log_switch() {
        let config = AppConfig::from_vars(vars(&[
            ("MONEY_LOG_JSON", "true"),
            ("MONEY_LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert!(config.log_json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let config = AppConfig::from_vars(vars(&[
            ("MONEY_API_KEY", "abc123"),
            ("MONEY_DEBOUNCE_MS", "150"),
            ("MONEY_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.rates_config().timeout_secs, 5);
    }

    #[test]
    fn test_live_mode_requires_key() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(true),
            Err(CoreError::Configuration(_))
        ));
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let config = AppConfig {
            debounce_ms: 0,
            ..AppConfig::default()
        };
        assert!(config.validate(false).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = AppConfig {
            api_key: "secret".to_string(),
            ..AppConfig::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }
}
