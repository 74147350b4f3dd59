//! Money Calculator - Command Line Binary
//!
//! # Usage
//!
//! ```bash
//! # Interactive desk against the remote service
//! MONEY_API_KEY=... cargo run --bin money-calculator
//!
//! # Offline, with the built-in USD/EUR table
//! cargo run --bin money-calculator -- --mock
//! cargo run --bin money-calculator -- --mock convert 100 USD EUR
//! ```
//!
//! # Environment Variables
//!
//! * `MONEY_API_KEY` - Key for the exchange rate service (required unless `--mock`)
//! * `MONEY_API_BASE_URL` - Service base URL (default: https://v6.exchangerate-api.com/v6)
//! * `MONEY_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! * `MONEY_DEBOUNCE_MS` - Quiet period before a preview runs (default: 300)
//! * `MONEY_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `MONEY_LOG_JSON` - Write logs as JSON lines (default: false)
//! * `MONEY_MOCK` - Same as `--mock`

use anyhow::Context;
use clap::Parser;

use interface_cli::{cli::Cli, config::AppConfig, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to read MONEY_* configuration")?;

    init_tracing(&config.log_level, config.log_json);
    tracing::debug!(?config, "Configuration loaded");

    run(cli, config).await
}
