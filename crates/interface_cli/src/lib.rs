//! Command Line Front End
//!
//! This crate wires the exchange desk to a terminal and to either the
//! remote exchange rate service or the built-in mock loaders.
//!
//! # Modes
//!
//! - **interactive**: terminal desk with debounced previews and history
//! - **convert**: one conversion, printed to stdout
//! - **currencies**: the available catalog
//! - **demo**: 100 USD to EUR through the mock loaders
//! - **health**: health check of the remote service
//!
//! Logs go to stderr so they never interleave with the desk's output.

pub mod cli;
pub mod config;
pub mod error;
pub mod terminal;

use anyhow::Context;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{CoreError, Currency, CurrencyCatalog, HealthCheckable, Money};
use domain_desk::{DeskHandle, DeskMachine, DeskRuntime};
use domain_exchange::{
    load_catalog, parse_amount, Command, CurrencyLoader, ExchangeError, ExchangeMoneyCommand,
    ExchangeRateLoader, FixedCurrencyDialog, FixedMoneyDialog, MockCurrencyLoader, MockExchangeRateLoader,
};
use infra_rates::ExchangeRateApiAdapter;

use crate::cli::{Cli, Mode};
use crate::config::AppConfig;
use crate::error::CliError;

/// Initializes the tracing subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over `log_level`. With `json` set every
/// event is written as one JSON object per line.
pub fn init_tracing(log_level: &str, json: bool) {
    let registry = tracing_subscriber::registry().with(log_filter(log_level));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        registry
            .with(layer.json().with_current_span(false))
            .init();
    } else {
        registry.with(layer).init();
    }
}

/// `RUST_LOG` if set, else `log_level`, else `info`
pub fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The currency and rate sources used by a session
#[derive(Clone)]
pub struct Loaders {
    pub currencies: Arc<dyn CurrencyLoader>,
    pub rates: Arc<dyn ExchangeRateLoader>,
}

impl Loaders {
    /// USD/EUR catalog with the 0.92 table
    pub fn mock() -> Self {
        Self {
            currencies: Arc::new(MockCurrencyLoader),
            rates: Arc::new(MockExchangeRateLoader::default()),
        }
    }

    /// Both ports served by the remote service
    pub fn live(config: &AppConfig) -> Result<Self, CliError> {
        let adapter = Arc::new(ExchangeRateApiAdapter::new(config.rates_config())?);
        Ok(Self {
            currencies: adapter.clone(),
            rates: adapter,
        })
    }

    pub fn select(cli: &Cli, config: &AppConfig) -> Result<Self, CliError> {
        if cli.mock {
            Ok(Self::mock())
        } else {
            Self::live(config)
        }
    }
}

/// Runs the selected mode to completion
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    config
        .validate(cli.is_live())
        .context("Invalid configuration")?;

    let mode = cli.mode();
    info!(?mode, mock = cli.mock, "Starting money calculator");

    match mode {
        Mode::Interactive => {
            let loaders = Loaders::select(&cli, &config)?;
            let (handle, task) = start_desk(&loaders, &config).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            terminal::run_terminal(handle, stdin, tokio::io::stdout()).await?;
            task.abort();
        }
        Mode::Convert { amount, from, to } => {
            let loaders = Loaders::select(&cli, &config)?;
            let catalog = load_catalog(loaders.currencies.as_ref()).await;
            let result = convert_once(&catalog, loaders.rates, &amount, &from, &to)
                .await
                .with_context(|| format!("Could not convert {} {} to {}", amount, from, to))?;
            println!("{}", result);
        }
        Mode::Currencies => {
            let loaders = Loaders::select(&cli, &config)?;
            let catalog = load_catalog(loaders.currencies.as_ref()).await;
            if catalog.is_empty() {
                return Err(ExchangeError::CatalogUnavailable.into());
            }
            println!("{}", terminal::render_catalog(&catalog));
        }
        Mode::Demo => {
            let result = demo().await.context("Demo conversion failed")?;
            println!("{}", result.formatted_amount());
        }
        Mode::Health => {
            if cli.mock {
                println!("mock loaders: no remote service to check");
                return Ok(());
            }
            let adapter = ExchangeRateApiAdapter::new(config.rates_config())?;
            let result = adapter.health_check().await;
            println!(
                "{}: {:?} in {}ms{}",
                result.adapter_id,
                result.status,
                result.latency_ms,
                result
                    .message
                    .as_deref()
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            );
            if !result.is_healthy() {
                anyhow::bail!("{} is not healthy", result.adapter_id);
            }
        }
    }

    Ok(())
}

/// Loads the catalog and spawns the desk runtime over it
pub async fn start_desk(
    loaders: &Loaders,
    config: &AppConfig,
) -> Result<(DeskHandle, tokio::task::JoinHandle<()>), CliError> {
    let catalog = load_catalog(loaders.currencies.as_ref()).await;
    let machine = DeskMachine::new(catalog, config.debounce());
    Ok(DeskRuntime::spawn(machine, loaders.rates.clone()))
}

/// Converts once with a strict amount parse
///
/// Unlike the desk, which reads unparsable amounts as zero, a one-shot
/// conversion reports them.
pub async fn convert_once(
    catalog: &CurrencyCatalog,
    rates: Arc<dyn ExchangeRateLoader>,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<Money, CliError> {
    let amount = parse_amount(amount)?;
    let from = resolve(catalog, from)?;
    let to = resolve(catalog, to)?;
    execute(rates, Money::new(amount, from), to).await
}

/// The fixed conversion of the mock application: 100 USD to EUR
pub async fn demo() -> Result<Money, CliError> {
    let catalog = CurrencyCatalog::new(MockCurrencyLoader::currencies());
    let usd = catalog.find("USD")?;
    let eur = catalog.find("EUR")?;
    execute(
        Arc::new(MockExchangeRateLoader::default()),
        Money::new(Decimal::ONE_HUNDRED, usd),
        eur,
    )
    .await
}

/// Codes must come from the catalog when one is available
fn resolve(catalog: &CurrencyCatalog, code: &str) -> Result<Currency, CliError> {
    if catalog.is_empty() {
        return Ok(Currency::new(code, code.trim().to_ascii_uppercase())
            .map_err(CoreError::from)?);
    }
    Ok(catalog.find(code)?)
}

async fn execute(
    rates: Arc<dyn ExchangeRateLoader>,
    money: Money,
    target: Currency,
) -> Result<Money, CliError> {
    let shown = Arc::new(Mutex::new(None));
    let sink = shown.clone();
    let command = ExchangeMoneyCommand::new(
        Arc::new(FixedMoneyDialog(money)),
        Arc::new(FixedCurrencyDialog(target)),
        rates,
        Arc::new(move |result: &Money| *sink.lock() = Some(result.clone())),
    );
    command.execute().await?;

    let result = shown.lock().take();
    result.ok_or(CliError::NoResult)
}
