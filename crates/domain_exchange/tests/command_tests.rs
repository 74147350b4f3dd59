//! Tests for the exchange money command
//!
//! The command is driven with closures and in-memory loaders, the same
//! way a front end or the demo binary drives it.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use core_kernel::{Currency, DomainPort, ExchangeRate, Money, PortError};
use domain_exchange::{
    amount_or_zero, Command, ExchangeError, ExchangeMoneyCommand, ExchangeRateLoader,
    FixedCurrencyDialog, FixedMoneyDialog, MockCurrencyLoader, MockExchangeRateLoader,
    MoneyDisplay, Selection,
};

fn usd() -> Currency {
    Currency::new("USD", "USA").unwrap()
}

fn eur() -> Currency {
    Currency::new("EUR", "Europa").unwrap()
}

/// Remembers everything it was asked to show
#[derive(Default)]
struct RecordingDisplay {
    shown: Mutex<Vec<Money>>,
}

impl RecordingDisplay {
    fn shown(&self) -> Vec<Money> {
        self.shown.lock().clone()
    }
}

impl MoneyDisplay for RecordingDisplay {
    fn show(&self, money: &Money) {
        self.shown.lock().push(money.clone());
    }
}

/// Fails every lookup and counts the attempts
#[derive(Default)]
struct UnreachableRates {
    calls: AtomicUsize,
}

impl DomainPort for UnreachableRates {}

#[async_trait]
impl ExchangeRateLoader for UnreachableRates {
    async fn load(&self, _from: &Currency, _to: &Currency) -> Result<ExchangeRate, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PortError::connection("connection refused"))
    }
}

/// Answers with a quotation for the wrong source currency
struct MisquotingRates;

impl DomainPort for MisquotingRates {}

#[async_trait]
impl ExchangeRateLoader for MisquotingRates {
    async fn load(&self, _from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Ok(ExchangeRate::new(date, Currency::new("GBP", "UK").unwrap(), to.clone(), dec!(1.2)).unwrap())
    }
}

fn command_for(
    money: Money,
    target: Currency,
    rates: Arc<dyn ExchangeRateLoader>,
    display: Arc<RecordingDisplay>,
) -> ExchangeMoneyCommand {
    ExchangeMoneyCommand::new(
        Arc::new(FixedMoneyDialog(money)),
        Arc::new(FixedCurrencyDialog(target)),
        rates,
        display,
    )
}

mod conversion {
    use super::*;

    #[tokio::test]
    async fn test_mock_scenario_shows_92_eur() {
        let currencies = MockCurrencyLoader::currencies();
        let display = Arc::new(RecordingDisplay::default());
        let command = command_for(
            Money::new(dec!(100), currencies[0].clone()),
            currencies[1].clone(),
            Arc::new(MockExchangeRateLoader::default()),
            display.clone(),
        );

        command.execute().await.unwrap();

        let shown = display.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].currency(), &eur());
        assert_eq!(shown[0].amount(), dec!(92.0));
        assert_eq!(shown[0].formatted_amount(), "92.00");
    }

    #[tokio::test]
    async fn test_zero_amount_converts_to_zero() {
        let display = Arc::new(RecordingDisplay::default());
        let command = command_for(
            Money::new(amount_or_zero(Some("abc")), usd()),
            eur(),
            Arc::new(MockExchangeRateLoader::default()),
            display.clone(),
        );

        command.execute().await.unwrap();
        assert!(display.shown()[0].is_zero());
    }

    #[tokio::test]
    async fn test_each_execution_reads_a_fresh_rate() {
        let rates = MockExchangeRateLoader::default();
        let display = Arc::new(RecordingDisplay::default());
        let command = command_for(
            Money::new(dec!(10), usd()),
            eur(),
            Arc::new(rates.clone()),
            display.clone(),
        );

        command.execute().await.unwrap();
        rates.set_rate("USD", "EUR", dec!(0.5));
        command.execute().await.unwrap();

        let amounts: Vec<Decimal> = display.shown().iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![dec!(9.2), dec!(5)]);
    }

    #[tokio::test]
    async fn test_closures_drive_the_command() {
        let shown = Arc::new(Mutex::new(None));
        let sink = shown.clone();
        let command = ExchangeMoneyCommand::new(
            Arc::new(|| Some(Money::new(dec!(2), Currency::new("EUR", "Europa").unwrap()))),
            Arc::new(|| Some(Currency::new("USD", "USA").unwrap())),
            Arc::new(MockExchangeRateLoader::new().with_rate("USD", "EUR", dec!(0.5))),
            Arc::new(move |money: &Money| *sink.lock() = Some(money.to_string())),
        );

        command.execute().await.unwrap();
        assert_eq!(shown.lock().as_deref(), Some("4.00 USD"));
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_rate_failure_is_reported_and_display_untouched() {
        let rates = Arc::new(UnreachableRates::default());
        let display = Arc::new(RecordingDisplay::default());
        let command = command_for(Money::new(dec!(100), usd()), eur(), rates.clone(), display.clone());

        let error = command.execute().await.unwrap_err();

        assert!(error.is_rate_unavailable());
        assert!(error.to_string().contains("USD -> EUR"));
        assert!(display.shown().is_empty());
        assert_eq!(rates.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_not_retried() {
        let rates = Arc::new(UnreachableRates::default());
        let display = Arc::new(RecordingDisplay::default());
        let command = command_for(Money::new(dec!(1), usd()), eur(), rates.clone(), display);

        assert!(command.execute().await.is_err());
        assert!(command.execute().await.is_err());
        assert_eq!(rates.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_source_skips_lookup() {
        let rates = Arc::new(UnreachableRates::default());
        let display = Arc::new(RecordingDisplay::default());
        let command = ExchangeMoneyCommand::new(
            Arc::new(|| None::<Money>),
            Arc::new(FixedCurrencyDialog(eur())),
            rates.clone(),
            display.clone(),
        );

        let error = command.execute().await.unwrap_err();

        assert!(matches!(error, ExchangeError::MissingSelection(Selection::Source)));
        assert!(error.is_missing_selection());
        assert_eq!(rates.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_misquoted_rate_is_rejected() {
        let display = Arc::new(RecordingDisplay::default());
        let command = command_for(Money::new(dec!(1), usd()), eur(), Arc::new(MisquotingRates), display.clone());

        let error = command.execute().await.unwrap_err();

        assert!(matches!(error, ExchangeError::Money(_)));
        assert!(display.shown().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_pair_surfaces_not_found() {
        let display = Arc::new(RecordingDisplay::default());
        let gbp = Currency::new("GBP", "UK").unwrap();
        let command = command_for(
            Money::new(dec!(1), usd()),
            gbp,
            Arc::new(MockExchangeRateLoader::default()),
            display,
        );

        match command.execute().await.unwrap_err() {
            ExchangeError::RateUnavailable { source, from, to } => {
                assert!(source.is_not_found());
                assert_eq!(from, usd());
                assert_eq!(to.code(), "GBP");
            }
            other => panic!("Expected RateUnavailable, got {other:?}"),
        }
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn command_result_is_amount_times_rate(
            amount in 0i64..10_000_000i64,
            rate in 1i64..5_000_000i64
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let amount = Decimal::new(amount, 2);
            let rate = Decimal::new(rate, 6);
            let display = Arc::new(RecordingDisplay::default());
            let command = command_for(
                Money::new(amount, usd()),
                eur(),
                Arc::new(MockExchangeRateLoader::new().with_rate("USD", "EUR", rate)),
                display.clone(),
            );

            runtime.block_on(command.execute()).unwrap();
            prop_assert_eq!(display.shown(), vec![Money::new(amount * rate, eur())]);
        }
    }
}
