//! Test Doubles
//!
//! Displays and rate loaders that record or script their behaviour.

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use core_kernel::{Currency, DomainPort, ExchangeRate, Money, PortError};
use domain_exchange::{ExchangeRateLoader, MockExchangeRateLoader, MoneyDisplay};

use crate::fixtures::RateFixtures;

/// Display that keeps every money it was shown
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    shown: Arc<Mutex<Vec<Money>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Money> {
        self.shown.lock().clone()
    }

    pub fn last(&self) -> Option<Money> {
        self.shown.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.shown.lock().len()
    }
}

impl MoneyDisplay for RecordingDisplay {
    fn show(&self, money: &Money) {
        self.shown.lock().push(money.clone());
    }
}

/// Rate loader that always fails
#[derive(Debug, Clone, Default)]
pub struct FailingRateLoader {
    calls: Arc<AtomicUsize>,
}

impl FailingRateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for FailingRateLoader {}

#[async_trait]
impl ExchangeRateLoader for FailingRateLoader {
    async fn load(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PortError::ServiceUnavailable {
            service: format!("rates {}/{}", from, to),
        })
    }
}

/// Wraps the mock loader and counts lookups
#[derive(Debug, Clone)]
pub struct CountingRateLoader {
    inner: MockExchangeRateLoader,
    calls: Arc<AtomicUsize>,
}

impl CountingRateLoader {
    pub fn new(inner: MockExchangeRateLoader) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for CountingRateLoader {
    fn default() -> Self {
        Self::new(MockExchangeRateLoader::default())
    }
}

impl DomainPort for CountingRateLoader {}

#[async_trait]
impl ExchangeRateLoader for CountingRateLoader {
    async fn load(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.load(from, to).await
    }
}

/// One scripted answer of a `ScriptedRateLoader`
#[derive(Debug, Clone)]
pub enum ScriptedQuote {
    /// Answer with this rate after the delay
    Rate { rate: Decimal, delay: Duration },
    /// Fail with `ServiceUnavailable` after the delay
    Fail { delay: Duration },
}

impl ScriptedQuote {
    pub fn rate(rate: Decimal, delay: Duration) -> Self {
        ScriptedQuote::Rate { rate, delay }
    }

    pub fn fail(delay: Duration) -> Self {
        ScriptedQuote::Fail { delay }
    }
}

/// Rate loader answering calls in order from a script
///
/// Delays let tests make an earlier request finish after a later one.
/// Once the script is exhausted every call fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRateLoader {
    script: Arc<Mutex<VecDeque<ScriptedQuote>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedRateLoader {
    pub fn new(script: impl IntoIterator<Item = ScriptedQuote>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for ScriptedRateLoader {}

#[async_trait]
impl ExchangeRateLoader for ScriptedRateLoader {
    async fn load(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        match next {
            Some(ScriptedQuote::Rate { rate, delay }) => {
                tokio::time::sleep(delay).await;
                ExchangeRate::new(RateFixtures::quote_date(), from.clone(), to.clone(), rate)
                    .map_err(|e| PortError::transformation(e.to_string()))
            }
            Some(ScriptedQuote::Fail { delay }) => {
                tokio::time::sleep(delay).await;
                Err(PortError::ServiceUnavailable {
                    service: "scripted".to_string(),
                })
            }
            None => Err(PortError::internal("script exhausted")),
        }
    }
}
