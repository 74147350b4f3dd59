//! The exchange money command
//!
//! `ExchangeMoneyCommand` is a pure orchestration over four collaborators:
//!
//! ```text
//! MoneyDialog ──┐
//!               ├──> ExchangeRateLoader ──> Money::convert ──> MoneyDisplay
//! CurrencyDialog┘
//! ```
//!
//! It owns no state. Every execution asks the dialogs again and fetches a
//! fresh rate; a failed lookup aborts the execution without touching the
//! display.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::dialogs::{CurrencyDialog, MoneyDialog, MoneyDisplay};
use crate::error::{ExchangeError, Selection};
use crate::ports::ExchangeRateLoader;

/// An action that can be triggered from a front end
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self) -> Result<(), ExchangeError>;
}

/// Converts the dialog's money into the selected currency and displays it
#[derive(Clone)]
pub struct ExchangeMoneyCommand {
    money_dialog: Arc<dyn MoneyDialog>,
    currency_dialog: Arc<dyn CurrencyDialog>,
    rate_loader: Arc<dyn ExchangeRateLoader>,
    display: Arc<dyn MoneyDisplay>,
}

impl ExchangeMoneyCommand {
    pub fn new(
        money_dialog: Arc<dyn MoneyDialog>,
        currency_dialog: Arc<dyn CurrencyDialog>,
        rate_loader: Arc<dyn ExchangeRateLoader>,
        display: Arc<dyn MoneyDisplay>,
    ) -> Self {
        Self {
            money_dialog,
            currency_dialog,
            rate_loader,
            display,
        }
    }
}

impl std::fmt::Debug for ExchangeMoneyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeMoneyCommand").finish_non_exhaustive()
    }
}

#[async_trait]
impl Command for ExchangeMoneyCommand {
    #[instrument(name = "exchange_money", skip(self), err(Display))]
    async fn execute(&self) -> Result<(), ExchangeError> {
        let money = self
            .money_dialog
            .get()
            .ok_or(ExchangeError::MissingSelection(Selection::Source))?;
        let target = self
            .currency_dialog
            .get()
            .ok_or(ExchangeError::MissingSelection(Selection::Target))?;

        let rate = self
            .rate_loader
            .load(money.currency(), &target)
            .await
            .map_err(|source| ExchangeError::rate_unavailable(money.currency(), &target, source))?;
        debug!(%rate, "Loaded exchange rate");

        let result = money.convert(&rate)?;
        if result.currency() != &target {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                target.to_string(),
                result.currency().to_string(),
            )
            .into());
        }

        self.display.show(&result);
        Ok(())
    }
}
