//! Exchange Domain
//!
//! This crate holds the command/dialog layer that decouples conversion
//! logic from presentation and from the rate source.
//!
//! # Flow
//!
//! ```text
//! front end -> ExchangeMoneyCommand::execute
//!                 ├─ MoneyDialog::get        (what to convert)
//!                 ├─ CurrencyDialog::get     (into which currency)
//!                 ├─ ExchangeRateLoader::load (fresh quotation)
//!                 └─ MoneyDisplay::show      (where the result goes)
//! ```

pub mod amount;
pub mod command;
pub mod dialogs;
pub mod error;
pub mod ports;

pub use amount::{amount_or_zero, parse_amount};
pub use command::{Command, ExchangeMoneyCommand};
pub use dialogs::{CurrencyDialog, FixedCurrencyDialog, FixedMoneyDialog, MoneyDialog, MoneyDisplay};
pub use error::{ExchangeError, Selection};
pub use ports::{load_catalog, CurrencyLoader, ExchangeRateLoader};
pub use ports::mock::{MockCurrencyLoader, MockExchangeRateLoader};
