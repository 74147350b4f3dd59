//! Front end error handling

use thiserror::Error;

use core_kernel::CoreError;
use domain_desk::DeskError;
use domain_exchange::ExchangeError;
use infra_rates::RatesError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command: {0} (type 'help')")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Conversion finished without a result")]
    NoResult,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Desk(#[from] DeskError),

    #[error("Rate service client: {0}")]
    Rates(#[from] RatesError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
