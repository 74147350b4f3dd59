//! Command line arguments

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "money-calculator", about = "Currency conversion desk", version)]
pub struct Cli {
    #[arg(
        long,
        env = "MONEY_MOCK",
        global = true,
        help = "Use the built-in USD/EUR table instead of the remote service"
    )]
    pub mock: bool,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Interactive terminal desk (default)
    Interactive,
    /// Convert once and print the result
    Convert {
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,
        #[arg(value_name = "FROM")]
        from: String,
        #[arg(value_name = "TO")]
        to: String,
    },
    /// List the available currencies
    Currencies,
    /// Convert 100 USD to EUR through the mock loaders
    Demo,
    /// Check that the exchange rate service answers
    Health,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Interactive)
    }

    /// Whether the selected mode talks to the remote service
    pub fn is_live(&self) -> bool {
        !self.mock && self.mode() != Mode::Demo
    }
}
