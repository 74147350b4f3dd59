//! Line-oriented terminal front end
//!
//! Reads commands from an input stream, forwards them to the desk and
//! prints every change of the displayed result or status line as it is
//! published. Input and output are generic so the same loop runs over
//! stdin/stdout and over in-memory pipes in tests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use core_kernel::{Currency, CurrencyCatalog, Money};
use domain_desk::{DeskHandle, DeskView};

use crate::error::CliError;

pub const HELP: &str = "\
Commands:
  <number> | amount <number>   set the amount (previewed after a pause)
  from <CODE>                  select the source currency
  to <CODE>                    select the target currency
  x | exchange                 convert and record in history
  swap                         exchange source and target
  history                      show committed conversions
  clear                        clear the history
  currencies                   list available currencies
  help                         show this text
  quit                         leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Amount(String),
    From(String),
    To(String),
    Exchange,
    Swap,
    History,
    Clear,
    Currencies,
    Help,
    Quit,
    Empty,
}

/// Parses one input line
///
/// A bare token that does not match a command is taken as an amount when it
/// looks numeric; the desk itself decides how to read the text.
pub fn parse_line(line: &str) -> Result<LineCommand, CliError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(LineCommand::Empty);
    };
    let argument = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "amount" => LineCommand::Amount(argument.unwrap_or_default().to_string()),
        "from" => LineCommand::From(
            argument
                .ok_or(CliError::MissingArgument("currency code after 'from'"))?
                .to_string(),
        ),
        "to" => LineCommand::To(
            argument
                .ok_or(CliError::MissingArgument("currency code after 'to'"))?
                .to_string(),
        ),
        "x" | "exchange" => LineCommand::Exchange,
        "swap" => LineCommand::Swap,
        "history" => LineCommand::History,
        "clear" => LineCommand::Clear,
        "currencies" => LineCommand::Currencies,
        "help" | "?" => LineCommand::Help,
        "quit" | "exit" | "q" => LineCommand::Quit,
        _ if looks_numeric(head) => LineCommand::Amount(head.to_string()),
        _ => return Err(CliError::UnknownCommand(head.to_string())),
    };
    Ok(command)
}

fn looks_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

/// `= 92.00 EUR`
pub fn render_output(money: &Money) -> String {
    format!("= {}", money)
}

pub fn render_history(lines: &[String]) -> String {
    if lines.is_empty() {
        return "(no history)".to_string();
    }
    lines.join("\n")
}

pub fn render_catalog(catalog: &CurrencyCatalog) -> String {
    if catalog.is_empty() {
        return "(no currencies available)".to_string();
    }
    catalog
        .iter()
        .map(|currency| format!("{:<4} {}", currency.code(), currency.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[100 USD -> EUR]`
pub fn render_form(view: &DeskView) -> String {
    let code = |currency: &Option<Currency>| {
        currency
            .as_ref()
            .map(|c| c.code().to_string())
            .unwrap_or_else(|| "---".to_string())
    };
    let amount = if view.amount_text.is_empty() {
        "0"
    } else {
        view.amount_text.as_str()
    };
    format!("[{} {} -> {}]", amount, code(&view.source), code(&view.target))
}

/// Runs the terminal until `quit` or end of input
pub async fn run_terminal<R, W>(handle: DeskHandle, input: R, mut output: W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut views = handle.subscribe();
    let mut shown = views.borrow_and_update().clone();

    write_line(&mut output, "Money Calculator. Type 'help' for commands.").await?;
    write_line(&mut output, &render_form(&shown)).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match parse_line(&line) {
                    Ok(LineCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(error) = apply(&handle, command, &mut output).await {
                            write_line(&mut output, &format!("! {}", error)).await?;
                        }
                    }
                    Err(error) => write_line(&mut output, &format!("! {}", error)).await?,
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                report_changes(&shown, &view, &mut output).await?;
                shown = view;
            }
        }
    }

    output.flush().await?;
    Ok(())
}

async fn apply<W>(handle: &DeskHandle, command: LineCommand, output: &mut W) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
{
    match command {
        LineCommand::Amount(text) => handle.edit_amount(text).await?,
        LineCommand::From(code) => {
            let currency = handle.catalog().find(&code)?;
            handle.select_source(Some(currency)).await?;
        }
        LineCommand::To(code) => {
            let currency = handle.catalog().find(&code)?;
            handle.select_target(Some(currency)).await?;
        }
        LineCommand::Exchange => handle.exchange().await?,
        LineCommand::Swap => handle.swap().await?,
        LineCommand::History => {
            write_line(output, &render_history(&handle.view().history)).await?
        }
        LineCommand::Clear => handle.clear_history().await?,
        LineCommand::Currencies => write_line(output, &render_catalog(handle.catalog())).await?,
        LineCommand::Help => write_line(output, HELP).await?,
        LineCommand::Quit | LineCommand::Empty => {}
    }
    Ok(())
}

async fn report_changes<W>(before: &DeskView, after: &DeskView, output: &mut W) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
{
    if (&before.amount_text, &before.source, &before.target)
        != (&after.amount_text, &after.source, &after.target)
    {
        write_line(output, &render_form(after)).await?;
    }
    if after.output != before.output {
        if let Some(money) = &after.output {
            write_line(output, &render_output(money)).await?;
        }
    }
    if after.status != before.status {
        if let Some(status) = &after.status {
            write_line(output, &format!("! {}", status)).await?;
        }
    }
    for entry in recorded_since(before, after).iter().rev() {
        write_line(output, &format!("+ {}", entry)).await?;
    }
    Ok(())
}

/// History entries committed between two views, newest first
///
/// Views coalesce, so several commits (and a clear) may lie between them.
pub fn recorded_since<'a>(before: &DeskView, after: &'a DeskView) -> &'a [String] {
    let added = after.commits.saturating_sub(before.commits);
    let added = usize::try_from(added).unwrap_or(usize::MAX);
    &after.history[..added.min(after.history.len())]
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
