//! Exchange Desk State Machine
//!
//! The desk coalesces rapid edits into one delayed preview and separates
//! previews from committed conversions, which are the only ones logged to
//! the history.
//!
//! # States
//!
//! ```text
//!   Idle ── edit ──> PendingPreview ── timer fires ──> Idle + Evaluate(preview)
//!                      │  ^
//!                      └──┘ edit re-arms the timer
//!
//!   any ── exchange ──> Idle + cancel timer + Evaluate(commit)
//!   any ── swap ──────> Idle + cancel timer + Evaluate(preview)
//! ```
//!
//! The machine performs no I/O. `handle` returns the effects the driver
//! must carry out (arm or cancel the timer, run an evaluation); results
//! come back as `Rendered` / `Failed` events tagged with the `RequestId`
//! of the evaluation that produced them. Only the newest request may change
//! the displayed output or the status line.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use core_kernel::{Currency, CurrencyCatalog, Money};

use crate::debounce::{Debouncer, TimerTicket};
use crate::form::{ExchangeForm, FormSnapshot};
use crate::history::{History, HistoryEntry};

/// Whether a delayed evaluation is waiting on the timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeskState {
    #[default]
    Idle,
    PendingPreview,
}

/// Identifies one evaluation; later requests have larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A conversion the driver must run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub id: RequestId,
    pub snapshot: FormSnapshot,
    /// Committed evaluations are logged to the history
    pub commit: bool,
}

/// Inputs to the desk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskEvent {
    AmountEdited(String),
    SourceSelected(Option<Currency>),
    TargetSelected(Option<Currency>),
    ExchangePressed,
    SwapPressed,
    ClearHistory,
    TimerFired { generation: u64 },
    Rendered { id: RequestId, result: Money },
    Failed { id: RequestId, message: String },
}

/// Work requested from the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskEffect {
    /// Replace any running timer with this one
    ArmTimer(TimerTicket),
    CancelTimer,
    Evaluate(Evaluation),
}

/// Everything a front end needs to draw the desk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskView {
    pub state: DeskState,
    pub amount_text: String,
    pub source: Option<Currency>,
    pub target: Option<Currency>,
    pub output: Option<Money>,
    pub status: Option<String>,
    /// Newest first
    pub history: Vec<String>,
    /// Entries recorded since the desk started, unaffected by clearing
    pub commits: u64,
}

impl DeskView {
    /// The displayed amount, two decimals, or empty
    pub fn output_text(&self) -> String {
        self.output
            .as_ref()
            .map(Money::formatted_amount)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct DeskMachine {
    catalog: CurrencyCatalog,
    form: ExchangeForm,
    history: History,
    commits: u64,
    debouncer: Debouncer,
    scheduled_commit: bool,
    next_request: u64,
    latest: Option<RequestId>,
    in_flight: HashMap<RequestId, Evaluation>,
    output: Option<Money>,
    status: Option<String>,
}

impl DeskMachine {
    /// Creates a desk over a loaded catalog with the default selection
    pub fn new(catalog: CurrencyCatalog, delay: Duration) -> Self {
        let form = ExchangeForm::from_catalog(&catalog);
        Self {
            catalog,
            form,
            history: History::new(),
            commits: 0,
            debouncer: Debouncer::new(delay),
            scheduled_commit: false,
            next_request: 0,
            latest: None,
            in_flight: HashMap::new(),
            output: None,
            status: None,
        }
    }

    pub fn handle(&mut self, event: DeskEvent) -> Vec<DeskEffect> {
        match event {
            DeskEvent::AmountEdited(text) => {
                self.form.set_amount(text);
                self.schedule(false)
            }
            DeskEvent::SourceSelected(currency) => {
                self.form.select_source(currency);
                self.schedule(false)
            }
            DeskEvent::TargetSelected(currency) => {
                self.form.select_target(currency);
                self.schedule(false)
            }
            DeskEvent::ExchangePressed => self.run_now(true),
            DeskEvent::SwapPressed => {
                self.form.swap();
                self.run_now(false)
            }
            DeskEvent::ClearHistory => {
                self.history.clear();
                Vec::new()
            }
            DeskEvent::TimerFired { generation } => {
                if !self.debouncer.fire(generation) {
                    debug!(generation, "Ignoring superseded timer");
                    return Vec::new();
                }
                let commit = std::mem::take(&mut self.scheduled_commit);
                self.issue(commit)
                    .map(DeskEffect::Evaluate)
                    .into_iter()
                    .collect()
            }
            DeskEvent::Rendered { id, result } => {
                self.on_rendered(id, result);
                Vec::new()
            }
            DeskEvent::Failed { id, message } => {
                self.on_failed(id, message);
                Vec::new()
            }
        }
    }

    fn schedule(&mut self, commit: bool) -> Vec<DeskEffect> {
        self.scheduled_commit = commit;
        vec![DeskEffect::ArmTimer(self.debouncer.arm())]
    }

    fn run_now(&mut self, commit: bool) -> Vec<DeskEffect> {
        let mut effects = Vec::new();
        if self.debouncer.cancel() {
            self.scheduled_commit = false;
            effects.push(DeskEffect::CancelTimer);
        }
        effects.extend(self.issue(commit).map(DeskEffect::Evaluate));
        effects
    }

    fn issue(&mut self, commit: bool) -> Option<Evaluation> {
        let snapshot = self.form.snapshot();
        if !snapshot.is_complete() {
            debug!(commit, "Skipping evaluation without both currencies selected");
            return None;
        }

        self.next_request += 1;
        let id = RequestId(self.next_request);
        let evaluation = Evaluation {
            id,
            snapshot,
            commit,
        };
        self.latest = Some(id);
        self.in_flight.insert(id, evaluation.clone());
        Some(evaluation)
    }

    fn on_rendered(&mut self, id: RequestId, result: Money) {
        let Some(evaluation) = self.in_flight.remove(&id) else {
            debug!(%id, "Ignoring result of unknown request");
            return;
        };

        if evaluation.commit {
            if let Some(source) = evaluation.snapshot.money() {
                self.history.record(HistoryEntry::new(source, result.clone()));
                self.commits += 1;
            }
        }

        if self.latest == Some(id) {
            self.output = Some(result);
            self.status = None;
        } else {
            debug!(%id, "Discarding stale result");
        }
    }

    fn on_failed(&mut self, id: RequestId, message: String) {
        if self.in_flight.remove(&id).is_none() {
            debug!(%id, "Ignoring failure of unknown request");
            return;
        }
        if self.latest == Some(id) {
            self.status = Some(message);
        } else {
            debug!(%id, %message, "Discarding stale failure");
        }
    }

    pub fn state(&self) -> DeskState {
        if self.debouncer.is_pending() {
            DeskState::PendingPreview
        } else {
            DeskState::Idle
        }
    }

    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    pub fn form(&self) -> &ExchangeForm {
        &self.form
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn output(&self) -> Option<&Money> {
        self.output.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Total history entries recorded, including cleared ones
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Number of evaluations issued and not yet answered
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn view(&self) -> DeskView {
        DeskView {
            state: self.state(),
            amount_text: self.form.amount_text().to_string(),
            source: self.form.source().cloned(),
            target: self.form.target().cloned(),
            output: self.output.clone(),
            status: self.status.clone(),
            history: self.history.lines(),
            commits: self.commits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> Currency {
        Currency::new("USD", "USA").unwrap()
    }

    fn eur() -> Currency {
        Currency::new("EUR", "Europa").unwrap()
    }

    fn machine() -> DeskMachine {
        DeskMachine::new(
            CurrencyCatalog::new(vec![usd(), eur()]),
            Duration::from_millis(300),
        )
    }

    fn evaluation(effects: &[DeskEffect]) -> Option<&Evaluation> {
        effects.iter().find_map(|effect| match effect {
            DeskEffect::Evaluate(evaluation) => Some(evaluation),
            _ => None,
        })
    }

    #[test]
    fn test_edit_arms_timer() {
        let mut desk = machine();
        let effects = desk.handle(DeskEvent::AmountEdited("100".into()));
        assert!(matches!(effects.as_slice(), [DeskEffect::ArmTimer(_)]));
        assert_eq!(desk.state(), DeskState::PendingPreview);
    }

    #[test]
    fn test_exchange_flushes_pending_preview() {
        let mut desk = machine();
        desk.handle(DeskEvent::AmountEdited("100".into()));
        let effects = desk.handle(DeskEvent::ExchangePressed);

        assert_eq!(effects[0], DeskEffect::CancelTimer);
        let evaluation = evaluation(&effects).unwrap();
        assert!(evaluation.commit);
        assert_eq!(evaluation.snapshot.amount(), dec!(100));
        assert_eq!(desk.state(), DeskState::Idle);
    }

    #[test]
    fn test_committed_result_is_logged() {
        let mut desk = machine();
        desk.handle(DeskEvent::AmountEdited("100".into()));
        let effects = desk.handle(DeskEvent::ExchangePressed);
        let id = evaluation(&effects).unwrap().id;

        desk.handle(DeskEvent::Rendered {
            id,
            result: Money::new(dec!(92), eur()),
        });

        assert_eq!(desk.history().lines(), vec!["100.00 USD → 92.00 EUR"]);
        assert_eq!(desk.view().output_text(), "92.00");
    }

    #[test]
    fn test_failure_sets_status_only() {
        let mut desk = machine();
        let effects = desk.handle(DeskEvent::ExchangePressed);
        let id = evaluation(&effects).unwrap().id;

        desk.handle(DeskEvent::Failed {
            id,
            message: "rate unavailable".into(),
        });

        assert_eq!(desk.status(), Some("rate unavailable"));
        assert!(desk.output().is_none());
        assert!(desk.history().is_empty());
        assert_eq!(desk.in_flight(), 0);
    }
}
