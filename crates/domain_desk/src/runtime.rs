//! Tokio driver for the desk state machine
//!
//! `DeskRuntime` is the single task that owns the `DeskMachine`. It reads
//! user events from the handle's channel and its own internal events
//! (timer wake-ups, evaluation results) from a second channel, and carries
//! out the effects the machine returns:
//!
//! - `ArmTimer` aborts the running timer task and spawns a new one that
//!   sleeps for the ticket's delay and reports `TimerFired`
//! - `CancelTimer` aborts the running timer task
//! - `Evaluate` spawns an `ExchangeMoneyCommand` over the evaluation's
//!   snapshot; its display sends `Rendered` back to the loop and a failure
//!   sends `Failed`
//!
//! Results therefore touch the desk state only on the runtime task. After
//! every event the current `DeskView` is published on a watch channel.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use core_kernel::{Currency, CurrencyCatalog, Money};
use domain_exchange::{Command, ExchangeMoneyCommand, ExchangeRateLoader};

use crate::error::DeskError;
use crate::machine::{DeskEffect, DeskEvent, DeskMachine, DeskView, Evaluation};

const USER_CHANNEL_CAPACITY: usize = 64;

/// Cloneable front-end side of a running desk
#[derive(Debug, Clone)]
pub struct DeskHandle {
    events: mpsc::Sender<DeskEvent>,
    view: watch::Receiver<DeskView>,
    catalog: CurrencyCatalog,
}

impl DeskHandle {
    pub async fn edit_amount(&self, text: impl Into<String>) -> Result<(), DeskError> {
        self.send(DeskEvent::AmountEdited(text.into())).await
    }

    pub async fn select_source(&self, currency: Option<Currency>) -> Result<(), DeskError> {
        self.send(DeskEvent::SourceSelected(currency)).await
    }

    pub async fn select_target(&self, currency: Option<Currency>) -> Result<(), DeskError> {
        self.send(DeskEvent::TargetSelected(currency)).await
    }

    /// Commits the current form
    pub async fn exchange(&self) -> Result<(), DeskError> {
        self.send(DeskEvent::ExchangePressed).await
    }

    pub async fn swap(&self) -> Result<(), DeskError> {
        self.send(DeskEvent::SwapPressed).await
    }

    pub async fn clear_history(&self) -> Result<(), DeskError> {
        self.send(DeskEvent::ClearHistory).await
    }

    /// The most recently published view
    pub fn view(&self) -> DeskView {
        self.view.borrow().clone()
    }

    /// A receiver notified on every view change
    pub fn subscribe(&self) -> watch::Receiver<DeskView> {
        self.view.clone()
    }

    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    async fn send(&self, event: DeskEvent) -> Result<(), DeskError> {
        self.events.send(event).await.map_err(|_| DeskError::Stopped)
    }
}

pub struct DeskRuntime {
    machine: DeskMachine,
    rate_loader: Arc<dyn ExchangeRateLoader>,
    user_events: mpsc::Receiver<DeskEvent>,
    internal_tx: mpsc::UnboundedSender<DeskEvent>,
    internal_rx: mpsc::UnboundedReceiver<DeskEvent>,
    view: watch::Sender<DeskView>,
    timer: Option<JoinHandle<()>>,
}

impl DeskRuntime {
    /// Starts the desk on the current tokio runtime
    ///
    /// The task ends once every `DeskHandle` has been dropped.
    pub fn spawn(
        machine: DeskMachine,
        rate_loader: Arc<dyn ExchangeRateLoader>,
    ) -> (DeskHandle, JoinHandle<()>) {
        let (events_tx, user_events) = mpsc::channel(USER_CHANNEL_CAPACITY);
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(machine.view());

        let handle = DeskHandle {
            events: events_tx,
            view: view_rx,
            catalog: machine.catalog().clone(),
        };
        let runtime = Self {
            machine,
            rate_loader,
            user_events,
            internal_tx,
            internal_rx,
            view: view_tx,
            timer: None,
        };

        (handle, tokio::spawn(runtime.run()))
    }

    async fn run(mut self) {
        info!(
            currencies = self.machine.catalog().len(),
            "Exchange desk started"
        );

        loop {
            let event = tokio::select! {
                biased;
                Some(event) = self.internal_rx.recv() => event,
                event = self.user_events.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };
            self.dispatch(event);
        }

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        info!("Exchange desk stopped");
    }

    fn dispatch(&mut self, event: DeskEvent) {
        for effect in self.machine.handle(event) {
            self.apply(effect);
        }

        let next = self.machine.view();
        self.view.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn apply(&mut self, effect: DeskEffect) {
        match effect {
            DeskEffect::ArmTimer(ticket) => {
                self.abort_timer();
                let tx = self.internal_tx.clone();
                self.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(ticket.delay).await;
                    let _ = tx.send(DeskEvent::TimerFired {
                        generation: ticket.generation,
                    });
                }));
            }
            DeskEffect::CancelTimer => self.abort_timer(),
            DeskEffect::Evaluate(evaluation) => self.evaluate(evaluation),
        }
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    #[instrument(skip(self, evaluation), fields(id = %evaluation.id, commit = evaluation.commit))]
    fn evaluate(&self, evaluation: Evaluation) {
        let Evaluation { id, snapshot, .. } = evaluation;
        let snapshot = Arc::new(snapshot);

        let tx = self.internal_tx.clone();
        let display = move |money: &Money| {
            let _ = tx.send(DeskEvent::Rendered {
                id,
                result: money.clone(),
            });
        };
        let command = ExchangeMoneyCommand::new(
            snapshot.clone(),
            snapshot,
            self.rate_loader.clone(),
            Arc::new(display),
        );

        let failures = self.internal_tx.clone();
        debug!("Spawning evaluation");
        tokio::spawn(async move {
            if let Err(error) = command.execute().await {
                warn!(%id, %error, "Evaluation failed");
                let _ = failures.send(DeskEvent::Failed {
                    id,
                    message: error.to_string(),
                });
            }
        });
    }
}
