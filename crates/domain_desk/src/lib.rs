//! Exchange Desk
//!
//! The interactive core of the money calculator: the conversion form, the
//! debounced preview trigger, the history of committed conversions and the
//! tokio task that drives them.
//!
//! # Event Flow
//!
//! ```text
//! DeskHandle ──events──> DeskRuntime ──handle──> DeskMachine
//!                            │  ^                    │
//!                 effects <──┘  └── TimerFired ──────┘
//!                    │          └── Rendered / Failed <── ExchangeMoneyCommand
//!                    v
//!               watch<DeskView> ──> front end
//! ```

pub mod debounce;
pub mod error;
pub mod form;
pub mod history;
pub mod machine;
pub mod runtime;

pub use debounce::{Debouncer, TimerTicket, DEFAULT_DEBOUNCE};
pub use error::DeskError;
pub use form::{ExchangeForm, FormSnapshot};
pub use history::{History, HistoryEntry};
pub use machine::{DeskEffect, DeskEvent, DeskMachine, DeskState, DeskView, Evaluation, RequestId};
pub use runtime::{DeskHandle, DeskRuntime};
