//! Desk errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// The runtime task has stopped and no longer accepts events
    #[error("Exchange desk is no longer running")]
    Stopped,
}
