//! Debounced scheduling with a single pending slot
//!
//! Every `arm` bumps a generation counter and makes the new generation the
//! only one allowed to fire. A timer that wakes up with an older generation
//! has been superseded or cancelled, and `fire` turns it away.

use std::time::Duration;

/// Delay between the last edit and the preview evaluation
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A scheduled wake-up the driver must deliver back as `fire(generation)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    armed: Option<u64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            armed: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a new wake-up, superseding any pending one
    pub fn arm(&mut self) -> TimerTicket {
        self.generation += 1;
        self.armed = Some(self.generation);
        TimerTicket {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Drops the pending wake-up; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    /// Accepts a wake-up only if it is the one currently armed
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.armed == Some(generation) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_arm_then_fire() {
        let mut debouncer = Debouncer::default();
        let ticket = debouncer.arm();
        assert_eq!(ticket.delay, DEFAULT_DEBOUNCE);
        assert!(debouncer.is_pending());
        assert!(debouncer.fire(ticket.generation));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire(ticket.generation));
    }

    #[test]
    fn test_rearm_supersedes() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        let first = debouncer.arm();
        let second = debouncer.arm();
        assert!(!debouncer.fire(first.generation));
        assert!(debouncer.fire(second.generation));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.cancel());
        let ticket = debouncer.arm();
        assert!(debouncer.cancel());
        assert!(!debouncer.fire(ticket.generation));
    }

    proptest! {
        #[test]
        fn prop_only_last_of_burst_fires(edits in 1usize..50) {
            let mut debouncer = Debouncer::default();
            let tickets: Vec<_> = (0..edits).map(|_| debouncer.arm()).collect();
            let fired = tickets.iter().filter(|t| debouncer.fire(t.generation)).count();
            prop_assert_eq!(fired, 1);
        }
    }
}
