//! Settle timer: at most one pending delayed action.
//!
//! Every qualifying event re-arms the timer, superseding whatever was pending,
//! so only the last event of a burst ever fires. The timer never sleeps on its
//! own; the host polls it with the current time.

use crate::types::Millis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleTimer {
    delay_ms: Millis,
    deadline: Option<Millis>,
}

impl SettleTimer {
    pub fn new(delay_ms: Millis) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Cancels any pending action and schedules a new one `delay_ms` from `now`.
    pub fn arm(&mut self, now: Millis) {
        self.deadline = Some(now.saturating_add(self.delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Returns `true` exactly once when the pending deadline has been reached.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
