#![forbid(unsafe_code)]

//! Single-slot one-shot timer, polled by the host event loop.
//!
//! A [`OneShotTimer`] holds at most one pending deadline. Arming replaces
//! any previous deadline, cancelling arms nothing, and [`OneShotTimer::fire`]
//! consumes the deadline so each arm cycle fires at most once. Because the
//! host polls `fire` from its own loop, the code that reacts to a firing
//! timer always sees state as it is at poll time, never a snapshot captured
//! when the timer was armed.
//!
//! # Invariants
//!
//! 1. At most one deadline is pending at any time.
//! 2. `fire` returns `true` at most once per `arm` call.
//! 3. After `cancel`, `fire` returns `false` until the next `arm`.

use tracing::debug;
use web_time::{Duration, Instant};

/// A cancellable single-shot deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OneShotTimer {
    deadline: Option<Instant>,
}

impl OneShotTimer {
    /// Create an idle timer.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `delay` after `now`, superseding any pending
    /// deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        if self.deadline.is_some() {
            debug!("rearming pending one-shot timer");
        }
        self.deadline = Some(now + delay);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!("cancelled pending one-shot timer");
        }
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has elapsed. Returns `true` exactly once
    /// per arm cycle, on the first poll at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
