// Timer-based save coalescing for the note editor
use std::time::{Duration, Instant};

/// Delays an action until a quiet period elapses after the last trigger
///
/// Each `trigger` restarts the countdown, so a burst of triggers runs the
/// action exactly once, after the burst goes quiet. There is no max-wait
/// ceiling: if triggers never stop, the action never runs. That matches
/// the interactive-typing autosave this was built for.
///
/// The owner is expected to call `poll` from its event loop. Every
/// operation has an `_at(Instant)` variant so tests can drive the clock
/// by hand instead of sleeping.
pub struct Debouncer<F: FnMut()> {
    action: F,
    quiet: Duration,
    deadline: Option<Instant>,
}

impl<F: FnMut()> Debouncer<F> {
    pub fn new(quiet: Duration, action: F) -> Self {
        Self {
            action,
            quiet,
            deadline: None,
        }
    }

    /// (Re)arm the countdown: the action fires `quiet` from now
    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    pub fn trigger_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Run the action if the quiet period has elapsed; true if it ran
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                (self.action)();
                true
            }
            _ => false,
        }
    }

    /// Run a pending action immediately; true if one was pending
    pub fn flush(&mut self) -> bool {
        if self.deadline.take().is_some() {
            (self.action)();
            true
        } else {
            false
        }
    }

    /// Drop any pending action without running it
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
