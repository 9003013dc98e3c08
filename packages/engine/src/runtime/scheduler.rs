//! "Call me back when you want the next tick."
//!
//! The engine asks its scheduler for exactly one future tick at a time: a
//! delayed one when it starts, then one per frame. Whoever owns the scheduler
//! is responsible for calling `SimulationEngine::tick` when the request comes
//! due. Only one request is ever outstanding; a new request replaces the old.

use std::cell::Cell;
use std::rc::Rc;

pub trait Scheduler {
    /// Request a single tick once `delay_ms` has passed.
    fn schedule_timeout(&mut self, delay_ms: f64);

    /// Request a tick at the next frame opportunity.
    fn request_frame(&mut self);

    /// Drop the outstanding request, if any.
    fn cancel(&mut self);
}

/// For owners that call `tick` on their own cadence and ignore requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExternalScheduler;

impl Scheduler for ExternalScheduler {
    fn schedule_timeout(&mut self, _delay_ms: f64) {}

    fn request_frame(&mut self) {}

    fn cancel(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingTick {
    Timeout { remaining_ms: f64 },
    Frame,
}

/// Records the outstanding request so a test or headless loop can fire it.
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<Option<PendingTick>>>,
    requests: Rc<Cell<u32>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending.get()
    }

    /// Total requests received, including ones later cancelled.
    pub fn request_count(&self) -> u32 {
        self.requests.get()
    }

    /// Let `elapsed_ms` pass. Returns true when the outstanding request came
    /// due; the request is consumed and the caller should tick.
    pub fn fire(&self, elapsed_ms: f64) -> bool {
        match self.pending.get() {
            None => false,
            Some(PendingTick::Frame) => {
                self.pending.set(None);
                true
            }
            Some(PendingTick::Timeout { remaining_ms }) => {
                let remaining_ms = remaining_ms - elapsed_ms;
                if remaining_ms <= 0.0 {
                    self.pending.set(None);
                    true
                } else {
                    self.pending.set(Some(PendingTick::Timeout { remaining_ms }));
                    false
                }
            }
        }
    }

    fn record(&self, tick: PendingTick) {
        self.pending.set(Some(tick));
        self.requests.set(self.requests.get() + 1);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_timeout(&mut self, delay_ms: f64) {
        self.record(PendingTick::Timeout { remaining_ms: delay_ms });
    }

    fn request_frame(&mut self) {
        self.record(PendingTick::Frame);
    }

    fn cancel(&mut self) {
        self.pending.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_fires_once_delay_has_elapsed() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_timeout(50.0);

        assert!(!scheduler.fire(16.0));
        assert!(!scheduler.fire(16.0));
        assert!(!scheduler.fire(16.0));
        assert!(scheduler.fire(16.0));
        assert_eq!(scheduler.pending(), None);
        assert!(!scheduler.fire(16.0));
    }

    #[test]
    fn frame_request_fires_on_next_advance() {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_frame();
        assert_eq!(scheduler.pending(), Some(PendingTick::Frame));
        assert!(scheduler.fire(0.0));
        assert_eq!(scheduler.request_count(), 1);
    }

    #[test]
    fn cancel_drops_the_request() {
        let mut scheduler = ManualScheduler::new();
        let observer = scheduler.clone();
        scheduler.schedule_timeout(10.0);
        scheduler.cancel();
        assert_eq!(observer.pending(), None);
        assert!(!observer.fire(100.0));
    }
}
