use crate::error::SimulationError;
use crate::runtime::{ManualClock, ManualScheduler};

use super::tick::TickReport;
use super::SimulationEngine;

/// Drives an engine without a browser: a manual clock and a manual scheduler
/// stepped together in fixed-length frames, like a display refreshing at
/// `1000 / frame_ms` Hz.
pub struct HeadlessDriver {
    clock: ManualClock,
    scheduler: ManualScheduler,
    frame_ms: f64,
}

impl HeadlessDriver {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            clock: ManualClock::new(0.0),
            scheduler: ManualScheduler::new(),
            frame_ms,
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Wire the engine to this driver's clock and scheduler.
    pub fn attach(&self, engine: SimulationEngine) -> SimulationEngine {
        engine
            .with_clock(Box::new(self.clock.clone()))
            .with_scheduler(Box::new(self.scheduler.clone()))
    }

    /// One frame: move time forward and tick if the engine's request is due.
    pub fn advance(
        &self,
        engine: &mut SimulationEngine,
    ) -> Result<Option<TickReport>, SimulationError> {
        self.clock.advance(self.frame_ms);
        if self.scheduler.fire(self.frame_ms) {
            engine.tick()
        } else {
            Ok(None)
        }
    }

    /// Advance `frames` frames; returns how many of them ticked.
    pub fn run(&self, engine: &mut SimulationEngine, frames: usize) -> Result<usize, SimulationError> {
        let mut ticked = 0;
        for _ in 0..frames {
            if self.advance(engine)?.is_some() {
                ticked += 1;
            }
        }
        Ok(ticked)
    }
}
