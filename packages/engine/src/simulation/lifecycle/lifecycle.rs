use std::cell::Cell;
use std::rc::Rc;

use crate::error::SimulationError;
use crate::runtime::Scheduler;

use super::state::EnginePhase;
use super::SimulationEngine;

/// Cooperative stop request shared with an engine. Honoured at the start of
/// the next tick, or right after the current broadcast when raised from
/// inside an observer.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    requested: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.requested.set(true);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.get()
    }
}

pub(super) fn start(engine: &mut SimulationEngine) -> Result<(), SimulationError> {
    match engine.phase {
        EnginePhase::Running => Ok(()),
        EnginePhase::Stopped => Err(SimulationError::AlreadyStopped),
        EnginePhase::Created => {
            if engine.stop_signal.is_stop_requested() {
                stop(engine);
                return Err(SimulationError::AlreadyStopped);
            }

            engine.phase = EnginePhase::Running;
            engine.last_tick_ms = None;
            engine
                .scheduler
                .schedule_timeout(engine.config.startup_delay_ms);

            log::info!(
                "simulation starting in {} ms (weight={} kg, height={} m)",
                engine.config.startup_delay_ms,
                engine.weight,
                engine.state.height
            );
            Ok(())
        }
    }
}

pub(super) fn stop(engine: &mut SimulationEngine) {
    if engine.phase == EnginePhase::Stopped {
        return;
    }

    let was_running = engine.phase == EnginePhase::Running;
    engine.phase = EnginePhase::Stopped;
    engine.last_tick_ms = None;
    engine.scheduler.cancel();
    engine.stop_signal.stop();

    if was_running {
        log::info!("simulation stopped after {} ticks", engine.ticks);
    }
}

pub(super) fn replace_scheduler(engine: &mut SimulationEngine, scheduler: Box<dyn Scheduler>) {
    engine.scheduler.cancel();
    engine.scheduler = scheduler;

    if engine.phase == EnginePhase::Running {
        if engine.ticks == 0 {
            engine
                .scheduler
                .schedule_timeout(engine.config.startup_delay_ms);
        } else {
            engine.scheduler.request_frame();
        }
    }
}
