use crate::error::SimulationError;

use super::forces::{evaluate_forces, ForceBreakdown};
use super::integrate::integrate;
use super::lifecycle;
use super::state::{EnginePhase, SimulationState};
use super::SimulationEngine;

/// What one completed tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// 1-based count of completed ticks
    pub tick: u64,
    /// Elapsed seconds integrated over
    pub dt: f64,
    /// State after the step
    pub state: SimulationState,
    /// Forces evaluated at the state before the step
    pub forces: ForceBreakdown,
}

pub(super) fn tick(engine: &mut SimulationEngine) -> Result<Option<TickReport>, SimulationError> {
    if engine.phase != EnginePhase::Running {
        return Ok(None);
    }
    if engine.stop_signal.is_stop_requested() {
        lifecycle::stop(engine);
        return Ok(None);
    }

    let now = engine.clock.now_ms();
    // No previous tick: pretend one happened `first_tick_ms` ago.
    let previous = engine
        .last_tick_ms
        .unwrap_or(now - engine.config.first_tick_ms);
    let dt = (now - previous) / 1000.0;

    let forces = evaluate_forces(&engine.config, &engine.profile, engine.weight, &engine.state);
    let next = integrate(engine.state, forces.net_force, engine.weight, dt);

    if !(dt.is_finite() && next.is_finite()) {
        return Err(diverge(engine, next, dt));
    }

    engine.state = next;
    engine.last_tick_ms = Some(now);
    engine.ticks += 1;

    let report = TickReport {
        tick: engine.ticks,
        dt,
        state: next,
        forces,
    };
    engine.last_report = Some(report);

    engine.observers.broadcast(next.height);

    // An observer may have asked to stop during the broadcast.
    if engine.stop_signal.is_stop_requested() {
        lifecycle::stop(engine);
    } else if engine.phase == EnginePhase::Running {
        engine.scheduler.request_frame();
    }

    Ok(Some(report))
}

/// Stop without committing `next`; observers never see a non-finite height.
fn diverge(engine: &mut SimulationEngine, next: SimulationState, dt: f64) -> SimulationError {
    let err = SimulationError::SimulationDiverged {
        height: next.height,
        velocity: next.velocity,
        dt,
    };
    log::error!("{}; stopping after {} ticks", err, engine.ticks);

    lifecycle::stop(engine);
    if let Some(listener) = &engine.divergence_listener {
        listener(&err);
    }

    err
}
