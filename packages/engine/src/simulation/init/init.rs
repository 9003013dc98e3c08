use std::sync::Arc;

use crate::domain::profile::AreaProfile;
use crate::error::SimulationError;
use crate::runtime::{ExternalScheduler, SystemClock};

use super::lifecycle::StopHandle;
use super::observers::ObserverHub;
use super::settings::PhysicsConfig;
use super::state::{EnginePhase, SimulationState};
use super::SimulationEngine;

pub(super) fn create_engine(
    weight: f64,
    initial_height: f64,
    profile: Arc<AreaProfile>,
    config: PhysicsConfig,
) -> Result<SimulationEngine, SimulationError> {
    // Everything downstream divides by weight.
    if !(weight.is_finite() && weight > 0.0) {
        return Err(SimulationError::InvalidParameters(format!(
            "weight must be positive, got {}",
            weight
        )));
    }
    if !initial_height.is_finite() {
        return Err(SimulationError::InvalidParameters(format!(
            "initial height must be finite, got {}",
            initial_height
        )));
    }
    config.validate()?;

    log::debug!(
        "engine created: weight={} kg, height={} m, {} profile samples",
        weight,
        initial_height,
        profile.samples().len()
    );

    Ok(SimulationEngine {
        weight,
        state: SimulationState::at_rest(initial_height),
        profile,
        config,
        phase: EnginePhase::Created,
        last_tick_ms: None,
        ticks: 0,
        last_report: None,
        clock: Box::new(SystemClock::new()),
        scheduler: Box::new(ExternalScheduler),
        observers: ObserverHub::default(),
        stop_signal: StopHandle::default(),
        divergence_listener: None,
    })
}
