//! Simulation engine: a shape floating in water.
//!
//! The engine only orchestrates; the work lives in the submodules:
//! - step/       - force model, integration and the per-tick algorithm
//! - lifecycle/  - Created -> Running -> Stopped, scheduler requests
//! - observers/  - height broadcast with stable subscription handles
//! - driver/     - headless and browser drivers
//!
//! The engine never ticks itself. It asks its [`Scheduler`] for the next tick
//! and whoever owns the scheduler calls [`SimulationEngine::tick`].

use std::sync::Arc;

use crate::domain::profile::AreaProfile;
use crate::error::SimulationError;
use crate::runtime::{Clock, Scheduler};

#[path = "state/state.rs"]
mod state;
#[path = "init/settings.rs"]
mod settings;
#[path = "init/init.rs"]
mod init;
#[path = "step/forces.rs"]
mod forces;
#[path = "step/integrate.rs"]
mod integrate;
#[path = "step/tick.rs"]
mod tick;
#[path = "observers/observers.rs"]
mod observers;
#[path = "lifecycle/lifecycle.rs"]
mod lifecycle;
#[path = "stats/tick_stats.rs"]
mod tick_stats;
#[path = "driver/headless.rs"]
mod headless;
#[path = "driver/browser.rs"]
mod browser;
mod facade;

pub use browser::BrowserScheduler;
pub use facade::{circle_area_profile, FloatSimulation};
pub use forces::{evaluate_forces, ForceBreakdown};
pub use headless::HeadlessDriver;
pub use integrate::integrate;
pub use lifecycle::StopHandle;
pub use observers::{ObserverHub, SubscriptionHandle};
pub use settings::PhysicsConfig;
pub use state::{EnginePhase, SimulationState};
pub use tick::TickReport;
pub use tick_stats::TickStats;

type DivergenceListener = Box<dyn Fn(&SimulationError)>;

/// A floating body: weight, area profile and the mutable {height, velocity}
/// state advanced once per tick.
pub struct SimulationEngine {
    weight: f64,
    state: SimulationState,
    profile: Arc<AreaProfile>,
    config: PhysicsConfig,

    // Lifecycle
    phase: EnginePhase,
    last_tick_ms: Option<f64>,
    ticks: u64,
    last_report: Option<TickReport>,

    // Host seams
    clock: Box<dyn Clock>,
    scheduler: Box<dyn Scheduler>,

    observers: ObserverHub,
    stop_signal: StopHandle,
    divergence_listener: Option<DivergenceListener>,
}

impl SimulationEngine {
    /// Engine with the default physics constants, the system clock and an
    /// [`ExternalScheduler`](crate::runtime::ExternalScheduler) (the owner
    /// calls `tick` itself).
    pub fn create(
        weight: f64,
        initial_height: f64,
        profile: impl Into<Arc<AreaProfile>>,
    ) -> Result<Self, SimulationError> {
        Self::with_config(weight, initial_height, profile, PhysicsConfig::default())
    }

    pub fn with_config(
        weight: f64,
        initial_height: f64,
        profile: impl Into<Arc<AreaProfile>>,
        config: PhysicsConfig,
    ) -> Result<Self, SimulationError> {
        init::create_engine(weight, initial_height, profile.into(), config)
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.set_scheduler(scheduler);
        self
    }

    /// Swap the scheduler. Any request held by the old one is cancelled and
    /// re-issued on the new one so a running engine keeps ticking.
    pub fn set_scheduler(&mut self, scheduler: Box<dyn Scheduler>) {
        lifecycle::replace_scheduler(self, scheduler);
    }

    // === LIFECYCLE ===

    /// Arm the startup delay and enter Running. No-op while running; a
    /// stopped engine cannot be restarted.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        lifecycle::start(self)
    }

    /// Enter Stopped and cancel any outstanding scheduler request. Idempotent.
    pub fn stop(&mut self) {
        lifecycle::stop(self);
    }

    /// Advance one step using real elapsed time and notify observers.
    ///
    /// Returns `Ok(None)` when the engine is not running (a stale callback).
    /// Observers run synchronously inside this call and must not block.
    pub fn tick(&mut self) -> Result<Option<TickReport>, SimulationError> {
        tick::tick(self)
    }

    /// Cloneable flag that stops the engine from places that cannot borrow
    /// it, such as an observer callback.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_signal.clone()
    }

    // === OBSERVERS ===

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(f64) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.observers.unsubscribe(handle)
    }

    /// Shared handle onto the observer list, usable from inside a callback.
    pub fn observers(&self) -> ObserverHub {
        self.observers.clone()
    }

    /// Side channel for `SimulationDiverged`; replaces any previous listener.
    pub fn on_diverged<F>(&mut self, listener: F)
    where
        F: Fn(&SimulationError) + 'static,
    {
        self.divergence_listener = Some(Box::new(listener));
    }

    // === STATE ===

    pub fn weight(&self) -> f64 { self.weight }

    pub fn height(&self) -> f64 { self.state.height }

    pub fn velocity(&self) -> f64 { self.state.velocity }

    pub fn state(&self) -> SimulationState { self.state }

    pub fn phase(&self) -> EnginePhase { self.phase }

    pub fn is_running(&self) -> bool { self.phase == EnginePhase::Running }

    pub fn profile(&self) -> &Arc<AreaProfile> { &self.profile }

    pub fn config(&self) -> &PhysicsConfig { &self.config }

    pub fn tick_count(&self) -> u64 { self.ticks }

    pub fn last_report(&self) -> Option<TickReport> { self.last_report }

    /// Snapshot of the last completed tick (zeros before the first one).
    pub fn stats(&self) -> TickStats {
        TickStats::from_engine(self)
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        lifecycle::stop(self);
        self.observers.clear();
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
