//! Floatsim Engine - a shape floating in water, simulated in WASM
//!
//! Architecture:
//! - runtime/     - clock, scheduler and logging seams to the host
//! - domain/      - area profiles and shape slicing
//! - simulation/  - the engine, its drivers and the JS facade

pub mod domain;
pub mod error;
pub mod runtime;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    runtime::logging::init_logging(log::LevelFilter::Info);
    log::info!("floatsim engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::profile::{AreaProfile, AreaSample};
pub use domain::shape::{Point, Shape, Triangle};
pub use error::SimulationError;
pub use simulation::{
    EnginePhase, FloatSimulation, HeadlessDriver, PhysicsConfig, SimulationEngine, SimulationState,
    SubscriptionHandle, TickReport, TickStats,
};
