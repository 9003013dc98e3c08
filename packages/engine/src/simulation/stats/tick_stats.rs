use wasm_bindgen::prelude::*;

use super::SimulationEngine;

/// Readout of the last completed tick, for displays.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct TickStats {
    tick_count: u64,
    running: bool,
    height: f64,
    velocity: f64,
    dt_seconds: f64,
    volume: f64,
    force_up: f64,
    force_down: f64,
    force_drag: f64,
    net_force: f64,
}

impl TickStats {
    pub(super) fn from_engine(engine: &SimulationEngine) -> Self {
        let mut stats = TickStats {
            tick_count: engine.tick_count(),
            running: engine.is_running(),
            height: engine.height(),
            velocity: engine.velocity(),
            ..TickStats::default()
        };

        if let Some(report) = engine.last_report() {
            stats.dt_seconds = report.dt;
            stats.volume = report.forces.volume;
            stats.force_up = report.forces.force_up;
            stats.force_down = report.forces.force_down;
            stats.force_drag = report.forces.force_drag;
            stats.net_force = report.forces.net_force;
        }

        stats
    }
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.tick_count }
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.running }
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 { self.height }
    #[wasm_bindgen(getter)]
    pub fn velocity(&self) -> f64 { self.velocity }
    #[wasm_bindgen(getter)]
    pub fn dt_seconds(&self) -> f64 { self.dt_seconds }
    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> f64 { self.volume }
    #[wasm_bindgen(getter)]
    pub fn force_up(&self) -> f64 { self.force_up }
    #[wasm_bindgen(getter)]
    pub fn force_down(&self) -> f64 { self.force_down }
    #[wasm_bindgen(getter)]
    pub fn force_drag(&self) -> f64 { self.force_drag }
    #[wasm_bindgen(getter)]
    pub fn net_force(&self) -> f64 { self.net_force }
}
