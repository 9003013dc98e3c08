use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::domain::profile::AreaProfile;
use crate::domain::shape::Shape;
use crate::error::SimulationError;

use super::browser::BrowserScheduler;
use super::lifecycle::StopHandle;
use super::observers::{ObserverHub, SubscriptionHandle};
use super::settings::PhysicsConfig;
use super::tick_stats::TickStats;
use super::SimulationEngine;

fn to_js(err: SimulationError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Largest id a JS number carries exactly.
const MAX_JS_ID: u64 = (1 << 53) - 1;

/// Subscription ids cross into JS as numbers; the full u64 range is never
/// reached, so ids below 2^53 map one-to-one.
fn handle_to_js(handle: SubscriptionHandle) -> f64 {
    handle.id() as f64
}

fn handle_from_js(id: f64) -> Option<SubscriptionHandle> {
    if id.is_finite() && id >= 0.0 && id.fract() == 0.0 && id <= MAX_JS_ID as f64 {
        Some(SubscriptionHandle::from_id(id as u64))
    } else {
        None
    }
}

/// JS handle on one floating body.
///
/// The engine sits behind `Rc<RefCell<_>>` because animation-frame callbacks
/// borrow it for every tick. Observer and stop handles live outside that
/// cell so JS observers can call `unsubscribe`, `stop` or the getters from
/// inside a tick.
#[wasm_bindgen]
pub struct FloatSimulation {
    engine: Rc<RefCell<SimulationEngine>>,
    observers: ObserverHub,
    stop: StopHandle,
    scheduler_installed: bool,
}

#[wasm_bindgen]
impl FloatSimulation {
    /// `area_json` is an object of `"height": area` entries.
    #[wasm_bindgen(constructor)]
    pub fn new(weight: f64, initial_height: f64, area_json: String) -> Result<FloatSimulation, JsValue> {
        let profile = AreaProfile::from_json(&area_json).map_err(to_js)?;
        let engine = SimulationEngine::create(weight, initial_height, profile).map_err(to_js)?;
        Ok(Self::wrap(engine))
    }

    /// Like the constructor, with a camelCase `PhysicsConfig` JSON object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        weight: f64,
        initial_height: f64,
        area_json: String,
        config_json: String,
    ) -> Result<FloatSimulation, JsValue> {
        let profile = AreaProfile::from_json(&area_json).map_err(to_js)?;
        let config = PhysicsConfig::from_json(&config_json).map_err(to_js)?;
        let engine =
            SimulationEngine::with_config(weight, initial_height, profile, config).map_err(to_js)?;
        Ok(Self::wrap(engine))
    }

    fn wrap(engine: SimulationEngine) -> Self {
        Self {
            observers: engine.observers(),
            stop: engine.stop_handle(),
            engine: Rc::new(RefCell::new(engine)),
            scheduler_installed: false,
        }
    }

    /// Begin ticking on animation frames after the startup delay.
    pub fn start(&mut self) -> Result<(), JsValue> {
        let mut engine = self
            .engine
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("engine is busy"))?;

        if !self.scheduler_installed {
            engine.set_scheduler(Box::new(BrowserScheduler::new(Rc::downgrade(&self.engine))));
            self.scheduler_installed = true;
        }

        engine.start().map_err(to_js)
    }

    /// Safe to call from inside a height observer.
    pub fn stop(&mut self) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.stop(),
            Err(_) => self.stop.stop(),
        }
    }

    /// Register `callback(height)`; returns an id for `unsubscribe`.
    pub fn subscribe(&self, callback: js_sys::Function) -> f64 {
        let handle = self.observers.subscribe(move |height| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_f64(height)) {
                log::warn!("height observer threw: {:?}", err);
            }
        });
        handle_to_js(handle)
    }

    /// False for unknown ids and for values that are not ids at all.
    pub fn unsubscribe(&self, id: f64) -> bool {
        match handle_from_js(id) {
            Some(handle) => self.observers.unsubscribe(handle),
            None => false,
        }
    }

    /// `callback(message)` runs if the simulation diverges and stops itself.
    #[wasm_bindgen(js_name = onDiverged)]
    pub fn on_diverged(&self, callback: js_sys::Function) -> Result<(), JsValue> {
        let mut engine = self
            .engine
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("engine is busy"))?;
        engine.on_diverged(move |err| {
            if let Err(js_err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&err.to_string())) {
                log::warn!("divergence listener threw: {:?}", js_err);
            }
        });
        Ok(())
    }

    /// Current height; mid-tick this is the height just broadcast.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        match self.engine.try_borrow() {
            Ok(engine) => engine.height(),
            Err(_) => self.observers.last_height().unwrap_or(f64::NAN),
        }
    }

    /// `undefined` while a tick is in progress.
    #[wasm_bindgen(getter)]
    pub fn velocity(&self) -> Option<f64> {
        self.engine.try_borrow().ok().map(|engine| engine.velocity())
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        match self.engine.try_borrow() {
            Ok(engine) => engine.is_running(),
            // Only a tick holds the borrow, and ticks only run while running.
            Err(_) => !self.stop.is_stop_requested(),
        }
    }

    #[wasm_bindgen(getter, js_name = tickCount)]
    pub fn tick_count(&self) -> Option<u64> {
        self.engine.try_borrow().ok().map(|engine| engine.tick_count())
    }

    pub fn stats(&self) -> Option<TickStats> {
        self.engine.try_borrow().ok().map(|engine| engine.stats())
    }
}

impl FloatSimulation {
    /// Shared engine cell, for Rust-side owners embedding the facade.
    pub fn engine(&self) -> Rc<RefCell<SimulationEngine>> {
        Rc::clone(&self.engine)
    }
}

/// Area profile JSON for a circle of `radius` approximated by `segments`
/// triangles, sliced every `slice_height` metres.
#[wasm_bindgen(js_name = circleAreaProfile)]
pub fn circle_area_profile(radius: f64, segments: u32, slice_height: f64) -> Result<String, JsValue> {
    let shape = Shape::circle(radius, segments).map_err(to_js)?;
    let profile = shape.area_profile(slice_height, 100).map_err(to_js)?;
    Ok(profile.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_ids_survive_the_js_boundary() {
        for id in [0, 1, u32::MAX as u64, u32::MAX as u64 + 1, MAX_JS_ID] {
            let handle = SubscriptionHandle::from_id(id);
            assert_eq!(handle_from_js(handle_to_js(handle)), Some(handle));
        }
        // Past u32 the id must not wrap onto a live low id.
        let wide = handle_to_js(SubscriptionHandle::from_id(u32::MAX as u64 + 1));
        assert_ne!(handle_from_js(wide), Some(SubscriptionHandle::from_id(0)));
    }

    #[test]
    fn non_id_numbers_are_refused() {
        for id in [-1.0, 0.5, f64::NAN, f64::INFINITY, 2f64.powi(60)] {
            assert_eq!(handle_from_js(id), None, "id = {}", id);
        }
    }

    #[test]
    fn unsubscribe_ignores_unknown_and_malformed_ids() {
        let sim = FloatSimulation::new(1.0, 0.0, r#"{"0": 0, "1": 1}"#.to_string()).unwrap();
        let handle = sim.observers.subscribe(|_| {});

        assert!(!sim.unsubscribe(-3.0));
        assert!(!sim.unsubscribe(handle_to_js(handle) + 0.5));
        assert!(sim.unsubscribe(handle_to_js(handle)));
        assert!(!sim.unsubscribe(handle_to_js(handle)));
    }
}
