use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::runtime::Scheduler;

use super::SimulationEngine;

/// `setTimeout` for the startup delay, `requestAnimationFrame` afterwards.
///
/// One closure serves every request and lives as long as the scheduler, so
/// it is never dropped while the browser is still holding it.
pub struct BrowserScheduler {
    callback: Closure<dyn FnMut()>,
    timeout_id: Option<i32>,
    frame_id: Option<i32>,
}

impl BrowserScheduler {
    /// Only callable on wasm32: creating the JS closure needs a JS host.
    pub fn new(engine: Weak<RefCell<SimulationEngine>>) -> Self {
        let callback = Closure::wrap(Box::new(move || {
            let Some(engine) = engine.upgrade() else {
                return;
            };
            let Ok(mut engine) = engine.try_borrow_mut() else {
                log::warn!("tick skipped: engine is already borrowed");
                return;
            };
            if let Err(err) = engine.tick() {
                log::error!("tick failed: {}", err);
            }
        }) as Box<dyn FnMut()>);

        Self {
            callback,
            timeout_id: None,
            frame_id: None,
        }
    }

    fn function(&self) -> &js_sys::Function {
        self.callback.as_ref().unchecked_ref()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_timeout(&mut self, delay_ms: f64) {
        self.cancel();
        let Some(window) = web_sys::window() else {
            log::error!("no window: cannot schedule the first tick");
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.function(),
            delay_ms.round() as i32,
        ) {
            Ok(id) => self.timeout_id = Some(id),
            Err(err) => log::error!("setTimeout failed: {:?}", err),
        }
    }

    fn request_frame(&mut self) {
        // Requests only come from inside a tick, so any timeout has fired.
        self.timeout_id = None;
        let Some(window) = web_sys::window() else {
            log::error!("no window: cannot request an animation frame");
            return;
        };
        match window.request_animation_frame(self.function()) {
            Ok(id) => self.frame_id = Some(id),
            Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn cancel(&mut self) {
        let timeout_id = self.timeout_id.take();
        let frame_id = self.frame_id.take();
        if timeout_id.is_none() && frame_id.is_none() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(id) = timeout_id {
            window.clear_timeout_with_handle(id);
        }
        if let Some(id) = frame_id {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
    }
}
