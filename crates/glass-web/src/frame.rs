//! The single requestAnimationFrame driver. One loop serves every instance;
//! the scheduler decides who actually renders each tick.

use std::cell::RefCell;
use std::rc::Rc;

use glass_core::InstanceId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::App;

pub fn start_loop(app: App) {
    let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle_clone = handle.clone();

    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        run_tick(&app, timestamp_ms);
        if let Some(closure) = handle_clone.borrow().as_ref() {
            request_animation_frame(closure);
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(closure) = handle.borrow().as_ref() {
        request_animation_frame(closure);
    }
}

fn run_tick(app: &App, timestamp_ms: f64) {
    let registry = app.registry.clone();
    let mut detached: Vec<InstanceId> = Vec::new();
    app.scheduler.borrow_mut().tick(timestamp_ms, |id, now_ms| {
        // Clone out of the map first so update() can re-borrow the registry
        // if it ever needs to.
        let instance = registry.borrow().get(&id.0).cloned();
        let Some(instance) = instance else {
            return;
        };
        if instance.borrow().container.is_connected() {
            instance.borrow_mut().update(now_ms);
        } else {
            // Page script removed the container. Disposal must wait until
            // the tick releases its scheduler borrow.
            detached.push(id);
        }
    });
    for id in detached {
        log::info!("instance {} container removed; disposing", id.0);
        app.dispose_instance(id);
    }
}

fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = web_sys::window() {
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame unavailable; render loop stopped");
        }
    }
}
