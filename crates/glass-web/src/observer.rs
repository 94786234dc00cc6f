//! Visibility-driven lifecycle. One IntersectionObserver with a generous
//! root margin covers every container: first intersection enqueues lazy
//! initialization, later entries toggle the instance in and out of the
//! scheduler's active set.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use glass_core::constants::{
    INITIAL_VISIBILITY_MARGIN_PX, OBSERVER_MARGIN_PX, QUEUE_ITEM_DELAY_MS, QUEUE_KICK_DELAY_MS,
};
use glass_core::InstanceId;

use crate::app::App;
use crate::{dom, init};

pub fn observe_containers(app: &App, containers: Vec<web::Element>) -> anyhow::Result<()> {
    let app_cb = app.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    handle_entry(&app_cb, &entry);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let options = web::IntersectionObserverInit::new();
    options.set_root_margin(&format!("{OBSERVER_MARGIN_PX}px"));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(dom::js_err)?;
    for container in &containers {
        observer.observe(container);
    }
    // The observer lives for the page; the callback leaks deliberately.
    callback.forget();
    Ok(())
}

fn handle_entry(app: &App, entry: &web::IntersectionObserverEntry) {
    let target = entry.target();

    // Already initialized: just follow visibility.
    if let Some(id) = target
        .get_attribute("data-glass-id")
        .and_then(|s| s.parse::<u64>().ok())
    {
        app.scheduler
            .borrow_mut()
            .set_active(InstanceId(id), entry.is_intersecting());
        return;
    }

    // Not yet initialized: first sighting enqueues it, exactly once. The
    // marker also stays on containers whose init failed, so they never retry.
    if !entry.is_intersecting() || target.has_attribute("data-glass-queued") {
        return;
    }
    let _ = target.set_attribute("data-glass-queued", "");
    let kick = {
        let mut lifecycle = app.lifecycle.borrow_mut();
        lifecycle.queue.push_back(target);
        !lifecycle.in_flight
    };
    if kick {
        let app = app.clone();
        spawn_local(async move {
            dom::timeout_ms(QUEUE_KICK_DELAY_MS).await;
            process_queue(app);
        });
    }
}

/// Drain the init queue one container at a time, with a pause between items
/// so a page full of containers warms up gradually.
pub fn process_queue(app: App) {
    let container = {
        let mut lifecycle = app.lifecycle.borrow_mut();
        if lifecycle.in_flight {
            return;
        }
        let Some(el) = lifecycle.queue.pop_front() else {
            return;
        };
        lifecycle.in_flight = true;
        el
    };
    spawn_local(async move {
        build_one(&app, container).await;
        dom::timeout_ms(QUEUE_ITEM_DELAY_MS).await;
        app.lifecycle.borrow_mut().in_flight = false;
        process_queue(app);
    });
}

async fn build_one(app: &App, container: web::Element) {
    // Every container gets its effect; past the sizing hint the shared tick
    // budget is what keeps per-frame cost bounded.
    if app.perf.over_instance_hint(app.built_count.get()) {
        log::warn!(
            "{} instances already built (hint {}); relying on the frame budget",
            app.built_count.get(),
            app.perf.max_instances
        );
    }
    let id = app.allocate_id();
    match init::build_instance(app, container.clone(), id).await {
        Ok(instance) => {
            let _ = container.set_attribute("data-glass-id", &id.0.to_string());
            app.registry.borrow_mut().insert(id.0, instance);
            app.built_count.set(app.built_count.get() + 1);
            // The observer only reports visibility changes, so a container
            // that stayed in view during init needs this one manual check.
            if dom::roughly_in_viewport(&container, INITIAL_VISIBILITY_MARGIN_PX) {
                app.scheduler.borrow_mut().set_active(id, true);
            }
            log::info!("instance {} initialized", id.0);
        }
        Err(init::InitError::Cancelled) => {
            log::info!("instance {} cancelled; container left the DOM", id.0);
        }
        Err(e) => {
            log::error!("instance {} initialization failed: {e:#}", id.0);
        }
    }
}
