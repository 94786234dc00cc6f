//! DOM event plumbing. Every listener is held through a [`ListenerHandle`]
//! that detaches itself on drop, so disposing an instance cannot leave
//! callbacks firing into freed state. Closures capture only weak references
//! to avoid cycles through the registry.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::instance::GlassInstance;

/// An attached DOM listener. Dropping the handle removes the listener.
pub struct ListenerHandle {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerHandle {
    pub fn attach(
        target: &web::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web::Event)>,
    ) -> anyhow::Result<Self> {
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(dom::js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Attach hover and resize listeners for a freshly built instance.
pub fn wire_instance(instance: &Rc<RefCell<GlassInstance>>) -> anyhow::Result<()> {
    let window = dom::window()?;
    let container = instance.borrow().container.clone();
    let target: &web::EventTarget = container.as_ref();
    let weak = Rc::downgrade(instance);
    let mut handles = Vec::new();

    if instance.borrow().settings.hover_enabled {
        handles.push(ListenerHandle::attach(
            target,
            "pointerenter",
            on_hover_change(weak.clone(), true),
        )?);
        handles.push(ListenerHandle::attach(
            target,
            "pointerleave",
            on_hover_change(weak.clone(), false),
        )?);
        handles.push(ListenerHandle::attach(
            target,
            "pointermove",
            on_pointer_move(weak.clone()),
        )?);
        wire_initial_hover(weak.clone())?;
    }

    {
        let weak = weak.clone();
        let closure = Closure::wrap(Box::new(move |_event: web::Event| {
            if let Some(instance) = weak.upgrade() {
                instance.borrow_mut().handle_resize();
            }
        }) as Box<dyn FnMut(web::Event)>);
        handles.push(ListenerHandle::attach(window.as_ref(), "resize", closure)?);
    }

    let mut guard = instance.borrow_mut();
    for handle in handles {
        guard.push_listener(handle);
    }
    Ok(())
}

fn on_hover_change(
    weak: Weak<RefCell<GlassInstance>>,
    hovering: bool,
) -> Closure<dyn FnMut(web::Event)> {
    Closure::wrap(Box::new(move |_event: web::Event| {
        if let Some(instance) = weak.upgrade() {
            instance.borrow_mut().animator.set_hovering(hovering);
        }
    }) as Box<dyn FnMut(web::Event)>)
}

fn on_pointer_move(weak: Weak<RefCell<GlassInstance>>) -> Closure<dyn FnMut(web::Event)> {
    Closure::wrap(Box::new(move |event: web::Event| {
        let Some(instance) = weak.upgrade() else {
            return;
        };
        let Some(mouse) = event.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let mut guard = instance.borrow_mut();
        let uv = dom::pointer_uv(
            mouse.client_x() as f64,
            mouse.client_y() as f64,
            &guard.container,
        );
        guard.animator.set_pointer(uv);
    }) as Box<dyn FnMut(web::Event)>)
}

/// Pointerenter never fires when the cursor is already inside the container
/// at creation time. A one-shot document pointermove catches that case.
fn wire_initial_hover(weak: Weak<RefCell<GlassInstance>>) -> anyhow::Result<()> {
    let document = dom::document()?;
    let closure = Closure::once(move |event: web::Event| {
        let Some(instance) = weak.upgrade() else {
            return;
        };
        let Some(mouse) = event.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let mut guard = instance.borrow_mut();
        let rect = guard.container.get_bounding_client_rect();
        let x = mouse.client_x() as f64;
        let y = mouse.client_y() as f64;
        if x >= rect.left() && x <= rect.right() && y >= rect.top() && y <= rect.bottom() {
            guard.animator.set_hovering(true);
            let uv = dom::pointer_uv(x, y, &guard.container);
            guard.animator.set_pointer(uv);
        }
    });

    let options = web::AddEventListenerOptions::new();
    options.set_once(true);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "pointermove",
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(dom::js_err)?;
    // `once: true` makes the browser drop its side after the first call;
    // leaking the Rust side is a bounded one-allocation cost.
    closure.forget();
    Ok(())
}
