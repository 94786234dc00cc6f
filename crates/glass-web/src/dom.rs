use glam::Vec2;
use glass_core::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{e:?}")
}

pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow::anyhow!("no window"))
}

pub fn document() -> anyhow::Result<web::Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))
}

/// Yield back to the event loop for `ms` milliseconds.
pub async fn timeout_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

pub fn query_containers(document: &web::Document) -> anyhow::Result<Vec<web::Element>> {
    let list = document
        .query_selector_all("[data-fluted-glass]")
        .map_err(js_err)?;
    let mut out = Vec::new();
    for i in 0..list.length() {
        if let Some(node) = list.item(i) {
            if let Ok(el) = node.dyn_into::<web::Element>() {
                out.push(el);
            }
        }
    }
    Ok(out)
}

/// Attribute accessor shaped for `InstanceSettings::from_attributes`.
pub fn attribute_reader(el: web::Element) -> impl Fn(&str) -> Option<String> {
    move |name| el.get_attribute(name)
}

/// Backing-store and CSS dimensions for a container's overlay canvas.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub css_width: f64,
    pub css_height: f64,
}

/// Size the backing store below the container's natural size: the deliberate
/// downscale plus a clamped device-pixel-ratio keep per-pixel shader cost in
/// check without visibly degrading the soft effect.
pub fn surface_size(container: &web::Element, resolution_scale: f64) -> SurfaceSize {
    let css_width = container.client_width().max(1) as f64;
    let css_height = container.client_height().max(1) as f64;
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_PIXEL_RATIO);
    SurfaceSize {
        width: (css_width * resolution_scale * dpr).floor().max(1.0) as u32,
        height: (css_height * resolution_scale * dpr).floor().max(1.0) as u32,
        css_width,
        css_height,
    }
}

/// Create the overlay canvas inside the container, stretched to fill it.
pub fn create_overlay_canvas(
    document: &web::Document,
    container: &web::Element,
    size: SurfaceSize,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    canvas.set_width(size.width);
    canvas.set_height(size.height);
    let style = canvas.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "100%");
    container.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

/// Rough visibility check used once right after initialization, before the
/// intersection observer delivers its first entry for the new instance.
pub fn roughly_in_viewport(el: &web::Element, margin: f64) -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    let viewport_height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let rect = el.get_bounding_client_rect();
    rect.top() < viewport_height + margin && rect.bottom() >= -margin
}

/// Pointer position in container-normalized coordinates, y up.
pub fn pointer_uv(client_x: f64, client_y: f64, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    let w = rect.width();
    let h = rect.height();
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            ((client_x - rect.left()) / w).clamp(0.0, 1.0) as f32,
            (1.0 - (client_y - rect.top()) / h).clamp(0.0, 1.0) as f32,
        )
    } else {
        Vec2::splat(0.5)
    }
}
