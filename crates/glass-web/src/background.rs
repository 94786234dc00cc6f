//! Browser half of the background preprocessor: decode the configured image
//! through an offscreen 2d canvas, then hand the pixels to the shared blur
//! pass. Load failures degrade to the procedural gradient rather than
//! aborting the instance.

use anyhow::anyhow;
use glass_core::background::{blur_and_dim, procedural_gradient};
use glass_core::constants::BACKGROUND_SIZE;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom;

/// Produce the blurred, dimmed RGBA buffer for an instance, or `None` when
/// the container configures no background at all.
pub async fn prepare(url: Option<&str>) -> Option<Vec<u8>> {
    let url = url?;
    let raw = match load_image_pixels(url).await {
        Ok(pixels) => pixels,
        Err(e) => {
            log::warn!("background {url:?} failed to load ({e}); using gradient fallback");
            procedural_gradient(BACKGROUND_SIZE)
        }
    };
    Some(blur_and_dim(&raw, BACKGROUND_SIZE))
}

/// Fetch and decode an image, resampled to the fixed background size.
async fn load_image_pixels(url: &str) -> anyhow::Result<Vec<u8>> {
    let document = dom::document()?;
    let image: web::HtmlImageElement = document
        .create_element("img")
        .map_err(dom::js_err)?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not an image"))?;
    image.set_cross_origin(Some("anonymous"));

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(url);
    JsFuture::from(loaded)
        .await
        .map_err(|_| anyhow!("image load failed"))?;
    image.set_onload(None);
    image.set_onerror(None);

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(dom::js_err)?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not a canvas"))?;
    let size = BACKGROUND_SIZE as u32;
    canvas.set_width(size);
    canvas.set_height(size);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(dom::js_err)?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|_| anyhow!("unexpected context type"))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &image,
        0.0,
        0.0,
        size as f64,
        size as f64,
    )
    .map_err(dom::js_err)?;
    let data = ctx
        .get_image_data(0.0, 0.0, size as f64, size as f64)
        .map_err(dom::js_err)?;
    Ok(data.data().0)
}
