//! Staged instance initialization. The expensive steps (lookup bake,
//! background blur, adapter/device setup, pipeline build) are separated by
//! yields back to the event loop so a page scrolling several containers
//! into view never freezes for the combined cost.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use glass_core::constants::INIT_STAGE_DELAY_MS;
use glass_core::{bake_column_lookup, BlobAnimator, InstanceId, InstanceSettings};
use web_sys as web;

use crate::app::App;
use crate::dom;
use crate::events;
use crate::instance::GlassInstance;
use crate::background;
use crate::render::{GpuState, RenderContext};

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The container left the DOM while a stage was yielded.
    #[error("container removed during initialization")]
    Cancelled,
    #[error(transparent)]
    Setup(#[from] anyhow::Error),
}

/// Build one instance through the four stages. On any failure the partially
/// created canvas is removed so the page is left untouched.
pub async fn build_instance(
    app: &App,
    container: web::Element,
    id: InstanceId,
) -> Result<Rc<RefCell<GlassInstance>>, InitError> {
    // Stage 1: CPU-side assets. The first two instances on desktop get full
    // quality; later ones and mobile drop to the cheaper noise default.
    let low_quality = app.perf.is_mobile || app.built_count.get() >= 2;
    let settings =
        InstanceSettings::from_attributes(dom::attribute_reader(container.clone()), low_quality);
    let lookup = bake_column_lookup(settings.columns, settings.width_variation, settings.seed);
    let bg_pixels = background::prepare(settings.background_url.as_deref()).await;
    dom::timeout_ms(INIT_STAGE_DELAY_MS).await;
    ensure_connected(&container, None)?;

    // Stage 2: canvas and WebGPU context.
    let document = dom::document()?;
    let size = dom::surface_size(&container, app.perf.resolution_scale);
    let canvas = dom::create_overlay_canvas(&document, &container, size)?;
    let ctx = match RenderContext::create(&canvas).await {
        Ok(ctx) => ctx,
        Err(e) => {
            canvas.remove();
            return Err(e.into());
        }
    };
    dom::timeout_ms(INIT_STAGE_DELAY_MS).await;
    ensure_connected(&container, Some(&canvas))?;

    // Stage 3: pipeline, textures, uniforms.
    let css_size = Vec2::new(size.css_width as f32, size.css_height as f32);
    let gpu = GpuState::from_context(ctx, &settings, &lookup, bg_pixels.as_deref(), css_size);
    dom::timeout_ms(INIT_STAGE_DELAY_MS).await;
    ensure_connected(&container, Some(&canvas))?;

    // Stage 4: animator and event wiring. The random phase offset keeps
    // neighboring instances from drifting in sync.
    let phase_offset_ms = js_sys::Math::random() * 10_000.0;
    let animator = BlobAnimator::new(&settings, phase_offset_ms);
    let instance = Rc::new(RefCell::new(GlassInstance::new(
        id,
        settings,
        container,
        canvas.clone(),
        gpu,
        animator,
        app.perf.resolution_scale,
    )));
    if let Err(e) = events::wire_instance(&instance) {
        instance.borrow_mut().dispose();
        return Err(e.into());
    }
    Ok(instance)
}

fn ensure_connected(
    container: &web::Element,
    canvas: Option<&web::HtmlCanvasElement>,
) -> Result<(), InitError> {
    if container.is_connected() {
        return Ok(());
    }
    if let Some(canvas) = canvas {
        canvas.remove();
    }
    Err(InitError::Cancelled)
}
