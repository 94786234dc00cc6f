#![cfg(target_arch = "wasm32")]
use glass_core::PerfConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod background;
mod dom;
mod events;
mod frame;
mod init;
mod instance;
mod observer;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    spawn_local(async {
        // Let the page settle before touching the GPU; slower machines get
        // a longer grace period.
        dom::timeout_ms(startup_delay_ms()).await;
        if let Err(e) = run().await {
            log::error!("fluted glass startup error: {e:?}");
        }
    });
    Ok(())
}

fn startup_delay_ms() -> i32 {
    let cores = web::window()
        .map(|w| w.navigator().hardware_concurrency())
        .unwrap_or(4.0);
    if cores < 4.0 {
        800
    } else {
        500
    }
}

async fn run() -> anyhow::Result<()> {
    let window = dom::window()?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if !webgpu_available(&window) {
        anyhow::bail!("WebGPU unavailable; fluted glass disabled");
    }

    let containers = dom::query_containers(&document)?;
    if containers.is_empty() {
        return Ok(());
    }
    log::info!("fluted glass: observing {} container(s)", containers.len());

    let perf = PerfConfig {
        is_mobile: detect_mobile(&window),
        ..PerfConfig::default()
    };
    let app = app::App::new(perf);
    observer::observe_containers(&app, containers)?;
    frame::start_loop(app);
    Ok(())
}

fn detect_mobile(window: &web::Window) -> bool {
    window
        .navigator()
        .user_agent()
        .map(|ua| ua.contains("Mobi"))
        .unwrap_or(false)
}

fn webgpu_available(window: &web::Window) -> bool {
    js_sys::Reflect::has(window.navigator().as_ref(), &JsValue::from_str("gpu")).unwrap_or(false)
}
