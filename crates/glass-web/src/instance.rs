//! One live effect: the overlay canvas, its GPU state and its animator,
//! glued to the container element they decorate.

use glam::Vec2;
use glass_core::constants::SLOW_RENDER_WARN_MS;
use glass_core::{BlobAnimator, InstanceId, InstanceSettings};
use instant::Instant;
use web_sys as web;

use crate::dom;
use crate::events::ListenerHandle;
use crate::render::GpuState;

pub struct GlassInstance {
    pub id: InstanceId,
    pub settings: InstanceSettings,
    pub container: web::Element,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState,
    pub animator: BlobAnimator,
    resolution_scale: f64,
    listeners: Vec<ListenerHandle>,
    disposed: bool,
}

impl GlassInstance {
    pub fn new(
        id: InstanceId,
        settings: InstanceSettings,
        container: web::Element,
        canvas: web::HtmlCanvasElement,
        gpu: GpuState,
        animator: BlobAnimator,
        resolution_scale: f64,
    ) -> Self {
        Self {
            id,
            settings,
            container,
            canvas,
            gpu,
            animator,
            resolution_scale,
            listeners: Vec::new(),
            disposed: false,
        }
    }

    pub fn push_listener(&mut self, handle: ListenerHandle) {
        self.listeners.push(handle);
    }

    /// Advance the animation and draw, if the per-instance throttle accepts
    /// this timestamp. Called from the global driver only while visible.
    pub fn update(&mut self, now_ms: f64) {
        if self.disposed {
            return;
        }
        let Some(frame) = self.animator.step(now_ms) else {
            return;
        };
        let started = Instant::now();
        match self.gpu.render(&frame) {
            Ok(()) => {
                let elapsed = started.elapsed().as_secs_f64() * 1000.0;
                if elapsed > SLOW_RENDER_WARN_MS {
                    log::warn!("instance {} slow render: {elapsed:.1}ms", self.id.0);
                }
            }
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.handle_resize();
            }
            Err(e) => log::warn!("instance {} render error: {e:?}", self.id.0),
        }
    }

    /// Re-measure the container and reconfigure the surface to match.
    pub fn handle_resize(&mut self) {
        if self.disposed {
            return;
        }
        let size = dom::surface_size(&self.container, self.resolution_scale);
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.gpu.resize(
            size.width,
            size.height,
            Vec2::new(size.css_width as f32, size.css_height as f32),
        );
    }

    /// Remove every trace from the page. Listener handles detach on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.listeners.clear();
        self.canvas.remove();
        let _ = self.container.remove_attribute("data-glass-id");
    }
}
