// Shared tuning constants for the fluted-glass effect.

// Frame pacing
pub const RENDER_BUDGET_MS: f64 = 40.0; // max wall time spent updating instances per tick
pub const MIN_TICK_INTERVAL_MS: f64 = 33.0; // ~30 logical fps for the global driver
pub const MIN_INSTANCE_INTERVAL_MS: f64 = 33.0; // per-instance self-throttle
pub const SLOW_RENDER_WARN_MS: f64 = 45.0; // advisory threshold for a single draw

// Time base: milliseconds -> animation seconds
pub const TIME_SCALE: f64 = 0.0008;

// Column lookup texture
pub const LOOKUP_WIDTH: usize = 512;

// Background preprocessing
pub const BACKGROUND_SIZE: usize = 512; // fixed offscreen resolution
pub const BACKGROUND_DIM: f32 = 0.85; // applied once after the blur pass

// Rendering surface
pub const RESOLUTION_SCALE: f64 = 0.75; // deliberate downscale of the backing store
pub const MAX_PIXEL_RATIO: f64 = 1.5; // device pixels per CSS pixel, clamped

// Blob animation
pub const BLOB_BASE_POSITIONS: [[f32; 2]; 3] = [[0.3, 0.7], [0.6, 0.1], [0.9, 0.5]];
pub const IDLE_EASING: [f32; 3] = [0.025, 0.022, 0.018]; // blob 3 eases slowest
pub const PARALLAX_EASING: f32 = 0.06; // faster than idle drift
pub const PARALLAX_DEPTH: [f32; 3] = [0.12, 0.2, 0.3]; // per-layer pointer offset scale

// Instance lifecycle
pub const INIT_STAGE_DELAY_MS: i32 = 20; // cooperative yield between init stages
pub const QUEUE_ITEM_DELAY_MS: i32 = 200; // gap between serialized initializations
pub const QUEUE_KICK_DELAY_MS: i32 = 100; // delay before the queue starts draining
pub const OBSERVER_MARGIN_PX: i32 = 300; // pre-trigger margin around the viewport
pub const INITIAL_VISIBILITY_MARGIN_PX: f64 = 200.0; // post-init visibility check
