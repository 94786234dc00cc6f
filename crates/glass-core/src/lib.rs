pub mod background;
pub mod blobs;
pub mod columns;
pub mod constants;
pub mod scheduler;
pub mod settings;

pub static GLASS_WGSL: &str = include_str!("../shaders/glass.wgsl");

pub use blobs::*;
pub use columns::*;
pub use scheduler::*;
pub use settings::*;
