mod context;
mod egui_integration;
mod render;
mod texture;

pub use context::{frame_texture_format, GpuContext};
pub use egui_integration::{EguiOverlay, OverlayFrame};
pub use render::PresentPipeline;
pub use texture::FrameTexture;
