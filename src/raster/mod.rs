pub mod canvas;
pub mod color;
mod renderer;

pub use canvas::Canvas;
pub use renderer::FrameRenderer;
