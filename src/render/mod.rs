//! Drawing: the `Canvas` draw-call contract, its terminal rasterizer and the
//! scene renderer

pub mod canvas;
pub mod renderer;

pub use canvas::{BufferCanvas, Canvas};
pub use renderer::Renderer;
