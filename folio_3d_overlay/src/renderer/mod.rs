//! Renderer module
//!
//! The seam between the compositor and a rendering backend, plus a
//! headless backend that records frames.

mod headless_renderer;
mod renderer;

pub use headless_renderer::{HeadlessRenderer, RendererStats};
pub use renderer::{collect_draw_items, DrawItem, FrameUniforms, OverlayDraw, Renderer};
