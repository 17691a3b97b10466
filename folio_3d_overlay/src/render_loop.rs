//! Render loop driver
//!
//! Owns the compositor and a renderer. Each [`RenderLoop::tick`] advances
//! the compositor (controls, loading, visibility gate), then draws the 3D
//! pass and, when the backend has one and the overlay is visible, the
//! overlay pass. Window resizes touch only the camera aspect and the
//! renderer output size.

use winit::dpi::PhysicalSize;
use crate::compositor::Compositor;
use crate::error::Result;
use crate::renderer::{collect_draw_items, FrameUniforms, Renderer};

const SOURCE: &str = "folio3d::RenderLoop";

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// False when the page was hidden and nothing was drawn
    pub rendered: bool,
    /// Render passes issued (0, 1 or 2)
    pub passes: u32,
    pub draw_items: usize,
    pub overlay_drawn: bool,
}

#[derive(Debug)]
pub struct RenderLoop<R: Renderer> {
    compositor: Compositor,
    renderer: R,
    frame_index: u64,
}

impl<R: Renderer> RenderLoop<R> {
    /// Pair `compositor` with `renderer`.
    ///
    /// # Errors
    ///
    /// `RenderingUnavailable` when the renderer's probe fails; reported
    /// once here, never retried.
    pub fn new(mut compositor: Compositor, mut renderer: R) -> Result<Self> {
        if let Err(e) = renderer.probe() {
            crate::overlay_error!(SOURCE, "renderer unavailable: {}", e);
            return Err(e);
        }

        let size = renderer.output_size();
        compositor.camera_mut().set_aspect(size.width as f32, size.height as f32);
        crate::overlay_info!(SOURCE, "render loop ready at {}x{}", size.width, size.height);

        Ok(Self { compositor, renderer, frame_index: 0 })
    }

    /// Advance and draw one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Result<FrameReport> {
        self.compositor.tick(dt);
        self.apply_output_resize()?;

        if !self.compositor.is_page_visible() {
            return Ok(FrameReport::default());
        }

        let uniforms = FrameUniforms::from_camera(self.compositor.camera());
        let items = collect_draw_items(self.compositor.graph());

        self.renderer.begin_frame(&uniforms)?;
        self.renderer.draw_geometry(&items)?;
        let mut report = FrameReport { rendered: true, passes: 1, draw_items: items.len(), overlay_drawn: false };

        if self.renderer.supports_overlay_pass() {
            if let Some(overlay) = self.compositor.overlay_draw() {
                self.renderer.draw_overlay(&overlay)?;
                report.passes = 2;
                report.overlay_drawn = true;
            }
        }
        self.renderer.end_frame()?;

        self.frame_index += 1;
        crate::overlay_trace!(SOURCE, "frame {}: {:?}", self.frame_index, report);
        Ok(report)
    }

    /// Window resize delivered directly rather than through host events.
    /// Returns whether the renderer output was reallocated.
    pub fn on_window_resized(&mut self, size: PhysicalSize<u32>) -> Result<bool> {
        self.compositor.on_window_resized(size);
        self.apply_output_resize()
    }

    fn apply_output_resize(&mut self) -> Result<bool> {
        match self.compositor.take_output_resize() {
            Some(size) => self.renderer.resize(size),
            None => Ok(false),
        }
    }

    // ===== ACCESSORS =====

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frames drawn so far (hidden-page ticks not counted).
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn into_parts(self) -> (Compositor, R) {
        (self.compositor, self.renderer)
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
