/// Headless renderer: records what a frame would draw without a GPU.
///
/// Used by the demo binary and by tests; also a template for real
/// backends since it enforces the frame protocol.

use winit::dpi::PhysicalSize;
use crate::error::{Error, Result};
use crate::overlay_bail;
use super::renderer::{DrawItem, FrameUniforms, OverlayDraw, Renderer};

const SOURCE: &str = "folio3d::HeadlessRenderer";

/// Counters accumulated over the renderer's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    pub frames: u64,
    pub geometry_passes: u64,
    pub overlay_passes: u64,
    pub draw_calls: u64,
    pub triangles: u64,
    /// Output reallocations (same-size resizes are not counted)
    pub resizes: u64,
}

#[derive(Debug)]
pub struct HeadlessRenderer {
    size: PhysicalSize<u32>,
    overlay_pass: bool,
    unavailable: Option<String>,
    in_frame: bool,
    stats: RendererStats,
    last_uniforms: Vec<u8>,
    last_overlay: Option<OverlayDraw>,
}

impl HeadlessRenderer {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        Self {
            size,
            overlay_pass: true,
            unavailable: None,
            in_frame: false,
            stats: RendererStats::default(),
            last_uniforms: Vec::new(),
            last_overlay: None,
        }
    }

    /// Single-pass renderer: the overlay is never composited separately.
    pub fn without_overlay_pass(mut self) -> Self {
        self.overlay_pass = false;
        self
    }

    /// Renderer whose probe fails, standing in for a host without any
    /// rendering capability.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let mut renderer = Self::new(PhysicalSize::new(0, 0));
        renderer.unavailable = Some(reason.into());
        renderer
    }

    pub fn stats(&self) -> RendererStats {
        self.stats
    }

    /// Raw bytes of the last uploaded uniform block.
    pub fn last_uniform_bytes(&self) -> &[u8] {
        &self.last_uniforms
    }

    pub fn last_overlay(&self) -> Option<&OverlayDraw> {
        self.last_overlay.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn probe(&mut self) -> Result<()> {
        match &self.unavailable {
            // reported by the render loop
            Some(reason) => Err(Error::RenderingUnavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn output_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<bool> {
        if size.width == 0 || size.height == 0 || size == self.size {
            return Ok(false);
        }
        self.size = size;
        self.stats.resizes += 1;
        Ok(true)
    }

    fn supports_overlay_pass(&self) -> bool {
        self.overlay_pass
    }

    fn begin_frame(&mut self, uniforms: &FrameUniforms) -> Result<()> {
        if self.in_frame {
            overlay_bail!(SOURCE, InvalidState, "begin_frame called twice without end_frame");
        }
        self.in_frame = true;
        self.last_overlay = None;
        self.last_uniforms.clear();
        self.last_uniforms.extend_from_slice(bytemuck::bytes_of(uniforms));
        Ok(())
    }

    fn draw_geometry(&mut self, items: &[DrawItem]) -> Result<()> {
        if !self.in_frame {
            overlay_bail!(SOURCE, InvalidState, "draw_geometry outside a frame");
        }
        self.stats.geometry_passes += 1;
        self.stats.draw_calls += items.len() as u64;
        self.stats.triangles += items.iter().map(|i| i.triangles as u64).sum::<u64>();
        Ok(())
    }

    fn draw_overlay(&mut self, overlay: &OverlayDraw) -> Result<()> {
        if !self.in_frame {
            overlay_bail!(SOURCE, InvalidState, "draw_overlay outside a frame");
        }
        if !self.overlay_pass {
            overlay_bail!(SOURCE, InvalidState, "renderer has no overlay pass");
        }
        self.stats.overlay_passes += 1;
        self.last_overlay = Some(*overlay);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        if !self.in_frame {
            overlay_bail!(SOURCE, InvalidState, "end_frame without begin_frame");
        }
        self.in_frame = false;
        self.stats.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "headless_renderer_tests.rs"]
mod tests;
