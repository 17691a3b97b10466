/// The host-owned 2D content element projected onto the surface.

use glam::Mat4;

/// Pixel dimensions of a content element as laid out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentSize {
    pub width: u32,
    pub height: u32,
}

impl ContentSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Either dimension is zero (element not laid out yet, or hidden).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A live 2D element (typically an HTML page) owned by the host.
///
/// The compositor holds only a `Weak` reference; when the host drops the
/// element the overlay is torn down as if it had never been attached.
pub trait ContentElement {
    /// Current pixel size, kept in sync by the host's layout engine.
    fn pixel_size(&self) -> ContentSize;

    /// Receive the world transform mapping the element's pixel plane
    /// (centred on its midpoint, +Y up, facing +Z) onto the surface.
    fn apply_transform(&mut self, _world: Mat4) {}

    /// Receive the per-frame visibility decision.
    fn set_presentation(&mut self, _visible: bool, _opacity: f32) {}
}
