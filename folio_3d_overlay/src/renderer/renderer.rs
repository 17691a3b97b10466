/// Renderer trait and the per-frame data handed to it.

use glam::{Mat4, Vec4};
use winit::dpi::PhysicalSize;
use crate::camera::Camera;
use crate::error::Result;
use crate::overlay::ContentSize;
use crate::scene::{NodeFlags, NodeKey, SceneGraph};

// ============================================================================
// Frame data
// ============================================================================

/// Per-frame uniform block, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    /// xyz = camera position, w = 1
    pub camera_position: [f32; 4],
}

impl FrameUniforms {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            view_projection: camera.view_projection_matrix().to_cols_array_2d(),
            camera_position: camera.position.extend(1.0).to_array(),
        }
    }
}

/// One geometry node to draw in the 3D pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub node: NodeKey,
    pub world: Mat4,
    pub triangles: usize,
    pub color: Vec4,
    pub opacity: f32,
    pub double_sided: bool,
    pub wireframe: bool,
    /// Depth-only occluder hiding the overlay from behind
    pub occluder: bool,
}

/// The content plane to composite in the overlay pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayDraw {
    pub world: Mat4,
    pub opacity: f32,
    pub content_size: ContentSize,
}

/// Gather draw items for every visible geometry node, parents first.
/// An invisible node hides its whole subtree.
pub fn collect_draw_items(graph: &SceneGraph) -> Vec<DrawItem> {
    let mut items = Vec::new();
    let mut stack = vec![(graph.root(), Mat4::IDENTITY)];

    while let Some((key, parent_world)) = stack.pop() {
        let Some(node) = graph.node(key) else { continue };
        if !node.is_visible() {
            continue;
        }
        let world = parent_world * node.transform().to_matrix();

        if let Some(geometry) = node.geometry() {
            let material = node.material().copied().unwrap_or_default();
            items.push(DrawItem {
                node: key,
                world,
                triangles: geometry.triangle_count(),
                color: material.color,
                opacity: material.opacity,
                double_sided: material.double_sided,
                wireframe: material.wireframe,
                occluder: node.flags().contains(NodeFlags::OCCLUDER),
            });
        }
        for child in node.children().iter().rev() {
            stack.push((*child, world));
        }
    }
    items
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Rendering backend driven by [`RenderLoop`](crate::render_loop::RenderLoop).
///
/// A frame is `begin_frame`, one `draw_geometry`, at most one
/// `draw_overlay`, then `end_frame`.
pub trait Renderer {
    /// Check the backend can render at all. Called once at startup.
    fn probe(&mut self) -> Result<()> {
        Ok(())
    }

    fn output_size(&self) -> PhysicalSize<u32>;

    /// Resize the output. Returns whether anything was reallocated; a
    /// repeated or zero size must not churn resources.
    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<bool>;

    /// Whether the backend composites the content plane in its own pass.
    fn supports_overlay_pass(&self) -> bool;

    fn begin_frame(&mut self, uniforms: &FrameUniforms) -> Result<()>;

    fn draw_geometry(&mut self, items: &[DrawItem]) -> Result<()>;

    fn draw_overlay(&mut self, overlay: &OverlayDraw) -> Result<()>;

    fn end_frame(&mut self) -> Result<()>;
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
