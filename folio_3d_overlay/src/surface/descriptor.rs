/// Surface descriptor: world-space placement data of the display surface.
///
/// Derived on demand from the surface node; never stored as the source of
/// truth. The compositor keeps only the node key and recomputes this when
/// a mapping is (re)built.

use glam::{Mat3, Quat, Vec3};
use crate::scene::{
    compute_local_bounding_box, compute_world_bounding_box, compute_world_rotation,
    LocalAxis, NodeKey, SceneGraph, AABB,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDescriptor {
    /// Surface node (weak: may be removed from the graph later)
    pub node: NodeKey,
    /// World-space axis-aligned bounds of the surface subtree
    pub bounds: AABB,
    /// Centre of `bounds`
    pub centroid: Vec3,
    /// Unit outward normal
    pub normal: Vec3,
    /// World rotation of the surface node
    pub rotation: Quat,
    /// Local axis the normal was derived from
    pub front_axis: LocalAxis,
    /// Extent along the content's right direction
    pub width: f32,
    /// Extent along the content's up direction
    pub height: f32,
}

impl SurfaceDescriptor {
    /// Measure the surface rooted at `node`.
    ///
    /// Width and height are taken in the node's own frame and scaled by the
    /// world scale on those axes, so a tilted screen keeps its true size.
    /// Returns `None` for a stale key, a subtree without geometry, or a
    /// fully degenerate world transform.
    pub fn compute(graph: &SceneGraph, node: NodeKey, front_axis: LocalAxis) -> Option<Self> {
        let world = graph.world_matrix(node)?;
        let bounds = compute_world_bounding_box(graph, node);
        if bounds.is_empty() {
            return None;
        }
        let rotation = compute_world_rotation(graph, node)?;
        let normal = (rotation * front_axis.vector()).try_normalize()?;

        let basis = Mat3::from_mat4(world);
        let world_scale = Vec3::new(
            basis.x_axis.length(),
            basis.y_axis.length(),
            basis.z_axis.length(),
        );
        let local_size = compute_local_bounding_box(graph, node).size() * world_scale;
        let width = local_size.dot(front_axis.right().abs());
        let height = local_size.dot(front_axis.up().abs());

        Some(Self {
            node,
            bounds,
            centroid: bounds.center(),
            normal,
            rotation,
            front_axis,
            width,
            height,
        })
    }

    /// Rotation taking a +Z-facing content plane onto the surface front.
    pub fn content_rotation(&self) -> Quat {
        (self.rotation * self.front_axis.alignment()).normalize()
    }

    /// World direction of the content's up axis.
    pub fn up(&self) -> Vec3 {
        self.content_rotation() * Vec3::Y
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
