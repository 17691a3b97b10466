/// Screen-space mapper: places the 2D content plane onto the surface.
///
/// Steps, each depending on the previous:
/// 1. surface bounds and centroid (from the descriptor)
/// 2. outward normal (from the descriptor)
/// 3. position = centroid + normal * front_offset
/// 4. rotation = surface world rotation composed with the front-axis
///    alignment (a half turn about local up for a -Z front)
/// 5. scale = surface extent / content pixels * margin, per axis
/// 6. occluder plane at centroid - normal * back_offset, same rotation,
///    sized to the surface

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use crate::config::CompositorConfig;
use crate::error::Result;
use crate::scene::{Geometry, Material, Node, NodeFlags, NodeKey, SceneGraph, Transform};
use crate::surface::SurfaceDescriptor;
use super::content::ContentSize;

/// Where the content plane goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub position: Vec3,
    pub rotation: Quat,
    /// World units per content pixel, per axis
    pub scale: Vec2,
}

impl OverlayPlacement {
    /// Transform from content pixel space to world space.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale.extend(1.0), self.rotation, self.position)
    }

    /// World direction the content's front face looks towards.
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Where the occluder plane goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccluderPlacement {
    pub position: Vec3,
    pub rotation: Quat,
    /// Full width and height in world units
    pub size: Vec2,
}

impl OccluderPlacement {
    /// Transform applied to a unit plane node.
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
            scale: self.size.extend(1.0),
        }
    }
}

/// Result of one mapping pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingOutcome {
    pub placement: OverlayPlacement,
    pub occluder: OccluderPlacement,
    /// Content reported a zero dimension; scale fell back to (1, 1)
    pub degenerate_content: bool,
    pub content_size: ContentSize,
}

/// Computes overlay and occluder placements. Pure apart from logging.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSpaceMapper {
    front_offset: f32,
    back_offset: f32,
    margin: Vec2,
}

impl ScreenSpaceMapper {
    pub fn new(front_offset: f32, back_offset: f32, margin_x: f32, margin_y: f32) -> Self {
        Self { front_offset, back_offset, margin: Vec2::new(margin_x, margin_y) }
    }

    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::new(config.front_offset, config.back_offset, config.margin_x, config.margin_y)
    }

    /// Map `content` onto `surface`.
    ///
    /// Zero content dimensions never divide: the scale defaults to (1, 1)
    /// and a warning is logged.
    pub fn map(&self, surface: &SurfaceDescriptor, content: ContentSize) -> MappingOutcome {
        let rotation = surface.content_rotation();
        let position = surface.centroid + surface.normal * self.front_offset;

        let degenerate_content = content.is_degenerate();
        let scale = if degenerate_content {
            crate::overlay_warn!(
                "folio3d::Mapper",
                "content element is {}x{} px; using unit scale until it is laid out",
                content.width,
                content.height
            );
            Vec2::ONE
        } else {
            let pixels = Vec2::new(content.width as f32, content.height as f32);
            Vec2::new(surface.width, surface.height) / pixels * self.margin
        };

        let occluder = OccluderPlacement {
            position: surface.centroid - surface.normal * self.back_offset,
            rotation,
            size: Vec2::new(surface.width, surface.height),
        };

        MappingOutcome {
            placement: OverlayPlacement { position, rotation, scale },
            occluder,
            degenerate_content,
            content_size: content,
        }
    }

    /// Create the occluder node under the scene root, or move the existing
    /// one. Re-mapping never adds a second occluder.
    pub fn upsert_occluder(
        &self,
        graph: &mut SceneGraph,
        existing: Option<NodeKey>,
        occluder: &OccluderPlacement,
    ) -> Result<NodeKey> {
        if let Some(key) = existing.filter(|k| graph.contains(*k)) {
            graph.set_transform(key, occluder.transform())?;
            return Ok(key);
        }

        let node = Node::new("overlay_occluder")
            .with_transform(occluder.transform())
            .with_geometry(Geometry::plane(1.0, 1.0))
            .with_material(Material::opaque(Vec4::new(0.0, 0.0, 0.0, 1.0)))
            .with_flags(NodeFlags::VISIBLE | NodeFlags::OCCLUDER);
        let root = graph.root();
        graph.add_node(root, node)
    }
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
