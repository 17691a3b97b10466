/// Model normalization: canonical size, centred on the origin, resting on
/// the ground plane.

use glam::Vec3;
use crate::error::Result;
use crate::overlay_bail;
use crate::scene::{compute_world_bounding_box, NodeKey, SceneGraph, AABB};

/// Determinant under which a parent transform is considered singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// What the normalizer did to a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeReport {
    /// Uniform factor multiplied into the model root's scale
    pub scale_factor: f32,
    /// World-space offset applied after scaling
    pub offset: Vec3,
    /// World bounding box after normalization
    pub bounds: AABB,
}

/// Scales and re-centres a loaded model subtree in place.
#[derive(Debug, Clone, Copy)]
pub struct ModelNormalizer {
    target_size: f32,
}

impl ModelNormalizer {
    pub fn new(target_size: f32) -> Self {
        Self { target_size }
    }

    pub fn target_size(&self) -> f32 {
        self.target_size
    }

    /// Normalize the subtree rooted at `model`.
    ///
    /// The bounding box is measured twice: once to derive the scale, and
    /// again after the scale is applied, before the translation is derived
    /// from it.
    ///
    /// # Errors
    ///
    /// `LoadFailure` when the model has no measurable geometry,
    /// `InvalidNode` when `model` is stale or its parent is singular.
    pub fn normalize(&self, graph: &mut SceneGraph, model: NodeKey) -> Result<NormalizeReport> {
        const SOURCE: &str = "folio3d::Normalizer";

        let Some(node) = graph.node(model) else {
            overlay_bail!(SOURCE, InvalidNode, "model node {:?} is not in the graph", model);
        };
        let mut transform = *node.transform();
        let parent = node.parent();

        let before = compute_world_bounding_box(graph, model);
        let max_dimension = before.max_dimension();
        if before.is_empty() || !(max_dimension.is_finite() && max_dimension > 0.0) {
            overlay_bail!(SOURCE, LoadFailure, "model '{}' has no measurable geometry", node.name());
        }

        // 1. scale
        let scale_factor = self.target_size / max_dimension;
        transform.scale *= scale_factor;
        graph.set_transform(model, transform)?;

        // 2. re-measure, then translate: horizontal centre to origin, floor to y = 0
        let scaled = compute_world_bounding_box(graph, model);
        let center = scaled.center();
        let offset = Vec3::new(-center.x, -scaled.min.y, -center.z);

        let parent_world = parent
            .and_then(|p| graph.world_matrix(p))
            .unwrap_or(glam::Mat4::IDENTITY);
        if parent_world.determinant().abs() <= SINGULAR_EPSILON {
            overlay_bail!(SOURCE, InvalidNode, "parent of model {:?} has a singular transform", model);
        }
        transform.translation += parent_world.inverse().transform_vector3(offset);
        graph.set_transform(model, transform)?;

        let bounds = compute_world_bounding_box(graph, model);
        crate::overlay_debug!(
            SOURCE,
            "normalized model: x{:.4}, size {:?} -> {:?}",
            scale_factor,
            before.size(),
            bounds.size()
        );

        Ok(NormalizeReport { scale_factor, offset, bounds })
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
