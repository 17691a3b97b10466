/// World-space geometry utilities over scene graph subtrees.
///
/// Every function here reads world data through
/// [`SceneGraph::world_matrix`], which recomposes ancestor transforms at
/// read time, so results are never stale after an ancestor moves.

use std::f32::consts::{FRAC_PI_2, PI};
use glam::{Mat3, Mat4, Quat, Vec3};
use super::aabb::AABB;
use super::node::NodeKey;
use super::scene_graph::SceneGraph;

/// Squared column length under which a basis vector counts as collapsed.
const DEGENERATE_EPSILON: f32 = 1e-12;

// ===== LOCAL AXIS =====

/// A signed principal axis of a node's local frame.
///
/// Names which local axis of a surface mesh is its front. Each axis
/// carries the alignment rotation taking a content plane (facing +Z,
/// up +Y) onto it while keeping the content upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalAxis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl LocalAxis {
    pub fn vector(self) -> Vec3 {
        match self {
            LocalAxis::PosX => Vec3::X,
            LocalAxis::NegX => Vec3::NEG_X,
            LocalAxis::PosY => Vec3::Y,
            LocalAxis::NegY => Vec3::NEG_Y,
            LocalAxis::PosZ => Vec3::Z,
            LocalAxis::NegZ => Vec3::NEG_Z,
        }
    }

    pub fn negated(self) -> Self {
        match self {
            LocalAxis::PosX => LocalAxis::NegX,
            LocalAxis::NegX => LocalAxis::PosX,
            LocalAxis::PosY => LocalAxis::NegY,
            LocalAxis::NegY => LocalAxis::PosY,
            LocalAxis::PosZ => LocalAxis::NegZ,
            LocalAxis::NegZ => LocalAxis::PosZ,
        }
    }

    /// Rotation taking +Z onto this axis.
    ///
    /// `NegZ` is the half turn about local up; the X axes turn about up as
    /// well, the Y axes tip about local right.
    pub fn alignment(self) -> Quat {
        match self {
            LocalAxis::PosZ => Quat::IDENTITY,
            LocalAxis::NegZ => Quat::from_rotation_y(PI),
            LocalAxis::PosX => Quat::from_rotation_y(FRAC_PI_2),
            LocalAxis::NegX => Quat::from_rotation_y(-FRAC_PI_2),
            LocalAxis::PosY => Quat::from_rotation_x(-FRAC_PI_2),
            LocalAxis::NegY => Quat::from_rotation_x(FRAC_PI_2),
        }
    }

    /// Local direction of the content's +X once aligned.
    pub fn right(self) -> Vec3 {
        snap(self.alignment() * Vec3::X)
    }

    /// Local direction of the content's +Y once aligned.
    pub fn up(self) -> Vec3 {
        snap(self.alignment() * Vec3::Y)
    }
}

/// Round an almost-principal direction onto the exact axis.
fn snap(v: Vec3) -> Vec3 {
    v.round()
}

// ===== BOUNDS =====

/// World-space box enclosing all geometry in the subtree rooted at `key`.
///
/// Each descendant's local bounds are carried through its full world
/// transform. Empty for stale keys or subtrees without geometry.
pub fn compute_world_bounding_box(graph: &SceneGraph, key: NodeKey) -> AABB {
    graph
        .depth_first(key)
        .filter_map(|k| {
            let geometry = graph.node(k)?.geometry()?;
            let world = graph.world_matrix(k)?;
            Some(geometry.bounds().transformed(&world))
        })
        .fold(AABB::EMPTY, |acc, b| acc.union(&b))
}

/// Box enclosing the subtree's geometry, expressed in `key`'s own frame
/// (the node's own transform excluded, descendants' included).
pub fn compute_local_bounding_box(graph: &SceneGraph, key: NodeKey) -> AABB {
    fn visit(graph: &SceneGraph, key: NodeKey, to_root: Mat4, acc: &mut AABB) {
        let Some(node) = graph.node(key) else { return };
        if let Some(geometry) = node.geometry() {
            *acc = acc.union(&geometry.bounds().transformed(&to_root));
        }
        for &child in node.children() {
            if let Some(child_node) = graph.node(child) {
                visit(graph, child, to_root * child_node.transform().to_matrix(), acc);
            }
        }
    }

    let mut bounds = AABB::EMPTY;
    visit(graph, key, Mat4::IDENTITY, &mut bounds);
    bounds
}

/// Midpoint of a box.
pub fn compute_centroid(bounds: &AABB) -> Vec3 {
    bounds.center()
}

/// Full extents of a box.
pub fn compute_size(bounds: &AABB) -> Vec3 {
    bounds.size()
}

// ===== ORIENTATION =====

/// Rotational part of a node's world transform.
///
/// Scale and shear are stripped by orthonormalising the basis. A single
/// collapsed axis is rebuilt from the other two; `None` only when all
/// three axes collapse (or the key is stale).
pub fn compute_world_rotation(graph: &SceneGraph, key: NodeKey) -> Option<Quat> {
    let world = graph.world_matrix(key)?;
    rotation_of(&Mat3::from_mat4(world))
}

/// World direction of `local_axis` under the node's world rotation.
///
/// Returns `Vec3::ZERO` when every axis of the world transform is
/// degenerate; callers must guard against it.
pub fn compute_world_normal(graph: &SceneGraph, key: NodeKey, local_axis: Vec3) -> Vec3 {
    match compute_world_rotation(graph, key) {
        Some(rotation) => (rotation * local_axis).normalize_or_zero(),
        None => Vec3::ZERO,
    }
}

pub(crate) fn rotation_of(m: &Mat3) -> Option<Quat> {
    let mut cols = [m.x_axis, m.y_axis, m.z_axis];
    let live = cols.map(|c| c.is_finite() && c.length_squared() > DEGENERATE_EPSILON);

    match live.iter().filter(|l| **l).count() {
        0 => return None,
        1 => {
            let i = live.iter().position(|l| *l)?;
            let a = cols[i].normalize();
            let b = a.any_orthonormal_vector();
            cols[(i + 1) % 3] = b;
            cols[(i + 2) % 3] = a.cross(b);
        }
        2 => {
            let i = live.iter().position(|l| !*l)?;
            cols[i] = cols[(i + 1) % 3].cross(cols[(i + 2) % 3]);
        }
        _ => {}
    }

    let x = cols[0].try_normalize()?;
    let y = (cols[1] - x * x.dot(cols[1]))
        .try_normalize()
        .unwrap_or_else(|| x.any_orthonormal_vector());
    let z = x.cross(y);

    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}

#[cfg(test)]
#[path = "spatial_tests.rs"]
mod tests;
