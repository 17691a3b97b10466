//! Scene module
//!
//! Node arena, geometry, bounding boxes, and the world-space geometry
//! utilities the compositor builds on.

mod aabb;
mod geometry;
mod node;
mod scene_graph;
mod spatial;

pub use aabb::AABB;
pub use geometry::Geometry;
pub use node::{Material, ModelNode, Node, NodeFlags, NodeKey, Transform};
pub use scene_graph::{DepthFirst, SceneGraph};
pub use spatial::{
    compute_centroid, compute_local_bounding_box, compute_size, compute_world_bounding_box,
    compute_world_normal, compute_world_rotation, LocalAxis,
};
