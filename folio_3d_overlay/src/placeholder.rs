//! Placeholder models shown when the real model cannot be loaded.
//!
//! The kind is picked from the model URI (see
//! [`CompositorConfig::placeholder_for`](crate::config::CompositorConfig::placeholder_for)),
//! built procedurally, normalized like any loaded model, then kept in
//! idle motion by [`IdleAnimator`].

use glam::{EulerRot, Quat, Vec3, Vec4};
use crate::config::IdleAnimation;
use crate::error::Result;
use crate::scene::{Geometry, Material, ModelNode, NodeKey, SceneGraph, Transform};

/// Procedural stand-in shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Translucent wireframe sphere
    WireSphere,
    /// A row of five small primitives
    Shapes,
    /// Translucent torus
    Torus,
    /// Plain cube
    Cube,
}

impl PlaceholderKind {
    pub fn name(self) -> &'static str {
        match self {
            PlaceholderKind::WireSphere => "placeholder_wire_sphere",
            PlaceholderKind::Shapes => "placeholder_shapes",
            PlaceholderKind::Torus => "placeholder_torus",
            PlaceholderKind::Cube => "placeholder_cube",
        }
    }
}

/// Spacing between primitives of the `Shapes` row.
const SHAPES_SPACING: f32 = 0.8;

const SHAPES_PALETTE: [u32; 5] = [0xf97316, 0x22c55e, 0x0ea5e9, 0xeab308, 0xec4899];

fn rgb(hex: u32) -> Vec4 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec4::new(channel(16), channel(8), channel(0), 1.0)
}

/// Build the model tree for `kind`.
pub fn build_placeholder(kind: PlaceholderKind) -> ModelNode {
    let root = ModelNode::new(kind.name());
    match kind {
        PlaceholderKind::WireSphere => root.with_child(
            ModelNode::new("sphere")
                .with_geometry(Geometry::uv_sphere(1.0, 16, 16))
                .with_material(Material::translucent(rgb(0x8b5cf6), 0.7).with_wireframe(true)),
        ),
        PlaceholderKind::Shapes => {
            let geometries = [
                Geometry::cuboid(0.5, 0.5, 0.5),
                Geometry::uv_sphere(0.3, 8, 8),
                Geometry::cone(0.3, 0.8, 6),
                Geometry::tetrahedron(0.4),
                Geometry::octahedron(0.3),
            ];
            let first = -SHAPES_SPACING * (geometries.len() as f32 - 1.0) * 0.5;
            geometries
                .into_iter()
                .zip(SHAPES_PALETTE)
                .enumerate()
                .fold(root, |root, (i, (geometry, color))| {
                    let x = first + SHAPES_SPACING * i as f32;
                    root.with_child(
                        ModelNode::new(format!("shape_{}", i))
                            .with_transform(Transform::from_translation(Vec3::new(x, 0.0, 0.0)))
                            .with_geometry(geometry)
                            .with_material(Material::translucent(rgb(color), 0.8)),
                    )
                })
        }
        PlaceholderKind::Torus => root.with_child(
            ModelNode::new("torus")
                .with_geometry(Geometry::torus(0.5, 0.2, 8, 16))
                .with_material(Material::translucent(rgb(0x3776ab), 0.9)),
        ),
        PlaceholderKind::Cube => root.with_child(
            ModelNode::new("cube")
                .with_geometry(Geometry::cuboid(1.0, 1.0, 1.0))
                .with_material(Material::opaque(rgb(0x64748b))),
        ),
    }
}

/// Per-shape motion of the `Shapes` row: each shape spins about Y a step
/// faster than the one before it and bobs one radian of phase later.
const SHAPES_SPIN: Vec3 = Vec3::new(0.48, 0.6, 0.0);
const SHAPES_SPIN_STEP: Vec3 = Vec3::new(0.0, 0.12, 0.0);
const SHAPES_BOB_AMPLITUDE: f32 = 0.12;

/// One animated node and the pose it moves around.
#[derive(Debug, Clone, Copy)]
struct Track {
    node: NodeKey,
    rest: Transform,
    motion: IdleAnimation,
    phase: f32,
}

impl Track {
    fn pose(&self, elapsed: f32) -> Transform {
        let angles = self.motion.spin * elapsed;
        let spin = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
        let bob = (elapsed * self.motion.bob_frequency + self.phase).sin() * self.motion.bob_amplitude;
        self.rest
            .with_rotation(self.rest.rotation * spin)
            .with_translation(self.rest.translation + Vec3::Y * bob)
    }
}

/// Spins and bobs a placeholder around its resting transform.
#[derive(Debug, Clone)]
pub struct IdleAnimator {
    node: NodeKey,
    tracks: Vec<Track>,
    elapsed: f32,
}

impl IdleAnimator {
    /// Animate `node` as one body, from its current transform.
    pub fn new(graph: &SceneGraph, node: NodeKey, animation: IdleAnimation) -> Option<Self> {
        let rest = *graph.node(node)?.transform();
        let track = Track { node, rest, motion: animation, phase: 0.0 };
        Some(Self { node, tracks: vec![track], elapsed: 0.0 })
    }

    /// Animator suited to a placeholder of `kind` rooted at `node`. The
    /// `Shapes` row moves each shape on its own; every other kind moves
    /// as one body.
    pub fn for_placeholder(
        graph: &SceneGraph,
        node: NodeKey,
        kind: PlaceholderKind,
        animation: IdleAnimation,
    ) -> Option<Self> {
        if kind != PlaceholderKind::Shapes {
            return Self::new(graph, node, animation);
        }

        let tracks = graph
            .node(node)?
            .children()
            .iter()
            .enumerate()
            .filter_map(|(i, &child)| {
                let rest = *graph.node(child)?.transform();
                let motion = IdleAnimation {
                    spin: SHAPES_SPIN + SHAPES_SPIN_STEP * i as f32,
                    bob_amplitude: SHAPES_BOB_AMPLITUDE,
                    bob_frequency: animation.bob_frequency,
                };
                Some(Track { node: child, rest, motion, phase: i as f32 })
            })
            .collect::<Vec<_>>();
        if tracks.is_empty() {
            return None;
        }
        Some(Self { node, tracks, elapsed: 0.0 })
    }

    /// Root of the animated placeholder.
    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt` seconds and write the animated transforms.
    pub fn advance(&mut self, graph: &mut SceneGraph, dt: f32) -> Result<()> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        for track in &self.tracks {
            graph.set_transform(track.node, track.pose(self.elapsed))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;
