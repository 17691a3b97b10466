/// Scene graph nodes, local transforms and loader-produced model trees.

use bitflags::bitflags;
use glam::{Mat4, Quat, Vec3, Vec4};
use slotmap::new_key_type;
use super::geometry::Geometry;

new_key_type! {
    /// Stable key for a node in a [`SceneGraph`](super::SceneGraph).
    ///
    /// Keys are weak: once the node is removed, lookups return `None`.
    pub struct NodeKey;
}

// ===== TRANSFORM =====

/// Local transform: scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self { rotation, ..Self::IDENTITY }
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self { scale, ..Self::IDENTITY }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ===== FLAGS =====

bitflags! {
    /// Per-node render flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node (and its subtree) is drawn
        const VISIBLE        = 1 << 0;
        /// Node casts shadows
        const CAST_SHADOW    = 1 << 1;
        /// Node receives shadows
        const RECEIVE_SHADOW = 1 << 2;
        /// Node is the opaque plane hiding the overlay from behind
        const OCCLUDER       = 1 << 3;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::VISIBLE
    }
}

// ===== MATERIAL =====

/// Minimal surface appearance consumed by the renderer seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGBA; alpha is multiplied with `opacity`
    pub color: Vec4,
    pub opacity: f32,
    /// When false only front faces are drawn
    pub double_sided: bool,
    pub wireframe: bool,
}

impl Material {
    pub fn opaque(color: Vec4) -> Self {
        Self { color, opacity: 1.0, double_sided: false, wireframe: false }
    }

    pub fn translucent(color: Vec4, opacity: f32) -> Self {
        Self { color, opacity, double_sided: false, wireframe: false }
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(Vec4::ONE)
    }
}

// ===== NODE =====

/// A node stored in a [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    transform: Transform,
    geometry: Option<Geometry>,
    material: Option<Material>,
    flags: NodeFlags,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            geometry: None,
            material: None,
            flags: NodeFlags::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Replace the local transform. Descendants' world transforms change
    /// with it; [`SceneGraph::world_matrix`](super::SceneGraph::world_matrix)
    /// always recomposes at read time.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: NodeFlags) {
        self.flags = flags;
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    /// A node is renderable when it carries geometry.
    pub fn is_renderable(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

// ===== MODEL TREE =====

/// Owned node tree handed over by a model loader.
///
/// Decoupled from the arena so that loaders can build it anywhere;
/// [`SceneGraph::attach`](super::SceneGraph::attach) instantiates it.
#[derive(Debug, Clone, Default)]
pub struct ModelNode {
    pub name: String,
    pub transform: Transform,
    pub geometry: Option<Geometry>,
    pub material: Option<Material>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_child(mut self, child: ModelNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ModelNode::node_count).sum::<usize>()
    }
}
