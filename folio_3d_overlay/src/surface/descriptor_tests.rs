use glam::{Quat, Vec3};
use super::*;
use crate::scene::{Geometry, ModelNode, Node, Transform};

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

fn surface_graph(transform: Transform) -> (SceneGraph, NodeKey) {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let key = graph
        .add_node(root, Node::new("Screen_01").with_transform(transform).with_geometry(Geometry::plane(2.0, 1.2)))
        .unwrap();
    (graph, key)
}

// ============================================================================
// Axis-aligned surface
// ============================================================================

#[test]
fn test_identity_surface() {
    let (graph, key) = surface_graph(Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)));
    let d = SurfaceDescriptor::compute(&graph, key, LocalAxis::PosZ).unwrap();

    assert!(approx(d.centroid, Vec3::new(0.0, 1.0, 0.0)));
    assert!(approx(d.normal, Vec3::Z));
    assert!((d.width - 2.0).abs() < 1e-5);
    assert!((d.height - 1.2).abs() < 1e-5);
    assert!(approx(d.up(), Vec3::Y));
}

#[test]
fn test_normal_is_unit_length() {
    let (graph, key) = surface_graph(
        Transform::from_rotation(Quat::from_rotation_x(0.3)).with_scale(Vec3::new(4.0, 0.2, 9.0)),
    );
    let d = SurfaceDescriptor::compute(&graph, key, LocalAxis::PosZ).unwrap();
    assert!((d.normal.length() - 1.0).abs() < 1e-5);
}

// ============================================================================
// Tilted / scaled surfaces
// ============================================================================

#[test]
fn test_tilted_surface_keeps_true_size() {
    // a laptop lid leaned back by 20 degrees
    let (graph, key) = surface_graph(Transform::from_rotation(Quat::from_rotation_x(-20f32.to_radians())));
    let d = SurfaceDescriptor::compute(&graph, key, LocalAxis::PosZ).unwrap();

    assert!((d.width - 2.0).abs() < 1e-4);
    assert!((d.height - 1.2).abs() < 1e-4);
    // world box height shrinks, the descriptor does not
    assert!(d.bounds.size().y < 1.2);
}

#[test]
fn test_parent_scale_applies_to_size() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let model = graph
        .attach(root, ModelNode::new("tv")
            .with_transform(Transform::from_scale(Vec3::new(0.5, 2.0, 1.0)))
            .with_child(ModelNode::new("display").with_geometry(Geometry::plane(2.0, 1.0))))
        .unwrap();
    let display = graph.node(model).unwrap().children()[0];

    let d = SurfaceDescriptor::compute(&graph, display, LocalAxis::PosZ).unwrap();
    assert!((d.width - 1.0).abs() < 1e-5);
    assert!((d.height - 2.0).abs() < 1e-5);
}

#[test]
fn test_neg_z_front_axis() {
    let (graph, key) = surface_graph(Transform::IDENTITY);
    let d = SurfaceDescriptor::compute(&graph, key, LocalAxis::NegZ).unwrap();

    assert!(approx(d.normal, Vec3::NEG_Z));
    assert!((d.width - 2.0).abs() < 1e-5);
    assert!(approx(d.content_rotation() * Vec3::Z, Vec3::NEG_Z));
    assert!(approx(d.up(), Vec3::Y));
}

#[test]
fn test_flat_surface_facing_up() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let key = graph
        .add_node(root, Node::new("table_display").with_geometry(Geometry::cuboid(2.0, 0.0, 1.2)))
        .unwrap();
    let d = SurfaceDescriptor::compute(&graph, key, LocalAxis::PosY).unwrap();

    assert!(approx(d.normal, Vec3::Y));
    assert!((d.width - 2.0).abs() < 1e-5);
    assert!((d.height - 1.2).abs() < 1e-5);
}

// ============================================================================
// Degenerate input
// ============================================================================

#[test]
fn test_degenerate_scale_gives_none() {
    let (graph, key) = surface_graph(Transform::from_scale(Vec3::ZERO));
    assert!(SurfaceDescriptor::compute(&graph, key, LocalAxis::PosZ).is_none());
}

#[test]
fn test_no_geometry_gives_none() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let key = graph.add_node(root, Node::new("empty")).unwrap();
    assert!(SurfaceDescriptor::compute(&graph, key, LocalAxis::PosZ).is_none());
}
