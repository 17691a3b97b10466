use super::*;
use crate::scene::{Geometry, ModelNode};

fn candidates() -> Vec<String> {
    vec!["screen".to_string(), "display".to_string(), "monitor".to_string()]
}

fn mesh(name: &str) -> ModelNode {
    ModelNode::new(name).with_geometry(Geometry::plane(1.0, 1.0))
}

fn graph_with(model: ModelNode) -> (SceneGraph, NodeKey) {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let key = graph.attach(root, model).unwrap();
    (graph, key)
}

fn name_of(graph: &SceneGraph, key: NodeKey) -> &str {
    graph.node(key).unwrap().name()
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_case_insensitive_substring_match() {
    let (graph, model) = graph_with(
        ModelNode::new("laptop").with_child(mesh("Base")).with_child(mesh("Laptop_SCREEN_glass")),
    );
    let (key, index) = find_surface_node(&graph, model, &candidates()).unwrap();
    assert_eq!(name_of(&graph, key), "Laptop_SCREEN_glass");
    assert_eq!(index, 0);
}

#[test]
fn test_candidate_order_beats_traversal_order() {
    // "display" comes first in traversal, but "screen" ranks higher
    let (graph, model) = graph_with(
        ModelNode::new("desk").with_child(mesh("display_frame")).with_child(mesh("screen")),
    );
    let (key, index) = find_surface_node(&graph, model, &candidates()).unwrap();
    assert_eq!(name_of(&graph, key), "screen");
    assert_eq!(index, 0);
}

#[test]
fn test_first_encountered_wins_within_candidate() {
    let (graph, model) = graph_with(
        ModelNode::new("wall")
            .with_child(ModelNode::new("left").with_child(mesh("Screen_A")))
            .with_child(mesh("Screen_B")),
    );
    let (key, _) = find_surface_node(&graph, model, &candidates()).unwrap();
    assert_eq!(name_of(&graph, key), "Screen_A");
}

#[test]
fn test_only_renderable_leaves_are_considered() {
    // the group is named "screen" but has no geometry
    let (graph, model) = graph_with(
        ModelNode::new("m").with_child(ModelNode::new("screen_group").with_child(mesh("monitor_glass"))),
    );
    let (key, index) = find_surface_node(&graph, model, &candidates()).unwrap();
    assert_eq!(name_of(&graph, key), "monitor_glass");
    assert_eq!(index, 2);
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_no_match_falls_back_to_whole_model() {
    let (graph, model) = graph_with(ModelNode::new("brain").with_child(mesh("cortex")));
    let located = SurfaceLocator::new(candidates()).locate(&graph, model);

    assert!(located.is_fallback());
    assert_eq!(located.node, model);
}

#[test]
fn test_named_match_reports_candidate() {
    let (graph, model) = graph_with(ModelNode::new("laptop").with_child(mesh("Screen_01")));
    let located = SurfaceLocator::new(candidates()).locate(&graph, model);

    assert_eq!(
        located.kind,
        SurfaceKind::Named { candidate: "screen".to_string(), name: "Screen_01".to_string() }
    );
}
