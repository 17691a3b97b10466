use glam::Vec3;
use super::*;

const CENTROID: Vec3 = Vec3::new(0.0, 1.0, 0.0);

// ============================================================================
// Hard gate
// ============================================================================

#[test]
fn test_camera_in_front_is_visible() {
    let gate = VisibilityGate::new(0.0, 0.0);
    let d = gate.evaluate(CENTROID, Vec3::Z, Vec3::new(0.0, 1.0, 3.0));
    assert!(d.visible);
    assert_eq!(d.opacity, 1.0);
    assert!((d.facing - 1.0).abs() < 1e-6);
}

#[test]
fn test_camera_behind_is_hidden() {
    let gate = VisibilityGate::new(0.0, 0.0);
    let d = gate.evaluate(CENTROID, Vec3::Z, Vec3::new(0.0, 1.0, -3.0));
    assert!(!d.visible);
    assert_eq!(d.opacity, 0.0);
}

#[test]
fn test_edge_on_is_hidden() {
    let gate = VisibilityGate::new(0.0, 0.0);
    let d = gate.evaluate(CENTROID, Vec3::Z, Vec3::new(3.0, 1.0, 0.0));
    assert!(!d.visible);
}

#[test]
fn test_threshold_boundary() {
    let gate = VisibilityGate::new(0.5, 0.0);
    // 60 degrees off the normal gives a facing of exactly 0.5
    let angle = 60f32.to_radians();
    let eps = 0.01;

    let inside = Vec3::new((angle - eps).sin(), 0.0, (angle - eps).cos()) * 4.0 + CENTROID;
    let outside = Vec3::new((angle + eps).sin(), 0.0, (angle + eps).cos()) * 4.0 + CENTROID;

    assert!(gate.evaluate(CENTROID, Vec3::Z, inside).visible);
    assert!(!gate.evaluate(CENTROID, Vec3::Z, outside).visible);
}

#[test]
fn test_unnormalized_normal_is_accepted() {
    let gate = VisibilityGate::new(0.0, 0.0);
    let d = gate.evaluate(CENTROID, Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 1.0, 2.0));
    assert!((d.facing - 1.0).abs() < 1e-6);
}

// ============================================================================
// Degenerate input
// ============================================================================

#[test]
fn test_camera_at_centroid_is_hidden() {
    let gate = VisibilityGate::new(0.0, 0.0);
    assert_eq!(gate.evaluate(CENTROID, Vec3::Z, CENTROID), VisibilityDecision::HIDDEN);
}

#[test]
fn test_zero_normal_is_hidden() {
    let gate = VisibilityGate::new(-1.0, 0.0);
    assert!(!gate.evaluate(CENTROID, Vec3::ZERO, Vec3::new(0.0, 1.0, 2.0)).visible);
}

// ============================================================================
// Fade
// ============================================================================

#[test]
fn test_fade_ramps_opacity() {
    let gate = VisibilityGate::new(0.0, 0.5);
    let angle = 75f32.to_radians();
    let camera = Vec3::new(angle.sin(), 0.0, angle.cos()) * 3.0 + CENTROID;
    let d = gate.evaluate(CENTROID, Vec3::Z, camera);

    assert!(d.visible);
    let expected = angle.cos() / 0.5;
    assert!((d.opacity - expected).abs() < 1e-4);
    assert!(d.opacity > 0.0 && d.opacity < 1.0);
}

#[test]
fn test_fade_saturates_head_on() {
    let gate = VisibilityGate::new(0.0, 0.5);
    let d = gate.evaluate(CENTROID, Vec3::Z, Vec3::new(0.0, 1.0, 3.0));
    assert_eq!(d.opacity, 1.0);
}

#[test]
fn test_negative_fade_range_disables_fade() {
    let gate = VisibilityGate::new(0.0, -1.0);
    let d = gate.evaluate(CENTROID, Vec3::Z, Vec3::new(2.0, 1.0, 0.5));
    assert!(d.visible);
    assert_eq!(d.opacity, 1.0);
}
