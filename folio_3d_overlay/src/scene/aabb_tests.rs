use glam::{Mat4, Quat, Vec3};
use super::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_empty_box() {
    let b = AABB::EMPTY;
    assert!(b.is_empty());
    assert_eq!(b.size(), Vec3::ZERO);
    assert_eq!(b.center(), Vec3::ZERO);
    assert_eq!(b.max_dimension(), 0.0);
}

#[test]
fn test_from_points() {
    let b = AABB::from_points(&[
        Vec3::new(1.0, -2.0, 0.5),
        Vec3::new(-1.0, 3.0, 0.0),
        Vec3::new(0.0, 0.0, -0.5),
    ]);
    assert_eq!(b.min, Vec3::new(-1.0, -2.0, -0.5));
    assert_eq!(b.max, Vec3::new(1.0, 3.0, 0.5));
    assert_eq!(b.max_dimension(), 5.0);
}

#[test]
fn test_from_points_empty_slice_is_empty() {
    assert!(AABB::from_points(&[]).is_empty());
}

#[test]
fn test_from_center_size() {
    let b = AABB::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.2, 0.0));
    assert!(approx(b.min, Vec3::new(-1.0, 0.4, 0.0)));
    assert!(approx(b.max, Vec3::new(1.0, 1.6, 0.0)));
    assert!(!b.is_empty(), "flat boxes are not empty");
}

// ============================================================================
// Union / expand
// ============================================================================

#[test]
fn test_union_with_empty_is_identity() {
    let b = AABB::new(Vec3::ZERO, Vec3::ONE);
    assert_eq!(b.union(&AABB::EMPTY), b);
    assert_eq!(AABB::EMPTY.union(&b), b);
}

#[test]
fn test_union_disjoint() {
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let b = AABB::new(Vec3::splat(2.0), Vec3::splat(3.0));
    let u = a.union(&b);
    assert_eq!(u.min, Vec3::ZERO);
    assert_eq!(u.max, Vec3::splat(3.0));
}

// ============================================================================
// transformed
// ============================================================================

#[test]
fn test_transformed_translation_scale() {
    let b = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let m = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 1.0, 0.5),
        Quat::IDENTITY,
        Vec3::new(0.0, 5.0, 0.0),
    );
    let t = b.transformed(&m);
    assert!(approx(t.min, Vec3::new(-2.0, 4.0, -0.5)));
    assert!(approx(t.max, Vec3::new(2.0, 6.0, 0.5)));
}

#[test]
fn test_transformed_rotation_is_tight() {
    let b = AABB::new(Vec3::new(-1.0, -0.5, 0.0), Vec3::new(1.0, 0.5, 0.0));
    let m = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let t = b.transformed(&m);
    // X extent moves onto Z
    assert!(approx(t.min, Vec3::new(0.0, -0.5, -1.0)));
    assert!(approx(t.max, Vec3::new(0.0, 0.5, 1.0)));
}

#[test]
fn test_transformed_empty_stays_empty() {
    let t = AABB::EMPTY.transformed(&Mat4::from_translation(Vec3::ONE));
    assert!(t.is_empty());
}

// ============================================================================
// contains / intersects
// ============================================================================

#[test]
fn test_contains_and_intersects() {
    let outer = AABB::new(Vec3::splat(-2.0), Vec3::splat(2.0));
    let inner = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let apart = AABB::new(Vec3::splat(3.0), Vec3::splat(4.0));

    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));
    assert!(outer.intersects(&inner));
    assert!(!outer.intersects(&apart));
}
