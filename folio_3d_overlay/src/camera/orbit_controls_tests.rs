use glam::Vec3;
use super::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

fn framed_camera() -> Camera {
    let mut camera = Camera::new(75f32.to_radians(), 0.1, 1000.0);
    camera.position = Vec3::new(0.0, 1.0, 3.0);
    camera.target = Vec3::new(0.0, 1.0, 0.0);
    camera
}

// ============================================================================
// Orbit coordinates
// ============================================================================

#[test]
fn test_orbit_round_trip() {
    let position = Vec3::new(1.5, 2.0, -0.5);
    let target = Vec3::new(0.2, 0.4, 0.1);
    let orbit = Orbit::from_positions(position, target).unwrap();
    assert!(approx(target + orbit.offset(), position));
}

#[test]
fn test_orbit_coincident_points() {
    assert!(Orbit::from_positions(Vec3::ONE, Vec3::ONE).is_none());
}

// ============================================================================
// Sync
// ============================================================================

#[test]
fn test_sync_does_not_move_camera() {
    let mut camera = framed_camera();
    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&camera);

    assert!(!controls.is_moving());
    assert!(!controls.update(&mut camera));
    assert!(approx(camera.position, Vec3::new(0.0, 1.0, 3.0)));
    assert_eq!(controls.target(), Vec3::new(0.0, 1.0, 0.0));
}

// ============================================================================
// Damping
// ============================================================================

#[test]
fn test_rotate_is_damped() {
    let mut camera = framed_camera();
    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&camera);

    controls.rotate(1.0, 0.0);
    assert!(controls.update(&mut camera));
    assert!((controls.current().yaw - 0.1).abs() < 1e-5);
    assert!((controls.goal().yaw - 1.0).abs() < 1e-6);
}

#[test]
fn test_motion_settles_on_goal() {
    let mut camera = framed_camera();
    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&camera);
    controls.rotate(0.5, 0.2);
    controls.dolly(0.5);

    let mut ticks = 0;
    while controls.update(&mut camera) {
        ticks += 1;
        assert!(ticks < 1000, "controls never settled");
    }
    assert_eq!(controls.current(), controls.goal());
    let distance = (camera.position - camera.target).length();
    assert!((distance - 1.5).abs() < 1e-3);
}

#[test]
fn test_full_damping_jumps() {
    let mut camera = framed_camera();
    let mut controls = OrbitControls::new(1.0, 0.1);
    controls.sync_from_camera(&camera);
    controls.rotate(std::f32::consts::FRAC_PI_2, 0.0);

    controls.update(&mut camera);
    assert!(approx(camera.position, Vec3::new(3.0, 1.0, 0.0)));
    assert!(!controls.is_moving());
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_pitch_clamped_away_from_pole() {
    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&framed_camera());
    controls.rotate(0.0, 10.0);
    assert!(controls.goal().pitch < std::f32::consts::FRAC_PI_2);
}

#[test]
fn test_orbit_up_near_poles() {
    let level = Orbit { yaw: 0.0, pitch: 0.3, distance: 2.0 };
    assert_eq!(level.up(), Vec3::Y);

    let above = Orbit { yaw: 0.0, pitch: 1.55, distance: 2.0 };
    assert!(approx(above.up(), Vec3::NEG_Z));

    let below = Orbit { yaw: std::f32::consts::FRAC_PI_2, pitch: -1.55, distance: 2.0 };
    assert!(approx(below.up(), Vec3::X));
}

#[test]
fn test_orbit_down_from_top_view_keeps_view_finite() {
    // framed straight down on a flat surface, up along the surface's -Z
    let mut camera = Camera::new(75f32.to_radians(), 0.1, 1000.0);
    camera.position = Vec3::new(0.0, 3.0, 0.0);
    camera.target = Vec3::ZERO;
    camera.up = Vec3::NEG_Z;

    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&camera);
    controls.rotate(0.0, -controls.goal().pitch);

    for _ in 0..400 {
        controls.update(&mut camera);
        assert!(camera.view_matrix().is_finite());
    }
    assert!(controls.current().pitch.abs() < 1e-4);
    assert!(approx(camera.position, Vec3::new(0.0, 0.0, 3.0)));
    assert_eq!(camera.up, Vec3::Y);
}

#[test]
fn test_dolly_respects_min_distance() {
    let mut controls = OrbitControls::new(0.1, 0.5);
    controls.sync_from_camera(&framed_camera());
    controls.dolly(0.001);
    assert_eq!(controls.goal().distance, 0.5);
}

#[test]
fn test_invalid_input_ignored() {
    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&framed_camera());
    let before = controls.goal();

    controls.rotate(f32::NAN, 0.0);
    controls.dolly(0.0);
    controls.dolly(-2.0);
    assert_eq!(controls.goal(), before);
}

#[test]
fn test_disabled_controls_ignore_input() {
    let mut controls = OrbitControls::new(0.1, 0.1);
    controls.sync_from_camera(&framed_camera());
    controls.set_enabled(false);
    controls.rotate(1.0, 1.0);
    assert!(!controls.is_moving());
}
