use glam::Mat4;
use super::*;
use crate::camera::Camera;
use crate::overlay::ContentSize;

fn renderer() -> HeadlessRenderer {
    HeadlessRenderer::new(PhysicalSize::new(800, 600))
}

fn uniforms() -> FrameUniforms {
    FrameUniforms::from_camera(&Camera::new(1.0, 0.1, 100.0))
}

fn overlay() -> OverlayDraw {
    OverlayDraw { world: Mat4::IDENTITY, opacity: 1.0, content_size: ContentSize::new(800, 480) }
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_counts_changes_only() {
    let mut r = renderer();
    assert!(!r.resize(PhysicalSize::new(800, 600)).unwrap());
    assert!(r.resize(PhysicalSize::new(1024, 768)).unwrap());
    for _ in 0..50 {
        assert!(!r.resize(PhysicalSize::new(1024, 768)).unwrap());
    }
    assert_eq!(r.stats().resizes, 1);
    assert_eq!(r.output_size(), PhysicalSize::new(1024, 768));
}

#[test]
fn test_resize_to_zero_ignored() {
    let mut r = renderer();
    assert!(!r.resize(PhysicalSize::new(0, 0)).unwrap());
    assert_eq!(r.output_size(), PhysicalSize::new(800, 600));
}

// ============================================================================
// Frame protocol
// ============================================================================

#[test]
fn test_two_pass_frame() {
    let mut r = renderer();
    r.begin_frame(&uniforms()).unwrap();
    r.draw_geometry(&[]).unwrap();
    r.draw_overlay(&overlay()).unwrap();
    r.end_frame().unwrap();

    let stats = r.stats();
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.geometry_passes, 1);
    assert_eq!(stats.overlay_passes, 1);
    assert_eq!(r.last_uniform_bytes().len(), std::mem::size_of::<FrameUniforms>());
    assert!(r.last_overlay().is_some());
}

#[test]
fn test_begin_twice_fails() {
    let mut r = renderer();
    r.begin_frame(&uniforms()).unwrap();
    assert!(r.begin_frame(&uniforms()).is_err());
}

#[test]
fn test_draw_outside_frame_fails() {
    let mut r = renderer();
    assert!(r.draw_geometry(&[]).is_err());
    assert!(r.draw_overlay(&overlay()).is_err());
    assert!(r.end_frame().is_err());
}

#[test]
fn test_single_pass_rejects_overlay() {
    let mut r = renderer().without_overlay_pass();
    assert!(!r.supports_overlay_pass());
    r.begin_frame(&uniforms()).unwrap();
    assert!(r.draw_overlay(&overlay()).is_err());
}

#[test]
fn test_unavailable_probe_fails() {
    let mut r = HeadlessRenderer::unavailable("no GL context");
    match r.probe() {
        Err(crate::error::Error::RenderingUnavailable(msg)) => assert_eq!(msg, "no GL context"),
        other => panic!("unexpected {:?}", other),
    }
    assert!(renderer().probe().is_ok());
}
