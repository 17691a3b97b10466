//! Integration tests for the compositor lifecycle through the public API
//!
//! Loads synthetic models with the static loader, attaches a host content
//! element and checks placement, visibility and event handling end to end.
//! No window or GPU required.
//!
//! Run with: cargo test --test compositor_integration_tests

use std::cell::RefCell;
use std::rc::Rc;
use folio_3d_overlay::folio3d::events::{HostEvent, HostEvents};
use folio_3d_overlay::folio3d::loader::StaticModelLoader;
use folio_3d_overlay::folio3d::overlay::{ContentElement, ContentSize};
use folio_3d_overlay::folio3d::placeholder::PlaceholderKind;
use folio_3d_overlay::folio3d::scene::{Geometry, LocalAxis, ModelNode, Transform};
use folio_3d_overlay::folio3d::{Compositor, CompositorConfig, CompositorState, Error};
use folio_3d_overlay::glam::{Mat4, Quat, Vec3};
use winit::dpi::PhysicalSize;

// ============================================================================
// FIXTURES
// ============================================================================

#[derive(Debug, Default)]
struct Page {
    size: ContentSize,
    world: Option<Mat4>,
    visible: Option<bool>,
    opacity: f32,
}

impl ContentElement for Page {
    fn pixel_size(&self) -> ContentSize {
        self.size
    }

    fn apply_transform(&mut self, world: Mat4) {
        self.world = Some(world);
    }

    fn set_presentation(&mut self, visible: bool, opacity: f32) {
        self.visible = Some(visible);
        self.opacity = opacity;
    }
}

fn page(width: u32, height: u32) -> Rc<RefCell<Page>> {
    Rc::new(RefCell::new(Page { size: ContentSize::new(width, height), ..Default::default() }))
}

/// An oversized laptop (8 units wide) whose lid is tilted back.
fn tilted_laptop() -> ModelNode {
    ModelNode::new("Laptop_Pro")
        .with_child(
            ModelNode::new("Chassis")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.2, 0.0)))
                .with_geometry(Geometry::cuboid(8.0, 0.4, 5.0)),
        )
        .with_child(
            ModelNode::new("Lid")
                .with_transform(
                    Transform::from_translation(Vec3::new(0.0, 2.6, -2.4))
                        .with_rotation(Quat::from_rotation_x(-0.25)),
                )
                .with_child(ModelNode::new("Display_Panel").with_geometry(Geometry::plane(7.6, 4.6))),
        )
}

fn boot(model: ModelNode, uri: &str) -> (Compositor, HostEvents) {
    let events = HostEvents::new();
    let mut compositor = Compositor::new(CompositorConfig::default()).unwrap();
    compositor.start(Box::new(StaticModelLoader::succeeding(model)), uri, &events).unwrap();
    compositor.tick(1.0 / 60.0);
    (compositor, events)
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

// ============================================================================
// END TO END
// ============================================================================

#[test]
fn test_integration_tilted_laptop_end_to_end() {
    let (mut compositor, _events) = boot(tilted_laptop(), "models/laptop.glb");
    assert_eq!(*compositor.state(), CompositorState::Ready);

    let element = page(1280, 800);
    compositor.attach_content(element.clone());
    compositor.tick(1.0 / 60.0);

    let surface = compositor.surface_descriptor().unwrap();
    let outcome = *compositor.mapping().unwrap();

    // normalized: the surface shrank with the model
    assert!(surface.width < 2.0 && surface.width > 1.5);

    // content plane in front of the tilted surface, facing along its normal
    let expected_normal = Quat::from_rotation_x(-0.25) * Vec3::Z;
    assert!(approx(surface.normal, expected_normal));
    assert!(approx(outcome.placement.position, surface.centroid + surface.normal * 0.01));
    assert!(approx(outcome.placement.facing(), expected_normal));
    assert!((outcome.placement.scale.x - surface.width / 1280.0 * 0.99).abs() < 1e-6);
    assert!((outcome.placement.scale.y - surface.height / 800.0 * 0.95).abs() < 1e-6);

    // occluder behind, at full surface size
    assert!(approx(outcome.occluder.position, surface.centroid - surface.normal * 0.05));
    assert!((outcome.occluder.size.x - surface.width).abs() < 1e-5);

    // host received the same matrix, and the overlay shows from the framed camera
    let host = element.borrow();
    assert_eq!(host.world, Some(outcome.placement.world_matrix()));
    assert_eq!(host.visible, Some(true));
    assert_eq!(host.opacity, 1.0);
}

#[test]
fn test_integration_framed_camera_sees_surface_head_on() {
    let (compositor, _events) = boot(tilted_laptop(), "models/laptop.glb");
    let surface = compositor.surface_descriptor().unwrap();
    let camera = compositor.camera();

    assert!(approx(camera.target, surface.centroid));
    let to_camera = (camera.position - surface.centroid).normalize();
    assert!(to_camera.dot(surface.normal) > 0.999);
}

#[test]
fn test_integration_orbit_behind_hides_overlay_and_back() {
    let config = CompositorConfig { control_damping: 1.0, ..Default::default() };
    let events = HostEvents::new();
    let mut compositor = Compositor::new(config).unwrap();
    compositor
        .start(Box::new(StaticModelLoader::succeeding(tilted_laptop())), "laptop.glb", &events)
        .unwrap();
    compositor.tick(0.016);
    let element = page(1280, 800);
    compositor.attach_content(element.clone());

    compositor.controls_mut().rotate(std::f32::consts::PI, 0.0);
    compositor.tick(0.016);
    assert_eq!(element.borrow().visible, Some(false));
    assert!(compositor.overlay_draw().is_none());

    compositor.controls_mut().rotate(std::f32::consts::PI, 0.0);
    compositor.tick(0.016);
    assert_eq!(element.borrow().visible, Some(true));
    assert!(compositor.overlay_draw().is_some());
}

#[test]
fn test_integration_flat_display_orbit_stays_finite() {
    let tablet = ModelNode::new("Tablet")
        .with_child(ModelNode::new("Body").with_geometry(Geometry::cuboid(1.8, 0.1, 1.2)))
        .with_child(
            ModelNode::new("Display")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.06, 0.0)))
                .with_geometry(Geometry::cuboid(1.6, 0.02, 1.0)),
        );
    let config = CompositorConfig { surface_local_normal: LocalAxis::PosY, ..Default::default() };
    let events = HostEvents::new();
    let mut compositor = Compositor::new(config).unwrap();
    compositor.start(Box::new(StaticModelLoader::succeeding(tablet)), "tablet.glb", &events).unwrap();
    compositor.tick(0.016);

    // framed from straight above
    let surface = compositor.surface_descriptor().unwrap();
    assert!(approx(surface.normal, Vec3::Y));
    assert!(compositor.camera().view_matrix().is_finite());

    // orbit down to the horizon
    let pitch = compositor.controls().goal().pitch;
    compositor.controls_mut().rotate(0.0, -pitch);
    for _ in 0..400 {
        compositor.tick(0.016);
        assert!(compositor.camera().view_matrix().is_finite());
    }
    assert!(compositor.controls().current().pitch.abs() < 1e-4);
}

// ============================================================================
// FAILURE PATHS
// ============================================================================

#[test]
fn test_integration_failed_load_keeps_scene_alive() {
    let events = HostEvents::new();
    let mut compositor = Compositor::new(CompositorConfig::default()).unwrap();
    compositor
        .start(Box::new(StaticModelLoader::failing("connection reset")), "demos/shapes.glb", &events)
        .unwrap();
    let element = page(1280, 800);
    compositor.attach_content(element.clone());

    for _ in 0..10 {
        compositor.tick(0.016);
    }

    assert!(matches!(compositor.state(), CompositorState::Failed(r) if r == "connection reset"));
    assert_eq!(compositor.placeholder(), Some(PlaceholderKind::Shapes));
    assert!(compositor.graph().len() > 1);
    assert!(element.borrow().world.is_none());
    assert!(compositor.notices().iter().any(|n| matches!(n, Error::LoadFailure(_))));
}

#[test]
fn test_integration_unnamed_model_uses_whole_model() {
    let model = ModelNode::new("kiosk")
        .with_child(ModelNode::new("Mesh_0").with_geometry(Geometry::cuboid(1.0, 1.6, 0.2)));
    let (mut compositor, _events) = boot(model, "kiosk.glb");
    compositor.attach_content(page(800, 600));

    assert_eq!(*compositor.state(), CompositorState::Ready);
    assert!(compositor.surface().unwrap().is_fallback());
    assert!(compositor.mapping().is_some());
}

// ============================================================================
// HOST EVENTS
// ============================================================================

#[test]
fn test_integration_shutdown_releases_listener() {
    let (mut compositor, events) = boot(tilted_laptop(), "laptop.glb");
    assert_eq!(events.listener_count(), 1);

    compositor.shutdown();
    assert_eq!(events.listener_count(), 0);
    assert!(!compositor.is_subscribed());

    // emitting after shutdown reaches nobody
    events.emit(HostEvent::WindowResized(PhysicalSize::new(640, 480)));
    compositor.tick(0.016);
    assert_eq!(compositor.take_output_resize(), None);
}

#[test]
fn test_integration_dropping_compositor_releases_listener() {
    let (compositor, events) = boot(tilted_laptop(), "laptop.glb");
    drop(compositor);
    assert_eq!(events.listener_count(), 0);
}

#[test]
fn test_integration_two_compositors_share_events() {
    let events = HostEvents::new();
    let mut first = Compositor::new(CompositorConfig::default()).unwrap();
    let mut second = Compositor::new(CompositorConfig::default()).unwrap();
    first.start(Box::new(StaticModelLoader::never()), "a.glb", &events).unwrap();
    second.start(Box::new(StaticModelLoader::never()), "b.glb", &events).unwrap();

    events.emit(HostEvent::WindowResized(PhysicalSize::new(1000, 500)));
    first.tick(0.016);
    second.tick(0.016);

    assert!((first.camera().aspect - 2.0).abs() < 1e-6);
    assert!((second.camera().aspect - 2.0).abs() < 1e-6);
}
