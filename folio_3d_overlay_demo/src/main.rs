//! Folio3D overlay demo
//!
//! Runs the compositor headless: a synthetic laptop is loaded, a fake
//! page is projected onto its screen, the camera orbits around and
//! behind it, and the window is resized and hidden along the way.
//!
//! Run with: RUST_LOG=debug cargo run -p folio_3d_overlay_demo

use std::cell::RefCell;
use std::rc::Rc;
use folio_3d_overlay::folio3d::events::{HostEvent, HostEvents};
use folio_3d_overlay::folio3d::loader::StaticModelLoader;
use folio_3d_overlay::folio3d::log::{set_logger, LogEntry, LogSeverity, Logger};
use folio_3d_overlay::folio3d::overlay::{ContentElement, ContentSize};
use folio_3d_overlay::folio3d::render::{HeadlessRenderer, Renderer};
use folio_3d_overlay::folio3d::scene::{Geometry, Material, ModelNode, Transform};
use folio_3d_overlay::folio3d::{Compositor, CompositorConfig, RenderLoop, Result};
use glam::{Mat4, Quat, Vec3, Vec4};
use winit::dpi::PhysicalSize;

const FRAMES: u32 = 240;
const DT: f32 = 1.0 / 60.0;

/// Forwards compositor diagnostics to the `log` facade.
struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, entry: &LogEntry) {
        let level = match entry.severity {
            LogSeverity::Trace => log::Level::Trace,
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warn => log::Level::Warn,
            LogSeverity::Error => log::Level::Error,
        };
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                log::log!(target: entry.source.as_str(), level, "{} ({}:{})", entry.message, file, line)
            }
            _ => log::log!(target: entry.source.as_str(), level, "{}", entry.message),
        }
    }
}

/// Stand-in for a DOM element laid out by the host.
#[derive(Debug)]
struct DemoPage {
    size: ContentSize,
    shown: bool,
}

impl ContentElement for DemoPage {
    fn pixel_size(&self) -> ContentSize {
        self.size
    }

    fn apply_transform(&mut self, world: Mat4) {
        let (scale, _, translation) = world.to_scale_rotation_translation();
        log::info!("page placed at {:.3?} with scale {:.5?}", translation, scale);
    }

    fn set_presentation(&mut self, visible: bool, opacity: f32) {
        if visible != self.shown {
            log::info!("page {} (opacity {:.2})", if visible { "shown" } else { "hidden" }, opacity);
        }
        self.shown = visible;
    }
}

fn laptop() -> ModelNode {
    let aluminium = Material::opaque(Vec4::new(0.72, 0.74, 0.78, 1.0));
    let bezel = Material::opaque(Vec4::new(0.05, 0.05, 0.06, 1.0));

    ModelNode::new("Laptop")
        .with_child(
            ModelNode::new("Base")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.09, 0.0)))
                .with_geometry(Geometry::cuboid(30.0, 1.8, 21.0))
                .with_material(aluminium),
        )
        .with_child(
            ModelNode::new("Lid")
                .with_transform(
                    Transform::from_translation(Vec3::new(0.0, 10.5, -10.5))
                        .with_rotation(Quat::from_rotation_x(-0.2)),
                )
                .with_geometry(Geometry::cuboid(30.0, 20.0, 0.6))
                .with_material(bezel)
                .with_child(
                    ModelNode::new("Screen_01")
                        .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 0.31)))
                        .with_geometry(Geometry::plane(28.0, 17.5)),
                ),
        )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    set_logger(LogBridge);

    let events = HostEvents::new();
    let mut compositor = Compositor::new(CompositorConfig::default())?;
    let loader = StaticModelLoader::succeeding(laptop()).with_progress_ticks(10);
    compositor.start(Box::new(loader), "models/laptop.glb", &events)?;

    let page = Rc::new(RefCell::new(DemoPage { size: ContentSize::new(1280, 800), shown: false }));
    compositor.attach_content(page.clone());

    let renderer = HeadlessRenderer::new(PhysicalSize::new(1280, 720));
    let mut render_loop = RenderLoop::new(compositor, renderer)?;

    let mut overlay_frames = 0u32;
    for frame in 0..FRAMES {
        match frame {
            60 => render_loop.compositor_mut().controls_mut().rotate(std::f32::consts::PI, 0.0),
            100 => render_loop.compositor_mut().controls_mut().rotate(std::f32::consts::PI, 0.2),
            130 => events.emit(HostEvent::WindowResized(PhysicalSize::new(1920, 1080))),
            150 => events.emit(HostEvent::VisibilityChanged(false)),
            170 => events.emit(HostEvent::VisibilityChanged(true)),
            190 => {
                page.borrow_mut().size = ContentSize::new(1024, 640);
                events.emit(HostEvent::ContentResized);
            }
            _ => {}
        }

        let report = render_loop.tick(DT)?;
        if report.overlay_drawn {
            overlay_frames += 1;
        }
    }

    let stats = render_loop.renderer().stats();
    let size = render_loop.renderer().output_size();
    log::info!(
        "{} frames drawn ({} with overlay), {} draw calls, {} triangles, {} resize(s), output {}x{}",
        stats.frames,
        overlay_frames,
        stats.draw_calls,
        stats.triangles,
        stats.resizes,
        size.width,
        size.height
    );
    log::info!("compositor state: {}", render_loop.compositor().state());

    let (mut compositor, _renderer) = render_loop.into_parts();
    compositor.shutdown();
    Ok(())
}
