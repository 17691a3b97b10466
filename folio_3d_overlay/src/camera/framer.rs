/// Camera framer: one-time placement of the camera in front of the surface.

use glam::Vec3;
use crate::config::CompositorConfig;
use crate::scene::AABB;
use crate::surface::SurfaceDescriptor;
use super::camera::Camera;

/// |dot(normal, Y)| above which world up is unusable as the camera up.
const UP_PARALLEL_LIMIT: f32 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFramer {
    distance_margin: f32,
}

impl CameraFramer {
    pub fn new(distance_margin: f32) -> Self {
        Self { distance_margin }
    }

    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::new(config.camera_distance_margin)
    }

    /// Distance at which an extent of `size` fills the vertical field of
    /// view, times the framing margin. Never closer than twice the near plane.
    pub fn framing_distance(&self, camera: &Camera, size: f32) -> f32 {
        let half_fov_tan = (camera.fov_y * 0.5).tan();
        let distance = (size * 0.5) / half_fov_tan * self.distance_margin;
        if distance.is_finite() {
            distance.max(camera.near * 2.0)
        } else {
            camera.near * 2.0
        }
    }

    /// Put the camera on the surface normal, looking at the centroid.
    /// Returns the chosen distance.
    pub fn frame(&self, camera: &mut Camera, surface: &SurfaceDescriptor) -> f32 {
        let distance = self.framing_distance(camera, surface.width.max(surface.height));
        let normal = surface.normal.try_normalize().unwrap_or(Vec3::Z);

        camera.target = surface.centroid;
        camera.position = surface.centroid + normal * distance;
        camera.up = if normal.dot(Vec3::Y).abs() > UP_PARALLEL_LIMIT {
            surface.up()
        } else {
            Vec3::Y
        };

        crate::overlay_debug!(
            "folio3d::Framer",
            "camera framed at {:?} (distance {:.3}) looking at {:?}",
            camera.position,
            distance,
            camera.target
        );
        distance
    }

    /// Frame a whole model from +Z when it has no usable surface.
    pub fn frame_bounds(&self, camera: &mut Camera, bounds: &AABB) -> f32 {
        let distance = self.framing_distance(camera, bounds.max_dimension());
        let center = if bounds.is_empty() { Vec3::ZERO } else { bounds.center() };

        camera.target = center;
        camera.position = center + Vec3::Z * (distance + bounds.size().z * 0.5);
        camera.up = Vec3::Y;
        distance
    }
}

#[cfg(test)]
#[path = "framer_tests.rs"]
mod tests;
