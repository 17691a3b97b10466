/// Perspective camera looking from `position` at `target`.

use glam::{Mat4, Vec3};
use crate::config::CompositorConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at (0, 1, 5) looking at the origin.
    pub fn new(fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y,
            aspect: 1.0,
            near,
            far,
        }
    }

    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::new(config.fov_y_radians(), config.near, config.far)
    }

    // ===== MATRICES =====

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit direction from position to target, or -Z if they coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    // ===== SETTERS =====

    /// Set the aspect ratio from an output size in pixels.
    ///
    /// Zero or non-finite sizes (a minimised window) are ignored. Returns
    /// whether the aspect actually changed.
    pub fn set_aspect(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return false;
        }
        let aspect = width / height;
        if aspect == self.aspect {
            return false;
        }
        self.aspect = aspect;
        true
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
