/// Damped orbit controls.
///
/// User input moves a goal (yaw, pitch, distance) around the camera target;
/// each `update` covers `damping` of the remaining way to the goal, so the
/// camera glides to rest after input stops.

use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use crate::config::CompositorConfig;
use super::camera::Camera;

/// Pitch stays this far away from the poles.
const POLE_MARGIN: f32 = 0.01;
/// Below this the current orbit snaps onto the goal.
const SETTLE_EPSILON: f32 = 1e-5;
/// Above this elevation world Y is too close to the view axis to serve as up.
const POLE_UP_PITCH: f32 = 1.5;

/// Spherical orbit coordinates around a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Angle around world Y, zero looking down -Z from +Z
    pub yaw: f32,
    /// Elevation above the horizontal plane
    pub pitch: f32,
    pub distance: f32,
}

impl Orbit {
    /// Orbit of `position` around `target`. `None` when they coincide.
    pub fn from_positions(position: Vec3, target: Vec3) -> Option<Self> {
        let offset = position - target;
        let distance = offset.length();
        if !(distance.is_finite() && distance > 0.0) {
            return None;
        }
        Some(Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        })
    }

    /// Offset from the target to the camera.
    pub fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    /// Camera up vector for this orbit: world Y, or near a pole the yaw
    /// heading pointing away from the camera.
    pub fn up(&self) -> Vec3 {
        if self.pitch.abs() < POLE_UP_PITCH {
            return Vec3::Y;
        }
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(sin_yaw, 0.0, cos_yaw) * -self.pitch.signum()
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    current: Orbit,
    goal: Orbit,
    damping: f32,
    min_distance: f32,
    enabled: bool,
}

impl OrbitControls {
    pub fn new(damping: f32, min_distance: f32) -> Self {
        let rest = Orbit { yaw: 0.0, pitch: 0.0, distance: 5.0 };
        Self {
            target: Vec3::ZERO,
            current: rest,
            goal: rest,
            damping: damping.clamp(f32::EPSILON, 1.0),
            min_distance,
            enabled: true,
        }
    }

    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::new(config.control_damping, config.near)
    }

    // ===== ACCESSORS =====

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn current(&self) -> Orbit {
        self.current
    }

    pub fn goal(&self) -> Orbit {
        self.goal
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the camera is still gliding towards the goal.
    pub fn is_moving(&self) -> bool {
        (self.goal.yaw - self.current.yaw).abs() > SETTLE_EPSILON
            || (self.goal.pitch - self.current.pitch).abs() > SETTLE_EPSILON
            || (self.goal.distance - self.current.distance).abs() > SETTLE_EPSILON
    }

    // ===== INPUT =====

    /// Re-seed from the camera, dropping any pending motion.
    pub fn sync_from_camera(&mut self, camera: &Camera) {
        self.target = camera.target;
        if let Some(mut orbit) = Orbit::from_positions(camera.position, camera.target) {
            orbit.pitch = clamp_pitch(orbit.pitch);
            orbit.distance = orbit.distance.max(self.min_distance);
            self.current = orbit;
            self.goal = orbit;
        }
    }

    /// Turn the goal by `yaw` and `pitch` radians.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        if !self.enabled || !(yaw.is_finite() && pitch.is_finite()) {
            return;
        }
        self.goal.yaw += yaw;
        self.goal.pitch = clamp_pitch(self.goal.pitch + pitch);
    }

    /// Scale the goal distance; `factor` < 1 moves closer.
    pub fn dolly(&mut self, factor: f32) {
        if !self.enabled || !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.goal.distance = (self.goal.distance * factor).max(self.min_distance);
    }

    // ===== PER TICK =====

    /// Move towards the goal and write the result into `camera`.
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.is_moving() {
            return false;
        }

        let k = self.damping;
        self.current.yaw += (self.goal.yaw - self.current.yaw) * k;
        self.current.pitch += (self.goal.pitch - self.current.pitch) * k;
        self.current.distance += (self.goal.distance - self.current.distance) * k;
        if !self.is_moving() {
            self.current = self.goal;
        }

        camera.target = self.target;
        camera.position = self.target + self.current.offset();
        camera.up = self.current.up();
        true
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2 + POLE_MARGIN, FRAC_PI_2 - POLE_MARGIN)
}

#[cfg(test)]
#[path = "orbit_controls_tests.rs"]
mod tests;
