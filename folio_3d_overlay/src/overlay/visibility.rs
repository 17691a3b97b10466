/// Visibility gate: shows the overlay only while the camera is in front of
/// the surface.

use glam::Vec3;
use crate::config::CompositorConfig;

/// Per-frame decision for the content element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityDecision {
    pub visible: bool,
    /// 0 when hidden, in (0, 1] when visible
    pub opacity: f32,
    /// dot(direction from centroid to camera, outward normal)
    pub facing: f32,
}

impl VisibilityDecision {
    pub const HIDDEN: VisibilityDecision = VisibilityDecision { visible: false, opacity: 0.0, facing: 0.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityGate {
    threshold: f32,
    fade_range: f32,
}

impl VisibilityGate {
    pub fn new(threshold: f32, fade_range: f32) -> Self {
        Self { threshold, fade_range: fade_range.max(0.0) }
    }

    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::new(config.visibility_threshold, config.visibility_fade_range)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Visible iff the facing dot is strictly above the threshold.
    ///
    /// A camera sitting exactly on the centroid, or a zero normal, has no
    /// defined facing and is treated as hidden.
    pub fn evaluate(&self, centroid: Vec3, normal: Vec3, camera_position: Vec3) -> VisibilityDecision {
        let Some(to_camera) = (camera_position - centroid).try_normalize() else {
            return VisibilityDecision::HIDDEN;
        };
        let Some(normal) = normal.try_normalize() else {
            return VisibilityDecision::HIDDEN;
        };

        let facing = to_camera.dot(normal);
        if facing <= self.threshold {
            return VisibilityDecision { visible: false, opacity: 0.0, facing };
        }

        let opacity = if self.fade_range > 0.0 {
            ((facing - self.threshold) / self.fade_range).clamp(0.0, 1.0)
        } else {
            1.0
        };
        VisibilityDecision { visible: true, opacity, facing }
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
