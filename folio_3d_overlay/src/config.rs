//! Compositor configuration
//!
//! Every tunable of the compositor lives here as a named field; nothing in
//! the pipeline hardcodes an offset, margin or threshold.

use glam::Vec3;
use crate::error::Result;
use crate::overlay_bail;
use crate::placeholder::PlaceholderKind;
use crate::scene::LocalAxis;

/// Keyword rule choosing a placeholder model when loading fails.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderRule {
    /// Case-insensitive substring of the model URI
    pub keyword: String,
    pub kind: PlaceholderKind,
}

impl PlaceholderRule {
    pub fn new(keyword: impl Into<String>, kind: PlaceholderKind) -> Self {
        Self { keyword: keyword.into(), kind }
    }
}

/// Idle motion applied to placeholder models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleAnimation {
    /// Angular speed around X, Y, Z in radians per second
    pub spin: Vec3,
    /// Vertical bob amplitude in world units
    pub bob_amplitude: f32,
    /// Bob angular frequency in radians per second
    pub bob_frequency: f32,
}

impl Default for IdleAnimation {
    fn default() -> Self {
        Self {
            spin: Vec3::new(0.12, 0.3, 0.0),
            bob_amplitude: 0.3,
            bob_frequency: 1.0,
        }
    }
}

/// Compositor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    /// Largest extent of a model after normalization (world units)
    pub target_size: f32,

    /// Case-insensitive name substrings identifying the surface mesh,
    /// in priority order
    pub surface_name_candidates: Vec<String>,

    /// Local axis of the surface mesh treated as its front
    pub surface_local_normal: LocalAxis,

    /// Distance the overlay sits in front of the surface, along the normal
    pub front_offset: f32,

    /// Distance the occluder plane sits behind the surface, along the normal
    pub back_offset: f32,

    /// Fraction of the surface width covered by the overlay, in (0, 1]
    pub margin_x: f32,

    /// Fraction of the surface height covered by the overlay, in (0, 1]
    pub margin_y: f32,

    /// Framing slack multiplied into the camera distance, > 1
    pub camera_distance_margin: f32,

    /// Overlay is shown only when dot(camera direction, normal) exceeds this
    pub visibility_threshold: f32,

    /// Dot-product span above the threshold over which opacity ramps to 1.
    /// Zero disables fading.
    pub visibility_fade_range: f32,

    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,

    /// Near clip plane
    pub near: f32,

    /// Far clip plane
    pub far: f32,

    /// Fraction of the remaining distance orbit controls cover per tick, in (0, 1]
    pub control_damping: f32,

    /// Seconds spent loading before a stall warning is emitted
    pub loading_stall_seconds: f32,

    /// Placeholder selection rules, first match wins
    pub placeholder_rules: Vec<PlaceholderRule>,

    /// Placeholder when no rule matches
    pub default_placeholder: PlaceholderKind,

    /// Motion applied to placeholder models
    pub idle_animation: IdleAnimation,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            target_size: 2.0,
            surface_name_candidates: vec![
                "screen".to_string(),
                "display".to_string(),
                "monitor".to_string(),
            ],
            surface_local_normal: LocalAxis::PosZ,
            front_offset: 0.01,
            back_offset: 0.05,
            margin_x: 0.99,
            margin_y: 0.95,
            camera_distance_margin: 1.2,
            visibility_threshold: 0.0,
            visibility_fade_range: 0.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            control_damping: 0.1,
            loading_stall_seconds: 10.0,
            placeholder_rules: vec![
                PlaceholderRule::new("brain", PlaceholderKind::WireSphere),
                PlaceholderRule::new("shapes", PlaceholderKind::Shapes),
                PlaceholderRule::new("python", PlaceholderKind::Torus),
            ],
            default_placeholder: PlaceholderKind::Cube,
            idle_animation: IdleAnimation::default(),
        }
    }
}

impl CompositorConfig {
    /// Vertical field of view in radians.
    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    /// Placeholder for a model URI according to `placeholder_rules`.
    pub fn placeholder_for(&self, uri: &str) -> PlaceholderKind {
        let uri = uri.to_lowercase();
        self.placeholder_rules
            .iter()
            .find(|rule| uri.contains(&rule.keyword.to_lowercase()))
            .map(|rule| rule.kind)
            .unwrap_or(self.default_placeholder)
    }

    /// Check every field, naming the first one out of range.
    pub fn validate(&self) -> Result<()> {
        const SOURCE: &str = "folio3d::Config";

        if !(self.target_size.is_finite() && self.target_size > 0.0) {
            overlay_bail!(SOURCE, InvalidConfig, "target_size must be > 0 (got {})", self.target_size);
        }
        if self.surface_name_candidates.is_empty() {
            overlay_bail!(SOURCE, InvalidConfig, "surface_name_candidates must not be empty");
        }
        if self.surface_name_candidates.iter().any(|c| c.trim().is_empty()) {
            overlay_bail!(SOURCE, InvalidConfig, "surface_name_candidates must not contain empty names");
        }
        if !(self.front_offset.is_finite() && self.front_offset >= 0.0) {
            overlay_bail!(SOURCE, InvalidConfig, "front_offset must be >= 0 (got {})", self.front_offset);
        }
        if !(self.back_offset.is_finite() && self.back_offset >= 0.0) {
            overlay_bail!(SOURCE, InvalidConfig, "back_offset must be >= 0 (got {})", self.back_offset);
        }
        for (name, margin) in [("margin_x", self.margin_x), ("margin_y", self.margin_y)] {
            if !(margin > 0.0 && margin <= 1.0) {
                overlay_bail!(SOURCE, InvalidConfig, "{} must be in (0, 1] (got {})", name, margin);
            }
        }
        if !(self.camera_distance_margin.is_finite() && self.camera_distance_margin > 1.0) {
            overlay_bail!(SOURCE, InvalidConfig, "camera_distance_margin must be > 1 (got {})", self.camera_distance_margin);
        }
        if !(self.visibility_threshold >= -1.0 && self.visibility_threshold < 1.0) {
            overlay_bail!(SOURCE, InvalidConfig, "visibility_threshold must be in [-1, 1) (got {})", self.visibility_threshold);
        }
        if !(self.visibility_fade_range.is_finite() && self.visibility_fade_range >= 0.0) {
            overlay_bail!(SOURCE, InvalidConfig, "visibility_fade_range must be >= 0 (got {})", self.visibility_fade_range);
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            overlay_bail!(SOURCE, InvalidConfig, "fov_y_degrees must be in (0, 180) (got {})", self.fov_y_degrees);
        }
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            overlay_bail!(SOURCE, InvalidConfig, "clip planes must satisfy 0 < near < far (got {} / {})", self.near, self.far);
        }
        if !(self.control_damping > 0.0 && self.control_damping <= 1.0) {
            overlay_bail!(SOURCE, InvalidConfig, "control_damping must be in (0, 1] (got {})", self.control_damping);
        }
        if !(self.loading_stall_seconds > 0.0) {
            overlay_bail!(SOURCE, InvalidConfig, "loading_stall_seconds must be > 0 (got {})", self.loading_stall_seconds);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
