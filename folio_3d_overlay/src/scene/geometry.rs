/// Triangle geometry attached to scene graph nodes.
///
/// Only positions and indices are kept: the compositor needs bounds,
/// and the renderer seam needs triangle counts. Shading attributes belong
/// to the host's renderer.

use std::f32::consts::{PI, TAU};
use glam::Vec3;
use super::aabb::AABB;

/// Indexed triangle list in the owning node's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: AABB,
}

impl Geometry {
    /// Build geometry from raw positions and triangle indices.
    ///
    /// Indices referencing missing vertices are dropped triangle-wise.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let count = positions.len() as u32;
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| i < count))
            .flatten()
            .copied()
            .collect();
        let bounds = AABB::from_points(&positions);
        Self { positions, indices, bounds }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Local-space bounding box (cached at construction).
    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    // ===== PRIMITIVES =====

    /// Axis-aligned box centred on the origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        let indices = vec![
            4, 5, 6, 4, 6, 7, // +Z
            1, 0, 3, 1, 3, 2, // -Z
            5, 1, 2, 5, 2, 6, // +X
            0, 4, 7, 0, 7, 3, // -X
            7, 6, 2, 7, 2, 3, // +Y
            0, 1, 5, 0, 5, 4, // -Y
        ];
        Self::new(positions, indices)
    }

    /// Rectangle in the XY plane, front face towards +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let positions = vec![
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ];
        Self::new(positions, vec![0, 1, 2, 0, 2, 3])
    }

    /// UV sphere centred on the origin.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut positions = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                positions.push(Vec3::new(
                    -radius * theta.cos() * phi.sin(),
                    radius * phi.cos(),
                    radius * theta.sin() * phi.sin(),
                ));
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
        for ring in 0..rings {
            for seg in 0..segments {
                let a = ring * stride + seg;
                let b = a + stride;
                if ring != 0 {
                    indices.extend_from_slice(&[a, b, a + 1]);
                }
                if ring != rings - 1 {
                    indices.extend_from_slice(&[a + 1, b, b + 1]);
                }
            }
        }
        Self::new(positions, indices)
    }

    /// Torus in the XY plane around the Z axis.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);
        let mut positions = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);

        for j in 0..=radial {
            let v = TAU * j as f32 / radial as f32;
            for i in 0..=tubular {
                let u = TAU * i as f32 / tubular as f32;
                positions.push(Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                ));
            }
        }

        let stride = tubular + 1;
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        Self::new(positions, indices)
    }

    /// Cone centred on the origin, apex towards +Y.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let mut positions = vec![Vec3::new(0.0, half, 0.0), Vec3::new(0.0, -half, 0.0)];
        for seg in 0..segments {
            let theta = TAU * seg as f32 / segments as f32;
            positions.push(Vec3::new(radius * theta.sin(), -half, radius * theta.cos()));
        }

        let mut indices = Vec::with_capacity((segments * 6) as usize);
        for seg in 0..segments {
            let a = 2 + seg;
            let b = 2 + (seg + 1) % segments;
            indices.extend_from_slice(&[0, a, b]);
            indices.extend_from_slice(&[1, b, a]);
        }
        Self::new(positions, indices)
    }

    /// Regular tetrahedron inscribed in a sphere of `radius`.
    pub fn tetrahedron(radius: f32) -> Self {
        let s = radius / 3.0_f32.sqrt();
        let positions = vec![
            Vec3::new(s, s, s),
            Vec3::new(-s, -s, s),
            Vec3::new(-s, s, -s),
            Vec3::new(s, -s, -s),
        ];
        Self::new(positions, vec![2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1])
    }

    /// Regular octahedron inscribed in a sphere of `radius`.
    pub fn octahedron(radius: f32) -> Self {
        let r = radius;
        let positions = vec![
            Vec3::new(r, 0.0, 0.0),
            Vec3::new(-r, 0.0, 0.0),
            Vec3::new(0.0, r, 0.0),
            Vec3::new(0.0, -r, 0.0),
            Vec3::new(0.0, 0.0, r),
            Vec3::new(0.0, 0.0, -r),
        ];
        let indices = vec![
            0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2,
            1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
        ];
        Self::new(positions, indices)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
