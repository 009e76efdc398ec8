//! Height-sampled ground grid

use glam::Vec3;

use crate::core::config::TerrainConfig;
use crate::core::types::{Collider, SurfaceTag};
use crate::noise::NoiseField;

/// Depth of the static ground slab below y = 0
pub const GROUND_THICKNESS: f32 = 0.5;

/// Smallest half-size a ground grid is built with
pub const MIN_GROUND_RADIUS: f32 = 1.0;

/// Square grid of `(resolution + 1)^2` vertices centered on the forest
///
/// Vertex `(i, j)` lives at `vertices[i * (resolution + 1) + j]`, with `i`
/// stepping along X and `j` along Z.
#[derive(Debug, Clone, Default)]
pub struct GroundMesh {
    center: Vec3,
    radius: f32,
    resolution: usize,
    cell_size: f32,
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl GroundMesh {
    /// Sample the grid. A non-positive or NaN `radius` is raised to
    /// [`MIN_GROUND_RADIUS`] so cells never collapse to zero width.
    pub fn build(noise: &NoiseField, center: Vec3, radius: f32, config: &TerrainConfig) -> Self {
        let radius = radius.max(MIN_GROUND_RADIUS);
        let resolution = config.grid_resolution.max(1);
        let cell_size = (radius * 2.0) / resolution as f32;
        let stride = resolution + 1;

        let mut vertices = Vec::with_capacity(stride * stride);
        for i in 0..=resolution {
            for j in 0..=resolution {
                let x = center.x - radius + i as f32 * cell_size;
                let z = center.z - radius + j as f32 * cell_size;
                let height = noise.octave2(
                    x * config.noise_scale,
                    z * config.noise_scale,
                    config.octaves,
                    config.persistence,
                ) * config.height_scale;
                vertices.push(Vec3::new(x, height, z));
            }
        }

        let mut indices = Vec::with_capacity(resolution * resolution * 6);
        for i in 0..resolution {
            for j in 0..resolution {
                let idx = (i * stride + j) as u32;
                let below = idx + stride as u32;
                indices.extend_from_slice(&[idx, below, idx + 1, idx + 1, below, below + 1]);
            }
        }

        Self {
            center,
            radius,
            resolution,
            cell_size,
            vertices,
            indices,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Static slab spanning the grid's bounding square
    pub fn collider(&self) -> Collider {
        Collider::new(
            Vec3::new(
                self.center.x - self.radius,
                -GROUND_THICKNESS,
                self.center.z - self.radius,
            ),
            Vec3::new(self.center.x + self.radius, 0.0, self.center.z + self.radius),
            SurfaceTag::Ground,
        )
    }

    /// Bilinear height at `(x, z)`, clamped to the grid edge
    ///
    /// An unbuilt mesh is flat at y = 0.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        if self.vertices.is_empty() {
            return 0.0;
        }

        let max = self.resolution as f32;
        let gx = ((x - (self.center.x - self.radius)) / self.cell_size).clamp(0.0, max);
        let gz = ((z - (self.center.z - self.radius)) / self.cell_size).clamp(0.0, max);

        let i0 = (gx.floor() as usize).min(self.resolution.saturating_sub(1));
        let j0 = (gz.floor() as usize).min(self.resolution.saturating_sub(1));
        let tx = gx - i0 as f32;
        let tz = gz - j0 as f32;

        let h = |i: usize, j: usize| self.vertices[i * (self.resolution + 1) + j].y;
        let near = h(i0, j0) + (h(i0 + 1, j0) - h(i0, j0)) * tx;
        let far = h(i0, j0 + 1) + (h(i0 + 1, j0 + 1) - h(i0, j0 + 1)) * tx;
        near + (far - near) * tz
    }
}
