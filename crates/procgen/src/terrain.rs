//! Seabed terrain: a displaced grid over a square plane.
//!
//! Height at a vertex is two broad sinusoid layers plus a small seeded jitter:
//! `h = A·sin(x·f1)·cos(z·f1) + B·sin(x·f2) + jitter(x, z)`.
//!
//! The jitter is a Perlin field sampled at a frequency high enough that
//! neighbouring vertices are effectively uncorrelated, so it reads as
//! per-vertex roughness while staying a pure function of `config.seed`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use noise::{NoiseFn, Perlin};

use crate::seed::noise_seed;

/// Vertex for the seabed mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Configuration for seabed generation.
#[derive(Debug, Clone)]
pub struct SeabedConfig {
    /// Side length of the plane in world units.
    pub size: f32,
    /// Grid segments per side (vertices per side = segments + 1).
    pub segments: u32,
    /// World Y of the undisplaced plane.
    pub ground_height: f32,
    /// Amplitude of the broad `sin·cos` layer.
    pub broad_amplitude: f32,
    /// Frequency of the broad layer.
    pub broad_frequency: f32,
    /// Amplitude of the `sin(x)` ridge layer.
    pub ridge_amplitude: f32,
    /// Frequency of the ridge layer.
    pub ridge_frequency: f32,
    /// Jitter is in `[0, jitter)`.
    pub jitter: f32,
    /// Sampling frequency of the jitter field.
    pub jitter_frequency: f64,
    /// Seed for the jitter field.
    pub seed: u64,
}

impl Default for SeabedConfig {
    fn default() -> Self {
        Self {
            size: 500.0,
            segments: 180,
            ground_height: -22.0,
            broad_amplitude: 12.0,
            broad_frequency: 0.02,
            ridge_amplitude: 4.0,
            ridge_frequency: 0.08,
            jitter: 0.6,
            jitter_frequency: 1.7,
            seed: 0,
        }
    }
}

impl SeabedConfig {
    /// Vertices per side.
    pub fn resolution(&self) -> usize {
        self.segments.max(1) as usize + 1
    }

    /// Grid spacing in world units.
    pub fn step(&self) -> f32 {
        self.size / self.segments.max(1) as f32
    }
}

/// Generated seabed data.
#[derive(Debug, Clone)]
pub struct SeabedData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    /// World-space heights, row-major by z then x.
    pub heightmap: Vec<f32>,
    pub config: SeabedConfig,
}

impl SeabedData {
    /// Generate the seabed from configuration.
    pub fn generate(config: SeabedConfig) -> Self {
        let jitter_field = Perlin::new(noise_seed(config.seed, 0));

        let res = config.resolution();
        let step = config.step();
        let half = config.size / 2.0;

        let mut vertices = Vec::with_capacity(res * res);
        let mut heightmap = Vec::with_capacity(res * res);

        for z in 0..res {
            for x in 0..res {
                let world_x = x as f32 * step - half;
                let world_z = z as f32 * step - half;
                let world_y =
                    config.ground_height + Self::height_at(&jitter_field, world_x, world_z, &config);
                heightmap.push(world_y);
                vertices.push(TerrainVertex {
                    position: [world_x, world_y, world_z],
                    normal: [0.0, 1.0, 0.0],
                    uv: [
                        x as f32 / (res - 1) as f32,
                        z as f32 / (res - 1) as f32,
                    ],
                });
            }
        }

        let mut indices = Vec::with_capacity((res - 1) * (res - 1) * 6);
        for z in 0..(res - 1) {
            for x in 0..(res - 1) {
                let top_left = (z * res + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * res + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend([top_left, bottom_left, top_right]);
                indices.extend([top_right, bottom_left, bottom_right]);
            }
        }

        Self::calculate_normals(&mut vertices, res);

        log::debug!(
            "seabed generated: {}x{} vertices, seed {}",
            res,
            res,
            config.seed
        );

        Self {
            vertices,
            indices,
            heightmap,
            config,
        }
    }

    /// Displacement above the ground plane at a world position.
    fn height_at(jitter_field: &Perlin, x: f32, z: f32, config: &SeabedConfig) -> f32 {
        let broad = (x * config.broad_frequency).sin()
            * (z * config.broad_frequency).cos()
            * config.broad_amplitude;
        let ridge = (x * config.ridge_frequency).sin() * config.ridge_amplitude;

        // Offsets keep samples off the integer lattice, where Perlin is always zero.
        let f = config.jitter_frequency;
        let n = jitter_field.get([x as f64 * f + 0.318, z as f64 * f + 0.671]);
        let unit = ((n + 1.0) * 0.5).clamp(0.0, 0.999_999) as f32;

        broad + ridge + unit * config.jitter
    }

    /// Sample height at a world position (clamped to the plane).
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        let res = self.config.resolution();
        let half_size = self.config.size / 2.0;
        let step = self.config.step();

        let gx = ((x + half_size) / step).max(0.0);
        let gz = ((z + half_size) / step).max(0.0);

        let x0 = (gx.floor() as usize).min(res - 2);
        let z0 = (gz.floor() as usize).min(res - 2);

        let fx = (gx - x0 as f32).clamp(0.0, 1.0);
        let fz = (gz - z0 as f32).clamp(0.0, 1.0);

        let h00 = self.heightmap[z0 * res + x0];
        let h10 = self.heightmap[z0 * res + x0 + 1];
        let h01 = self.heightmap[(z0 + 1) * res + x0];
        let h11 = self.heightmap[(z0 + 1) * res + x0 + 1];

        // Interpolate on the same triangle split the index buffer uses.
        if fx + fz <= 1.0 {
            h00 + fx * (h10 - h00) + fz * (h01 - h00)
        } else {
            h11 + (1.0 - fx) * (h01 - h11) + (1.0 - fz) * (h10 - h11)
        }
    }

    /// Check if a world position is over the plane.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half = self.config.size / 2.0;
        (-half..=half).contains(&x) && (-half..=half).contains(&z)
    }

    fn calculate_normals(vertices: &mut [TerrainVertex], resolution: usize) {
        let mut normals: Vec<Vec3> = vec![Vec3::ZERO; vertices.len()];

        for z in 0..(resolution - 1) {
            for x in 0..(resolution - 1) {
                let i0 = z * resolution + x;
                let i1 = i0 + 1;
                let i2 = (z + 1) * resolution + x;
                let i3 = i2 + 1;

                let v0: Vec3 = vertices[i0].position.into();
                let v1: Vec3 = vertices[i1].position.into();
                let v2: Vec3 = vertices[i2].position.into();
                let v3: Vec3 = vertices[i3].position.into();

                let n1 = (v2 - v0).cross(v1 - v0).normalize_or_zero();
                normals[i0] += n1;
                normals[i2] += n1;
                normals[i1] += n1;

                let n2 = (v2 - v1).cross(v3 - v1).normalize_or_zero();
                normals[i1] += n2;
                normals[i2] += n2;
                normals[i3] += n2;
            }
        }

        for (vertex, n) in vertices.iter_mut().zip(normals) {
            let n = n.try_normalize().unwrap_or(Vec3::Y);
            vertex.normal = [n.x, n.y, n.z];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> SeabedConfig {
        SeabedConfig {
            size: 100.0,
            segments: 24,
            seed,
            ..Default::default()
        }
    }

    /// Same seed and config must produce identical heightmaps.
    #[test]
    fn seabed_deterministic_same_seed() {
        let a = SeabedData::generate(small(98765));
        let b = SeabedData::generate(small(98765));
        assert_eq!(a.heightmap.len(), b.heightmap.len());
        for (i, (&ha, &hb)) in a.heightmap.iter().zip(b.heightmap.iter()).enumerate() {
            assert_eq!(ha.to_bits(), hb.to_bits(), "heightmap[{}] should match for same seed", i);
        }
        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn seabed_different_seed_different_jitter() {
        let a = SeabedData::generate(small(11111));
        let b = SeabedData::generate(small(22222));
        assert_ne!(a.heightmap, b.heightmap);
    }

    #[test]
    fn default_grid_dimensions() {
        let config = SeabedConfig::default();
        assert_eq!(config.resolution(), 181);
        let data = SeabedData::generate(config);
        assert_eq!(data.vertices.len(), 181 * 181);
        assert_eq!(data.indices.len(), 180 * 180 * 6);
    }

    #[test]
    fn heights_stay_within_layer_bounds() {
        let data = SeabedData::generate(small(7));
        let c = &data.config;
        let lo = c.ground_height - c.broad_amplitude - c.ridge_amplitude;
        let hi = c.ground_height + c.broad_amplitude + c.ridge_amplitude + c.jitter;
        assert!(data.heightmap.iter().all(|&h| h >= lo && h <= hi));
    }

    #[test]
    fn jitter_is_bounded_when_layers_are_flat() {
        let config = SeabedConfig {
            broad_amplitude: 0.0,
            ridge_amplitude: 0.0,
            ..small(3)
        };
        let data = SeabedData::generate(config);
        assert!(data
            .heightmap
            .iter()
            .all(|&h| h >= -22.0 && h < -22.0 + 0.6));
        // Some roughness is present.
        let min = data.heightmap.iter().cloned().fold(f32::MAX, f32::min);
        let max = data.heightmap.iter().cloned().fold(f32::MIN, f32::max);
        assert!(max - min > 0.01);
    }

    #[test]
    fn normals_are_unit_and_face_up() {
        let data = SeabedData::generate(small(5));
        for v in &data.vertices {
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn sample_height_matches_grid_vertices() {
        let data = SeabedData::generate(small(9));
        let res = data.config.resolution();
        for &(x, z) in &[(0usize, 0usize), (3, 7), (12, 12), (20, 5)] {
            let v = data.vertices[z * res + x].position;
            let h = data.sample_height(v[0], v[2]);
            assert!((h - data.heightmap[z * res + x]).abs() < 1e-3);
        }
        assert!(data.contains(0.0, 0.0));
        assert!(!data.contains(60.0, 0.0));
    }
}
