//! Basalt rock field: scattered placements plus one shared lumpy rock mesh.

use engine_core::Transform;
use glam::Vec3;
use rand::prelude::*;

use crate::terrain::TerrainVertex;

/// One placed rock instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockPlacement {
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// XYZ Euler rotation in radians.
    pub rotation: Vec3,
}

impl RockPlacement {
    pub fn transform(&self) -> Transform {
        Transform::from_euler_xyz(self.position, self.rotation, self.scale)
    }
}

/// Rock field parameters.
#[derive(Debug, Clone)]
pub struct RockFieldConfig {
    pub count: usize,
    /// Rocks are placed in `[-half_extent, half_extent)` on x and z.
    pub half_extent: f32,
    pub ground_height: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub seed: u64,
}

impl Default for RockFieldConfig {
    fn default() -> Self {
        Self {
            count: 120,
            half_extent: 200.0,
            ground_height: -22.0,
            min_scale: 3.0,
            max_scale: 13.0,
            seed: 0,
        }
    }
}

/// Place `config.count` rocks with independent draws per rock.
pub fn generate_rock_field(config: &RockFieldConfig) -> Vec<RockPlacement> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let spread = config.half_extent * 2.0;
    let scale_range = (config.max_scale - config.min_scale).max(0.0);

    let rocks: Vec<RockPlacement> = (0..config.count)
        .map(|_| {
            let x = (rng.gen::<f32>() - 0.5) * spread;
            let z = (rng.gen::<f32>() - 0.5) * spread;
            let scale = config.min_scale + rng.gen::<f32>() * scale_range;
            let rotation = Vec3::new(
                rng.gen::<f32>() * std::f32::consts::PI,
                rng.gen::<f32>() * std::f32::consts::PI,
                rng.gen::<f32>() * std::f32::consts::PI,
            );
            RockPlacement {
                position: Vec3::new(x, config.ground_height, z),
                scale,
                rotation,
            }
        })
        .collect();

    log::debug!("rock field: {} rocks, seed {}", rocks.len(), config.seed);
    rocks
}

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

/// Regular dodecahedron vertices on the `(±1, ±1, ±1)` cube plus golden rectangles.
const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI],
    [0.0, -INV_PHI, PHI],
    [0.0, INV_PHI, -PHI],
    [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0],
    [-INV_PHI, PHI, 0.0],
    [INV_PHI, -PHI, 0.0],
    [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI],
    [PHI, 0.0, -INV_PHI],
    [-PHI, 0.0, INV_PHI],
    [PHI, 0.0, INV_PHI],
];

/// 12 pentagons, each fanned into 3 triangles.
const DODECAHEDRON_TRIANGLES: [[usize; 3]; 36] = [
    [3, 11, 7],
    [3, 7, 15],
    [3, 15, 13],
    [7, 19, 17],
    [7, 17, 6],
    [7, 6, 15],
    [17, 4, 8],
    [17, 8, 10],
    [17, 10, 6],
    [8, 0, 16],
    [8, 16, 2],
    [8, 2, 10],
    [0, 12, 1],
    [0, 1, 18],
    [0, 18, 16],
    [6, 10, 2],
    [6, 2, 13],
    [6, 13, 15],
    [2, 16, 18],
    [2, 18, 3],
    [2, 3, 13],
    [18, 1, 9],
    [18, 9, 11],
    [18, 11, 3],
    [4, 14, 12],
    [4, 12, 0],
    [4, 0, 8],
    [11, 9, 5],
    [11, 5, 19],
    [11, 19, 7],
    [19, 5, 14],
    [19, 14, 4],
    [19, 4, 17],
    [1, 12, 14],
    [1, 14, 5],
    [1, 5, 9],
];

/// Per-vertex displacement is `(r - 0.5) * ROCK_ROUGHNESS` on every axis.
pub const ROCK_ROUGHNESS: f32 = 0.7;

/// Non-indexed rock mesh: a once-subdivided unit dodecahedron with every
/// vertex pushed off the sphere, so faces crack apart into a broken basalt look.
#[derive(Debug, Clone)]
pub struct BasaltRockMesh {
    pub vertices: Vec<TerrainVertex>,
}

impl BasaltRockMesh {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions: Vec<Vec3> = Vec::with_capacity(DODECAHEDRON_TRIANGLES.len() * 12);

        for tri in DODECAHEDRON_TRIANGLES {
            let [a, b, c] = tri.map(|i| Vec3::from(DODECAHEDRON_VERTICES[i]).normalize());
            let ab = ((a + b) * 0.5).normalize();
            let bc = ((b + c) * 0.5).normalize();
            let ca = ((c + a) * 0.5).normalize();
            for face in [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]] {
                positions.extend(face);
            }
        }

        for p in &mut positions {
            let offset = (rng.gen::<f32>() - 0.5) * ROCK_ROUGHNESS;
            *p += Vec3::splat(offset);
        }

        let vertices = positions
            .chunks_exact(3)
            .flat_map(|face| {
                let n = (face[1] - face[0])
                    .cross(face[2] - face[0])
                    .try_normalize()
                    .unwrap_or(Vec3::Y);
                face.iter().map(move |p| TerrainVertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                    uv: [0.0, 0.0],
                })
            })
            .collect();

        Self { vertices }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}
