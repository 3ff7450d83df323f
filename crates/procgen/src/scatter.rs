//! Uniform scatter for collectibles, drifting creatures, and sea snow.

use glam::Vec3;
use rand::prelude::*;

/// World Y of the plane mineral samples rest on.
pub const SAMPLE_PLANE_Y: f32 = -18.5;

/// Place `count` samples uniformly in `[-half_extent, half_extent)` on the sample plane.
pub fn scatter_samples(seed: u64, count: usize, half_extent: f32) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spread = half_extent * 2.0;
    (0..count)
        .map(|_| {
            let x = (rng.gen::<f32>() - 0.5) * spread;
            let z = (rng.gen::<f32>() - 0.5) * spread;
            Vec3::new(x, SAMPLE_PLANE_Y, z)
        })
        .collect()
}

/// Bioluminescent palette cycled across creatures: cyan, magenta, mint, amber.
pub const CREATURE_PALETTE: [[f32; 4]; 4] = [
    [0.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.333, 1.0, 0.667, 1.0],
    [1.0, 0.733, 0.0, 1.0],
];

/// Spawn data for one drifting comb jelly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureSpawn {
    pub position: Vec3,
    pub color: [f32; 4],
    /// Clock offset so creatures do not pulse in unison.
    pub delay: f32,
}

/// Scatter creatures through the water column around the origin.
pub fn scatter_creatures(seed: u64, count: usize) -> Vec<CreatureSpawn> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 140.0,
                (rng.gen::<f32>() - 0.5) * 18.0 + 1.0,
                (rng.gen::<f32>() - 0.5) * 140.0,
            );
            CreatureSpawn {
                position,
                color: CREATURE_PALETTE[i % CREATURE_PALETTE.len()],
                delay: rng.gen::<f32>() * 20.0,
            }
        })
        .collect()
}

/// Static sea snow particles. Only the field's group offset moves at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaSnowField {
    pub offsets: Vec<Vec3>,
    pub sizes: Vec<f32>,
}

impl SeaSnowField {
    /// Box the particles are scattered in (x, y, z extents).
    pub const EXTENT: Vec3 = Vec3::new(150.0, 100.0, 150.0);

    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut offsets = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        for _ in 0..count {
            offsets.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * Self::EXTENT.x,
                (rng.gen::<f32>() - 0.5) * Self::EXTENT.y,
                (rng.gen::<f32>() - 0.5) * Self::EXTENT.z,
            ));
            sizes.push(0.02 + rng.gen::<f32>() * 0.12);
        }
        Self { offsets, sizes }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
