//! Drifting comb jellies.

use engine_core::{sanitize_seconds, Transform, Vec3};
use procgen::CreatureSpawn;

/// Vertical bob amplitude, units per second.
const BOB_RATE: f32 = 0.72;
/// Lateral sway amplitude, units per second.
const SWAY_RATE: f32 = 0.48;
/// Yaw drift, radians per second.
const TURN_RATE: f32 = 0.12;

/// One comb jelly.
#[derive(Debug, Clone)]
pub struct CombJelly {
    pub transform: Transform,
    pub color: [f32; 4],
    /// Clock offset for this jelly.
    pub delay: f32,
    /// Emissive intensity of the cilia, pulsing in `[0.5, 4.5]`.
    pub glow: f32,
}

impl CombJelly {
    pub fn spawn(spawn: &CreatureSpawn) -> Self {
        Self {
            transform: Transform::from_position(spawn.position),
            color: spawn.color,
            delay: spawn.delay,
            glow: 2.5,
        }
    }

    pub fn update(&mut self, dt: f32, clock: f32) {
        let dt = sanitize_seconds(dt);
        let time = clock + self.delay;
        self.transform.translate(Vec3::new(
            (time * 0.15).cos() * SWAY_RATE * dt,
            (time * 0.3).sin() * BOB_RATE * dt,
            0.0,
        ));
        self.transform.rotate_y(TURN_RATE * dt);
        self.glow = 2.5 + (time * 3.0).sin() * 2.0;
    }
}

/// All comb jellies in the world.
#[derive(Debug, Clone, Default)]
pub struct Creatures {
    jellies: Vec<CombJelly>,
}

impl Creatures {
    pub fn new(spawns: &[CreatureSpawn]) -> Self {
        Self {
            jellies: spawns.iter().map(CombJelly::spawn).collect(),
        }
    }

    pub fn update(&mut self, dt: f32, clock: f32) {
        for jelly in &mut self.jellies {
            jelly.update(dt, clock);
        }
    }

    pub fn jellies(&self) -> &[CombJelly] {
        &self.jellies
    }
}
