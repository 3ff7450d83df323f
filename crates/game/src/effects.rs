//! Ambient effects: sea snow drift and vent plume bubbles.

use engine_core::{sanitize_seconds, Vec3};
use procgen::{PlumeBubble, SeaSnowField, VentPlacement, PLUME_BUBBLES};

/// Sea snow sinks at this rate, units per second.
const SNOW_SINK_RATE: f32 = 0.3;
/// Peak lateral current, units per second.
const SNOW_CURRENT_RATE: f32 = 0.06;
/// Below this the field jumps back to [`SNOW_WRAP_TOP`].
const SNOW_WRAP_BOTTOM: f32 = -40.0;
const SNOW_WRAP_TOP: f32 = 40.0;

/// Sea snow: static particle offsets under one drifting group offset.
#[derive(Debug, Clone)]
pub struct SeaSnow {
    field: SeaSnowField,
    offset: Vec3,
}

impl SeaSnow {
    pub fn new(field: SeaSnowField) -> Self {
        Self {
            field,
            offset: Vec3::ZERO,
        }
    }

    pub fn field(&self) -> &SeaSnowField {
        &self.field
    }

    /// Group offset added to every particle.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn update(&mut self, dt: f32, clock: f32) {
        let dt = sanitize_seconds(dt);
        self.offset.y -= SNOW_SINK_RATE * dt;
        if self.offset.y < SNOW_WRAP_BOTTOM {
            self.offset.y = SNOW_WRAP_TOP;
        }
        self.offset.x += (clock * 0.2).sin() * SNOW_CURRENT_RATE * dt;
    }
}

/// Bobbing bubble stacks above every vent.
#[derive(Debug, Clone)]
pub struct VentPlumes {
    vents: Vec<VentPlacement>,
    rest: [PlumeBubble; PLUME_BUBBLES],
    /// World positions, `PLUME_BUBBLES` per vent in vent order.
    bubbles: Vec<Vec3>,
}

impl VentPlumes {
    pub fn new(vents: Vec<VentPlacement>) -> Self {
        let rest = VentPlacement::plume();
        let bubbles = vents
            .iter()
            .flat_map(|vent| rest.iter().map(move |b| vent.position + Vec3::Y * b.height))
            .collect();
        Self {
            vents,
            rest,
            bubbles,
        }
    }

    pub fn vents(&self) -> &[VentPlacement] {
        &self.vents
    }

    pub fn bubbles(&self) -> &[Vec3] {
        &self.bubbles
    }

    /// Bubble radius for the `i`-th bubble of any vent.
    pub fn bubble_radius(&self, i: usize) -> f32 {
        self.rest[i % PLUME_BUBBLES].radius
    }

    pub fn update(&mut self, clock: f32) {
        for (vent, bubbles) in self.vents.iter().zip(self.bubbles.chunks_exact_mut(PLUME_BUBBLES)) {
            for (i, (bubble, rest)) in bubbles.iter_mut().zip(self.rest.iter()).enumerate() {
                let bob = (clock * 5.0 + i as f32).sin() * 0.4;
                *bubble = vent.position + Vec3::Y * (rest.height + bob);
            }
        }
    }
}
