//! Migrating fish schools, animated as instanced members.
//!
//! Each school drifts as a group along z, wrapping from the far end back to a
//! re-entry point further behind the start, and every member jitters around
//! the group center on its own phase. The only state carried between frames
//! is the school's longitudinal progress; member transforms are rebuilt in
//! full each frame into a buffer allocated once.

use engine_core::{sanitize_seconds, Transform, TransformRaw, Vec3};
use procgen::SwarmPhaseTable;

use crate::config::SwarmConfig;

/// Progress at world creation.
pub const PROGRESS_START: f32 = -120.0;
/// Progress above this wraps.
pub const PROGRESS_WRAP_AT: f32 = 120.0;
/// Where wrapped schools re-enter. Behind the start, so a wrapped school is
/// out of sight for a while before it comes back around.
pub const PROGRESS_REENTRY: f32 = -150.0;

/// Advance progress by `step`, wrapping on the same tick it crosses the far end.
#[inline]
pub fn advance_progress(progress: f32, step: f32) -> f32 {
    let next = progress + step;
    if next > PROGRESS_WRAP_AT {
        PROGRESS_REENTRY
    } else {
        next
    }
}

/// One fish school.
#[derive(Debug, Clone)]
pub struct Swarm {
    config: SwarmConfig,
    phases: SwarmPhaseTable,
    progress: f32,
    members: Vec<Transform>,
}

impl Swarm {
    pub fn new(config: SwarmConfig) -> Self {
        let phases = SwarmPhaseTable::new(config.members);
        let members = vec![Transform::default(); phases.len()];
        Self {
            config,
            phases,
            progress: PROGRESS_START,
            members,
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn color(&self) -> [f32; 4] {
        self.config.color
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Member transforms from the last update.
    pub fn members(&self) -> &[Transform] {
        &self.members
    }

    /// Group drift center at swarm time `time` (clock plus delay).
    pub fn group_center(&self, time: f32) -> Vec3 {
        let offset = Vec3::from(self.config.offset);
        Vec3::new(
            offset.x + (time * 0.2).sin() * 20.0,
            offset.y + (time * 0.3).cos() * 8.0 - 5.0,
            self.progress + offset.z,
        )
    }

    /// Advance the school by `dt` and rebuild every member transform at `clock`.
    pub fn update(&mut self, dt: f32, clock: f32) -> &[Transform] {
        let time = clock + self.config.delay;
        self.progress = advance_progress(self.progress, self.config.speed * sanitize_seconds(dt));

        let center = self.group_center(time);
        // Shared heading sway, pointing the school back along -z.
        let heading = std::f32::consts::PI + (time * 0.1).sin() * 0.3;

        for (member, phase) in self.members.iter_mut().zip(self.phases.iter()) {
            let t = time + phase.phase;
            let local = Vec3::new(
                (t * 2.5).sin() * 2.5,
                (t * 2.0).cos() * 1.5,
                (t * 0.8).sin() * 3.0 + phase.lane,
            );
            let euler = Vec3::new(t.cos() * 0.15, heading, t.sin() * 0.15);
            let scale = 0.09 + (t * 0.5).sin() * 0.03;
            *member = Transform::from_euler_xyz(center + local, euler, scale);
        }

        &self.members
    }

    /// Write GPU instance matrices into `out`, reusing its allocation.
    pub fn write_instances(&self, out: &mut Vec<TransformRaw>) {
        out.clear();
        out.extend(self.members.iter().map(TransformRaw::from));
    }
}
