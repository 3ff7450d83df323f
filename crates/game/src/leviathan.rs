//! Roaming leviathan: a clock-gated two-state event.
//!
//! A slow oscillator `sin(t * 0.08)` wakes the leviathan above
//! [`WAKE_THRESHOLD`] and puts it back to sleep below [`SLEEP_THRESHOLD`].
//! Between the two thresholds it keeps whatever state it is in.

use engine_core::{sanitize_seconds, Transform, Vec3, Visibility};

use crate::config::LeviathanConfig;

pub const OSCILLATOR_FREQUENCY: f32 = 0.08;
pub const WAKE_THRESHOLD: f32 = 0.7;
pub const SLEEP_THRESHOLD: f32 = -0.4;
/// The lane runs from `LANE_END` (exclusive) back to `LANE_START`.
pub const LANE_START: f32 = 120.0;
pub const LANE_END: f32 = -120.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeviathanPhase {
    #[default]
    Dormant,
    Active,
}

impl LeviathanPhase {
    /// Transition guard.
    pub fn next(self, oscillator: f32) -> Self {
        match self {
            Self::Dormant if oscillator > WAKE_THRESHOLD => Self::Active,
            Self::Active if oscillator < SLEEP_THRESHOLD => Self::Dormant,
            phase => phase,
        }
    }
}

/// Value of the gating oscillator at `clock` seconds.
pub fn oscillator(clock: f32) -> f32 {
    (clock * OSCILLATOR_FREQUENCY).sin()
}

#[derive(Debug, Clone)]
pub struct Leviathan {
    phase: LeviathanPhase,
    position: Vec3,
    lane_speed: f32,
}

impl Leviathan {
    pub fn new(config: &LeviathanConfig) -> Self {
        Self {
            phase: LeviathanPhase::Dormant,
            position: Vec3::from(config.start),
            lane_speed: config.lane_speed,
        }
    }

    pub fn phase(&self) -> LeviathanPhase {
        self.phase
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from_flag(self.phase == LeviathanPhase::Active)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position)
    }

    /// Run the transition guard, then move if active. Returns the new phase on a transition.
    pub fn update(&mut self, dt: f32, clock: f32) -> Option<LeviathanPhase> {
        let previous = self.phase;
        self.phase = previous.next(oscillator(clock));

        if self.phase == LeviathanPhase::Active {
            self.position.z -= self.lane_speed * sanitize_seconds(dt);
            self.position.y = -8.0 + (clock * 0.4).sin() * 4.0;
            self.position.x = 50.0 + (clock * 0.15).cos() * 15.0;
            if self.position.z < LANE_END {
                self.position.z = LANE_START;
            }
        }

        (self.phase != previous).then_some(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    /// Clock at which the oscillator reads `value` on its rising quarter.
    fn clock_for(value: f32) -> f32 {
        value.asin() / OSCILLATOR_FREQUENCY
    }

    #[test]
    fn hysteresis_band_never_changes_state() {
        for i in 0..=110 {
            let v = -0.4 + i as f32 * 0.01;
            let v = v.min(0.7);
            assert_eq!(LeviathanPhase::Dormant.next(v), LeviathanPhase::Dormant, "v = {}", v);
            assert_eq!(LeviathanPhase::Active.next(v), LeviathanPhase::Active, "v = {}", v);
        }
    }

    #[test]
    fn thresholds_gate_transitions() {
        assert_eq!(LeviathanPhase::Dormant.next(0.71), LeviathanPhase::Active);
        assert_eq!(LeviathanPhase::Dormant.next(-0.9), LeviathanPhase::Dormant);
        assert_eq!(LeviathanPhase::Active.next(-0.41), LeviathanPhase::Dormant);
        assert_eq!(LeviathanPhase::Active.next(0.99), LeviathanPhase::Active);
    }

    #[test]
    fn dormant_is_frozen_and_hidden() {
        let mut lev = Leviathan::new(&LeviathanConfig::default());
        let start = lev.position();
        assert_eq!(lev.update(1.0, clock_for(0.5)), None);
        assert_eq!(lev.position(), start);
        assert!(!lev.visibility().is_visible());
    }

    #[test]
    fn wakes_moves_and_sleeps() {
        let mut lev = Leviathan::new(&LeviathanConfig::default());
        let wake = clock_for(0.8);
        assert_eq!(lev.update(0.5, wake), Some(LeviathanPhase::Active));
        assert!(lev.visibility().is_visible());
        assert!((lev.position().z - (120.0 - 3.0)).abs() < 1e-4);
        assert!((lev.position().y - (-8.0 + (wake * 0.4).sin() * 4.0)).abs() < 1e-4);

        // Past the peak and back into the band: still active.
        let band = (std::f32::consts::PI - 0.2f32.asin()) / OSCILLATOR_FREQUENCY;
        assert_eq!(lev.update(0.5, band), None);
        assert_eq!(lev.phase(), LeviathanPhase::Active);

        // Falling below the sleep threshold.
        let sleep = (std::f32::consts::PI + 0.5f32.asin()) / OSCILLATOR_FREQUENCY;
        assert_eq!(lev.update(0.5, sleep), Some(LeviathanPhase::Dormant));
        let frozen = lev.position();
        lev.update(0.5, sleep + 0.1);
        assert_eq!(lev.position(), frozen);
    }

    #[test]
    fn lane_wraps_back_to_start() {
        let mut lev = Leviathan::new(&LeviathanConfig {
            start: [50.0, -5.0, -119.0],
            lane_speed: 6.0,
        });
        let peak = FRAC_PI_2 / OSCILLATOR_FREQUENCY;
        lev.update(1.0, peak);
        assert_eq!(lev.position().z, LANE_START);
    }
}
