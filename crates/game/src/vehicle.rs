//! Submersible controller: control intents in, next kinematic state out.

use engine_core::{sanitize_seconds, Quat, Transform, Vec3};
use input::ControlState;

use crate::config::VehicleConfig;

/// Local position of the propeller hub behind the hull.
const PROPELLER_HUB: Vec3 = Vec3::new(0.0, 0.0, -2.4);

/// Vehicle state for one frame. Produced only by [`VehicleController::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub position: Vec3,
    /// Heading about +Y in radians. Unbounded; wraps through trig.
    pub yaw: f32,
    /// Cosmetic propeller roll angle for the renderer.
    pub propeller_angle: f32,
}

impl VehicleState {
    /// At rest at `position`, facing +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            propeller_angle: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Unit vector the vehicle travels along when thrusting forward.
    pub fn heading(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn transform(&self) -> Transform {
        Transform::from_yaw(self.position, self.yaw)
    }

    /// World transform of the propeller, rolled about the hull's long axis.
    pub fn propeller_transform(&self) -> Transform {
        let rotation = self.rotation();
        Transform::from_position_rotation(
            self.position + rotation * PROPELLER_HUB,
            rotation * Quat::from_rotation_z(self.propeller_angle),
        )
    }
}

/// Applies control intents to the vehicle.
#[derive(Debug, Clone)]
pub struct VehicleController {
    tuning: VehicleConfig,
}

impl VehicleController {
    pub fn new(tuning: VehicleConfig) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &VehicleConfig {
        &self.tuning
    }

    /// Initial state at the configured spawn, inside the depth bounds.
    pub fn spawn(&self) -> VehicleState {
        let mut state = VehicleState::new(Vec3::from(self.tuning.spawn));
        state.position.y = self.clamp_depth(state.position.y);
        state
    }

    /// Next state after `dt` seconds of `controls`.
    ///
    /// Translation uses the heading from before this frame's steering. The
    /// depth clamp is applied last.
    pub fn update(&self, prev: &VehicleState, controls: &ControlState, dt: f32) -> VehicleState {
        let dt = sanitize_seconds(dt);
        let t = &self.tuning;
        let mut next = *prev;

        next.position += prev.heading() * (controls.thrust_axis() * t.speed * dt);
        next.yaw += controls.turn_axis() * t.rotation_speed * dt;
        next.position.y += controls.vertical_axis() * t.vertical_speed * dt;

        let spin_rate = if controls.is_thrusting() {
            t.propeller_thrust_rate
        } else {
            t.propeller_idle_rate
        };
        next.propeller_angle = (prev.propeller_angle + spin_rate * dt) % std::f32::consts::TAU;

        next.position.y = self.clamp_depth(next.position.y);
        next
    }

    fn clamp_depth(&self, y: f32) -> f32 {
        y.clamp(self.tuning.min_depth, self.tuning.max_depth)
    }
}
