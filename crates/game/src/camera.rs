//! Chase camera that trails the vehicle.

use engine_core::{sanitize_seconds, Mat4, Vec3};

use crate::config::{CameraConfig, REFERENCE_FPS};
use crate::vehicle::VehicleState;

/// Camera pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    /// Point the camera looks at (the vehicle, unsmoothed).
    pub target: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.target - self.position;
        if forward.length_squared() < 1e-8 {
            return Mat4::from_translation(-self.position);
        }
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// Derives the camera from the vehicle each frame.
#[derive(Debug, Clone)]
pub struct CameraRig {
    offset: Vec3,
    /// Fraction of the gap closed per reference frame.
    smoothing: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            offset: Vec3::from(config.offset),
            smoothing: config.smoothing.clamp(0.0, 1.0),
        }
    }

    /// Where the camera wants to be: the local offset rotated into vehicle space.
    pub fn ideal_position(&self, vehicle: &VehicleState) -> Vec3 {
        vehicle.position + vehicle.rotation() * self.offset
    }

    /// Camera already settled behind the vehicle.
    pub fn behind(&self, vehicle: &VehicleState) -> CameraState {
        CameraState::new(self.ideal_position(vehicle), vehicle.position)
    }

    /// Lerp factor for a frame of `dt` seconds. Equals `smoothing` at the reference rate.
    pub fn blend_factor(&self, dt: f32) -> f32 {
        let frames = sanitize_seconds(dt) * REFERENCE_FPS;
        1.0 - (1.0 - self.smoothing).powf(frames)
    }

    /// Next camera pose. Without a vehicle the previous pose is kept.
    pub fn update(&self, prev: &CameraState, vehicle: Option<&VehicleState>, dt: f32) -> CameraState {
        let Some(vehicle) = vehicle else {
            return *prev;
        };
        let ideal = self.ideal_position(vehicle);
        CameraState {
            position: prev.position.lerp(ideal, self.blend_factor(dt)),
            target: vehicle.position,
        }
    }
}
