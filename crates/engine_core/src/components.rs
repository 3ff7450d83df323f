//! Common ECS components used across the simulation.

use crate::transform::Transform;

/// Tag component for mineral samples the vehicle can pick up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collectible;

/// Cosmetic spin about the vertical axis, in radians per second.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    pub rate: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }

    pub fn apply(&self, transform: &mut Transform, dt: f32) {
        transform.rotate_y(self.rate * dt);
    }
}

impl Default for Spin {
    fn default() -> Self {
        // 0.02 rad per frame at 60 Hz
        Self::new(1.2)
    }
}

/// Render visibility for binary-state entities (leviathan, spotlight).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn from_flag(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::Hidden
        }
    }

    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}
