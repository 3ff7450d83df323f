//! Hydrothermal vent layout and plume bubble stacks.

use glam::Vec3;

/// Bubbles stacked above each vent chimney.
pub const PLUME_BUBBLES: usize = 8;
/// Height of the chimney mouth above the vent base.
pub const CHIMNEY_HEIGHT: f32 = 6.0;

/// Vent base positions on the xz plane.
const DEFAULT_VENT_SITES: [(f32, f32); 4] = [(50.0, 60.0), (-80.0, -40.0), (30.0, -100.0), (-20.0, 80.0)];

/// One placed vent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VentPlacement {
    pub position: Vec3,
}

/// Rest pose of one plume bubble relative to its vent base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumeBubble {
    pub height: f32,
    pub radius: f32,
}

impl VentPlacement {
    /// The fixed four-vent layout at the given ground height.
    pub fn default_layout(ground_height: f32) -> Vec<Self> {
        DEFAULT_VENT_SITES
            .iter()
            .map(|&(x, z)| Self {
                position: Vec3::new(x, ground_height, z),
            })
            .collect()
    }

    /// World position of the chimney mouth (glow light).
    pub fn mouth(&self) -> Vec3 {
        self.position + Vec3::Y * CHIMNEY_HEIGHT
    }

    /// Bubble stack rest poses, bottom to top; each bubble is larger than the last.
    pub fn plume() -> [PlumeBubble; PLUME_BUBBLES] {
        std::array::from_fn(|i| PlumeBubble {
            height: CHIMNEY_HEIGHT + i as f32 * 1.5,
            radius: 0.4 + i as f32 * 0.2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_sits_on_ground() {
        let vents = VentPlacement::default_layout(-22.0);
        assert_eq!(vents.len(), 4);
        assert_eq!(vents[0].position, Vec3::new(50.0, -22.0, 60.0));
        assert!(vents.iter().all(|v| v.position.y == -22.0));
        assert_eq!(vents[2].mouth(), Vec3::new(30.0, -16.0, -100.0));
    }

    #[test]
    fn plume_grows_upward() {
        let plume = VentPlacement::plume();
        assert_eq!(plume[0].height, 6.0);
        assert!((plume[7].radius - 1.8).abs() < 1e-6);
        assert!(plume.windows(2).all(|w| w[1].height > w[0].height));
    }
}
