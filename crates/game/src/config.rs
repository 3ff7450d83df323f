//! World configuration (seed, entity counts, speeds, bounds). Loaded from `world.ron` at startup.
//!
//! Speeds are stored per second. The reference tuning was authored per frame
//! at 60 Hz, so defaults are written as `per_frame * REFERENCE_FPS`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Frame rate the reference per-frame constants were tuned at.
pub const REFERENCE_FPS: f32 = 60.0;

/// Errors from loading or validating a world config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Vehicle kinematics and depth limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Spawn position.
    pub spawn: [f32; 3],
    /// Forward/backward speed in units per second.
    pub speed: f32,
    /// Yaw rate in radians per second.
    pub rotation_speed: f32,
    /// Ascend/descend speed in units per second.
    pub vertical_speed: f32,
    /// Lowest allowed y.
    pub min_depth: f32,
    /// Highest allowed y.
    pub max_depth: f32,
    /// Propeller spin while thrusting, radians per second.
    pub propeller_thrust_rate: f32,
    /// Propeller idle spin, radians per second.
    pub propeller_idle_rate: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 0.0, 0.0],
            speed: 0.07 * REFERENCE_FPS,
            rotation_speed: 0.008 * REFERENCE_FPS,
            vertical_speed: 0.03 * REFERENCE_FPS,
            min_depth: -18.0,
            max_depth: 10.0,
            propeller_thrust_rate: 0.3 * REFERENCE_FPS,
            propeller_idle_rate: 0.04 * REFERENCE_FPS,
        }
    }
}

/// Chase camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the vehicle in vehicle space.
    pub offset: [f32; 3],
    /// Fraction of the remaining distance closed per reference frame.
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 6.0, -18.0],
            smoothing: 0.02,
        }
    }
}

/// One migrating fish school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// RGBA emissive color.
    pub color: [f32; 4],
    /// Longitudinal travel in units per second.
    pub speed: f32,
    /// Clock offset in seconds.
    pub delay: f32,
    /// Static offset of the school's drift center.
    pub offset: [f32; 3],
    pub members: usize,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self::new([0.0, 1.0, 1.0, 1.0], 0.25, 0.0, [0.0, 0.0, 0.0])
    }
}

impl SwarmConfig {
    /// Swarm with a per-reference-frame speed.
    pub fn new(color: [f32; 4], speed_per_frame: f32, delay: f32, offset: [f32; 3]) -> Self {
        Self {
            color,
            speed: speed_per_frame * REFERENCE_FPS,
            delay,
            offset,
            members: 120,
        }
    }
}

fn default_swarms() -> Vec<SwarmConfig> {
    vec![
        SwarmConfig::new([0.0, 1.0, 1.0, 1.0], 0.25, 0.0, [0.0, 0.0, 0.0]),
        SwarmConfig::new([1.0, 0.0, 1.0, 1.0], 0.2, 50.0, [-30.0, 5.0, 20.0]),
        SwarmConfig::new([0.0, 1.0, 0.533, 1.0], 0.3, 120.0, [25.0, -10.0, -30.0]),
        SwarmConfig::new([1.0, 1.0, 0.0, 1.0], 0.15, 200.0, [-40.0, -5.0, 50.0]),
        SwarmConfig::new([1.0, 0.333, 0.0, 1.0], 0.22, 80.0, [40.0, 8.0, -60.0]),
    ]
}

/// Roaming leviathan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeviathanConfig {
    /// Where the leviathan waits before its first pass.
    pub start: [f32; 3],
    /// Travel along -z while active, units per second.
    pub lane_speed: f32,
}

impl Default for LeviathanConfig {
    fn default() -> Self {
        Self {
            start: [50.0, -5.0, 120.0],
            lane_speed: 0.1 * REFERENCE_FPS,
        }
    }
}

/// Full world configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every procedural generator.
    pub seed: u64,
    pub vehicle: VehicleConfig,
    pub camera: CameraConfig,
    pub swarms: Vec<SwarmConfig>,
    pub leviathan: LeviathanConfig,
    /// Mineral samples placed at world creation.
    pub collectible_count: usize,
    /// Samples are scattered in `[-extent, extent)` on x and z.
    pub collectible_extent: f32,
    /// Vehicle-to-sample distance that counts as a pickup.
    pub pickup_radius: f32,
    pub rock_count: usize,
    pub creature_count: usize,
    pub sea_snow_count: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EAF_100D,
            vehicle: VehicleConfig::default(),
            camera: CameraConfig::default(),
            swarms: default_swarms(),
            leviathan: LeviathanConfig::default(),
            collectible_count: 12,
            collectible_extent: 30.0,
            pickup_radius: 2.0,
            rock_count: 120,
            creature_count: 25,
            sea_snow_count: 2000,
        }
    }
}

impl WorldConfig {
    /// Load config from `world.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty RON for writing a config template.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Reject configs the simulation cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.vehicle;
        if !(v.min_depth < v.max_depth) {
            return Err(ConfigError::Invalid(format!(
                "vehicle depth bounds inverted: [{}, {}]",
                v.min_depth, v.max_depth
            )));
        }
        let rates = [
            ("vehicle.speed", v.speed),
            ("vehicle.rotation_speed", v.rotation_speed),
            ("vehicle.vertical_speed", v.vertical_speed),
            ("vehicle.propeller_thrust_rate", v.propeller_thrust_rate),
            ("vehicle.propeller_idle_rate", v.propeller_idle_rate),
            ("leviathan.lane_speed", self.leviathan.lane_speed),
        ];
        for (name, value) in rates {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} is not finite", name)));
            }
        }
        if !(self.camera.smoothing > 0.0 && self.camera.smoothing <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.smoothing must be in (0, 1], got {}",
                self.camera.smoothing
            )));
        }
        if self.leviathan.lane_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "leviathan.lane_speed must not be negative, got {}",
                self.leviathan.lane_speed
            )));
        }
        if !(self.collectible_extent >= 0.0 && self.collectible_extent.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "collectible_extent must not be negative, got {}",
                self.collectible_extent
            )));
        }
        if !(self.pickup_radius > 0.0 && self.pickup_radius.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "pickup_radius must be positive, got {}",
                self.pickup_radius
            )));
        }
        for (i, swarm) in self.swarms.iter().enumerate() {
            if swarm.members == 0 {
                return Err(ConfigError::Invalid(format!("swarm {} has no members", i)));
            }
            if !swarm.speed.is_finite() {
                return Err(ConfigError::Invalid(format!("swarm {} speed is not finite", i)));
            }
            if swarm.speed < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "swarm {} speed must not be negative, got {}",
                    i, swarm.speed
                )));
            }
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("world.ron")
}
