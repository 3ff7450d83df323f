//! Abyss simulation: the per-frame core for an explorable underwater world.
//!
//! The host supplies control intents and frame timing, calls
//! [`OceanWorld::tick`] once per frame, and reads the result back through
//! [`OceanWorld::view`].

pub mod camera;
pub mod collector;
pub mod config;
pub mod creatures;
pub mod effects;
pub mod flock;
pub mod leviathan;
pub mod mission;
pub mod vehicle;
pub mod world;

pub use camera::{CameraRig, CameraState};
pub use collector::{CollectibleField, ProximityCollector};
pub use config::{ConfigError, WorldConfig, REFERENCE_FPS};
pub use leviathan::{Leviathan, LeviathanPhase};
pub use mission::{MissionSink, MissionState};
pub use vehicle::{VehicleController, VehicleState};
pub use world::{FrameView, OceanWorld, Seabed, TickReport};
