//! Procedural generation for the seabed, rock field, swarms, vents, and scatter.
//!
//! Everything here runs once at world construction and is a pure function of
//! a seed and a config struct.

pub mod rocks;
pub mod scatter;
pub mod seed;
pub mod swarm;
pub mod terrain;
pub mod vents;

pub use rocks::*;
pub use scatter::*;
pub use seed::*;
pub use swarm::*;
pub use terrain::*;
pub use vents::*;
