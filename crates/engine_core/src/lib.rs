//! Core engine types and utilities for Abyss.
//!
//! This crate provides the foundational types used across all simulation systems:
//! - Transform and spatial components
//! - Frame time bookkeeping
//! - Common component types for ECS

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
