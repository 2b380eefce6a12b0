//! Simulation engine for Delve.
//!
//! Owns the hecs ECS world and the tile grid, runs systems once per frame,
//! and produces `WorldSnapshot`s for the render collaborator.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use delve_core as core;
pub use engine::{SimError, SimulationEngine};
