//! Simulation engine for Outrider.
//!
//! Owns the hecs ECS world, runs the per-frame system pass against an
//! injected physics [`outrider_physics::Space`], and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic
//! testing.

pub mod engine;
pub mod fire_control;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use outrider_core as core;

#[cfg(test)]
mod tests;
