//! Core types and definitions for the Outrider simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, tuning, and the
//! upgrade catalog. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod loadout;
pub mod phase;
pub mod ruleset;
pub mod state;
pub mod types;
pub mod upgrades;

#[cfg(test)]
mod tests;
