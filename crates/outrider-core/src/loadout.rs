//! Loadout contract consumed at round start.
//!
//! The fitting bay (an external collaborator) resolves module
//! compatibility and mass math; the simulation only receives the
//! resulting numbers and hardpoint definitions.

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_BASE_SPEED, PLAYER_FUEL_START, PLAYER_MAX_HP};
use crate::enums::Mounting;

/// A manually aimed hardpoint weapon supplied by the fitting bay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponDef {
    pub name: String,
    pub damage: f64,
    /// Shots per second.
    pub fire_rate: f64,
    pub ammo_max: u32,
    /// Max angular deviation from mount-forward when tracking an aim
    /// point (degrees). Turret mounts ignore this and track freely.
    pub gimbal_degrees: f64,
    pub mounting: Mounting,
    /// Lateral sign for side mounts: -1 left, 1 right.
    pub side_sign: i8,
}

/// Ship fit handed to the simulation when a round starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    pub hull: f64,
    pub fuel: f64,
    pub speed: f64,
    /// Fuel-burn multiplier from the fit's mass ratio.
    pub fuel_rate: f64,
    pub weapons: Vec<WeaponDef>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            hull: PLAYER_MAX_HP,
            fuel: PLAYER_FUEL_START,
            speed: PLAYER_BASE_SPEED,
            fuel_rate: 1.0,
            weapons: vec![WeaponDef {
                name: "Railgun Mk1".to_string(),
                damage: 30.0,
                fire_rate: 1.2,
                ammo_max: 60,
                gimbal_degrees: 10.0,
                mounting: Mounting::Forward,
                side_sign: 1,
            }],
        }
    }
}
