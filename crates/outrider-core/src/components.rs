//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Systems own the behavior; the upgrade catalog owns derived stats.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Behavior;

/// Marks the player craft entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks an enemy entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Handle of the rigid body backing this entity in the physics space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRef(pub u64);

/// Cumulative per-round statistics, folded into the debrief summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoundStats {
    pub kills: u32,
    pub damage_dealt: f64,
    pub ammo_spent: u32,
    pub fuel_spent: f64,
    pub hull_damage: f64,
}

/// The player craft's mutable flight/combat state.
///
/// Weapon tiers use `None` as the locked sentinel; `Some(t)` indexes the
/// per-level stat tables in the upgrade catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotState {
    pub hp: f64,
    pub max_hp: f64,
    pub shield_hp: f64,
    /// Seconds until shield regeneration resumes after a hit.
    pub shield_regen_delay: f64,

    pub fuel: f64,
    pub max_fuel: f64,
    /// Loadout fuel-burn multiplier (heavier fits burn faster).
    pub fuel_rate: f64,
    /// Loadout-adjusted craft speed rating (base + thruster tiers).
    pub speed_value: f64,
    /// Speed rating as supplied by the loadout, before thruster upgrades.
    pub base_speed: f64,

    pub throttle_level: f64,
    pub boost_charge: f64,
    pub boost_timer: f64,
    pub hurdle_cooldown: f64,
    pub boost_unlocked: bool,
    pub hurdle_unlocked: bool,

    /// Monotonic clock for double-tap detection.
    pub tap_clock: f64,
    pub last_left_tap: f64,
    pub last_right_tap: f64,

    pub level: u32,
    pub xp: f64,

    pub minigun_tier: u8,
    pub rockets_tier: Option<u8>,
    pub laser_tier: Option<u8>,
    pub emp_tier: Option<u8>,
    pub mines_tier: Option<u8>,
    pub shield_tier: Option<u8>,
    pub health_tier: u8,
    pub tractor_tier: u8,
    pub thruster_tier: u8,
    pub upgrades_taken: u32,

    pub stats: RoundStats,
}

/// An enemy unit's combat profile and AI scratch state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
    /// Contact damage per second of overlap.
    pub contact_damage: f64,
    pub xp_value: f64,
    /// Visual polygon side count; also feeds the AI oscillators.
    pub sides: u32,
    pub radius: f64,
    pub is_boss: bool,
    pub behavior: Behavior,
    pub preferred_range: f64,
    /// Per-enemy elapsed-time accumulator driving oscillating motion.
    pub phase_clock: f64,
}

/// Minigun round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub velocity: DVec2,
    /// Previous position, for segment hit tests and tracer rendering.
    pub prev: DVec2,
    pub ttl: f64,
    pub damage: f64,
}

/// Railgun slug. Pierces: remembers which enemies it already hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailSlug {
    pub velocity: DVec2,
    pub prev: DVec2,
    pub ttl: f64,
    pub damage: f64,
    /// Entity bits of enemies already damaged by this slug.
    pub hit: Vec<u64>,
}

/// Rocket flying toward a fixed target point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub velocity: DVec2,
    pub prev: DVec2,
    pub target: DVec2,
    pub ttl: f64,
    pub damage: f64,
    pub splash_radius: f64,
}

/// Laser beam. Damage is resolved once, on the frame it fires; the
/// entity then lives on for the visual fade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserBeam {
    pub start: DVec2,
    pub end: DVec2,
    pub ttl: f64,
    pub damage: f64,
    /// True until the piercing hit test has run.
    pub pending: bool,
}

/// EMP pulse ring. Damage ticks once per pulse; afterwards the ring only
/// fades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpPulse {
    pub radius: f64,
    pub ttl: f64,
    pub damage: f64,
    /// True until the radius test has run.
    pub pending: bool,
}

/// Proximity mine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    pub ttl: f64,
    pub damage: f64,
    pub splash_radius: f64,
    pub trigger_radius: f64,
}

/// Experience gem dropped by a destroyed enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpGem {
    pub value: f64,
    pub lifetime: f64,
}
