//! The upgrade catalog: one tagged variant per category, each with a
//! typed per-level stat table and its own description formatting.
//!
//! Tier indices: `0..=MAX_TIER` rows per table. Unlockable categories use
//! `None` on the pilot as the locked sentinel; unlocking lands on tier 0.

use serde::{Deserialize, Serialize};

use crate::components::PilotState;

/// Highest reachable tier index.
pub const MAX_TIER: u8 = 5;

/// Upgrade categories offered on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Minigun,
    Rockets,
    Laser,
    Emp,
    Mines,
    Health,
    Shield,
    Tractor,
    Thrusters,
}

#[derive(Debug, Clone, Copy)]
pub struct MinigunTier {
    pub fire_cooldown: f64,
    pub bullet_damage: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RocketTier {
    pub damage: f64,
    pub splash_radius: f64,
    pub fire_cooldown: f64,
    /// Rockets per volley.
    pub salvo: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct LaserTier {
    pub damage: f64,
    pub fire_cooldown: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct EmpTier {
    pub damage: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct MineTier {
    pub drop_cooldown: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct HealthTier {
    pub max_hp_increase: f64,
    pub instant_heal: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ShieldTier {
    pub shield_max: f64,
    pub regen_rate: f64,
    pub regen_delay: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TractorTier {
    pub pickup_radius: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ThrusterTier {
    /// Added on top of the loadout's base speed.
    pub speed_bonus: f64,
}

pub const MINIGUN_TIERS: [MinigunTier; 6] = [
    MinigunTier { fire_cooldown: 0.40, bullet_damage: 10.0 },
    MinigunTier { fire_cooldown: 0.35, bullet_damage: 12.0 },
    MinigunTier { fire_cooldown: 0.30, bullet_damage: 14.0 },
    MinigunTier { fire_cooldown: 0.26, bullet_damage: 16.0 },
    MinigunTier { fire_cooldown: 0.22, bullet_damage: 18.0 },
    MinigunTier { fire_cooldown: 0.18, bullet_damage: 20.0 },
];

pub const ROCKET_TIERS: [RocketTier; 6] = [
    RocketTier { damage: 12.0, splash_radius: 34.0, fire_cooldown: 1.60, salvo: 3 },
    RocketTier { damage: 14.0, splash_radius: 38.0, fire_cooldown: 1.45, salvo: 4 },
    RocketTier { damage: 16.0, splash_radius: 42.0, fire_cooldown: 1.30, salvo: 4 },
    RocketTier { damage: 18.0, splash_radius: 46.0, fire_cooldown: 1.20, salvo: 5 },
    RocketTier { damage: 20.0, splash_radius: 50.0, fire_cooldown: 1.05, salvo: 5 },
    RocketTier { damage: 22.0, splash_radius: 55.0, fire_cooldown: 0.95, salvo: 6 },
];

pub const LASER_TIERS: [LaserTier; 6] = [
    LaserTier { damage: 15.0, fire_cooldown: 5.0 },
    LaserTier { damage: 20.0, fire_cooldown: 4.5 },
    LaserTier { damage: 25.0, fire_cooldown: 4.0 },
    LaserTier { damage: 30.0, fire_cooldown: 3.5 },
    LaserTier { damage: 35.0, fire_cooldown: 3.0 },
    LaserTier { damage: 40.0, fire_cooldown: 2.5 },
];

pub const EMP_TIERS: [EmpTier; 6] = [
    EmpTier { damage: 5.0, radius: 100.0 },
    EmpTier { damage: 7.0, radius: 120.0 },
    EmpTier { damage: 10.0, radius: 140.0 },
    EmpTier { damage: 15.0, radius: 160.0 },
    EmpTier { damage: 20.0, radius: 180.0 },
    EmpTier { damage: 25.0, radius: 200.0 },
];

pub const MINE_TIERS: [MineTier; 6] = [
    MineTier { drop_cooldown: 5.00 },
    MineTier { drop_cooldown: 4.50 },
    MineTier { drop_cooldown: 4.05 },
    MineTier { drop_cooldown: 3.64 },
    MineTier { drop_cooldown: 3.28 },
    MineTier { drop_cooldown: 2.95 },
];

pub const HEALTH_TIERS: [HealthTier; 6] = [
    HealthTier { max_hp_increase: 25.0, instant_heal: 25.0 },
    HealthTier { max_hp_increase: 25.0, instant_heal: 25.0 },
    HealthTier { max_hp_increase: 25.0, instant_heal: 25.0 },
    HealthTier { max_hp_increase: 25.0, instant_heal: 25.0 },
    HealthTier { max_hp_increase: 25.0, instant_heal: 25.0 },
    HealthTier { max_hp_increase: 25.0, instant_heal: 25.0 },
];

pub const SHIELD_TIERS: [ShieldTier; 6] = [
    ShieldTier { shield_max: 50.0, regen_rate: 5.0, regen_delay: 3.0 },
    ShieldTier { shield_max: 62.0, regen_rate: 6.0, regen_delay: 2.8 },
    ShieldTier { shield_max: 75.0, regen_rate: 7.0, regen_delay: 2.6 },
    ShieldTier { shield_max: 87.0, regen_rate: 8.0, regen_delay: 2.4 },
    ShieldTier { shield_max: 100.0, regen_rate: 9.0, regen_delay: 2.2 },
    ShieldTier { shield_max: 112.0, regen_rate: 10.0, regen_delay: 2.0 },
];

pub const TRACTOR_TIERS: [TractorTier; 6] = [
    TractorTier { pickup_radius: 0.0 },
    TractorTier { pickup_radius: 50.0 },
    TractorTier { pickup_radius: 100.0 },
    TractorTier { pickup_radius: 150.0 },
    TractorTier { pickup_radius: 200.0 },
    TractorTier { pickup_radius: 250.0 },
];

pub const THRUSTER_TIERS: [ThrusterTier; 6] = [
    ThrusterTier { speed_bonus: 0.0 },
    ThrusterTier { speed_bonus: 2.25 },
    ThrusterTier { speed_bonus: 4.5 },
    ThrusterTier { speed_bonus: 6.75 },
    ThrusterTier { speed_bonus: 9.0 },
    ThrusterTier { speed_bonus: 11.25 },
];

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 9] = [
        UpgradeKind::Minigun,
        UpgradeKind::Rockets,
        UpgradeKind::Laser,
        UpgradeKind::Emp,
        UpgradeKind::Mines,
        UpgradeKind::Health,
        UpgradeKind::Shield,
        UpgradeKind::Tractor,
        UpgradeKind::Thrusters,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Minigun => "Minigun Upgrade",
            UpgradeKind::Rockets => "Rockets",
            UpgradeKind::Laser => "Laser",
            UpgradeKind::Emp => "EMP Field",
            UpgradeKind::Mines => "Proximity Mines",
            UpgradeKind::Health => "Health Boost",
            UpgradeKind::Shield => "Shield System",
            UpgradeKind::Tractor => "Tractor Beam",
            UpgradeKind::Thrusters => "Thruster Tuning",
        }
    }

    /// Player level required before a locked category may be offered.
    pub fn unlock_level_gate(&self) -> u32 {
        match self {
            UpgradeKind::Rockets => 3,
            UpgradeKind::Laser => 5,
            UpgradeKind::Emp => 7,
            _ => 0,
        }
    }

    /// Describe what taking this upgrade at `tier` grants. `None` means
    /// the category is still locked and the offer is the unlock itself.
    pub fn describe(&self, tier: Option<u8>) -> String {
        let t = match tier {
            None => {
                return match self {
                    UpgradeKind::Rockets => "Unlock: Forward rocket rack".to_string(),
                    UpgradeKind::Laser => "Unlock: Piercing laser beam".to_string(),
                    UpgradeKind::Emp => "Unlock: EMP pulse field".to_string(),
                    UpgradeKind::Mines => "Unlock: Auto-dropping proximity mines".to_string(),
                    UpgradeKind::Shield => "Unlock: Shield system".to_string(),
                    _ => self.name().to_string(),
                };
            }
            Some(t) => (t as usize).min(MAX_TIER as usize),
        };

        match self {
            UpgradeKind::Minigun => {
                let v = &MINIGUN_TIERS[t];
                format!(
                    "Minigun: {:.2}s fire rate, {:.0} damage",
                    v.fire_cooldown, v.bullet_damage
                )
            }
            UpgradeKind::Rockets => {
                let v = &ROCKET_TIERS[t];
                format!(
                    "Rockets: {} missiles, {:.0} dmg, {:.0} splash, {:.1}s CD",
                    v.salvo, v.damage, v.splash_radius, v.fire_cooldown
                )
            }
            UpgradeKind::Laser => {
                let v = &LASER_TIERS[t];
                format!(
                    "Laser: {:.0} dmg, pierces enemies, {:.1}s CD",
                    v.damage, v.fire_cooldown
                )
            }
            UpgradeKind::Emp => {
                let v = &EMP_TIERS[t];
                format!("EMP: {:.0} dmg/tick, {:.0} radius", v.damage, v.radius)
            }
            UpgradeKind::Mines => {
                let v = &MINE_TIERS[t];
                format!("Mines: drops every {:.1}s behind the craft", v.drop_cooldown)
            }
            UpgradeKind::Health => {
                let v = &HEALTH_TIERS[t];
                format!(
                    "Health: +{:.0} max HP, +{:.0} heal",
                    v.max_hp_increase, v.instant_heal
                )
            }
            UpgradeKind::Shield => {
                let v = &SHIELD_TIERS[t];
                format!("Shield: {:.0} max shield, regenerates", v.shield_max)
            }
            UpgradeKind::Tractor => {
                let v = &TRACTOR_TIERS[t];
                if v.pickup_radius <= 0.0 {
                    "Tractor Beam: manual pickup only".to_string()
                } else {
                    format!("Tractor Beam: {:.0} pickup radius", v.pickup_radius)
                }
            }
            UpgradeKind::Thrusters => {
                let v = &THRUSTER_TIERS[t];
                format!("Thrusters: +{:.2} speed rating", v.speed_bonus)
            }
        }
    }
}

/// Current tier of `kind` on the pilot; `None` for locked categories.
pub fn current_tier(pilot: &PilotState, kind: UpgradeKind) -> Option<u8> {
    match kind {
        UpgradeKind::Minigun => Some(pilot.minigun_tier),
        UpgradeKind::Rockets => pilot.rockets_tier,
        UpgradeKind::Laser => pilot.laser_tier,
        UpgradeKind::Emp => pilot.emp_tier,
        UpgradeKind::Mines => pilot.mines_tier,
        UpgradeKind::Health => Some(pilot.health_tier),
        UpgradeKind::Shield => pilot.shield_tier,
        UpgradeKind::Tractor => Some(pilot.tractor_tier),
        UpgradeKind::Thrusters => Some(pilot.thruster_tier),
    }
}

/// Tier an application of `kind` would land on (unlocks land on 0).
pub fn next_tier(pilot: &PilotState, kind: UpgradeKind) -> u8 {
    match current_tier(pilot, kind) {
        None => 0,
        Some(t) => t.saturating_add(1).min(MAX_TIER),
    }
}

/// Categories currently eligible to be offered: not maxed, and locked
/// weapon systems only once the pilot level clears their gate.
pub fn candidates(pilot: &PilotState) -> Vec<UpgradeKind> {
    UpgradeKind::ALL
        .iter()
        .copied()
        .filter(|kind| match current_tier(pilot, *kind) {
            Some(t) => t < MAX_TIER,
            None => pilot.level >= kind.unlock_level_gate(),
        })
        .collect()
}

/// Apply one upgrade step. Already-maxed categories are ignored safely.
pub fn apply(pilot: &mut PilotState, kind: UpgradeKind) {
    if matches!(current_tier(pilot, kind), Some(t) if t >= MAX_TIER) {
        return;
    }
    let tier = next_tier(pilot, kind);

    match kind {
        UpgradeKind::Minigun => pilot.minigun_tier = tier,
        UpgradeKind::Rockets => pilot.rockets_tier = Some(tier),
        UpgradeKind::Laser => pilot.laser_tier = Some(tier),
        UpgradeKind::Emp => pilot.emp_tier = Some(tier),
        UpgradeKind::Mines => pilot.mines_tier = Some(tier),
        UpgradeKind::Health => {
            pilot.health_tier = tier;
            let v = &HEALTH_TIERS[tier as usize];
            pilot.max_hp += v.max_hp_increase;
            pilot.hp = (pilot.hp + v.instant_heal).min(pilot.max_hp);
        }
        UpgradeKind::Shield => {
            let newly_unlocked = pilot.shield_tier.is_none();
            pilot.shield_tier = Some(tier);
            if newly_unlocked {
                pilot.shield_hp = pilot.shield_max();
            } else {
                pilot.shield_hp = pilot.shield_hp.min(pilot.shield_max());
            }
        }
        UpgradeKind::Tractor => pilot.tractor_tier = tier,
        UpgradeKind::Thrusters => {
            pilot.thruster_tier = tier;
            pilot.speed_value = pilot.base_speed + THRUSTER_TIERS[tier as usize].speed_bonus;
        }
    }
    pilot.upgrades_taken += 1;
}

impl PilotState {
    /// Seconds between minigun rounds.
    pub fn fire_cooldown(&self) -> f64 {
        MINIGUN_TIERS[self.minigun_tier as usize].fire_cooldown
    }

    pub fn bullet_damage(&self) -> f64 {
        MINIGUN_TIERS[self.minigun_tier as usize].bullet_damage
    }

    pub fn rocket_stats(&self) -> Option<&'static RocketTier> {
        self.rockets_tier.map(|t| &ROCKET_TIERS[t as usize])
    }

    pub fn laser_stats(&self) -> Option<&'static LaserTier> {
        self.laser_tier.map(|t| &LASER_TIERS[t as usize])
    }

    pub fn emp_stats(&self) -> Option<&'static EmpTier> {
        self.emp_tier.map(|t| &EMP_TIERS[t as usize])
    }

    pub fn mine_stats(&self) -> Option<&'static MineTier> {
        self.mines_tier.map(|t| &MINE_TIERS[t as usize])
    }

    /// Shield capacity; zero while the shield system is locked.
    pub fn shield_max(&self) -> f64 {
        self.shield_tier
            .map(|t| SHIELD_TIERS[t as usize].shield_max)
            .unwrap_or(0.0)
    }

    pub fn shield_regen_rate(&self) -> f64 {
        self.shield_tier
            .map(|t| SHIELD_TIERS[t as usize].regen_rate)
            .unwrap_or(0.0)
    }

    /// Configured post-hit regeneration delay.
    pub fn shield_regen_delay_value(&self) -> f64 {
        self.shield_tier
            .map(|t| SHIELD_TIERS[t as usize].regen_delay)
            .unwrap_or(0.0)
    }

    pub fn tractor_range(&self) -> f64 {
        TRACTOR_TIERS[self.tractor_tier as usize].pickup_radius
    }
}
