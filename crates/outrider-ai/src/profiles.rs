//! Archetype-specific combat and movement profiles.
//!
//! Multipliers scale the spawner's time-ramped base stats.

use outrider_core::constants::ENEMY_PREFERRED_RANGE;
use outrider_core::enums::{Behavior, EnemyArchetype};

/// Scaling profile for one enemy archetype.
pub struct ArchetypeProfile {
    pub sides: u32,
    pub speed_mult: f64,
    pub hp_mult: f64,
    pub damage_mult: f64,
    pub xp_mult: f64,
    pub radius_mult: f64,
    pub behavior: Behavior,
    pub preferred_range: f64,
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> ArchetypeProfile {
    match archetype {
        EnemyArchetype::Dart => ArchetypeProfile {
            sides: 1,
            speed_mult: 1.28,
            hp_mult: 0.7,
            damage_mult: 0.8,
            xp_mult: 0.7,
            radius_mult: 0.9,
            behavior: Behavior::Rush,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
        EnemyArchetype::Tracer => ArchetypeProfile {
            sides: 3,
            speed_mult: 1.12,
            hp_mult: 0.9,
            damage_mult: 0.9,
            xp_mult: 0.95,
            radius_mult: 1.0,
            behavior: Behavior::Rush,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
        EnemyArchetype::Shredder => ArchetypeProfile {
            sides: 4,
            speed_mult: 0.98,
            hp_mult: 1.15,
            damage_mult: 1.1,
            xp_mult: 1.15,
            radius_mult: 1.05,
            behavior: Behavior::Skirmish,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
        EnemyArchetype::Weaver => ArchetypeProfile {
            sides: 5,
            speed_mult: 0.88,
            hp_mult: 1.45,
            damage_mult: 1.3,
            xp_mult: 1.45,
            radius_mult: 1.15,
            behavior: Behavior::Flank,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
        EnemyArchetype::Bulwark => ArchetypeProfile {
            sides: 6,
            speed_mult: 0.8,
            hp_mult: 1.8,
            damage_mult: 1.55,
            xp_mult: 1.75,
            radius_mult: 1.25,
            behavior: Behavior::Siege,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
        EnemyArchetype::Ravager => ArchetypeProfile {
            sides: 7,
            speed_mult: 0.74,
            hp_mult: 2.05,
            damage_mult: 1.7,
            xp_mult: 2.05,
            radius_mult: 1.32,
            behavior: Behavior::Siege,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
        EnemyArchetype::Dreadnought => ArchetypeProfile {
            sides: 8,
            speed_mult: 0.7,
            hp_mult: 2.3,
            damage_mult: 1.9,
            xp_mult: 2.3,
            radius_mult: 1.4,
            behavior: Behavior::Siege,
            preferred_range: ENEMY_PREFERRED_RANGE,
        },
    }
}

/// Boss override: a Dreadnought hull with heavier scaling.
pub fn boss_profile() -> ArchetypeProfile {
    ArchetypeProfile {
        sides: 8,
        speed_mult: 0.68,
        hp_mult: 2.9,
        damage_mult: 2.4,
        xp_mult: 3.0,
        radius_mult: 1.6,
        behavior: Behavior::Siege,
        preferred_range: ENEMY_PREFERRED_RANGE,
    }
}
