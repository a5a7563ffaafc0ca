//! Enemy spawning and difficulty scaling.
//!
//! Spawn cadence tightens with elapsed time; archetype weights and the
//! active spawn sectors widen through an ascending breakpoint table.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use outrider_core::components::Hostile;
use outrider_core::enums::EnemyArchetype;
use outrider_core::ruleset::Ruleset;

use outrider_ai::profiles::{boss_profile, get_profile, ArchetypeProfile};

use crate::world_setup;

/// One difficulty band: applies while `minutes <= until_minutes`.
pub struct ScheduleRow {
    pub until_minutes: f64,
    /// How many of the angular sectors are open for placement.
    pub active_sectors: u32,
    pub weights: &'static [(EnemyArchetype, f64)],
}

/// Ascending difficulty schedule; the last row covers the rest of the round.
pub const SCHEDULE: [ScheduleRow; 5] = [
    ScheduleRow {
        until_minutes: 2.0,
        active_sectors: 1,
        weights: &[(EnemyArchetype::Dart, 0.7), (EnemyArchetype::Tracer, 0.3)],
    },
    ScheduleRow {
        until_minutes: 5.0,
        active_sectors: 3,
        weights: &[
            (EnemyArchetype::Dart, 0.45),
            (EnemyArchetype::Tracer, 0.35),
            (EnemyArchetype::Shredder, 0.2),
        ],
    },
    ScheduleRow {
        until_minutes: 8.0,
        active_sectors: 5,
        weights: &[
            (EnemyArchetype::Dart, 0.3),
            (EnemyArchetype::Tracer, 0.35),
            (EnemyArchetype::Shredder, 0.25),
            (EnemyArchetype::Weaver, 0.1),
        ],
    },
    ScheduleRow {
        until_minutes: 11.0,
        active_sectors: 8,
        weights: &[
            (EnemyArchetype::Dart, 0.2),
            (EnemyArchetype::Tracer, 0.3),
            (EnemyArchetype::Shredder, 0.25),
            (EnemyArchetype::Weaver, 0.15),
            (EnemyArchetype::Bulwark, 0.1),
        ],
    },
    ScheduleRow {
        until_minutes: 60.0,
        active_sectors: 8,
        weights: &[
            (EnemyArchetype::Dart, 0.15),
            (EnemyArchetype::Tracer, 0.25),
            (EnemyArchetype::Shredder, 0.25),
            (EnemyArchetype::Weaver, 0.18),
            (EnemyArchetype::Bulwark, 0.12),
            (EnemyArchetype::Ravager, 0.03),
            (EnemyArchetype::Dreadnought, 0.02),
        ],
    },
];

/// Spawn timer carried across frames.
#[derive(Debug, Clone, Default)]
pub struct SpawnerState {
    pub timer: f64,
}

/// Row in effect at `minutes` of elapsed time.
pub fn schedule_row(minutes: f64) -> &'static ScheduleRow {
    for row in &SCHEDULE {
        if minutes <= row.until_minutes {
            return row;
        }
    }
    &SCHEDULE[SCHEDULE.len() - 1]
}

/// Cumulative-sum roll over a weight table. The final entry is the
/// deterministic fallback for any rounding shortfall; an empty table is a
/// programming invariant violation.
pub fn weighted_choice(
    rng: &mut ChaCha8Rng,
    weights: &[(EnemyArchetype, f64)],
) -> EnemyArchetype {
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let roll = rng.gen::<f64>() * total;
    let mut upto = 0.0;
    for &(value, weight) in weights {
        upto += weight;
        if roll <= upto {
            return value;
        }
    }
    weights.last().expect("weighted_choice: empty weight table").0
}

/// Advance the spawn timer and place any due enemies around the player.
pub fn run(
    world: &mut World,
    space: &mut dyn outrider_physics::Space,
    rng: &mut ChaCha8Rng,
    state: &mut SpawnerState,
    rules: &Ruleset,
    elapsed: f64,
    dt: f64,
    player_pos: DVec2,
) {
    let tuning = &rules.spawn;
    state.timer += dt;
    let interval =
        (tuning.interval_start - elapsed * tuning.interval_decay).max(tuning.interval_min);

    while state.timer >= interval && active_enemies(world) < tuning.max_active {
        state.timer -= interval;

        let minutes = elapsed / 60.0;
        let row = schedule_row(minutes);

        // Placement: a random angle inside one of the active sectors,
        // just past the view edge.
        let sector_span = TAU / tuning.sectors.max(1) as f64;
        let sector = rng.gen_range(0..row.active_sectors.max(1));
        let angle = sector as f64 * sector_span + rng.gen_range(0.0..sector_span);
        let distance = rules.view_extent.max_element() * tuning.view_factor + tuning.margin;
        let position = player_pos + DVec2::new(angle.cos(), angle.sin()) * distance;

        let (profile, is_boss) = choose_profile(rng, tuning, row, minutes);
        world_setup::spawn_enemy(world, space, position, &profile, is_boss, elapsed);
    }
}

fn active_enemies(world: &World) -> usize {
    world.query::<&Hostile>().iter().count()
}

fn choose_profile(
    rng: &mut ChaCha8Rng,
    tuning: &outrider_core::ruleset::SpawnTuning,
    row: &ScheduleRow,
    minutes: f64,
) -> (ArchetypeProfile, bool) {
    if minutes >= tuning.boss_min_minutes {
        let chance = (tuning.boss_chance_base
            + (minutes - tuning.boss_min_minutes) * tuning.boss_chance_per_minute)
            .min(tuning.boss_chance_cap);
        if rng.gen::<f64>() < chance {
            return (boss_profile(), true);
        }
    }
    (get_profile(weighted_choice(rng, row.weights)), false)
}
