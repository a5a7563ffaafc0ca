//! Tests for the simulation engine: determinism, the control mapper's
//! fuel economy, combat resolution, progression and the phase machine.

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use outrider_core::commands::{HelmInput, PlayerCommand};
use outrider_core::components::{EnemyUnit, Hostile, LaserBeam, Mine, PilotState, RailSlug};
use outrider_core::constants::*;
use outrider_core::enums::{EnemyArchetype, GamePhase, RoundOutcome};
use outrider_core::events::SimEvent;
use outrider_core::loadout::Loadout;
use outrider_core::ruleset::Ruleset;
use outrider_core::types::Position;
use outrider_physics::{PointSpace, Space};

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::combat::{self, DamageLedger};
use crate::systems::contact;
use crate::systems::spawner::{schedule_row, weighted_choice};
use crate::world_setup;

const DT: f64 = 1.0 / 60.0;

fn started_engine() -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_round(&mut engine);
    engine
}

fn start_round(engine: &mut SimulationEngine) {
    engine.queue_command(PlayerCommand::StartRound);
    engine.queue_command(PlayerCommand::SkipIntro);
    engine.step(0.0);
    assert_eq!(engine.phase(), GamePhase::Play);
}

fn helm(update: impl FnOnce(&mut HelmInput)) -> PlayerCommand {
    let mut helm = HelmInput::default();
    update(&mut helm);
    PlayerCommand::SetHelm { helm }
}

/// World + space + player for direct system tests.
fn bare_world() -> (World, PointSpace, hecs::Entity) {
    let mut world = World::new();
    let mut space = PointSpace::new();
    let player = world_setup::spawn_player(
        &mut world,
        &mut space,
        &Loadout::default(),
        DVec2::new(VIEW_WIDTH, VIEW_HEIGHT),
    );
    (world, space, player)
}

fn spawn_enemy_at(world: &mut World, space: &mut PointSpace, position: DVec2) -> hecs::Entity {
    let profile = outrider_ai::profiles::get_profile(EnemyArchetype::Tracer);
    world_setup::spawn_enemy(world, space, position, &profile, false, 0.0)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = started_engine();
    let mut engine_b = started_engine();

    let drive = helm(|h| {
        h.throttle_max = true;
        h.rotate = 1;
    });
    engine_a.queue_command(drive.clone());
    engine_b.queue_command(drive);

    for _ in 0..300 {
        let snap_a = engine_a.step(DT);
        let snap_b = engine_b.step(DT);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with the same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    start_round(&mut engine_a);
    start_round(&mut engine_b);

    let mut diverged = false;
    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.step(DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.step(DT)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent spawns");
}

// ---- Fuel economy ----

#[test]
fn test_fuel_never_negative_and_exhaustion_disables_everything() {
    let mut engine = started_engine();
    engine.with_pilot(|pilot| pilot.fuel = 0.0);

    let body = world_setup::body_id(engine.player_entity().unwrap());
    engine.queue_command(helm(|h| {
        h.throttle_max = true;
        h.strafe = 1;
        h.rotate = 1;
        h.boost = true;
        h.dash_left_tap = true;
    }));
    engine.step(DT);
    engine.queue_command(helm(|h| {
        h.throttle_max = true;
        h.strafe = 1;
        h.rotate = 1;
        h.boost = true;
        h.dash_left_tap = true; // double tap inside the window
    }));

    for _ in 0..30 {
        let snap = engine.step(DT);
        assert!(snap.ship.fuel >= 0.0, "fuel must never go negative");
        assert_eq!(snap.ship.fuel, 0.0);
        assert!(
            !snap
                .events
                .iter()
                .any(|e| matches!(e, SimEvent::DashExecuted { .. } | SimEvent::BoostEngaged)),
            "boost and dash must be unavailable without fuel"
        );
    }

    assert_eq!(
        engine.space().velocity(body),
        DVec2::ZERO,
        "thrust, strafe, boost and dash must produce zero net impulse at zero fuel"
    );
    assert_eq!(engine.space().angular_velocity(body), 0.0);
}

#[test]
fn test_unaffordable_fuel_cost_applies_no_partial_force() {
    let mut engine = started_engine();
    engine.with_pilot(|pilot| pilot.fuel = 1e-9);
    let body = world_setup::body_id(engine.player_entity().unwrap());

    engine.queue_command(helm(|h| h.throttle_max = true));
    let snap = engine.step(DT);

    assert_eq!(
        engine.space().velocity(body),
        DVec2::ZERO,
        "a cost above remaining fuel must skip the action entirely"
    );
    assert!((snap.ship.fuel - 1e-9).abs() < 1e-15, "no partial deduction");
}

#[test]
fn test_fuel_spent_is_tracked() {
    let mut engine = started_engine();
    engine.queue_command(helm(|h| h.throttle_max = true));
    let mut snap = engine.step(DT);
    for _ in 0..59 {
        snap = engine.step(DT);
    }
    assert!(snap.ship.fuel < PLAYER_FUEL_START);
    assert!(
        (snap.stats.fuel_spent - (PLAYER_FUEL_START - snap.ship.fuel)).abs() < 1e-9,
        "fuel_spent must mirror the tank drain"
    );
}

// ---- Throttle and helm ----

#[test]
fn test_throttle_ramp_and_instant_overrides() {
    let mut engine = started_engine();

    engine.queue_command(helm(|h| h.throttle_up = true));
    let snap = engine.step(0.1);
    assert!((snap.ship.throttle - 0.09).abs() < 1e-9);
    let snap = engine.step(0.1);
    assert!((snap.ship.throttle - 0.18).abs() < 1e-9);

    engine.queue_command(helm(|h| {
        h.throttle_up = true;
        h.throttle_max = true; // instant override wins
    }));
    let snap = engine.step(0.1);
    assert_eq!(snap.ship.throttle, 1.0);

    engine.queue_command(helm(|h| {
        h.throttle_down = true;
        h.throttle_cut = true;
    }));
    let snap = engine.step(0.1);
    assert_eq!(snap.ship.throttle, 0.0);
}

#[test]
fn test_thrust_accelerates_along_forward() {
    let mut engine = started_engine();
    let body = world_setup::body_id(engine.player_entity().unwrap());

    engine.queue_command(helm(|h| h.throttle_max = true));
    engine.step(DT);

    let v = engine.space().velocity(body);
    // Heading zero faces (0, -1).
    assert!(v.y < 0.0, "thrust should push the craft up-screen, got {v:?}");
    assert!(v.x.abs() < 1e-9);
}

#[test]
fn test_rotation_gated_on_fuel_and_damped() {
    let mut engine = started_engine();
    let body = world_setup::body_id(engine.player_entity().unwrap());

    engine.queue_command(helm(|h| h.rotate = 1));
    engine.step(DT);
    let spinning = engine.space().angular_velocity(body);
    assert!(spinning > 0.0);

    // Release the stick: drift alone decays the spin.
    engine.queue_command(helm(|_| {}));
    for _ in 0..240 {
        engine.step(DT);
    }
    let decayed = engine.space().angular_velocity(body);
    assert!(
        decayed < spinning * 0.2,
        "angular drift must decay spin without input ({spinning} -> {decayed})"
    );
}

#[test]
fn test_boost_window_and_recharge() {
    let mut engine = started_engine();

    engine.queue_command(helm(|h| h.boost = true));
    let snap = engine.step(0.1);
    assert!(snap.events.iter().any(|e| matches!(e, SimEvent::BoostEngaged)));
    assert!(snap.ship.boost_active);
    assert_eq!(snap.ship.boost_charge, 0.0);

    // Hold past the window: it expires, then charge climbs back.
    engine.queue_command(helm(|_| {}));
    for _ in 0..3 {
        engine.step(0.1);
    }
    let snap = engine.step(0.1);
    assert!(!snap.ship.boost_active);
    assert!(snap.ship.boost_charge > 0.0);

    // Not re-armed below full charge.
    engine.queue_command(helm(|h| h.boost = true));
    let snap = engine.step(0.1);
    assert!(
        !snap.events.iter().any(|e| matches!(e, SimEvent::BoostEngaged)),
        "boost must re-arm only at full charge"
    );
}

// ---- Dash double tap ----

fn run_dash_scenario(idle_steps: usize) -> bool {
    let mut engine = started_engine();
    let mut dashed = false;

    engine.queue_command(helm(|h| h.dash_left_tap = true));
    dashed |= has_dash(&engine.step(0.02));
    for _ in 0..idle_steps {
        dashed |= has_dash(&engine.step(0.02));
    }
    engine.queue_command(helm(|h| h.dash_left_tap = true));
    dashed |= has_dash(&engine.step(0.02));
    dashed
}

fn has_dash(snap: &outrider_core::state::GameStateSnapshot) -> bool {
    snap.events
        .iter()
        .any(|e| matches!(e, SimEvent::DashExecuted { .. }))
}

#[test]
fn test_dash_double_tap_inside_window() {
    // Second tap lands 0.24s after the first.
    assert!(run_dash_scenario(11), "tap at +0.24s must dash");
}

#[test]
fn test_dash_double_tap_outside_window() {
    // Second tap lands 0.26s after the first.
    assert!(!run_dash_scenario(12), "tap at +0.26s must not dash");
}

#[test]
fn test_dash_cooldown_blocks_retrigger() {
    let mut engine = started_engine();
    engine.queue_command(helm(|h| h.dash_right_tap = true));
    engine.step(0.02);
    engine.queue_command(helm(|h| h.dash_right_tap = true));
    let snap = engine.step(0.02);
    assert!(has_dash(&snap));
    assert!(snap.ship.dash_ready_ratio < 1.0);

    // Immediate double tap again: still cooling down.
    engine.queue_command(helm(|h| h.dash_right_tap = true));
    engine.step(0.02);
    engine.queue_command(helm(|h| h.dash_right_tap = true));
    let snap = engine.step(0.02);
    assert!(!has_dash(&snap), "dash must respect its cooldown");
}

// ---- Combat resolvers ----

#[test]
fn test_kill_credit_is_idempotent() {
    let (mut world, mut space, _player) = bare_world();
    let enemy = spawn_enemy_at(&mut world, &mut space, DVec2::new(100.0, 100.0));
    let hp = world.get::<&EnemyUnit>(enemy).unwrap().hp;

    let mut ledger = DamageLedger::default();
    combat::apply_enemy_damage(&world, enemy, DVec2::ZERO, DVec2::ZERO, hp + 5.0, &mut ledger);
    combat::apply_enemy_damage(&world, enemy, DVec2::ZERO, DVec2::ZERO, hp + 5.0, &mut ledger);

    assert_eq!(ledger.kills, 1, "a dead enemy must not be credited twice");
    assert_eq!(ledger.deaths.len(), 1, "one experience reward per kill");
    assert!((ledger.dealt - (hp + 5.0)).abs() < 1e-9, "no damage accrual past death");
}

#[test]
fn test_splash_radius_boundary_inclusive() {
    let (mut world, mut space, _player) = bare_world();
    let center = DVec2::new(100.0, 100.0);
    // Trigger enemy sits on the mine; the others probe the 80-unit boundary.
    let trigger = spawn_enemy_at(&mut world, &mut space, center);
    let at_edge = spawn_enemy_at(&mut world, &mut space, center + DVec2::new(80.0, 0.0));
    let outside = spawn_enemy_at(&mut world, &mut space, center + DVec2::new(80.1, 0.0));

    world.spawn((
        Position(center),
        Mine {
            ttl: MINE_LIFETIME,
            damage: MINE_DAMAGE,
            splash_radius: 80.0,
            trigger_radius: MINE_TRIGGER_RADIUS,
        },
    ));

    let mut ledger = DamageLedger::default();
    let mut events = Vec::new();
    combat::resolve(&mut world, &mut ledger, &mut events);

    let hp_of = |world: &World, e| world.get::<&EnemyUnit>(e).map(|u| u.hp).unwrap();
    let full = world.get::<&EnemyUnit>(outside).unwrap().max_hp;
    assert!(hp_of(&world, trigger) < full);
    assert!(
        hp_of(&world, at_edge) < full,
        "an enemy at exactly the splash radius is included"
    );
    assert_eq!(hp_of(&world, outside), full, "past the boundary is spared");
    assert!(events.iter().any(|e| matches!(e, SimEvent::Explosion { .. })));
}

#[test]
fn test_bullet_hits_single_enemy_and_expires() {
    let (mut world, mut space, _player) = bare_world();
    let near = spawn_enemy_at(&mut world, &mut space, DVec2::new(200.0, 200.0));
    let overlapped = spawn_enemy_at(&mut world, &mut space, DVec2::new(203.0, 200.0));

    let bullet = world.spawn((
        Position(DVec2::new(200.0, 200.0)),
        outrider_core::components::Bullet {
            velocity: DVec2::ZERO,
            prev: DVec2::new(200.0, 200.0),
            ttl: BULLET_LIFETIME,
            damage: 10.0,
        },
    ));

    let mut ledger = DamageLedger::default();
    combat::resolve(&mut world, &mut ledger, &mut Vec::new());

    assert_eq!(ledger.hits.len(), 1, "a bullet damages exactly one enemy");
    let full = world.get::<&EnemyUnit>(near).unwrap().max_hp;
    let damaged = [near, overlapped]
        .iter()
        .filter(|&&e| world.get::<&EnemyUnit>(e).unwrap().hp < full)
        .count();
    assert_eq!(damaged, 1, "only one of the two overlapping enemies takes the hit");
    let ttl = world
        .get::<&outrider_core::components::Bullet>(bullet)
        .unwrap()
        .ttl;
    assert_eq!(ttl, 0.0, "the bullet is spent the frame it connects");
}

#[test]
fn test_laser_pierces_everything_once() {
    let (mut world, mut space, _player) = bare_world();
    let first = spawn_enemy_at(&mut world, &mut space, DVec2::new(100.0, 50.0));
    let second = spawn_enemy_at(&mut world, &mut space, DVec2::new(100.0, 250.0));
    let off_beam = spawn_enemy_at(&mut world, &mut space, DVec2::new(300.0, 150.0));

    world.spawn((LaserBeam {
        start: DVec2::new(100.0, 0.0),
        end: DVec2::new(100.0, 400.0),
        ttl: LASER_LIFETIME,
        damage: 15.0,
        pending: true,
    },));

    let mut ledger = DamageLedger::default();
    combat::resolve(&mut world, &mut ledger, &mut Vec::new());
    assert_eq!(ledger.hits.len(), 2, "the beam damages everything it crosses");
    let full = world.get::<&EnemyUnit>(off_beam).unwrap().max_hp;
    assert!(world.get::<&EnemyUnit>(first).unwrap().hp < full);
    assert!(world.get::<&EnemyUnit>(second).unwrap().hp < full);
    assert_eq!(world.get::<&EnemyUnit>(off_beam).unwrap().hp, full);

    // The beam lingers visually but must not deal damage again.
    let mut second_pass = DamageLedger::default();
    combat::resolve(&mut world, &mut second_pass, &mut Vec::new());
    assert_eq!(second_pass.hits.len(), 0);
}

#[test]
fn test_rail_slug_pierces_with_hit_memory() {
    let (mut world, mut space, _player) = bare_world();
    let first = spawn_enemy_at(&mut world, &mut space, DVec2::new(100.0, 100.0));
    let second = spawn_enemy_at(&mut world, &mut space, DVec2::new(100.0, 160.0));

    let slug = world.spawn((
        Position(DVec2::new(100.0, 200.0)),
        RailSlug {
            velocity: DVec2::ZERO,
            prev: DVec2::new(100.0, 50.0),
            ttl: RAILGUN_LIFETIME,
            damage: 30.0,
            hit: Vec::new(),
        },
    ));

    let mut ledger = DamageLedger::default();
    combat::resolve(&mut world, &mut ledger, &mut Vec::new());
    assert_eq!(ledger.hits.len(), 2, "the slug sweeps through both enemies");
    let full = world.get::<&EnemyUnit>(first).unwrap().max_hp;
    assert!(world.get::<&EnemyUnit>(first).unwrap().hp < full);
    assert!(world.get::<&EnemyUnit>(second).unwrap().hp < full);
    assert_eq!(world.get::<&RailSlug>(slug).unwrap().hit.len(), 2);

    // Same slug, next frame: remembered enemies are immune to it.
    let mut second_pass = DamageLedger::default();
    combat::resolve(&mut world, &mut second_pass, &mut Vec::new());
    assert_eq!(second_pass.hits.len(), 0, "a slug never regrinds an enemy");
}

// ---- Shield model ----

#[test]
fn test_shield_absorbs_before_hull() {
    let (mut world, mut space, player) = bare_world();
    {
        let mut pilot = world.get::<&mut PilotState>(player).unwrap();
        pilot.shield_tier = Some(0); // shield_max 50
        pilot.shield_hp = 30.0;
    }
    let player_pos = world.get::<&Position>(player).unwrap().0;
    let enemy = spawn_enemy_at(&mut world, &mut space, player_pos);
    world.get::<&mut EnemyUnit>(enemy).unwrap().contact_damage = 50.0;

    let mut events = Vec::new();
    let incoming = contact::run(&mut world, player, 1.0, &mut events);
    assert!((incoming - 50.0).abs() < 1e-9);

    let pilot = world.get::<&PilotState>(player).unwrap();
    assert_eq!(pilot.shield_hp, 0.0, "shield fully consumed first");
    assert!((pilot.hp - (PLAYER_MAX_HP - 20.0)).abs() < 1e-9, "hull takes the spill");
    assert!((pilot.stats.hull_damage - 20.0).abs() < 1e-9);
    assert!((pilot.shield_regen_delay - 3.0).abs() < 1e-9, "hit resets the delay");
    drop(pilot);
    assert!(events.iter().any(|e| matches!(e, SimEvent::ShieldDepleted)));
}

#[test]
fn test_shield_regen_waits_for_delay() {
    let (mut world, mut space, player) = bare_world();
    {
        let mut pilot = world.get::<&mut PilotState>(player).unwrap();
        pilot.shield_tier = Some(0);
        pilot.shield_hp = 10.0;
    }
    let player_pos = world.get::<&Position>(player).unwrap().0;
    let enemy = spawn_enemy_at(&mut world, &mut space, player_pos);
    world.get::<&mut EnemyUnit>(enemy).unwrap().contact_damage = 5.0;

    let mut events = Vec::new();
    contact::run(&mut world, player, 1.0, &mut events);
    {
        // Move the enemy out of contact.
        world.get::<&mut Position>(enemy).unwrap().0 = DVec2::new(10_000.0, 0.0);
    }

    // Delay burns down first, no regeneration yet.
    contact::run(&mut world, player, 3.0, &mut events);
    let shield_after_delay = world.get::<&PilotState>(player).unwrap().shield_hp;
    assert!((shield_after_delay - 5.0).abs() < 1e-9, "no regen while the delay runs");

    // Now it ticks back at the tier's rate.
    contact::run(&mut world, player, 1.0, &mut events);
    let regenerated = world.get::<&PilotState>(player).unwrap().shield_hp;
    assert!((regenerated - 10.0).abs() < 1e-9, "5/s regen after the delay");
}

// ---- Spawner ----

#[test]
fn test_weighted_spawn_distribution() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let weights = [
        (EnemyArchetype::Dart, 0.7),
        (EnemyArchetype::Tracer, 0.3),
    ];
    let mut darts = 0u32;
    let rolls = 100_000;
    for _ in 0..rolls {
        if weighted_choice(&mut rng, &weights) == EnemyArchetype::Dart {
            darts += 1;
        }
    }
    let ratio = darts as f64 / rolls as f64;
    assert!(
        (ratio - 0.7).abs() < 0.01,
        "empirical ratio {ratio} should converge to the 0.7 weight"
    );
}

#[test]
fn test_schedule_rows_ascend_and_saturate() {
    assert_eq!(schedule_row(0.5).active_sectors, 1);
    assert!(schedule_row(10.0).active_sectors > schedule_row(0.5).active_sectors);
    // Past the last breakpoint the final row stays in effect.
    assert_eq!(
        schedule_row(120.0).weights.len(),
        schedule_row(59.0).weights.len()
    );
}

#[test]
fn test_spawner_respects_active_cap() {
    let mut ruleset = Ruleset::default();
    ruleset.spawn.max_active = 5;
    let mut engine = SimulationEngine::new(SimConfig {
        ruleset,
        ..Default::default()
    });
    start_round(&mut engine);

    for _ in 0..600 {
        engine.step(DT);
        let count = engine.world().query::<&Hostile>().iter().count();
        assert!(count <= 5, "active enemy cap exceeded: {count}");
    }
}

#[test]
fn test_spawned_enemies_sit_outside_the_view() {
    let mut engine = started_engine();
    let mut snap = engine.step(DT);
    for _ in 0..120 {
        snap = engine.step(DT);
        if !snap.enemies.is_empty() {
            break;
        }
    }
    assert!(!snap.enemies.is_empty(), "spawner should have produced enemies");
    let expected = VIEW_WIDTH * SPAWN_VIEW_FACTOR + SPAWN_MARGIN;
    for enemy in &snap.enemies {
        let distance = enemy.position.distance(snap.ship.position);
        assert!(
            distance > expected * 0.8,
            "enemies must spawn off-screen, got {distance}"
        );
    }
}

// ---- Mounts ----

#[test]
fn test_mount_fires_once_per_cooldown_and_spends_ammo() {
    let mut engine = started_engine();
    engine.queue_command(PlayerCommand::TriggerMount { slot: 0 });
    engine.queue_command(PlayerCommand::TriggerMount { slot: 0 });
    let snap = engine.step(DT);

    assert_eq!(snap.slugs.len(), 1, "second trigger hits the cooldown");
    assert_eq!(snap.mounts[0].ammo_current, snap.mounts[0].ammo_max - 1);
    assert_eq!(snap.stats.ammo_spent, 1);
}

#[test]
fn test_empty_mount_is_a_silent_noop() {
    let mut engine = started_engine();
    for mount in &mut engine.fire_control_mut().mounts {
        mount.ammo_current = 0;
    }
    engine.queue_command(PlayerCommand::TriggerMount { slot: 0 });
    let snap = engine.step(DT);
    assert!(snap.slugs.is_empty(), "no ammo, no shot, no error");

    // Out-of-range slots are ignored too.
    engine.queue_command(PlayerCommand::TriggerMount { slot: 99 });
    engine.step(DT);
}

// ---- Progression ----

#[test]
fn test_level_up_suspends_play_until_choice() {
    let mut engine = started_engine();
    let player_pos = {
        let snap = engine.step(0.0);
        snap.ship.position
    };
    engine.spawn_test_gem(player_pos, 90.0);

    let snap = engine.step(DT);
    assert_eq!(snap.phase, GamePhase::LevelUp, "threshold crossing suspends play");
    assert_eq!(snap.offers.len(), 3);
    assert!(snap.events.iter().any(|e| matches!(e, SimEvent::LevelUp { level: 2 })));
    let frozen_elapsed = snap.clock.elapsed;

    // Simulation is suspended while the choice is pending.
    for _ in 0..10 {
        let snap = engine.step(DT);
        assert_eq!(snap.clock.elapsed, frozen_elapsed);
    }

    engine.queue_command(PlayerCommand::ChooseUpgrade { index: 0 });
    let snap = engine.step(DT);
    assert_eq!(snap.phase, GamePhase::Play);
    // The resume grace swallows this frame; the clock holds a little longer.
    assert_eq!(snap.clock.elapsed, frozen_elapsed);
    let mut snap = engine.step(DT);
    for _ in 0..40 {
        snap = engine.step(DT);
    }
    assert!(snap.clock.elapsed > frozen_elapsed, "play resumes after the grace");
}

#[test]
fn test_level_up_with_everything_maxed_skips_the_screen() {
    let mut engine = started_engine();
    engine.with_pilot(|pilot| {
        pilot.minigun_tier = 5;
        pilot.rockets_tier = Some(5);
        pilot.laser_tier = Some(5);
        pilot.emp_tier = Some(5);
        pilot.mines_tier = Some(5);
        pilot.shield_tier = Some(5);
        pilot.health_tier = 5;
        pilot.tractor_tier = 5;
        pilot.thruster_tier = 5;
        pilot.level = 20;
    });
    let player_pos = engine.step(0.0).ship.position;
    engine.spawn_test_gem(player_pos, 10_000.0);

    let snap = engine.step(DT);
    assert_eq!(
        snap.phase,
        GamePhase::Play,
        "no offers remain, play continues uninterrupted"
    );
    assert!(snap.offers.is_empty());
}

#[test]
fn test_gem_magnetism_requires_tractor_tier() {
    let mut engine = started_engine();
    let player_pos = engine.step(0.0).ship.position;
    let gem_pos = player_pos + DVec2::new(120.0, 0.0);
    engine.spawn_test_gem(gem_pos, 10.0);

    // Tier 0 tractor has zero pickup radius: the gem stays put.
    let snap = engine.step(DT);
    assert!((snap.gems[0].position - gem_pos).length() < 1e-9);

    engine.with_pilot(|pilot| pilot.tractor_tier = 3); // 150 radius
    let snap = engine.step(DT);
    assert!(
        (snap.gems[0].position - gem_pos).length() > 1.0,
        "inside the tractor radius the gem closes in"
    );
}

// ---- Round endings ----

#[test]
fn test_round_timeout_wins_exactly_once() {
    let mut engine = SimulationEngine::new(SimConfig {
        loadout: Loadout {
            hull: 1e9,
            ..Default::default()
        },
        ..Default::default()
    });
    start_round(&mut engine);

    let mut endings = 0;
    let mut last = None;
    for _ in 0..1200 {
        let snap = engine.step(1.0);
        if snap.phase == GamePhase::LevelUp {
            engine.queue_command(PlayerCommand::ChooseUpgrade { index: 0 });
        }
        endings += snap
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::RoundEnded { .. }))
            .count();
        last = Some(snap);
    }

    let snap = last.unwrap();
    assert_eq!(snap.phase, GamePhase::Win);
    assert_eq!(endings, 1, "the timeout transition fires exactly once");
    assert_eq!(snap.clock.remaining, 0.0, "remaining never goes negative");
    assert!(snap.clock.elapsed >= ROUND_SECONDS);
    let summary = snap.summary.expect("a finished round carries a summary");
    assert_eq!(summary.outcome, RoundOutcome::TimeoutWin);
    assert!(summary.data_earned > 0.0);
}

#[test]
fn test_player_death_loses_the_round() {
    let mut engine = started_engine();
    engine.step(DT);
    engine.with_pilot(|pilot| pilot.hp = 0.5);
    let player_pos = engine.step(0.0).ship.position;

    // Park a heavy on the player and let contact damage finish it.
    let enemy = engine.spawn_test_enemy(player_pos, EnemyArchetype::Bulwark);
    let _ = enemy;
    let mut lost = false;
    for _ in 0..120 {
        let snap = engine.step(DT);
        if snap.phase == GamePhase::Lose {
            assert_eq!(snap.ship.hp, 0.0, "hp clamps to zero on death");
            let summary = snap.summary.clone().expect("loss still emits a debrief");
            assert_eq!(summary.outcome, RoundOutcome::Destroyed);
            lost = true;
            break;
        }
    }
    assert!(lost, "contact damage should destroy the craft");
}

#[test]
fn test_extraction_channel_completes_and_interrupts() {
    let mut ruleset = Ruleset::default();
    ruleset.extraction.available_after = 1.0;
    ruleset.extraction.channel_secs = 0.5;
    let mut engine = SimulationEngine::new(SimConfig {
        ruleset,
        ..Default::default()
    });
    start_round(&mut engine);

    for _ in 0..12 {
        engine.step(0.1); // get past the availability threshold
    }

    // Hold, then release mid-channel: progress resets.
    engine.queue_command(helm(|h| h.extract_held = true));
    let snap = engine.step(0.2);
    assert!(snap.extraction.available);
    assert!(snap.extraction.channeling);
    assert!(snap.events.iter().any(|e| matches!(e, SimEvent::ExtractionStarted)));

    engine.queue_command(helm(|h| h.extract_held = false));
    let snap = engine.step(0.1);
    assert!(!snap.extraction.channeling);
    assert_eq!(snap.extraction.progress, 0.0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ExtractionInterrupted)));

    // Hold through the full channel: the round ends as an extraction.
    engine.queue_command(helm(|h| h.extract_held = true));
    engine.step(0.3);
    let snap = engine.step(0.3);
    assert_eq!(snap.phase, GamePhase::Extracted);
    let summary = snap.summary.expect("extraction emits a debrief");
    assert_eq!(summary.outcome, RoundOutcome::Extracted);
}

// ---- Phase handling ----

#[test]
fn test_pause_freezes_and_resumes_exactly() {
    let mut engine = started_engine();
    for _ in 0..5 {
        engine.step(0.1);
    }
    let before = engine.clock().elapsed;

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        let snap = engine.step(0.1);
        assert_eq!(snap.phase, GamePhase::Pause);
        assert_eq!(snap.clock.elapsed, before, "pause freezes the clock");
    }

    engine.queue_command(PlayerCommand::Resume);
    engine.step(0.1);
    assert!((engine.clock().elapsed - (before + 0.1)).abs() < 1e-9);
}

#[test]
fn test_restart_rebuilds_the_world() {
    let mut engine = started_engine();
    for _ in 0..120 {
        engine.step(DT);
    }
    assert!(engine.world().query::<&Hostile>().iter().count() > 0);

    engine.queue_command(PlayerCommand::Pause);
    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.step(0.0);

    assert_eq!(snap.phase, GamePhase::Play);
    assert_eq!(snap.clock.elapsed, 0.0);
    assert_eq!(snap.enemies.len(), 0);
    assert_eq!(snap.stats.kills, 0);
    assert_eq!(
        engine.space().body_count(),
        1,
        "only the fresh player body survives a restart"
    );
}

#[test]
fn test_bodies_never_orphaned() {
    let mut engine = started_engine();
    for _ in 0..600 {
        engine.step(DT);
    }
    let backed = engine
        .world()
        .query::<&outrider_core::components::BodyRef>()
        .iter()
        .count();
    assert_eq!(
        engine.space().body_count(),
        backed,
        "every physics body must belong to a live entity"
    );
}

#[test]
fn test_menu_commands_do_not_start_systems() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.step(DT);
    assert_eq!(snap.phase, GamePhase::Menu);
    assert_eq!(snap.clock.elapsed, 0.0);
    assert!(snap.enemies.is_empty());

    engine.queue_command(PlayerCommand::OpenOptions);
    assert_eq!(engine.step(DT).phase, GamePhase::Options);
    engine.queue_command(PlayerCommand::CloseOptions);
    engine.queue_command(PlayerCommand::OpenFittingBay);
    assert_eq!(engine.step(DT).phase, GamePhase::FittingBay);
}

// ---- Snapshot surface ----

#[test]
fn test_snapshot_racks_reflect_unlocks() {
    let mut engine = started_engine();
    let snap = engine.step(DT);
    assert_eq!(snap.racks.len(), 5);
    assert!(snap.racks[0].unlocked, "the minigun is always unlocked");
    assert!(!snap.racks[1].unlocked, "rockets start locked");

    engine.with_pilot(|pilot| pilot.rockets_tier = Some(0));
    let snap = engine.step(DT);
    assert!(snap.racks[1].unlocked);
}

#[test]
fn test_events_are_drained_once() {
    let mut engine = started_engine();
    engine.queue_command(helm(|h| h.boost = true));
    let snap = engine.step(DT);
    assert!(snap.events.iter().any(|e| matches!(e, SimEvent::BoostEngaged)));
    engine.queue_command(helm(|_| {}));
    let snap = engine.step(DT);
    assert!(
        !snap.events.iter().any(|e| matches!(e, SimEvent::BoostEngaged)),
        "events must not repeat across snapshots"
    );
}
