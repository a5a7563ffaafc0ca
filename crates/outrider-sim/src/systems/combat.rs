//! Combat resolution: per-weapon-family hit tests feeding one shared
//! damage entry point.
//!
//! Resolution order inside a frame: bullets, slugs, rockets, mines,
//! beams, pulses. All damage flows through [`apply_enemy_damage`], which
//! ignores already-dead enemies so nothing is credited twice.

use glam::DVec2;
use hecs::{Entity, World};

use outrider_core::components::*;
use outrider_core::constants::*;
use outrider_core::events::SimEvent;
use outrider_core::types::{point_segment_distance_sq, Position};

/// Damage bookkeeping for one frame, folded into the pilot's stats and
/// the event stream by the engine.
#[derive(Debug, Default)]
pub struct DamageLedger {
    pub dealt: f64,
    pub kills: u32,
    /// Where projectiles connected, for spark effects.
    pub hits: Vec<DVec2>,
    pub deaths: Vec<DeathRecord>,
}

#[derive(Debug, Clone, Copy)]
pub struct DeathRecord {
    pub position: DVec2,
    pub xp_value: f64,
    pub is_boss: bool,
}

/// Snapshot of one enemy taken before the resolvers run.
#[derive(Debug, Clone, Copy)]
struct EnemyRef {
    entity: Entity,
    position: DVec2,
    radius: f64,
}

/// Shared damage entry point.
///
/// No-op when the enemy is already at or below zero hp, which keeps kill
/// credit and the experience reward idempotent.
pub fn apply_enemy_damage(
    world: &World,
    enemy: Entity,
    enemy_pos: DVec2,
    hit_at: DVec2,
    damage: f64,
    ledger: &mut DamageLedger,
) {
    let Ok(mut unit) = world.get::<&mut EnemyUnit>(enemy) else {
        return;
    };
    if unit.hp <= 0.0 {
        return;
    }
    unit.hp -= damage;
    ledger.dealt += damage;
    ledger.hits.push(hit_at);
    if unit.hp <= 0.0 {
        ledger.kills += 1;
        ledger.deaths.push(DeathRecord {
            position: enemy_pos,
            xp_value: unit.xp_value,
            is_boss: unit.is_boss,
        });
    }
}

/// Run every resolver for this frame.
pub fn resolve(world: &mut World, ledger: &mut DamageLedger, events: &mut Vec<SimEvent>) {
    let enemies: Vec<EnemyRef> = world
        .query::<(&Hostile, &Position, &EnemyUnit)>()
        .iter()
        .map(|(entity, (_h, pos, unit))| EnemyRef {
            entity,
            position: pos.0,
            radius: unit.radius,
        })
        .collect();

    resolve_bullet_hits(world, &enemies, ledger);
    resolve_slug_hits(world, &enemies, ledger);
    resolve_rocket_hits(world, &enemies, ledger, events);
    resolve_mine_hits(world, &enemies, ledger, events);
    resolve_laser_hits(world, &enemies, ledger);
    resolve_pulse_hits(world, &enemies, ledger);
}

/// Bullets: circle-circle against each enemy; the first match absorbs the
/// round.
fn resolve_bullet_hits(world: &mut World, enemies: &[EnemyRef], ledger: &mut DamageLedger) {
    let mut impacts: Vec<(Entity, DVec2, DVec2, f64)> = Vec::new();

    for (_e, (bullet, pos)) in world.query_mut::<(&mut Bullet, &Position)>() {
        if bullet.ttl <= 0.0 {
            continue;
        }
        for enemy in enemies {
            let reach = BULLET_RADIUS + enemy.radius;
            if pos.0.distance_squared(enemy.position) <= reach * reach {
                bullet.ttl = 0.0;
                impacts.push((enemy.entity, enemy.position, pos.0, bullet.damage));
                break;
            }
        }
    }

    for (enemy, enemy_pos, at, damage) in impacts {
        apply_enemy_damage(world, enemy, enemy_pos, at, damage, ledger);
    }
}

/// Slugs: swept-segment test, piercing through everything in the path.
/// The per-slug hit set stops an enemy from being ground down across
/// consecutive frames by one slug.
fn resolve_slug_hits(world: &mut World, enemies: &[EnemyRef], ledger: &mut DamageLedger) {
    let mut impacts: Vec<(Entity, DVec2, DVec2, f64)> = Vec::new();

    for (_e, (slug, pos)) in world.query_mut::<(&mut RailSlug, &Position)>() {
        if slug.ttl <= 0.0 {
            continue;
        }
        for enemy in enemies {
            let bits = enemy.entity.to_bits().get();
            if slug.hit.contains(&bits) {
                continue;
            }
            let reach = RAILGUN_RADIUS + enemy.radius;
            if point_segment_distance_sq(enemy.position, slug.prev, pos.0) <= reach * reach {
                slug.hit.push(bits);
                impacts.push((enemy.entity, enemy.position, enemy.position, slug.damage));
            }
        }
    }

    for (enemy, enemy_pos, at, damage) in impacts {
        apply_enemy_damage(world, enemy, enemy_pos, at, damage, ledger);
    }
}

/// Rockets: detonate on proximity to any enemy or on reaching the target
/// point, then splash everything in radius.
fn resolve_rocket_hits(
    world: &mut World,
    enemies: &[EnemyRef],
    ledger: &mut DamageLedger,
    events: &mut Vec<SimEvent>,
) {
    let mut explosions: Vec<(DVec2, f64, f64)> = Vec::new();

    for (_e, (rocket, pos)) in world.query_mut::<(&mut Rocket, &Position)>() {
        if rocket.ttl <= 0.0 {
            continue;
        }
        let proximity = enemies.iter().any(|enemy| {
            let reach = ROCKET_CONTACT_RADIUS + enemy.radius;
            point_segment_distance_sq(enemy.position, rocket.prev, pos.0) <= reach * reach
        });
        let arrived = pos.0.distance_squared(rocket.target) <= ROCKET_ARM_RADIUS * ROCKET_ARM_RADIUS;
        if proximity || arrived {
            rocket.ttl = 0.0;
            explosions.push((pos.0, rocket.splash_radius, rocket.damage));
        }
    }

    for (at, radius, damage) in explosions {
        splash(world, enemies, at, radius, damage, ledger);
        events.push(SimEvent::Explosion { position: at, radius });
    }
}

/// Mines: trigger when any enemy enters the trigger radius.
fn resolve_mine_hits(
    world: &mut World,
    enemies: &[EnemyRef],
    ledger: &mut DamageLedger,
    events: &mut Vec<SimEvent>,
) {
    let mut explosions: Vec<(DVec2, f64, f64)> = Vec::new();

    for (_e, (mine, pos)) in world.query_mut::<(&mut Mine, &Position)>() {
        if mine.ttl <= 0.0 {
            continue;
        }
        let triggered = enemies.iter().any(|enemy| {
            let reach = mine.trigger_radius + enemy.radius;
            pos.0.distance_squared(enemy.position) <= reach * reach
        });
        if triggered {
            mine.ttl = 0.0;
            explosions.push((pos.0, mine.splash_radius, mine.damage));
        }
    }

    for (at, radius, damage) in explosions {
        splash(world, enemies, at, radius, damage, ledger);
        events.push(SimEvent::Explosion { position: at, radius });
    }
}

/// Damage every enemy whose center is within `radius` of the blast,
/// boundary included.
fn splash(
    world: &World,
    enemies: &[EnemyRef],
    at: DVec2,
    radius: f64,
    damage: f64,
    ledger: &mut DamageLedger,
) {
    for enemy in enemies {
        if at.distance_squared(enemy.position) <= radius * radius {
            apply_enemy_damage(world, enemy.entity, enemy.position, enemy.position, damage, ledger);
        }
    }
}

/// Beams: point-to-segment test, damaging everything along the beam in
/// the same frame — no early exit.
fn resolve_laser_hits(world: &mut World, enemies: &[EnemyRef], ledger: &mut DamageLedger) {
    let mut impacts: Vec<(Entity, DVec2, f64)> = Vec::new();

    for (_e, beam) in world.query_mut::<&mut LaserBeam>() {
        if !beam.pending {
            continue;
        }
        beam.pending = false;
        for enemy in enemies {
            let reach = enemy.radius + LASER_WIDTH / 2.0;
            if point_segment_distance_sq(enemy.position, beam.start, beam.end) <= reach * reach {
                impacts.push((enemy.entity, enemy.position, beam.damage));
            }
        }
    }

    for (enemy, enemy_pos, damage) in impacts {
        apply_enemy_damage(world, enemy, enemy_pos, enemy_pos, damage, ledger);
    }
}

/// EMP pulses: everything inside the ring takes the tick damage.
fn resolve_pulse_hits(world: &mut World, enemies: &[EnemyRef], ledger: &mut DamageLedger) {
    let mut impacts: Vec<(Entity, DVec2, f64)> = Vec::new();

    for (_e, (pulse, pos)) in world.query_mut::<(&mut EmpPulse, &Position)>() {
        if !pulse.pending {
            continue;
        }
        pulse.pending = false;
        for enemy in enemies {
            if pos.0.distance_squared(enemy.position) <= pulse.radius * pulse.radius {
                impacts.push((enemy.entity, enemy.position, pulse.damage));
            }
        }
    }

    for (enemy, enemy_pos, damage) in impacts {
        apply_enemy_damage(world, enemy, enemy_pos, enemy_pos, damage, ledger);
    }
}
