//! Entity removal: dead enemies the frame they die, expired projectiles
//! and gems at the end of the frame.
//!
//! Uses a pre-allocated despawn buffer. Physics-backed entities are
//! detached from the space before despawning so the engine never
//! accumulates orphaned bodies.

use hecs::{Entity, World};

use outrider_core::components::*;
use outrider_core::types::Position;
use outrider_physics::Space;

/// Remove enemies at or below zero hp, detaching their bodies.
pub fn cull_dead_enemies(
    world: &mut World,
    space: &mut dyn Space,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    for (entity, (unit, _hostile)) in world.query_mut::<(&EnemyUnit, &Hostile)>() {
        if unit.hp <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    drain(world, space, despawn_buffer);
}

/// Remove everything whose lifetime ran out this frame.
pub fn run_expiry(world: &mut World, space: &mut dyn Space, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (bullet, _pos)) in world.query_mut::<(&Bullet, &Position)>() {
        if bullet.ttl <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (slug, _pos)) in world.query_mut::<(&RailSlug, &Position)>() {
        if slug.ttl <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (rocket, _pos)) in world.query_mut::<(&Rocket, &Position)>() {
        if rocket.ttl <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, beam) in world.query_mut::<&LaserBeam>() {
        if beam.ttl <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, pulse) in world.query_mut::<&EmpPulse>() {
        if pulse.ttl <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (mine, _pos)) in world.query_mut::<(&Mine, &Position)>() {
        if mine.ttl <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (gem, _pos)) in world.query_mut::<(&XpGem, &Position)>() {
        if gem.lifetime <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    drain(world, space, despawn_buffer);
}

/// Detach any physics body, then despawn, for every buffered entity.
fn drain(world: &mut World, space: &mut dyn Space, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        if let Ok(body) = world.get::<&BodyRef>(entity).map(|b| b.0) {
            space.detach(body);
        }
        let _ = world.despawn(entity);
    }
}
