//! Projectile integration and lifetime decay.
//!
//! Bullets, slugs and rockets remember their previous position each
//! frame so hit tests can use the swept segment against fast motion.

use hecs::World;

use outrider_core::components::{Bullet, EmpPulse, LaserBeam, Mine, RailSlug, Rocket};
use outrider_core::types::Position;

pub fn run(world: &mut World, dt: f64) {
    for (_e, (bullet, pos)) in world.query_mut::<(&mut Bullet, &mut Position)>() {
        bullet.prev = pos.0;
        pos.0 += bullet.velocity * dt;
        bullet.ttl -= dt;
    }

    for (_e, (slug, pos)) in world.query_mut::<(&mut RailSlug, &mut Position)>() {
        slug.prev = pos.0;
        pos.0 += slug.velocity * dt;
        slug.ttl -= dt;
    }

    for (_e, (rocket, pos)) in world.query_mut::<(&mut Rocket, &mut Position)>() {
        rocket.prev = pos.0;
        pos.0 += rocket.velocity * dt;
        rocket.ttl -= dt;
    }

    for (_e, beam) in world.query_mut::<&mut LaserBeam>() {
        beam.ttl -= dt;
    }

    for (_e, pulse) in world.query_mut::<&mut EmpPulse>() {
        pulse.ttl -= dt;
    }

    for (_e, mine) in world.query_mut::<&mut Mine>() {
        mine.ttl -= dt;
    }
}
