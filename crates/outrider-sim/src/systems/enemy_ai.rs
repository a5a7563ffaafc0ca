//! Enemy AI system: evaluates the steering policy for each enemy and
//! writes the result to its physics body.
//!
//! Velocity is set directly (enemies are not force-driven); facing is
//! pointed along the velocity, which is visual only.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use hecs::World;

use outrider_core::components::{BodyRef, EnemyUnit};
use outrider_core::types::Position;
use outrider_physics::Space;

use outrider_ai::steer::{steer, SteerContext};

pub fn run(world: &mut World, space: &mut dyn Space, player_pos: DVec2, dt: f64) {
    for (_entity, (unit, pos, body)) in
        world.query_mut::<(&mut EnemyUnit, &Position, &BodyRef)>()
    {
        unit.phase_clock += dt;

        let ctx = SteerContext {
            behavior: unit.behavior,
            speed: unit.speed,
            sides: unit.sides,
            preferred_range: unit.preferred_range,
            phase_clock: unit.phase_clock,
            position: pos.0,
            player: player_pos,
        };

        // `None` means the unit is on top of the player; skip the frame.
        if let Some(velocity) = steer(&ctx) {
            space.set_velocity(body.0, velocity);
            space.set_angle(body.0, velocity.y.atan2(velocity.x) + FRAC_PI_2);
        }
    }
}
