//! Deterministic in-memory integrator.
//!
//! Unit-mass circular bodies under accumulated forces, no gravity and no
//! built-in damping — velocity persists until counter-thrust, Newtonian
//! style. Angular velocity is integrated but never damped here; drag
//! policies belong to the control layer.

use std::collections::HashMap;

use glam::DVec2;

use crate::space::{BodyId, BodyState, Space};

const BODY_MASS: f64 = 1.0;

#[derive(Debug, Clone)]
struct PointBody {
    position: DVec2,
    velocity: DVec2,
    angle: f64,
    angular_velocity: f64,
    force: DVec2,
}

/// The bundled `Space` implementation.
#[derive(Debug, Default)]
pub struct PointSpace {
    bodies: HashMap<BodyId, PointBody>,
}

impl PointSpace {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Space for PointSpace {
    // Bodies here are point masses; the collision radius is part of the
    // contract but has no effect on integration.
    fn attach(&mut self, id: BodyId, position: DVec2, _radius: f64) {
        self.bodies.entry(id).or_insert(PointBody {
            position,
            velocity: DVec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            force: DVec2::ZERO,
        });
    }

    fn detach(&mut self, id: BodyId) {
        self.bodies.remove(&id);
    }

    fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    fn apply_force(&mut self, id: BodyId, force: DVec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.force += force;
        }
    }

    fn apply_impulse(&mut self, id: BodyId, impulse: DVec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.velocity += impulse / BODY_MASS;
        }
    }

    fn velocity(&self, id: BodyId) -> DVec2 {
        self.bodies.get(&id).map(|b| b.velocity).unwrap_or(DVec2::ZERO)
    }

    fn set_velocity(&mut self, id: BodyId, velocity: DVec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.velocity = velocity;
        }
    }

    fn angular_velocity(&self, id: BodyId) -> f64 {
        self.bodies.get(&id).map(|b| b.angular_velocity).unwrap_or(0.0)
    }

    fn set_angular_velocity(&mut self, id: BodyId, angular_velocity: f64) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.angular_velocity = angular_velocity;
        }
    }

    fn set_angle(&mut self, id: BodyId, angle: f64) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.angle = angle;
        }
    }

    fn clamp_speed(&mut self, id: BodyId, max_speed: f64, min_speed: f64) {
        if let Some(body) = self.bodies.get_mut(&id) {
            let speed = body.velocity.length();
            if speed == 0.0 {
                return;
            }
            if speed > max_speed {
                body.velocity = body.velocity / speed * max_speed;
            } else if speed < min_speed {
                body.velocity = body.velocity / speed * min_speed;
            }
        }
    }

    fn step(&mut self, dt: f64) {
        for body in self.bodies.values_mut() {
            body.velocity += body.force / BODY_MASS * dt;
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
            body.force = DVec2::ZERO;
        }
    }

    fn state(&self, id: BodyId) -> Option<BodyState> {
        self.bodies.get(&id).map(|b| BodyState {
            position: b.position,
            angle: b.angle,
            velocity: b.velocity,
            angular_velocity: b.angular_velocity,
        })
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
