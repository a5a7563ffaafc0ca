//! The simulation-facing physics contract.

use glam::DVec2;

/// Opaque body handle. The sim derives these from entity ids.
pub type BodyId = u64;

/// Read-back state of one body after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: DVec2,
    pub angle: f64,
    pub velocity: DVec2,
    pub angular_velocity: f64,
}

/// Contract over the rigid-body engine.
///
/// Mutating calls on detached bodies are silent no-ops; scalar getters on
/// detached bodies return zero. Every attached body must be detached
/// before its entity is dropped or the engine accumulates orphans.
pub trait Space {
    /// Attach a unit-mass circular body at `position`. Idempotent: a
    /// second attach for the same id leaves the existing body untouched.
    fn attach(&mut self, id: BodyId, position: DVec2, radius: f64);

    /// Remove the body. No-op if it was never attached.
    fn detach(&mut self, id: BodyId);

    fn contains(&self, id: BodyId) -> bool;

    /// Accumulate a force at the body's center for the next step.
    fn apply_force(&mut self, id: BodyId, force: DVec2);

    /// Immediate velocity change (divided by mass).
    fn apply_impulse(&mut self, id: BodyId, impulse: DVec2);

    fn velocity(&self, id: BodyId) -> DVec2;
    fn set_velocity(&mut self, id: BodyId, velocity: DVec2);

    fn angular_velocity(&self, id: BodyId) -> f64;
    fn set_angular_velocity(&mut self, id: BodyId, angular_velocity: f64);

    /// Hard-set the facing angle (visual orientation for AI-driven bodies).
    fn set_angle(&mut self, id: BodyId, angle: f64);

    /// Rescale the velocity vector to the nearest bound. No-op at zero
    /// speed; a below-minimum vector is scaled up, not zeroed.
    fn clamp_speed(&mut self, id: BodyId, max_speed: f64, min_speed: f64);

    /// Integrate all bodies by `dt` and clear accumulated forces.
    fn step(&mut self, dt: f64);

    /// Full state read-back, `None` for detached bodies.
    fn state(&self, id: BodyId) -> Option<BodyState>;

    /// Number of attached bodies (leak checks in tests).
    fn body_count(&self) -> usize;
}
