//! Per-enemy steering policies.
//!
//! Each behavior maps the situation to a desired velocity, which is then
//! magnitude-clamped to the unit's speed. The caller points the unit's
//! facing at the result — orientation is visual only.

use glam::DVec2;

use outrider_core::constants::AI_MIN_DISTANCE;
use outrider_core::enums::Behavior;

/// Input to the steering evaluation for a single enemy.
pub struct SteerContext {
    pub behavior: Behavior,
    pub speed: f64,
    /// Polygon side count; seeds the oscillators so identical archetypes
    /// don't move in lockstep.
    pub sides: u32,
    pub preferred_range: f64,
    /// Per-enemy elapsed-time accumulator.
    pub phase_clock: f64,
    pub position: DVec2,
    pub player: DVec2,
}

/// Evaluate the policy. Returns `None` when the unit is on top of the
/// player (distance at or below the epsilon) and should skip this frame.
pub fn steer(ctx: &SteerContext) -> Option<DVec2> {
    let delta = ctx.player - ctx.position;
    let distance = delta.length();
    if distance <= AI_MIN_DISTANCE {
        return None;
    }

    let normal = delta / distance;
    let tangent = DVec2::new(-normal.y, normal.x);
    let speed = ctx.speed;
    let sides = ctx.sides as f64;

    let velocity = match ctx.behavior {
        Behavior::Rush => normal * speed,
        Behavior::Skirmish => {
            let orbit_sign = if ctx.sides % 2 == 0 { 1.0 } else { -1.0 };
            let radial = (distance - ctx.preferred_range) / ctx.preferred_range.max(1.0);
            tangent * speed * orbit_sign + normal * speed * radial.clamp(-0.55, 0.55)
        }
        Behavior::Flank => {
            let wave = (ctx.phase_clock * 1.4 + sides * 0.3).sin();
            let inward = if distance > ctx.preferred_range { 0.65 } else { 0.2 };
            tangent * speed * wave * 0.85 + normal * speed * inward
        }
        Behavior::Siege => {
            let weave = (ctx.phase_clock * 0.8 + sides * 0.2).sin() * 0.35;
            normal * speed * 0.92 + tangent * speed * weave
        }
    };

    let magnitude = velocity.length();
    if magnitude > speed {
        Some(velocity / magnitude * speed)
    } else {
        Some(velocity)
    }
}
