//! Control mapper: raw helm intents plus fuel availability become forces
//! and impulses on the player body.
//!
//! Ordering matters and is preserved exactly: rotation (fuel-gated),
//! angular drift (always), throttle resolution, thrust, strafe, boost,
//! then dash. Every fuel cost is all-or-nothing — an action whose exact
//! cost exceeds remaining fuel does not apply at all this frame.

use outrider_core::commands::HelmInput;
use outrider_core::components::PilotState;
use outrider_core::constants::PLAYER_BASE_SPEED;
use outrider_core::enums::DashSide;
use outrider_core::events::SimEvent;
use outrider_core::ruleset::Ruleset;
use outrider_core::types::{forward, lateral};
use outrider_physics::{BodyId, Space};

pub fn run(
    pilot: &mut PilotState,
    body: BodyId,
    space: &mut dyn Space,
    helm: &HelmInput,
    rules: &Ruleset,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let helm_t = &rules.helm;
    let fuel_t = &rules.fuel;
    let has_fuel = pilot.fuel > 0.0;

    // Double-tap detection. A tap always re-arms the window, even when
    // the dash itself ends up blocked.
    pilot.tap_clock += dt;
    let mut hurdle_direction = 0.0;
    if helm.dash_left_tap {
        if pilot.tap_clock - pilot.last_left_tap <= helm_t.double_tap_window {
            hurdle_direction = DashSide::Left.sign();
        }
        pilot.last_left_tap = pilot.tap_clock;
    }
    if helm.dash_right_tap {
        if pilot.tap_clock - pilot.last_right_tap <= helm_t.double_tap_window {
            hurdle_direction = DashSide::Right.sign();
        }
        pilot.last_right_tap = pilot.tap_clock;
    }

    let angle = space.state(body).map(|s| s.angle).unwrap_or(0.0);
    let fwd = forward(angle);
    let lat = lateral(angle);

    // Rotation, fuel-gated but free of fuel cost.
    if has_fuel && helm.rotate != 0 {
        let accel = helm_t.rotation_accel_deg.to_radians();
        let max_spin = helm_t.rotation_speed_deg.to_radians();
        let mut spin = space.angular_velocity(body);
        spin += accel * dt * helm.rotate as f64;
        space.set_angular_velocity(body, spin.clamp(-max_spin, max_spin));
    }
    // Angular drift decays spin every frame regardless of fuel.
    let drift = helm_t.drift_factor.clamp(0.0, 1.0);
    let spin = space.angular_velocity(body);
    space.set_angular_velocity(body, spin * drift);

    let speed_mult = pilot.speed_value / PLAYER_BASE_SPEED;

    // Throttle: instant overrides beat incremental ramping.
    let mut throttle = pilot.throttle_level;
    if helm.throttle_max {
        throttle = 1.0;
    } else if helm.throttle_cut {
        throttle = 0.0;
    } else if helm.throttle_up {
        throttle = (throttle + helm_t.throttle_step_per_sec * dt).min(1.0);
    } else if helm.throttle_down {
        throttle = (throttle - helm_t.throttle_step_per_sec * dt).max(0.0);
    }
    pilot.throttle_level = throttle;

    let fuel_before = pilot.fuel;
    let mut fuel = pilot.fuel;

    if has_fuel && throttle > 0.0 {
        let cost = fuel_t.burn_rate * throttle * dt * pilot.fuel_rate;
        if fuel >= cost {
            space.apply_force(body, fwd * (helm_t.thrust_power * speed_mult * throttle));
            fuel -= cost;
        }
    }

    if has_fuel && helm.strafe != 0 && fuel > 0.0 {
        let cost = fuel_t.burn_rate * fuel_t.strafe_mult * dt * pilot.fuel_rate;
        if fuel >= cost {
            space.apply_force(
                body,
                lat * (helm_t.strafe_power * speed_mult * helm.strafe as f64),
            );
            fuel -= cost;
        }
    }

    // Boost: re-armed only at full charge with no active window.
    let mut charge = pilot.boost_charge;
    let mut timer = pilot.boost_timer;
    if has_fuel && pilot.boost_unlocked && helm.boost && charge >= 1.0 && timer <= 0.0 {
        timer = helm_t.boost_duration;
        charge = 0.0;
        events.push(SimEvent::BoostEngaged);
    }
    if has_fuel && timer > 0.0 && fuel > 0.0 {
        let cost = fuel_t.burn_rate * fuel_t.boost_mult * dt * pilot.fuel_rate;
        if fuel >= cost {
            space.apply_force(body, fwd * (helm_t.boost_force * speed_mult));
            fuel -= cost;
            timer = (timer - dt).max(0.0);
        } else {
            // Out of fuel mid-boost: the window ends early.
            timer = 0.0;
        }
    } else {
        charge = (charge + dt / helm_t.boost_recharge_time).min(1.0);
    }

    fuel = fuel.max(0.0);
    pilot.stats.fuel_spent += fuel_before - fuel;
    pilot.fuel = fuel;
    pilot.boost_timer = timer;
    pilot.boost_charge = charge;

    // Dash: cooldown decrement and trigger are mutually exclusive in one
    // frame, so a dash is never available the same frame its cooldown hits
    // zero.
    if pilot.hurdle_cooldown > 0.0 {
        pilot.hurdle_cooldown = (pilot.hurdle_cooldown - dt).max(0.0);
    } else if has_fuel && pilot.hurdle_unlocked && hurdle_direction != 0.0 {
        space.apply_impulse(body, lat * (helm_t.hurdle_impulse * hurdle_direction));
        pilot.hurdle_cooldown = helm_t.hurdle_cooldown;
        let side = if hurdle_direction < 0.0 {
            DashSide::Left
        } else {
            DashSide::Right
        };
        events.push(SimEvent::DashExecuted { side });
    }
}
