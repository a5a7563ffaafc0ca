//! Enemy-player contact damage and the two-layer shield model.
//!
//! Contact damage is continuous (`damage_rate * dt` per overlapping
//! enemy), not per-hit-event, and is intentionally left unclamped at
//! large frame times.

use hecs::{Entity, World};

use outrider_core::components::{EnemyUnit, PilotState};
use outrider_core::constants::PLAYER_RADIUS;
use outrider_core::events::SimEvent;
use outrider_core::types::Position;

/// Apply contact damage and run shield absorption/regeneration.
/// Returns the total incoming damage this frame (shield plus hull), which
/// the extraction channel treats as an interrupt.
pub fn run(world: &mut World, player: Entity, dt: f64, events: &mut Vec<SimEvent>) -> f64 {
    let player_pos = match world.get::<&Position>(player) {
        Ok(pos) => pos.0,
        Err(_) => return 0.0,
    };

    let mut incoming = 0.0;
    for (_e, (unit, pos)) in world.query::<(&EnemyUnit, &Position)>().iter() {
        if unit.hp <= 0.0 {
            continue;
        }
        let reach = PLAYER_RADIUS + unit.radius;
        if pos.0.distance_squared(player_pos) <= reach * reach {
            incoming += unit.contact_damage * dt;
        }
    }

    let Ok(mut pilot) = world.get::<&mut PilotState>(player) else {
        return 0.0;
    };

    if incoming > 0.0 {
        let mut hull_loss = incoming;
        if pilot.shield_tier.is_some() && pilot.shield_hp > 0.0 {
            if pilot.shield_hp >= incoming {
                pilot.shield_hp -= incoming;
                hull_loss = 0.0;
            } else {
                hull_loss = incoming - pilot.shield_hp;
                pilot.shield_hp = 0.0;
                events.push(SimEvent::ShieldDepleted);
            }
        }
        if hull_loss > 0.0 {
            pilot.hp -= hull_loss;
            pilot.stats.hull_damage += hull_loss;
            events.push(SimEvent::HullDamaged { amount: hull_loss });
        }
        // Any damage taken restarts the regen delay.
        if pilot.shield_tier.is_some() {
            pilot.shield_regen_delay = pilot.shield_regen_delay_value();
        }
    }

    // Regeneration only once the post-hit delay has elapsed.
    if pilot.shield_tier.is_some() {
        let shield_max = pilot.shield_max();
        if pilot.shield_hp < shield_max {
            if pilot.shield_regen_delay > 0.0 {
                pilot.shield_regen_delay = (pilot.shield_regen_delay - dt).max(0.0);
            } else {
                let rate = pilot.shield_regen_rate();
                pilot.shield_hp = (pilot.shield_hp + rate * dt).min(shield_max);
            }
        }
    }

    incoming
}
