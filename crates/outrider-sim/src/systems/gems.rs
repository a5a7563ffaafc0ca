//! Experience gem magnetism, collection and decay.

use hecs::{Entity, World};

use outrider_core::components::{PilotState, XpGem};
use outrider_core::events::SimEvent;
use outrider_core::ruleset::Ruleset;
use outrider_core::types::Position;

/// Update all gems against the player. Returns the experience collected
/// this frame.
pub fn run(
    world: &mut World,
    player: Entity,
    rules: &Ruleset,
    dt: f64,
    events: &mut Vec<SimEvent>,
) -> f64 {
    let (player_pos, tractor_range) = {
        let Ok((pos, pilot)) = world.query_one_mut::<(&Position, &PilotState)>(player) else {
            return 0.0;
        };
        (pos.0, pilot.tractor_range())
    };

    let magnet_speed = rules.progression.gem_magnet_speed;
    let collect_sq = rules.progression.gem_collect_radius * rules.progression.gem_collect_radius;
    let mut gained = 0.0;

    for (_e, (gem, pos)) in world.query_mut::<(&mut XpGem, &mut Position)>() {
        gem.lifetime -= dt;

        let delta = player_pos - pos.0;
        let d2 = delta.length_squared();

        if d2 < tractor_range * tractor_range && d2 > 0.0 {
            pos.0 += delta / d2.sqrt() * magnet_speed * dt;
        }

        if d2 < collect_sq {
            gained += gem.value;
            gem.lifetime = 0.0;
            events.push(SimEvent::GemCollected { value: gem.value });
        }
    }

    gained
}
