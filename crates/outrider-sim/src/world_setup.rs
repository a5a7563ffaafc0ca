//! Entity spawn factories for setting up the simulation world.

use glam::DVec2;
use hecs::{Entity, World};

use outrider_core::components::*;
use outrider_core::constants::*;
use outrider_core::loadout::Loadout;
use outrider_core::types::{Heading, Position};
use outrider_physics::{BodyId, Space};

use outrider_ai::profiles::ArchetypeProfile;

/// Physics body handle for an entity.
pub fn body_id(entity: Entity) -> BodyId {
    entity.to_bits().get()
}

/// Spawn the player craft at the view center with the supplied loadout.
pub fn spawn_player(world: &mut World, space: &mut dyn Space, loadout: &Loadout, view_extent: DVec2) -> Entity {
    let position = view_extent * 0.5;
    let pilot = PilotState {
        hp: loadout.hull,
        max_hp: loadout.hull,
        shield_hp: 0.0,
        shield_regen_delay: 0.0,
        fuel: loadout.fuel,
        max_fuel: loadout.fuel,
        fuel_rate: loadout.fuel_rate,
        speed_value: loadout.speed,
        base_speed: loadout.speed,
        throttle_level: 0.0,
        boost_charge: 1.0,
        boost_timer: 0.0,
        hurdle_cooldown: 0.0,
        boost_unlocked: true,
        hurdle_unlocked: true,
        tap_clock: 0.0,
        last_left_tap: -10.0,
        last_right_tap: -10.0,
        level: 1,
        xp: 0.0,
        minigun_tier: 0,
        rockets_tier: None,
        laser_tier: None,
        emp_tier: None,
        mines_tier: None,
        shield_tier: None,
        health_tier: 0,
        tractor_tier: 0,
        thruster_tier: 0,
        upgrades_taken: 0,
        stats: RoundStats::default(),
    };

    let entity = world.spawn((PlayerShip, Position(position), Heading(0.0), pilot));
    let body = body_id(entity);
    space.attach(body, position, PLAYER_RADIUS);
    let _ = world.insert_one(entity, BodyRef(body));
    entity
}

/// Spawn one enemy at `position`, scaled by elapsed round time.
pub fn spawn_enemy(
    world: &mut World,
    space: &mut dyn Space,
    position: DVec2,
    profile: &ArchetypeProfile,
    is_boss: bool,
    elapsed: f64,
) -> Entity {
    let base_speed = ENEMY_BASE_SPEED + (elapsed * ENEMY_SPEED_PER_SEC).min(ENEMY_SPEED_MAX_BONUS);
    let base_hp = ENEMY_HP_BASE + (elapsed * ENEMY_HP_PER_SEC).min(ENEMY_HP_MAX_BONUS);
    let base_damage =
        ENEMY_DAMAGE_BASE + (elapsed * ENEMY_DAMAGE_PER_SEC).min(ENEMY_DAMAGE_MAX_BONUS);

    let unit = EnemyUnit {
        speed: base_speed * profile.speed_mult,
        hp: base_hp * profile.hp_mult,
        max_hp: base_hp * profile.hp_mult,
        contact_damage: base_damage * profile.damage_mult,
        xp_value: (ENEMY_XP_BASE + base_hp * profile.xp_mult * ENEMY_XP_PER_HP).floor(),
        sides: profile.sides,
        radius: ENEMY_RADIUS * profile.radius_mult,
        is_boss,
        behavior: profile.behavior,
        preferred_range: profile.preferred_range,
        phase_clock: 0.0,
    };
    let radius = unit.radius;

    let entity = world.spawn((Hostile, Position(position), Heading(0.0), unit));
    let body = body_id(entity);
    space.attach(body, position, radius);
    let _ = world.insert_one(entity, BodyRef(body));
    entity
}
