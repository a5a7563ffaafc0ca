//! Weapon fire control: advances family timers and mount cooldowns,
//! spawns projectiles, and books ammo expenditure.
//!
//! A fire request with no ammo or a running cooldown is a silent no-op.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use outrider_core::commands::HelmInput;
use outrider_core::components::*;
use outrider_core::constants::*;
use outrider_core::enums::{Mounting, WeaponFamily};
use outrider_core::events::SimEvent;
use outrider_core::ruleset::Ruleset;
use outrider_core::types::{forward, lateral, Heading, Position};

use crate::fire_control::FireControl;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    fire: &mut FireControl,
    player: Entity,
    helm: &HelmInput,
    rules: &Ruleset,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let (ppos, pheading, pilot) = {
        let Ok((pos, heading, pilot)) =
            world.query_one_mut::<(&Position, &Heading, &PilotState)>(player)
        else {
            return;
        };
        (pos.0, heading.0, pilot.clone())
    };

    let fwd = forward(pheading);
    let aim = helm.aim_point.unwrap_or(ppos + fwd * AIM_FALLBACK_DISTANCE);
    let mut ammo_spent: u32 = 0;

    // --- Minigun: auto-aims the nearest enemy with a little spread ---
    let fire_cd = pilot.fire_cooldown();
    fire.fire_timer += dt;
    while fire.fire_timer >= fire_cd {
        fire.fire_timer -= fire_cd;
        if let Some(target) = nearest_enemy(world, ppos) {
            let dir = target - ppos;
            let base = dir.y.atan2(dir.x) + rng.gen_range(-BULLET_SPREAD..BULLET_SPREAD);
            let velocity = DVec2::new(base.cos(), base.sin()) * BULLET_SPEED;
            world.spawn((
                Position(ppos),
                Bullet {
                    velocity,
                    prev: ppos,
                    ttl: BULLET_LIFETIME,
                    damage: pilot.bullet_damage(),
                },
            ));
            ammo_spent += 1;
            events.push(SimEvent::MuzzleFlash {
                family: WeaponFamily::Minigun,
                position: ppos,
                direction: velocity.normalize(),
            });
        }
    }

    // --- Rockets: volley toward the aim point ---
    if let Some(stats) = pilot.rocket_stats() {
        fire.rocket_timer += dt;
        while fire.rocket_timer >= stats.fire_cooldown {
            fire.rocket_timer -= stats.fire_cooldown;
            let to_aim = aim - ppos;
            let base = if to_aim.length_squared() > f64::EPSILON {
                to_aim.y.atan2(to_aim.x)
            } else {
                fwd.y.atan2(fwd.x)
            };
            for _ in 0..stats.salvo {
                let jitter = rng.gen_range(-ROCKET_SALVO_SPREAD..ROCKET_SALVO_SPREAD);
                let angle = base + jitter;
                world.spawn((
                    Position(ppos),
                    Rocket {
                        velocity: DVec2::new(angle.cos(), angle.sin()) * ROCKET_SPEED,
                        prev: ppos,
                        target: aim,
                        ttl: ROCKET_LIFETIME,
                        damage: stats.damage,
                        splash_radius: stats.splash_radius,
                    },
                ));
                ammo_spent += 1;
            }
            events.push(SimEvent::MuzzleFlash {
                family: WeaponFamily::Rockets,
                position: ppos,
                direction: DVec2::new(base.cos(), base.sin()),
            });
        }
    }

    // --- Laser: piercing beam toward the aim point ---
    if let Some(stats) = pilot.laser_stats() {
        fire.laser_timer += dt;
        if fire.laser_timer >= stats.fire_cooldown {
            fire.laser_timer -= stats.fire_cooldown;
            let to_aim = aim - ppos;
            let dir = if to_aim.length_squared() > f64::EPSILON {
                to_aim.normalize()
            } else {
                fwd
            };
            let length = rules.view_extent.max_element() * LASER_RANGE_FACTOR;
            world.spawn((LaserBeam {
                start: ppos,
                end: ppos + dir * length,
                ttl: LASER_LIFETIME,
                damage: stats.damage,
                pending: true,
            },));
            events.push(SimEvent::MuzzleFlash {
                family: WeaponFamily::Laser,
                position: ppos,
                direction: dir,
            });
        }
    }

    // --- EMP: field tick around the craft ---
    if let Some(stats) = pilot.emp_stats() {
        fire.emp_timer += dt;
        if fire.emp_timer >= EMP_TICK_INTERVAL {
            fire.emp_timer -= EMP_TICK_INTERVAL;
            world.spawn((
                Position(ppos),
                EmpPulse {
                    radius: stats.radius,
                    ttl: EMP_PULSE_LIFETIME,
                    damage: stats.damage,
                    pending: true,
                },
            ));
        }
    }

    // --- Mines: dropped behind the craft ---
    if let Some(stats) = pilot.mine_stats() {
        fire.mine_timer += dt;
        while fire.mine_timer >= stats.drop_cooldown {
            fire.mine_timer -= stats.drop_cooldown;
            let drop = ppos - fwd * MINE_DROP_OFFSET;
            world.spawn((
                Position(drop),
                Mine {
                    ttl: MINE_LIFETIME,
                    damage: MINE_DAMAGE,
                    splash_radius: MINE_SPLASH_RADIUS,
                    trigger_radius: MINE_TRIGGER_RADIUS,
                },
            ));
            ammo_spent += 1;
        }
    }

    // --- Manually aimed mounts ---
    for mount in &mut fire.mounts {
        mount.update(dt);
    }
    let requests: Vec<usize> = fire.mount_requests.drain(..).collect();
    for slot in requests {
        let Some(mount) = fire.mounts.get_mut(slot) else {
            continue;
        };
        if !mount.try_fire() {
            continue;
        }
        let dir = mount_direction(&mount.def, pheading, ppos, aim);
        world.spawn((
            Position(ppos),
            RailSlug {
                velocity: dir * RAILGUN_SPEED,
                prev: ppos,
                ttl: RAILGUN_LIFETIME,
                damage: mount.def.damage,
                hit: Vec::new(),
            },
        ));
        ammo_spent += 1;
        events.push(SimEvent::MuzzleFlash {
            family: WeaponFamily::Railgun,
            position: ppos,
            direction: dir,
        });
    }

    if ammo_spent > 0 {
        if let Ok(pilot) = world.query_one_mut::<&mut PilotState>(player) {
            pilot.stats.ammo_spent += ammo_spent;
        }
    }
}

/// Closest live enemy position, if any.
fn nearest_enemy(world: &World, from: DVec2) -> Option<DVec2> {
    let mut best: Option<(f64, DVec2)> = None;
    for (_entity, (_hostile, pos)) in world.query::<(&Hostile, &Position)>().iter() {
        let d2 = pos.0.distance_squared(from);
        if best.map(|(b, _)| d2 < b).unwrap_or(true) {
            best = Some((d2, pos.0));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Firing direction for a mount: the aim direction clamped to the gimbal
/// cone around mount-forward. Turrets track the aim point freely.
fn mount_direction(def: &outrider_core::loadout::WeaponDef, heading: f64, from: DVec2, aim: DVec2) -> DVec2 {
    let fwd = forward(heading);
    let mount_dir = match def.mounting {
        Mounting::Forward => fwd,
        Mounting::Rear => -fwd,
        Mounting::Side => lateral(heading) * def.side_sign as f64,
        Mounting::Turret => fwd,
    };

    let to_aim = aim - from;
    if to_aim.length_squared() <= f64::EPSILON {
        return mount_dir;
    }
    let desired = to_aim.normalize();
    if matches!(def.mounting, Mounting::Turret) {
        return desired;
    }

    let base = mount_dir.y.atan2(mount_dir.x);
    let want = desired.y.atan2(desired.x);
    let mut diff = want - base;
    diff = (diff + PI).rem_euclid(TAU) - PI;
    let limit = def.gimbal_degrees.to_radians();
    let angle = base + diff.clamp(-limit, limit);
    DVec2::new(angle.cos(), angle.sin())
}
