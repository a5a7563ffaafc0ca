//! Snapshot system: queries the ECS world and builds a complete
//! `GameStateSnapshot`. Read-only — it never modifies the world.

use hecs::{Entity, World};

use outrider_core::components::*;
use outrider_core::constants::*;
use outrider_core::enums::{GamePhase, WeaponFamily};
use outrider_core::events::SimEvent;
use outrider_core::ruleset::Ruleset;
use outrider_core::state::*;
use outrider_core::types::{Heading, Position, RoundClock};
use outrider_core::upgrades::{self, UpgradeKind};

use crate::fire_control::FireControl;
use crate::systems::progression::ExtractionState;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    player: Option<Entity>,
    phase: GamePhase,
    clock: RoundClock,
    fire: &FireControl,
    offers: &[UpgradeKind],
    extraction: &ExtractionState,
    rules: &Ruleset,
    events: Vec<SimEvent>,
    summary: Option<RoundSummary>,
) -> GameStateSnapshot {
    let (ship, racks, offer_views) = player
        .map(|p| build_ship_views(world, p, fire, offers, rules))
        .unwrap_or_default();

    GameStateSnapshot {
        phase,
        clock,
        ship,
        enemies: build_enemies(world),
        bullets: build_tracers::<Bullet>(world, BULLET_LIFETIME, |b| (b.prev, b.ttl)),
        slugs: build_tracers::<RailSlug>(world, RAILGUN_LIFETIME, |s| (s.prev, s.ttl)),
        rockets: build_tracers::<Rocket>(world, ROCKET_LIFETIME, |r| (r.prev, r.ttl)),
        beams: build_beams(world),
        pulses: build_pulses(world),
        mines: build_mines(world),
        gems: build_gems(world),
        racks,
        mounts: build_mounts(fire),
        offers: offer_views,
        extraction: ExtractionView {
            available: clock.elapsed >= rules.extraction.available_after,
            channeling: extraction.channeling,
            progress: (extraction.progress / rules.extraction.channel_secs).clamp(0.0, 1.0),
        },
        stats: build_stats(world, player),
        events,
        summary,
    }
}

fn build_ship_views(
    world: &World,
    player: Entity,
    fire: &FireControl,
    offers: &[UpgradeKind],
    rules: &Ruleset,
) -> (ShipView, Vec<RackView>, Vec<OfferView>) {
    let Ok(mut query) = world.query_one::<(&Position, &Heading, &PilotState)>(player) else {
        return Default::default();
    };
    let Some((pos, heading, pilot)) = query.get() else {
        return Default::default();
    };

    let shield_max = pilot.shield_max();
    let dash_ready = if pilot.hurdle_cooldown > 0.0 {
        (1.0 - pilot.hurdle_cooldown / rules.helm.hurdle_cooldown.max(0.001)).max(0.0)
    } else {
        1.0
    };

    let ship = ShipView {
        position: pos.0,
        heading: heading.0,
        hp: pilot.hp,
        max_hp: pilot.max_hp,
        shield_hp: pilot.shield_hp,
        shield_max,
        shield_ratio: if shield_max > 0.0 {
            (pilot.shield_hp / shield_max).clamp(0.0, 1.0)
        } else {
            0.0
        },
        fuel: pilot.fuel,
        max_fuel: pilot.max_fuel,
        fuel_ratio: if pilot.max_fuel > 0.0 {
            (pilot.fuel / pilot.max_fuel).clamp(0.0, 1.0)
        } else {
            0.0
        },
        throttle: pilot.throttle_level,
        boost_charge: pilot.boost_charge,
        boost_active: pilot.boost_timer > 0.0,
        dash_ready_ratio: dash_ready,
        level: pilot.level,
        xp: pilot.xp,
        xp_to_next: rules.xp_to_next(pilot.level),
    };

    let ready = |timer: f64, cooldown: f64| (timer / cooldown.max(0.0001)).min(1.0);
    let racks = vec![
        RackView {
            family: WeaponFamily::Minigun,
            unlocked: true,
            ready_ratio: ready(fire.fire_timer, pilot.fire_cooldown()),
        },
        RackView {
            family: WeaponFamily::Rockets,
            unlocked: pilot.rockets_tier.is_some(),
            ready_ratio: pilot
                .rocket_stats()
                .map(|s| ready(fire.rocket_timer, s.fire_cooldown))
                .unwrap_or(0.0),
        },
        RackView {
            family: WeaponFamily::Laser,
            unlocked: pilot.laser_tier.is_some(),
            ready_ratio: pilot
                .laser_stats()
                .map(|s| ready(fire.laser_timer, s.fire_cooldown))
                .unwrap_or(0.0),
        },
        RackView {
            family: WeaponFamily::Emp,
            unlocked: pilot.emp_tier.is_some(),
            ready_ratio: if pilot.emp_tier.is_some() {
                ready(fire.emp_timer, EMP_TICK_INTERVAL)
            } else {
                0.0
            },
        },
        RackView {
            family: WeaponFamily::Mines,
            unlocked: pilot.mines_tier.is_some(),
            ready_ratio: pilot
                .mine_stats()
                .map(|s| ready(fire.mine_timer, s.drop_cooldown))
                .unwrap_or(0.0),
        },
    ];

    let offer_views = offers
        .iter()
        .map(|kind| {
            let detail = match upgrades::current_tier(pilot, *kind) {
                None => kind.describe(None),
                Some(_) => kind.describe(Some(upgrades::next_tier(pilot, *kind))),
            };
            OfferView {
                kind: *kind,
                title: kind.name().to_string(),
                detail,
            }
        })
        .collect();

    (ship, racks, offer_views)
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(u64, EnemyView)> = world
        .query::<(&Hostile, &Position, &Heading, &EnemyUnit)>()
        .iter()
        .map(|(entity, (_h, pos, heading, unit))| {
            (
                entity.to_bits().get(),
                EnemyView {
                    position: pos.0,
                    heading: heading.0,
                    radius: unit.radius,
                    sides: unit.sides,
                    is_boss: unit.is_boss,
                    hp_ratio: if unit.max_hp > 0.0 {
                        (unit.hp / unit.max_hp).clamp(0.0, 1.0)
                    } else {
                        0.0
                    },
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(bits, _)| *bits);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_tracers<T: hecs::Component>(
    world: &World,
    lifetime: f64,
    accessor: impl Fn(&T) -> (glam::DVec2, f64),
) -> Vec<TracerView> {
    let mut tracers: Vec<(u64, TracerView)> = world
        .query::<(&T, &Position)>()
        .iter()
        .map(|(entity, (t, pos))| {
            let (prev, ttl) = accessor(t);
            (
                entity.to_bits().get(),
                TracerView {
                    position: pos.0,
                    prev,
                    ttl_ratio: (ttl / lifetime).clamp(0.0, 1.0),
                },
            )
        })
        .collect();
    tracers.sort_by_key(|(bits, _)| *bits);
    tracers.into_iter().map(|(_, view)| view).collect()
}

fn build_beams(world: &World) -> Vec<BeamView> {
    let mut beams: Vec<(u64, BeamView)> = world
        .query::<&LaserBeam>()
        .iter()
        .map(|(entity, beam)| {
            (
                entity.to_bits().get(),
                BeamView {
                    start: beam.start,
                    end: beam.end,
                    ttl_ratio: (beam.ttl / LASER_LIFETIME).clamp(0.0, 1.0),
                },
            )
        })
        .collect();
    beams.sort_by_key(|(bits, _)| *bits);
    beams.into_iter().map(|(_, view)| view).collect()
}

fn build_pulses(world: &World) -> Vec<PulseView> {
    let mut pulses: Vec<(u64, PulseView)> = world
        .query::<(&EmpPulse, &Position)>()
        .iter()
        .map(|(entity, (pulse, pos))| {
            (
                entity.to_bits().get(),
                PulseView {
                    position: pos.0,
                    radius: pulse.radius,
                    ttl_ratio: (pulse.ttl / EMP_PULSE_LIFETIME).clamp(0.0, 1.0),
                },
            )
        })
        .collect();
    pulses.sort_by_key(|(bits, _)| *bits);
    pulses.into_iter().map(|(_, view)| view).collect()
}

fn build_mines(world: &World) -> Vec<MineView> {
    let mut mines: Vec<(u64, MineView)> = world
        .query::<(&Mine, &Position)>()
        .iter()
        .map(|(entity, (mine, pos))| {
            (
                entity.to_bits().get(),
                MineView {
                    position: pos.0,
                    ttl: mine.ttl,
                },
            )
        })
        .collect();
    mines.sort_by_key(|(bits, _)| *bits);
    mines.into_iter().map(|(_, view)| view).collect()
}

fn build_gems(world: &World) -> Vec<GemView> {
    let mut gems: Vec<(u64, GemView)> = world
        .query::<(&XpGem, &Position)>()
        .iter()
        .map(|(entity, (gem, pos))| {
            (
                entity.to_bits().get(),
                GemView {
                    position: pos.0,
                    value: gem.value,
                },
            )
        })
        .collect();
    gems.sort_by_key(|(bits, _)| *bits);
    gems.into_iter().map(|(_, view)| view).collect()
}

fn build_mounts(fire: &FireControl) -> Vec<MountView> {
    fire.mounts
        .iter()
        .map(|mount| {
            let cooldown_total = 1.0 / mount.def.fire_rate.max(0.001);
            MountView {
                name: mount.def.name.clone(),
                ammo_current: mount.ammo_current,
                ammo_max: mount.def.ammo_max,
                ready_ratio: (1.0 - mount.cooldown_timer / cooldown_total).clamp(0.0, 1.0),
            }
        })
        .collect()
}

fn build_stats(world: &World, player: Option<Entity>) -> StatsView {
    player
        .and_then(|p| world.get::<&PilotState>(p).ok())
        .map(|pilot| StatsView {
            kills: pilot.stats.kills,
            damage_dealt: pilot.stats.damage_dealt,
            ammo_spent: pilot.stats.ammo_spent,
            fuel_spent: pilot.stats.fuel_spent,
            hull_damage: pilot.stats.hull_damage,
        })
        .unwrap_or_default()
}
