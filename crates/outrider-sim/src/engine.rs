//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order against an injected physics space,
//! and produces `GameStateSnapshot`s. Completely headless (no renderer
//! dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use outrider_core::commands::{HelmInput, PlayerCommand};
use outrider_core::components::{BodyRef, PilotState, XpGem};
use outrider_core::constants::PLAYER_BASE_SPEED;
use outrider_core::enums::{GamePhase, RoundOutcome};
use outrider_core::events::SimEvent;
use outrider_core::loadout::Loadout;
use outrider_core::phase::{transition, PhaseEvent};
use outrider_core::ruleset::Ruleset;
use outrider_core::state::{GameStateSnapshot, RoundSummary};
use outrider_core::types::{Heading, Position, RoundClock};
use outrider_core::upgrades::{self, UpgradeKind};
use outrider_physics::{PointSpace, Space};

use crate::fire_control::FireControl;
use crate::systems;
use crate::systems::combat::DamageLedger;
use crate::systems::progression::ExtractionState;
use crate::systems::spawner::SpawnerState;
use crate::world_setup;

/// Number of upgrade cards offered per level-up.
const UPGRADE_OFFER_COUNT: usize = 3;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Tuning constants for this round.
    pub ruleset: Ruleset,
    /// Ship fit from the fitting bay.
    pub loadout: Loadout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ruleset: Ruleset::default(),
            loadout: Loadout::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all round state.
pub struct SimulationEngine {
    world: World,
    space: Box<dyn Space>,
    rng: ChaCha8Rng,
    ruleset: Ruleset,
    loadout: Loadout,

    phase: GamePhase,
    clock: RoundClock,
    helm: HelmInput,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,

    spawner: SpawnerState,
    fire: FireControl,
    offers: Vec<UpgradeKind>,
    resume_grace: f64,
    extraction: ExtractionState,
    player: Option<Entity>,
    summary: Option<RoundSummary>,
}

impl SimulationEngine {
    /// Create an engine with the bundled in-memory integrator.
    pub fn new(config: SimConfig) -> Self {
        Self::with_space(config, Box::new(PointSpace::new()))
    }

    /// Create an engine against an externally supplied physics space.
    pub fn with_space(config: SimConfig, space: Box<dyn Space>) -> Self {
        let clock = RoundClock::new(config.ruleset.round_seconds);
        let fire = FireControl::new(&config.loadout);
        Self {
            world: World::new(),
            space,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ruleset: config.ruleset,
            loadout: config.loadout,
            phase: GamePhase::default(),
            clock,
            helm: HelmInput::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            spawner: SpawnerState::default(),
            fire,
            offers: Vec::new(),
            resume_grace: 0.0,
            extraction: ExtractionState::default(),
            player: None,
            summary: None,
        }
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot.
    pub fn step(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Play {
            self.run_systems(dt);
        }

        // Tap edges live exactly one step.
        self.helm.dash_left_tap = false;
        self.helm.dash_right_tap = false;

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            self.phase,
            self.clock,
            &self.fire,
            &self.offers,
            &self.extraction,
            &self.ruleset,
            events,
            self.summary.clone(),
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn clock(&self) -> RoundClock {
        self.clock
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the physics space.
    pub fn space(&self) -> &dyn Space {
        self.space.as_ref()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetHelm { helm } => {
                self.helm = helm;
            }
            PlayerCommand::TriggerMount { slot } => {
                if self.phase == GamePhase::Play {
                    self.fire.mount_requests.push(slot);
                }
            }
            PlayerCommand::ChooseUpgrade { index } => {
                if self.phase != GamePhase::LevelUp {
                    return;
                }
                let Some(kind) = self.offers.get(index).copied() else {
                    return;
                };
                if let Some(player) = self.player {
                    if let Ok(pilot) = self.world.query_one_mut::<&mut PilotState>(player) {
                        upgrades::apply(pilot, kind);
                    }
                }
                self.offers.clear();
                self.resume_grace = self.ruleset.progression.resume_grace;
                self.phase = transition(self.phase, PhaseEvent::UpgradeChosen);
            }
            PlayerCommand::StartRound => {
                let next = transition(self.phase, PhaseEvent::StartRound);
                if next != self.phase {
                    self.reset_round();
                    self.phase = next;
                }
            }
            PlayerCommand::SkipIntro => {
                self.phase = transition(self.phase, PhaseEvent::IntroDone);
            }
            PlayerCommand::Pause => {
                self.phase = transition(self.phase, PhaseEvent::Pause);
            }
            PlayerCommand::Resume => {
                self.phase = transition(self.phase, PhaseEvent::Resume);
            }
            PlayerCommand::Restart => {
                let next = transition(self.phase, PhaseEvent::Restart);
                if next != self.phase {
                    self.reset_round();
                    self.phase = next;
                }
            }
            PlayerCommand::ContinueToDebrief => {
                self.phase = transition(self.phase, PhaseEvent::ContinueToDebrief);
            }
            PlayerCommand::ReturnToMenu => {
                self.phase = transition(self.phase, PhaseEvent::ReturnToMenu);
            }
            PlayerCommand::OpenOptions => {
                self.phase = transition(self.phase, PhaseEvent::OpenOptions);
            }
            PlayerCommand::CloseOptions => {
                self.phase = transition(self.phase, PhaseEvent::CloseOptions);
            }
            PlayerCommand::OpenFittingBay => {
                self.phase = transition(self.phase, PhaseEvent::OpenFittingBay);
            }
            PlayerCommand::CloseFittingBay => {
                self.phase = transition(self.phase, PhaseEvent::CloseFittingBay);
            }
        }
    }

    /// Tear down the previous round's world and build a fresh one.
    fn reset_round(&mut self) {
        for (_entity, body) in self.world.query_mut::<&BodyRef>() {
            self.space.detach(body.0);
        }
        self.world.clear();

        self.clock = RoundClock::new(self.ruleset.round_seconds);
        self.spawner = SpawnerState::default();
        self.fire = FireControl::new(&self.loadout);
        self.offers.clear();
        self.resume_grace = 0.0;
        self.extraction = ExtractionState::default();
        self.summary = None;
        self.helm = HelmInput::default();
        self.player = Some(world_setup::spawn_player(
            &mut self.world,
            self.space.as_mut(),
            &self.loadout,
            self.ruleset.view_extent,
        ));
    }

    /// Run the fixed per-frame system pass. Round-ending transitions
    /// short-circuit whatever remains of the frame.
    fn run_systems(&mut self, dt: f64) {
        // Input grace after the level-up screen: the world stays frozen a
        // beat so the selection keystroke cannot leak into play.
        if self.resume_grace > 0.0 {
            self.resume_grace = (self.resume_grace - dt).max(0.0);
            return;
        }

        // 1. Round clock.
        if self.clock.advance(dt) {
            self.finish_round(RoundOutcome::TimeoutWin);
            return;
        }

        let Some(player) = self.player else {
            return;
        };
        let player_body = world_setup::body_id(player);

        // 2. Control mapper.
        if let Ok(pilot) = self.world.query_one_mut::<&mut PilotState>(player) {
            systems::control::run(
                pilot,
                player_body,
                self.space.as_mut(),
                &self.helm,
                &self.ruleset,
                dt,
                &mut self.events,
            );
        }

        let player_pos = match self.world.get::<&Position>(player) {
            Ok(pos) => pos.0,
            Err(_) => return,
        };

        // 3. Spawner.
        systems::spawner::run(
            &mut self.world,
            self.space.as_mut(),
            &mut self.rng,
            &mut self.spawner,
            &self.ruleset,
            self.clock.elapsed,
            dt,
            player_pos,
        );

        // 4. Enemy AI.
        systems::enemy_ai::run(&mut self.world, self.space.as_mut(), player_pos, dt);

        // 5. Physics step, player speed clamp, state sync.
        self.space.step(dt);
        if let Ok(pilot) = self.world.query_one_mut::<&PilotState>(player) {
            let speed_mult = pilot.speed_value / PLAYER_BASE_SPEED;
            self.space.clamp_speed(
                player_body,
                self.ruleset.helm.max_speed * speed_mult,
                self.ruleset.helm.min_speed,
            );
        }
        self.sync_bodies();

        // 6. Weapon fire and projectile motion.
        systems::weapons::run(
            &mut self.world,
            &mut self.rng,
            &mut self.fire,
            player,
            &self.helm,
            &self.ruleset,
            dt,
            &mut self.events,
        );
        systems::projectiles::run(&mut self.world, dt);

        // 7. Combat resolution.
        let mut ledger = DamageLedger::default();
        systems::combat::resolve(&mut self.world, &mut ledger, &mut self.events);
        self.fold_ledger(player, ledger);

        // 8. Dead enemies leave the world the frame they die.
        systems::cleanup::cull_dead_enemies(
            &mut self.world,
            self.space.as_mut(),
            &mut self.despawn_buffer,
        );

        // 9. Contact damage and shield.
        let incoming = systems::contact::run(&mut self.world, player, dt, &mut self.events);

        // 10. Gems, experience, level-ups.
        let xp_gained = systems::gems::run(&mut self.world, player, &self.ruleset, dt, &mut self.events);
        let mut new_level = None;
        if xp_gained > 0.0 {
            if let Ok(pilot) = self.world.query_one_mut::<&mut PilotState>(player) {
                if systems::progression::award_xp(pilot, xp_gained, &self.ruleset) {
                    new_level = Some(pilot.level);
                }
            }
        }
        if let Some(level) = new_level {
            self.events.push(SimEvent::LevelUp { level });
            self.roll_upgrade_offers(player);
        }

        // 11. Death check.
        let destroyed = self
            .world
            .get::<&PilotState>(player)
            .map(|pilot| pilot.hp <= 0.0)
            .unwrap_or(false);
        if destroyed {
            if let Ok(pilot) = self.world.query_one_mut::<&mut PilotState>(player) {
                pilot.hp = 0.0;
            }
            self.finish_round(RoundOutcome::Destroyed);
            return;
        }

        // 12. Extraction channel (skipped when a level-up screen opened
        // this frame — the channel holds where it was).
        if self.phase == GamePhase::Play {
            let extracted = systems::progression::update_extraction(
                &mut self.extraction,
                self.helm.extract_held,
                self.clock.elapsed,
                incoming > 0.0,
                &self.ruleset,
                dt,
                &mut self.events,
            );
            if extracted {
                self.finish_round(RoundOutcome::Extracted);
                return;
            }
        }

        // 13. Expired projectiles and gems.
        systems::cleanup::run_expiry(&mut self.world, self.space.as_mut(), &mut self.despawn_buffer);
    }

    /// Read positions and angles back from the physics space, once per
    /// physics-backed entity per frame.
    fn sync_bodies(&mut self) {
        for (_entity, (pos, heading, body)) in
            self.world.query_mut::<(&mut Position, &mut Heading, &BodyRef)>()
        {
            if let Some(state) = self.space.state(body.0) {
                pos.0 = state.position;
                heading.0 = state.angle;
            }
        }
    }

    /// Fold a frame's damage ledger into stats, effects and gem drops.
    fn fold_ledger(&mut self, player: Entity, ledger: DamageLedger) {
        if ledger.dealt <= 0.0 && ledger.hits.is_empty() {
            return;
        }

        for &position in &ledger.hits {
            self.events.push(SimEvent::HitSpark { position });
        }
        for death in &ledger.deaths {
            self.events.push(SimEvent::EnemyDestroyed {
                position: death.position,
                is_boss: death.is_boss,
            });
        }

        if let Ok(pilot) = self.world.query_one_mut::<&mut PilotState>(player) {
            pilot.stats.damage_dealt += ledger.dealt;
            pilot.stats.kills += ledger.kills;
        }

        let gem_lifetime = self.ruleset.progression.gem_lifetime;
        for death in ledger.deaths {
            self.world.spawn((
                Position(death.position),
                XpGem {
                    value: death.xp_value,
                    lifetime: gem_lifetime,
                },
            ));
        }
    }

    /// Draw up to three non-maxed upgrade offers. An empty draw skips the
    /// level-up screen entirely and play continues uninterrupted.
    fn roll_upgrade_offers(&mut self, player: Entity) {
        let candidates = match self.world.get::<&PilotState>(player) {
            Ok(pilot) => upgrades::candidates(&pilot),
            Err(_) => return,
        };
        let picks: Vec<UpgradeKind> = candidates
            .choose_multiple(&mut self.rng, UPGRADE_OFFER_COUNT)
            .copied()
            .collect();
        if !picks.is_empty() {
            self.offers = picks;
            self.phase = transition(self.phase, PhaseEvent::LevelThreshold);
        }
    }

    /// Freeze the round and emit the debrief summary.
    fn finish_round(&mut self, outcome: RoundOutcome) {
        use outrider_core::constants::{
            DATA_EXTRACTION_MULT, DATA_PER_KILL, DATA_PER_SURVIVAL_MINUTE, DATA_TIMEOUT_MULT,
        };

        let stats = self
            .player
            .and_then(|p| self.world.get::<&PilotState>(p).ok().map(|pilot| pilot.stats))
            .unwrap_or_default();

        let survival_time = self.clock.elapsed;
        let mut data = survival_time / 60.0 * DATA_PER_SURVIVAL_MINUTE
            + stats.kills as f64 * DATA_PER_KILL;
        data *= match outcome {
            RoundOutcome::Extracted => DATA_EXTRACTION_MULT,
            RoundOutcome::TimeoutWin => DATA_TIMEOUT_MULT,
            RoundOutcome::Destroyed => 1.0,
        };

        self.summary = Some(RoundSummary {
            outcome,
            survival_time,
            kills: stats.kills,
            ammo_spent: stats.ammo_spent,
            fuel_spent: stats.fuel_spent,
            hull_damage: stats.hull_damage,
            data_earned: (data * 100.0).round() / 100.0,
        });

        let event = match outcome {
            RoundOutcome::TimeoutWin => PhaseEvent::TimerExpired,
            RoundOutcome::Extracted => PhaseEvent::ExtractionComplete,
            RoundOutcome::Destroyed => PhaseEvent::PlayerDied,
        };
        self.phase = transition(self.phase, event);
        self.events.push(SimEvent::RoundEnded { outcome });
    }

    // --- Test support ---

    /// Player craft entity for the current round.
    #[cfg(test)]
    pub fn player_entity(&self) -> Option<Entity> {
        self.player
    }

    /// Mutate the pilot state directly (for scenario setup).
    #[cfg(test)]
    pub fn with_pilot(&mut self, f: impl FnOnce(&mut PilotState)) {
        if let Some(player) = self.player {
            if let Ok(pilot) = self.world.query_one_mut::<&mut PilotState>(player) {
                f(pilot);
            }
        }
    }

    /// Spawn one enemy of `archetype` at `position` (for scenario setup).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        position: glam::DVec2,
        archetype: outrider_core::enums::EnemyArchetype,
    ) -> Entity {
        let profile = outrider_ai::profiles::get_profile(archetype);
        world_setup::spawn_enemy(
            &mut self.world,
            self.space.as_mut(),
            position,
            &profile,
            false,
            self.clock.elapsed,
        )
    }

    /// Drop an experience gem into the world (for scenario setup).
    #[cfg(test)]
    pub fn spawn_test_gem(&mut self, position: glam::DVec2, value: f64) {
        let lifetime = self.ruleset.progression.gem_lifetime;
        self.world.spawn((Position(position), XpGem { value, lifetime }));
    }

    /// Direct access to weapon timers and mounts (for scenario setup).
    #[cfg(test)]
    pub fn fire_control_mut(&mut self) -> &mut FireControl {
        &mut self.fire
    }
}
