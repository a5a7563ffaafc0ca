//! Game state snapshot — the complete visible state handed to the shell
//! each frame. Read-only: the renderer formats, the core never draws.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::RoundClock;
use crate::upgrades::UpgradeKind;

/// Complete per-frame snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub phase: GamePhase,
    pub clock: RoundClock,
    pub ship: ShipView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<TracerView>,
    pub slugs: Vec<TracerView>,
    pub rockets: Vec<TracerView>,
    pub beams: Vec<BeamView>,
    pub pulses: Vec<PulseView>,
    pub mines: Vec<MineView>,
    pub gems: Vec<GemView>,
    /// Auto-fire weapon rack readiness, in fixed display order.
    pub racks: Vec<RackView>,
    /// Manually aimed loadout hardpoints.
    pub mounts: Vec<MountView>,
    /// Pending level-up offers (non-empty only in `LevelUp`).
    pub offers: Vec<OfferView>,
    pub extraction: ExtractionView,
    pub stats: StatsView,
    /// One-shot effect events since the previous snapshot.
    pub events: Vec<SimEvent>,
    /// Present once the round has reached a terminal phase.
    pub summary: Option<RoundSummary>,
}

/// The player craft as seen by the renderer and HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub position: DVec2,
    pub heading: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub shield_hp: f64,
    pub shield_max: f64,
    /// 0..1, zero while the shield is locked.
    pub shield_ratio: f64,
    pub fuel: f64,
    pub max_fuel: f64,
    pub fuel_ratio: f64,
    pub throttle: f64,
    pub boost_charge: f64,
    pub boost_active: bool,
    /// 1.0 = dash ready, counts up from 0 while cooling down.
    pub dash_ready_ratio: f64,
    pub level: u32,
    pub xp: f64,
    pub xp_to_next: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: DVec2,
    pub heading: f64,
    pub radius: f64,
    pub sides: u32,
    pub is_boss: bool,
    pub hp_ratio: f64,
}

/// A point projectile with its previous position for tracer lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracerView {
    pub position: DVec2,
    pub prev: DVec2,
    /// Remaining lifetime fraction, for fades.
    pub ttl_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub start: DVec2,
    pub end: DVec2,
    pub ttl_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseView {
    pub position: DVec2,
    pub radius: f64,
    pub ttl_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineView {
    pub position: DVec2,
    pub ttl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GemView {
    pub position: DVec2,
    pub value: f64,
}

/// Readiness of one auto-fire weapon family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RackView {
    pub family: WeaponFamily,
    pub unlocked: bool,
    /// 0..1 charge toward the next shot (1.0 = firing continuously).
    pub ready_ratio: f64,
}

/// One manually aimed loadout hardpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountView {
    pub name: String,
    pub ammo_current: u32,
    pub ammo_max: u32,
    pub ready_ratio: f64,
}

/// One level-up card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferView {
    pub kind: UpgradeKind,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtractionView {
    /// True once the late-round window has opened.
    pub available: bool,
    pub channeling: bool,
    /// 0..1 channel progress.
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatsView {
    pub kills: u32,
    pub damage_dealt: f64,
    pub ammo_spent: u32,
    pub fuel_spent: f64,
    pub hull_damage: f64,
}

/// Debrief record emitted once per round, schema-stable for the caller's
/// save/telemetry layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub survival_time: f64,
    pub kills: u32,
    pub ammo_spent: u32,
    pub fuel_spent: f64,
    pub hull_damage: f64,
    pub data_earned: f64,
}
