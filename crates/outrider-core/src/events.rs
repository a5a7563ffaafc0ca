//! Events emitted by the simulation for effects and audio feedback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{DashSide, RoundOutcome, WeaponFamily};

/// One-shot events drained into each snapshot. The shell decides how to
/// present them (particles, screen shake, sound); the core only records
/// what happened and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A weapon discharged.
    MuzzleFlash {
        family: WeaponFamily,
        position: DVec2,
        direction: DVec2,
    },
    /// A projectile or beam connected without a kill.
    HitSpark { position: DVec2 },
    /// A splash detonation (rocket or mine).
    Explosion { position: DVec2, radius: f64 },
    /// An enemy was destroyed.
    EnemyDestroyed { position: DVec2, is_boss: bool },
    GemCollected { value: f64 },
    LevelUp { level: u32 },
    BoostEngaged,
    DashExecuted { side: DashSide },
    /// Shield charge hit zero while absorbing.
    ShieldDepleted,
    /// The craft took hull damage this frame (screen-shake magnitude hint).
    HullDamaged { amount: f64 },
    ExtractionStarted,
    ExtractionInterrupted,
    ExtractionComplete,
    RoundEnded { outcome: RoundOutcome },
}
