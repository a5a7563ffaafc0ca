//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Options,
    FittingBay,
    Cutscene,
    Play,
    LevelUp,
    Pause,
    /// Round survived to the timeout.
    Win,
    /// Round ended early through a completed extraction channel.
    Extracted,
    /// Craft destroyed.
    Lose,
    /// Post-round summary screen.
    Debrief,
}

impl GamePhase {
    /// Phases in which the round is over (clock frozen, world inert).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GamePhase::Win | GamePhase::Extracted | GamePhase::Lose | GamePhase::Debrief
        )
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Survived the full round clock.
    TimeoutWin,
    /// Completed the extraction channel inside the late-round window.
    Extracted,
    /// Hull reached zero.
    Destroyed,
}

/// Enemy movement policy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Straight-line charge at the player.
    Rush,
    /// Orbits the preferred range, correcting radially.
    Skirmish,
    /// Oscillating tangential sweeps with a range-dependent inward pull.
    Flank,
    /// Slow direct approach with a small lateral weave.
    Siege,
}

/// Enemy archetype selected by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Fast, fragile single-dot swarmer.
    Dart,
    /// Baseline triangular chaser.
    Tracer,
    /// Square skirmisher that holds range.
    Shredder,
    /// Pentagonal flanker.
    Weaver,
    /// Hexagonal siege unit.
    Bulwark,
    /// Heavy heptagonal siege unit.
    Ravager,
    /// Octagonal heavy; also the boss hull.
    Dreadnought,
}

/// Weapon families carried by the craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponFamily {
    Minigun,
    Rockets,
    Railgun,
    Laser,
    Emp,
    Mines,
}

/// Hardpoint mounting for manually aimed weapons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mounting {
    #[default]
    Forward,
    Rear,
    Side,
    Turret,
}

/// Which lateral side a dash goes toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashSide {
    Left,
    Right,
}

impl DashSide {
    /// Sign of the lateral axis: right is positive.
    pub fn sign(&self) -> f64 {
        match self {
            DashSide::Left => -1.0,
            DashSide::Right => 1.0,
        }
    }
}
