//! Player commands sent from the shell (input layer) to the simulation.
//!
//! Commands carry abstract intents only — no device state. They are
//! queued and processed at the next tick boundary.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Held helm state, refreshed by `PlayerCommand::SetHelm` and persisting
/// until the next one. Tap fields are edge events for this frame only and
/// are cleared after processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HelmInput {
    /// Rotate axis: -1 (counter-clockwise), 0, or 1.
    pub rotate: i8,
    /// Strafe axis: -1 (left), 0, or 1 (right).
    pub strafe: i8,
    pub throttle_up: bool,
    pub throttle_down: bool,
    /// Instant full throttle; overrides the incremental intents.
    pub throttle_max: bool,
    /// Instant engine cut; overrides the incremental intents.
    pub throttle_cut: bool,
    pub boost: bool,
    /// Key-down edge for a left-side tap this frame.
    pub dash_left_tap: bool,
    /// Key-down edge for a right-side tap this frame.
    pub dash_right_tap: bool,
    /// Extraction channel hold.
    pub extract_held: bool,
    /// World-space aim point for aimed weapons; `None` aims ship-forward.
    pub aim_point: Option<DVec2>,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held helm state.
    SetHelm { helm: HelmInput },
    /// Request a shot from a loadout hardpoint. Silently ignored while
    /// the mount is empty or cooling down.
    TriggerMount { slot: usize },
    /// Pick one of the offered upgrades on the level-up screen.
    ChooseUpgrade { index: usize },

    // --- Phase control ---
    /// Begin a round from the menu (resets the world, plays the intro).
    StartRound,
    /// Skip or acknowledge the intro cutscene.
    SkipIntro,
    Pause,
    Resume,
    /// Start a fresh round from pause or a terminal screen.
    Restart,
    /// Move from a win/lose screen to the debrief summary.
    ContinueToDebrief,
    ReturnToMenu,
    OpenOptions,
    CloseOptions,
    OpenFittingBay,
    CloseFittingBay,
}
