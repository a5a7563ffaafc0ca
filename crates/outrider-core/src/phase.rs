//! Game phase transitions.
//!
//! A single pure function maps `(phase, event)` to the next phase so the
//! whole state machine is unit-testable away from the engine. Invalid
//! pairs leave the phase unchanged.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;

/// Everything that can move the top-level state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    /// Menu confirmed a new round; the intro plays first.
    StartRound,
    /// Intro acknowledged or skipped.
    IntroDone,
    /// Experience crossed a level threshold mid-frame with offers pending.
    LevelThreshold,
    /// An upgrade was chosen.
    UpgradeChosen,
    Pause,
    Resume,
    /// Fresh round requested from pause or a terminal screen.
    Restart,
    /// Round clock ran out.
    TimerExpired,
    /// Hull reached zero.
    PlayerDied,
    /// Extraction channel completed uninterrupted.
    ExtractionComplete,
    ContinueToDebrief,
    ReturnToMenu,
    OpenOptions,
    CloseOptions,
    OpenFittingBay,
    CloseFittingBay,
}

/// Compute the next phase for `event` in `phase`.
pub fn transition(phase: GamePhase, event: PhaseEvent) -> GamePhase {
    use GamePhase::*;

    match (phase, event) {
        (Menu, PhaseEvent::StartRound) => Cutscene,
        (Menu, PhaseEvent::OpenOptions) => Options,
        (Menu, PhaseEvent::OpenFittingBay) => FittingBay,
        (Options, PhaseEvent::CloseOptions) => Menu,
        (FittingBay, PhaseEvent::CloseFittingBay) => Menu,
        (Cutscene, PhaseEvent::IntroDone) => Play,

        (Play, PhaseEvent::LevelThreshold) => LevelUp,
        (LevelUp, PhaseEvent::UpgradeChosen) => Play,
        (Play, PhaseEvent::Pause) => Pause,
        (Pause, PhaseEvent::Resume) => Play,

        (Play, PhaseEvent::TimerExpired) => Win,
        // Death preempts a level-up screen opened in the same frame.
        (Play | LevelUp, PhaseEvent::PlayerDied) => Lose,
        (Play, PhaseEvent::ExtractionComplete) => Extracted,

        (Pause | Win | Extracted | Lose | Debrief, PhaseEvent::Restart) => Play,
        (Win | Extracted | Lose, PhaseEvent::ContinueToDebrief) => Debrief,
        (Pause | Win | Extracted | Lose | Debrief, PhaseEvent::ReturnToMenu) => Menu,

        _ => phase,
    }
}
