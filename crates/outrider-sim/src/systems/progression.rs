//! Experience/leveling and the late-round extraction channel.

use outrider_core::components::PilotState;
use outrider_core::events::SimEvent;
use outrider_core::ruleset::Ruleset;

/// Extraction channel state, a sub-state of the play phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionState {
    pub channeling: bool,
    pub progress: f64,
}

/// Bank experience and advance levels. Excess carries over; a long kill
/// streak can clear several thresholds in one frame. Returns true when at
/// least one level was gained.
pub fn award_xp(pilot: &mut PilotState, amount: f64, rules: &Ruleset) -> bool {
    if amount <= 0.0 {
        return false;
    }
    pilot.xp += amount;
    let mut leveled = false;
    loop {
        let needed = rules.xp_to_next(pilot.level);
        if pilot.xp < needed {
            break;
        }
        pilot.xp -= needed;
        pilot.level += 1;
        leveled = true;
    }
    leveled
}

/// Advance the extraction channel. The hold must be continuous and the
/// craft untouched: releasing the intent or taking any damage resets
/// progress. Returns true when the channel completes.
pub fn update_extraction(
    state: &mut ExtractionState,
    extract_held: bool,
    elapsed: f64,
    took_damage: bool,
    rules: &Ruleset,
    dt: f64,
    events: &mut Vec<SimEvent>,
) -> bool {
    let available = elapsed >= rules.extraction.available_after;

    if available && extract_held && !took_damage {
        if !state.channeling {
            state.channeling = true;
            state.progress = 0.0;
            events.push(SimEvent::ExtractionStarted);
        }
        state.progress += dt;
        if state.progress >= rules.extraction.channel_secs {
            events.push(SimEvent::ExtractionComplete);
            return true;
        }
    } else if state.channeling {
        state.channeling = false;
        state.progress = 0.0;
        events.push(SimEvent::ExtractionInterrupted);
    }
    false
}
