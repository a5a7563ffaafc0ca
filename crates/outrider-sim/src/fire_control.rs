//! Weapon bookkeeping: auto-fire family timers and manually aimed
//! loadout mounts.
//!
//! Timers accumulate elapsed time and fire whole cooldowns off the top,
//! so a long frame can release more than one shot.

use outrider_core::loadout::{Loadout, WeaponDef};

/// Runtime state of one loadout hardpoint.
#[derive(Debug, Clone)]
pub struct MountState {
    pub def: WeaponDef,
    pub ammo_current: u32,
    pub cooldown_timer: f64,
}

impl MountState {
    pub fn new(def: WeaponDef) -> Self {
        Self {
            ammo_current: def.ammo_max,
            cooldown_timer: 0.0,
            def,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ammo_current == 0
    }

    pub fn update(&mut self, dt: f64) {
        self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
    }

    /// Consume a round and start the cooldown. Returns false (and changes
    /// nothing) while empty or still cooling down.
    pub fn try_fire(&mut self) -> bool {
        if self.is_empty() || self.cooldown_timer > 0.0 {
            return false;
        }
        self.ammo_current -= 1;
        self.cooldown_timer = 1.0 / self.def.fire_rate.max(0.001);
        true
    }
}

/// All weapon timers for one round.
#[derive(Debug, Clone, Default)]
pub struct FireControl {
    pub fire_timer: f64,
    pub rocket_timer: f64,
    pub laser_timer: f64,
    pub emp_timer: f64,
    pub mine_timer: f64,
    pub mounts: Vec<MountState>,
    /// Mount trigger requests queued by commands, consumed each frame.
    pub mount_requests: Vec<usize>,
}

impl FireControl {
    pub fn new(loadout: &Loadout) -> Self {
        Self {
            mounts: loadout
                .weapons
                .iter()
                .cloned()
                .map(MountState::new)
                .collect(),
            ..Default::default()
        }
    }
}
