//! The immutable tuning value supplied to the simulation at round start.
//!
//! Every concurrently running round (or test) gets its own `Ruleset`, so
//! nothing in the core reads mutable global tuning.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Helm / flight-model tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelmTuning {
    /// Top angular rate (deg/sec).
    pub rotation_speed_deg: f64,
    /// Angular acceleration (deg/sec^2).
    pub rotation_accel_deg: f64,
    pub thrust_power: f64,
    pub strafe_power: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub drift_factor: f64,
    pub throttle_step_per_sec: f64,
    pub boost_force: f64,
    pub boost_duration: f64,
    pub boost_recharge_time: f64,
    pub hurdle_impulse: f64,
    pub hurdle_cooldown: f64,
    pub double_tap_window: f64,
}

impl Default for HelmTuning {
    fn default() -> Self {
        Self {
            rotation_speed_deg: ROTATION_SPEED_DEG,
            rotation_accel_deg: ROTATION_ACCEL_DEG,
            thrust_power: THRUST_POWER,
            strafe_power: STRAFE_POWER,
            max_speed: MAX_SPEED,
            min_speed: MIN_SPEED,
            drift_factor: DRIFT_FACTOR,
            throttle_step_per_sec: THROTTLE_STEP_PER_SEC,
            boost_force: BOOST_FORCE,
            boost_duration: BOOST_DURATION,
            boost_recharge_time: BOOST_RECHARGE_TIME,
            hurdle_impulse: HURDLE_IMPULSE,
            hurdle_cooldown: HURDLE_COOLDOWN,
            double_tap_window: DOUBLE_TAP_WINDOW,
        }
    }
}

/// Fuel economy tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelTuning {
    /// Fuel per second at full throttle, before the loadout multiplier.
    pub burn_rate: f64,
    pub strafe_mult: f64,
    pub boost_mult: f64,
}

impl Default for FuelTuning {
    fn default() -> Self {
        Self {
            burn_rate: FUEL_BURN_RATE,
            strafe_mult: STRAFE_FUEL_MULT,
            boost_mult: BOOST_FUEL_MULT,
        }
    }
}

/// Spawner tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTuning {
    pub interval_start: f64,
    pub interval_min: f64,
    /// Interval shrink per elapsed second.
    pub interval_decay: f64,
    pub max_active: usize,
    pub sectors: u32,
    pub view_factor: f64,
    pub margin: f64,
    pub boss_min_minutes: f64,
    pub boss_chance_base: f64,
    pub boss_chance_per_minute: f64,
    pub boss_chance_cap: f64,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval_start: ENEMY_SPAWN_INTERVAL_START,
            interval_min: ENEMY_SPAWN_INTERVAL_MIN,
            interval_decay: ENEMY_SPAWN_INTERVAL_DECAY,
            max_active: MAX_ACTIVE_ENEMIES,
            sectors: SPAWN_SECTORS,
            view_factor: SPAWN_VIEW_FACTOR,
            margin: SPAWN_MARGIN,
            boss_min_minutes: BOSS_MIN_MINUTES,
            boss_chance_base: BOSS_CHANCE_BASE,
            boss_chance_per_minute: BOSS_CHANCE_PER_MINUTE,
            boss_chance_cap: BOSS_CHANCE_CAP,
        }
    }
}

/// Progression tuning (xp curve, level-up grace, gems).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionTuning {
    pub xp_base: f64,
    pub xp_growth: f64,
    pub xp_linear_bonus: f64,
    pub resume_grace: f64,
    pub gem_lifetime: f64,
    pub gem_magnet_speed: f64,
    pub gem_collect_radius: f64,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            xp_base: XP_BASE,
            xp_growth: XP_GROWTH,
            xp_linear_bonus: XP_LINEAR_BONUS,
            resume_grace: UPGRADE_RESUME_GRACE,
            gem_lifetime: GEM_LIFETIME,
            gem_magnet_speed: GEM_MAGNET_SPEED,
            gem_collect_radius: GEM_COLLECT_RADIUS,
        }
    }
}

/// Extraction-channel tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionTuning {
    pub available_after: f64,
    pub channel_secs: f64,
}

impl Default for ExtractionTuning {
    fn default() -> Self {
        Self {
            available_after: EXTRACTION_AVAILABLE_AFTER,
            channel_secs: EXTRACTION_CHANNEL_SECS,
        }
    }
}

/// The complete tuning surface for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruleset {
    pub round_seconds: f64,
    /// View extent used for spawn placement and beam length.
    pub view_extent: DVec2,
    pub helm: HelmTuning,
    pub fuel: FuelTuning,
    pub spawn: SpawnTuning,
    pub progression: ProgressionTuning,
    pub extraction: ExtractionTuning,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            view_extent: DVec2::new(VIEW_WIDTH, VIEW_HEIGHT),
            helm: HelmTuning::default(),
            fuel: FuelTuning::default(),
            spawn: SpawnTuning::default(),
            progression: ProgressionTuning::default(),
            extraction: ExtractionTuning::default(),
        }
    }
}

impl Ruleset {
    /// Experience required to go from `level` to `level + 1`.
    pub fn xp_to_next(&self, level: u32) -> f64 {
        let p = &self.progression;
        p.xp_base * p.xp_growth.powi(level.saturating_sub(1) as i32)
            + p.xp_linear_bonus * level.saturating_sub(1) as f64
    }
}
