//! Simulation constants and base tuning parameters.
//!
//! These are the defaults baked into `Ruleset::default()`; a caller can
//! supply its own ruleset at round start for reproducible variants.

// --- View / round ---

/// Reference view extent in world units (the camera is centered on the craft).
pub const VIEW_WIDTH: f64 = 1100.0;
pub const VIEW_HEIGHT: f64 = 700.0;

/// Round length in seconds (15 minutes).
pub const ROUND_SECONDS: f64 = 900.0;

// --- Player craft ---

pub const PLAYER_BASE_SPEED: f64 = 37.125;
pub const PLAYER_RADIUS: f64 = 12.0;
pub const PLAYER_MAX_HP: f64 = 100.0;
pub const PLAYER_FUEL_START: f64 = 340.0;

// --- Helm physics ---

/// Top angular rate (deg/sec).
pub const ROTATION_SPEED_DEG: f64 = 150.0;

/// Angular acceleration toward the top rate (deg/sec^2).
pub const ROTATION_ACCEL_DEG: f64 = 300.0;

pub const THRUST_POWER: f64 = 73.125;
pub const STRAFE_POWER: f64 = 64.35;
pub const MAX_SPEED: f64 = 56.25;
pub const MIN_SPEED: f64 = 0.0;

/// Angular drag applied every frame, fuel or not.
pub const DRIFT_FACTOR: f64 = 0.992;

/// Throttle ramp rate per second of held input.
pub const THROTTLE_STEP_PER_SEC: f64 = 0.9;

pub const BOOST_FORCE: f64 = 173.25;
pub const BOOST_DURATION: f64 = 0.28;
pub const BOOST_RECHARGE_TIME: f64 = 4.0;

/// Dash lateral velocity impulse.
pub const HURDLE_IMPULSE: f64 = 34.65;
pub const HURDLE_COOLDOWN: f64 = 1.8;

/// Two same-side taps within this window trigger a dash (inclusive).
pub const DOUBLE_TAP_WINDOW: f64 = 0.25;

// --- Fuel ---

/// Fuel per second at full throttle, before the loadout burn multiplier.
pub const FUEL_BURN_RATE: f64 = 0.9;
pub const STRAFE_FUEL_MULT: f64 = 0.5;
pub const BOOST_FUEL_MULT: f64 = 4.0;

// --- Projectiles ---

pub const BULLET_SPEED: f64 = 900.0;
pub const BULLET_RADIUS: f64 = 3.0;
pub const BULLET_LIFETIME: f64 = 1.2;

/// Aim jitter applied to each minigun round (radians).
pub const BULLET_SPREAD: f64 = 0.08;

pub const ROCKET_SPEED: f64 = 520.0;
pub const ROCKET_LIFETIME: f64 = 2.2;

/// Body radius used for the rocket proximity fuse.
pub const ROCKET_CONTACT_RADIUS: f64 = 6.0;

/// Distance to the target point at which a rocket detonates anyway.
pub const ROCKET_ARM_RADIUS: f64 = 18.0;

pub const RAILGUN_SPEED: f64 = 1250.0;
pub const RAILGUN_LIFETIME: f64 = 0.9;
pub const RAILGUN_RADIUS: f64 = 4.0;

pub const LASER_LIFETIME: f64 = 0.12;
pub const LASER_WIDTH: f64 = 6.0;

/// Beam length as a multiple of the larger view extent.
pub const LASER_RANGE_FACTOR: f64 = 1.25;

/// Aim point used when the shell supplies none: this far along ship-forward.
pub const AIM_FALLBACK_DISTANCE: f64 = 400.0;

/// Angular jitter between rockets of one volley (radians).
pub const ROCKET_SALVO_SPREAD: f64 = 0.12;

pub const EMP_PULSE_LIFETIME: f64 = 0.25;
pub const EMP_TICK_INTERVAL: f64 = 0.5;

pub const MINE_LIFETIME: f64 = 15.0;
pub const MINE_DAMAGE: f64 = 55.0;
pub const MINE_SPLASH_RADIUS: f64 = 80.0;
pub const MINE_TRIGGER_RADIUS: f64 = 24.0;

/// Mines drop this far behind the craft.
pub const MINE_DROP_OFFSET: f64 = PLAYER_RADIUS + 18.0;

// --- Enemies ---

pub const ENEMY_BASE_SPEED: f64 = 19.40625;
pub const ENEMY_RADIUS: f64 = 12.0;
pub const ENEMY_PREFERRED_RANGE: f64 = 240.0;

pub const ENEMY_SPAWN_INTERVAL_START: f64 = 0.75;
pub const ENEMY_SPAWN_INTERVAL_MIN: f64 = 0.18;
pub const ENEMY_SPAWN_INTERVAL_DECAY: f64 = 0.0028;

pub const ENEMY_SPEED_PER_SEC: f64 = 0.18;
pub const ENEMY_SPEED_MAX_BONUS: f64 = 15.75;
pub const ENEMY_HP_BASE: f64 = 22.0;
pub const ENEMY_HP_PER_SEC: f64 = 0.32;
pub const ENEMY_HP_MAX_BONUS: f64 = 70.0;
pub const ENEMY_DAMAGE_BASE: f64 = 22.0;
pub const ENEMY_DAMAGE_PER_SEC: f64 = 0.025;
pub const ENEMY_DAMAGE_MAX_BONUS: f64 = 16.0;
pub const ENEMY_XP_BASE: f64 = 7.0;
pub const ENEMY_XP_PER_HP: f64 = 0.32;

// --- Spawner ---

pub const MAX_ACTIVE_ENEMIES: usize = 160;

/// Number of equal angular sectors around the player.
pub const SPAWN_SECTORS: u32 = 8;

/// Spawn distance = view factor x larger view extent + margin.
pub const SPAWN_VIEW_FACTOR: f64 = 0.65;
pub const SPAWN_MARGIN: f64 = 140.0;

pub const BOSS_MIN_MINUTES: f64 = 6.0;
pub const BOSS_CHANCE_BASE: f64 = 0.02;
pub const BOSS_CHANCE_PER_MINUTE: f64 = 0.01;
pub const BOSS_CHANCE_CAP: f64 = 0.12;

// --- AI ---

/// Below this distance to the player an enemy skips its steering update.
pub const AI_MIN_DISTANCE: f64 = 0.1;

// --- Progression ---

pub const XP_BASE: f64 = 90.0;
pub const XP_GROWTH: f64 = 1.22;
pub const XP_LINEAR_BONUS: f64 = 12.0;

/// Input grace after closing the level-up screen.
pub const UPGRADE_RESUME_GRACE: f64 = 0.5;

pub const GEM_LIFETIME: f64 = 30.0;
pub const GEM_MAGNET_SPEED: f64 = 600.0;
pub const GEM_COLLECT_RADIUS: f64 = 20.0;

// --- Extraction ---

/// Extraction becomes available once this much of the round has elapsed.
pub const EXTRACTION_AVAILABLE_AFTER: f64 = 600.0;
pub const EXTRACTION_CHANNEL_SECS: f64 = 5.0;

// --- Debrief ---

pub const DATA_PER_SURVIVAL_MINUTE: f64 = 0.8;
pub const DATA_PER_KILL: f64 = 0.04;
pub const DATA_EXTRACTION_MULT: f64 = 1.5;
pub const DATA_TIMEOUT_MULT: f64 = 1.25;
