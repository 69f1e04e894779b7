//! Nova Strike - simulation core for a vertical-scrolling alien shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `config`: Data-driven difficulty tuning
//! - `presentation`: Handle-based seam to the host renderer/input layer

pub mod config;
pub mod presentation;
pub mod sim;

pub use config::{ConfigError, Difficulty, DifficultyConfig};
pub use presentation::{EntityKind, HandleId, Presentation};

/// Game configuration constants
pub mod consts {
    /// Maximum player health; sessions start here and heals clamp to it
    pub const MAX_HEALTH: i32 = 100;

    /// Ship dimensions and placement
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 40.0;
    /// Distance from the play-area bottom to the ship's top edge
    pub const SHIP_BOTTOM_MARGIN: f32 = 80.0;
    /// Horizontal pixels moved per `move_ship` invocation
    pub const SHIP_STEP: f32 = 6.0;

    /// Regular alien dimensions
    pub const ALIEN_WIDTH: f32 = 60.0;
    pub const ALIEN_HEIGHT: f32 = 40.0;
    /// Live non-boss aliens are capped at this count
    pub const MAX_ALIENS: usize = 8;

    /// Boss dimensions and durability
    pub const BOSS_WIDTH: f32 = 120.0;
    pub const BOSS_HEIGHT: f32 = 80.0;
    pub const BOSS_HEALTH: i32 = 100;
    /// Bosses descend at this fraction of their nominal speed
    pub const BOSS_DESCENT_FACTOR: f32 = 0.25;

    /// Projectile dimensions
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    /// Downward speed of alien projectiles (px/s)
    pub const ENEMY_PROJECTILE_SPEED: f32 = 300.0;
    /// Projectiles this far outside the play area are culled
    pub const PROJECTILE_CULL_MARGIN: f32 = 20.0;

    /// Scoring
    pub const BASE_KILL_SCORE: f32 = 10.0;
    pub const BOSS_KILL_SCORE: u32 = 500;
    pub const LASER_KILL_SCORE: u32 = 10;

    /// Boss waves recur at this wave interval
    pub const BOSS_WAVE_INTERVAL: u32 = 5;
    /// Regular-spawn interval stretch on boss waves (fewer aliens)
    pub const BOSS_WAVE_SPAWN_SCALE: f64 = 1.6;
    /// Regular-alien health on boss waves (tougher aliens)
    pub const BOSS_WAVE_ALIEN_HEALTH: i32 = 2;
    /// Missed bosses cost this multiple of the regular missed-alien penalty
    pub const MISSED_BOSS_PENALTY_SCALE: i32 = 2;

    /// Boss phase machine
    pub const BOSS_PHASE2_FRACTION: f32 = 0.66;
    pub const BOSS_PHASE3_FRACTION: f32 = 0.33;
    pub const BOSS_PHASE_SPEED_SCALE: f32 = 1.25;
    pub const BOSS_TELEPORT_CHECK_MS: f64 = 2_000.0;
    pub const BOSS_TELEPORT_CHANCE: f64 = 0.15;
    pub const BOSS_VOLLEY_ON_TELEPORT_CHANCE: f64 = 0.5;
    pub const BOSS_BURST_INTERVAL_MS: f64 = 3_000.0;
    pub const BOSS_VOLLEY_COUNT: u32 = 8;

    /// Power-ups and pickups
    pub const PICKUP_SIZE: f32 = 30.0;
    pub const PICKUP_SPAWN_Y: f32 = 50.0;
    pub const PICKUP_DRIFT_SPEED: f32 = 30.0;
    pub const LASER_SCORE_THRESHOLD: u32 = 100;
    pub const SPEED_BOOST_SCORE_THRESHOLD: u32 = 250;
    pub const LASER_DURATION_MS: f64 = 10_000.0;
    pub const LASER_WIDTH: f32 = 4.0;
    pub const SPEED_BOOST_DURATION_MS: f64 = 8_000.0;
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    /// Health pickups only spawn below this health
    pub const LOW_HEALTH_THRESHOLD: i32 = 30;
    pub const HEALTH_PICKUP_COOLDOWN_MS: f64 = 15_000.0;

    /// Base weapon cooldown at tier 1 (ms); higher tiers shorten it
    pub const BASE_FIRE_COOLDOWN_MS: f64 = 250.0;
}

/// Wave tier used to unlock movement-pattern sets (tier 0 at waves 1-2)
#[inline]
pub fn wave_tier(wave: u32) -> u32 {
    wave / 3
}
