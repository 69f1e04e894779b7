//! Data-driven game balance
//!
//! One static table keyed by difficulty. The table is the only place gameplay
//! tuning lives; nothing in `sim` hardcodes a per-difficulty value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session difficulty, immutable once a session is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Raised when a host passes a difficulty key the table does not know.
///
/// This is a programmer/config error, surfaced at session init rather than
/// tolerated at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown difficulty key `{0}` (expected easy, normal or hard)")]
    UnknownDifficulty(String),
}

impl Difficulty {
    /// Parse a host-supplied difficulty key
    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        match key.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(key.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Tuning values for one difficulty tier
///
/// Speeds are px/s, rates are milliseconds between events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Base downward drift of regular aliens
    pub alien_speed: f32,
    /// Interval between regular alien spawns
    pub spawn_rate_ms: f64,
    /// Scales the base kill score for regular aliens
    pub score_multiplier: f32,
    /// Speed of player projectiles
    pub projectile_speed: f32,
    /// Health lost when an alien or alien projectile hits the ship
    pub health_loss: i32,
    /// Health lost when an alien escapes off the bottom
    pub missed_alien_penalty: i32,
    /// Score per wave; wave = score / points_per_wave + 1
    pub points_per_wave: u32,
    /// Interval between boss spawns on boss waves
    pub boss_spawn_rate_ms: f64,
    /// Interval between alien shots
    pub alien_shot_rate_ms: f64,
}

impl DifficultyConfig {
    /// Look up the static tuning table
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => DifficultyConfig {
                alien_speed: 48.0,
                spawn_rate_ms: 2500.0,
                score_multiplier: 1.0,
                projectile_speed: 480.0,
                health_loss: 5,
                missed_alien_penalty: 3,
                points_per_wave: 100,
                boss_spawn_rate_ms: 30_000.0,
                alien_shot_rate_ms: 3200.0,
            },
            Difficulty::Normal => DifficultyConfig {
                alien_speed: 72.0,
                spawn_rate_ms: 2000.0,
                score_multiplier: 1.5,
                projectile_speed: 600.0,
                health_loss: 10,
                missed_alien_penalty: 5,
                points_per_wave: 100,
                boss_spawn_rate_ms: 25_000.0,
                alien_shot_rate_ms: 2600.0,
            },
            Difficulty::Hard => DifficultyConfig {
                alien_speed: 108.0,
                spawn_rate_ms: 1500.0,
                score_multiplier: 2.0,
                projectile_speed: 720.0,
                health_loss: 15,
                missed_alien_penalty: 8,
                points_per_wave: 100,
                boss_spawn_rate_ms: 20_000.0,
                alien_shot_rate_ms: 2000.0,
            },
        }
    }
}
