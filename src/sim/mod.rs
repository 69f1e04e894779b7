//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Session sim clock only, advanced by the host's elapsed time
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the presentation seam

pub mod collision;
pub mod geometry;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod wave;

pub use geometry::Aabb;
pub use movement::MovePattern;
pub use state::{
    ActiveEffects, Alien, BossState, HealthPickup, LaserEffect, PowerUp, PowerUpKind, Projectile,
    ProjectileOwner, Session, SessionSnapshot, Ship, Timers,
};
pub use tick::{Direction, fire_weapon, move_ship, tick};
pub use wave::{FirePattern, wave_for_score};
