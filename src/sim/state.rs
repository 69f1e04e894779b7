//! Session state and core simulation types
//!
//! The session is the single mutable owner of all gameplay state. Every
//! operation in `sim` takes it as an explicit parameter; there is no ambient
//! or global state anywhere in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::movement::MovePattern;
use super::wave::FirePattern;
use crate::config::{ConfigError, Difficulty, DifficultyConfig};
use crate::consts::*;
use crate::presentation::{EntityKind, HandleId, PlayArea, Presentation};

/// Per-session timestamps, all on the session sim clock (ms).
///
/// The clock only advances while the session is live and unpaused, so every
/// gate expressed as `clock - last > threshold` pauses and cancels correctly
/// by construction.
#[derive(Debug, Clone, Copy)]
pub struct Timers {
    pub last_shot: f64,
    pub last_alien_spawn: f64,
    pub last_boss_spawn: f64,
    pub last_pickup_spawn: f64,
    pub last_alien_shot: f64,
}

impl Default for Timers {
    fn default() -> Self {
        Self {
            // Pre-armed: the first shot must not wait out a cooldown
            last_shot: -BASE_FIRE_COOLDOWN_MS,
            last_alien_spawn: 0.0,
            last_boss_spawn: 0.0,
            last_pickup_spawn: 0.0,
            last_alien_shot: 0.0,
        }
    }
}

/// Timed laser beam granted by the laser power-up
#[derive(Debug, Clone, Copy)]
pub struct LaserEffect {
    pub handle: HandleId,
    pub expires_at_ms: f64,
}

/// Active power-up effects, modeled as expiry timestamps checked each tick
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveEffects {
    pub laser: Option<LaserEffect>,
    pub speed_boost_until: Option<f64>,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub handle: HandleId,
    pub pos: Vec2,
    pub weapon: FirePattern,
}

impl Ship {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, SHIP_WIDTH, SHIP_HEIGHT)
    }

    /// Top-center muzzle point projectiles spawn from
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + SHIP_WIDTH / 2.0, self.pos.y)
    }
}

/// Boss-only state machine data
#[derive(Debug, Clone, Copy)]
pub struct BossState {
    /// 1-3, driven by remaining health fraction; never reverts
    pub phase: u8,
    /// Permanent speed multiplier, grows on each phase transition
    pub speed_scale: f32,
    pub max_health: i32,
    pub last_teleport_roll_ms: f64,
    pub last_burst_ms: f64,
}

impl BossState {
    pub fn new(now_ms: f64) -> Self {
        Self {
            phase: 1,
            speed_scale: 1.0,
            max_health: BOSS_HEALTH,
            last_teleport_roll_ms: now_ms,
            last_burst_ms: now_ms,
        }
    }
}

/// An alien, regular or boss
#[derive(Debug, Clone)]
pub struct Alien {
    pub id: u32,
    pub handle: HandleId,
    pub pos: Vec2,
    /// Oscillation center; lateral patterns offset from here
    pub anchor_x: f32,
    pub health: i32,
    /// Base downward drift (px/s), difficulty-scaled with per-alien variation
    pub speed: f32,
    /// Assigned once at spawn, stable for the alien's lifetime
    pub pattern: MovePattern,
    /// Current lateral direction for the bounce pattern (+1 or -1)
    pub bounce_dir: f32,
    pub spawned_at_ms: f64,
    pub boss: Option<BossState>,
}

impl Alien {
    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn width(&self) -> f32 {
        if self.is_boss() { BOSS_WIDTH } else { ALIEN_WIDTH }
    }

    pub fn height(&self) -> f32 {
        if self.is_boss() { BOSS_HEIGHT } else { ALIEN_HEIGHT }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.width(), self.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Alien,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub handle: HandleId,
    pub owner: ProjectileOwner,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Laser,
    SpeedBoost,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub handle: HandleId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, PICKUP_SIZE, PICKUP_SIZE)
    }
}

#[derive(Debug, Clone)]
pub struct HealthPickup {
    pub id: u32,
    pub handle: HandleId,
    pub pos: Vec2,
}

impl HealthPickup {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, PICKUP_SIZE, PICKUP_SIZE)
    }
}

/// Read-only view for UI binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub score: u32,
    pub health: i32,
    pub wave: u32,
    /// Derived display level; UI-only, never feeds back into gameplay
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// Complete session state, owned by the scheduler
#[derive(Debug)]
pub struct Session {
    pub difficulty: Difficulty,
    pub config: DifficultyConfig,
    /// Bumped on every (re)init so stale host callbacks can be guarded
    pub generation: u32,
    pub seed: u64,
    pub rng: Pcg32,
    /// Sim clock (ms); frozen while paused or game-over
    pub clock_ms: f64,
    pub score: u32,
    pub health: i32,
    pub wave: u32,
    pub is_boss_wave: bool,
    pub bosses_defeated: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Idempotent once-per-session spawn flags
    pub laser_power_up_spawned: bool,
    pub speed_boost_spawned: bool,
    /// Stretch applied to the regular-spawn interval (boss waves > 1.0)
    pub spawn_interval_scale: f64,
    pub timers: Timers,
    pub effects: ActiveEffects,
    pub area: PlayArea,
    pub ship: Ship,
    pub aliens: Vec<Alien>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub health_pickups: Vec<HealthPickup>,
    next_id: u32,
}

impl Session {
    /// Create a session from a host-supplied difficulty key.
    ///
    /// Fails fast on an unknown key; that is a config error, not a runtime
    /// condition to recover from.
    pub fn init(
        key: &str,
        seed: u64,
        presentation: &mut dyn Presentation,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(Difficulty::from_key(key)?, seed, presentation))
    }

    pub fn new(difficulty: Difficulty, seed: u64, presentation: &mut dyn Presentation) -> Self {
        let area = presentation.play_area();
        let ship_pos = Vec2::new(
            area.width / 2.0 - SHIP_WIDTH / 2.0,
            area.height - SHIP_BOTTOM_MARGIN,
        );
        let ship_handle = presentation.create_handle(EntityKind::Ship, ship_pos.x, ship_pos.y);

        log::info!("Session created: {} (seed {seed})", difficulty.as_str());

        Self {
            difficulty,
            config: DifficultyConfig::for_difficulty(difficulty),
            generation: 1,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0.0,
            score: 0,
            health: MAX_HEALTH,
            wave: 1,
            is_boss_wave: false,
            bosses_defeated: 0,
            paused: false,
            game_over: false,
            laser_power_up_spawned: false,
            speed_boost_spawned: false,
            spawn_interval_scale: 1.0,
            timers: Timers::default(),
            effects: ActiveEffects::default(),
            area,
            ship: Ship {
                handle: ship_handle,
                pos: ship_pos,
                weapon: FirePattern::Single,
            },
            aliens: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            health_pickups: Vec::new(),
            next_id: 1,
        }
    }

    /// Tear down all live entities, then restart in place.
    ///
    /// The generation bump invalidates any host timer still pointing at the
    /// previous run; such callbacks must check it and no-op.
    pub fn reinit(&mut self, difficulty: Difficulty, seed: u64, presentation: &mut dyn Presentation) {
        self.teardown(presentation);
        let generation = self.generation + 1;
        *self = Self::new(difficulty, seed, presentation);
        self.generation = generation;
    }

    /// Synchronously destroy every live presentation handle
    pub fn teardown(&mut self, presentation: &mut dyn Presentation) {
        for alien in self.aliens.drain(..) {
            presentation.destroy_handle(alien.handle);
        }
        for projectile in self.projectiles.drain(..) {
            presentation.destroy_handle(projectile.handle);
        }
        for power_up in self.power_ups.drain(..) {
            presentation.destroy_handle(power_up.handle);
        }
        for pickup in self.health_pickups.drain(..) {
            presentation.destroy_handle(pickup.handle);
        }
        if let Some(laser) = self.effects.laser.take() {
            presentation.destroy_handle(laser.handle);
        }
        self.effects.speed_boost_until = None;
        presentation.destroy_handle(self.ship.handle);
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clamp health into [0, MAX_HEALTH]; hitting 0 ends the game.
    ///
    /// Game over is sticky: once set it is never cleared except by reinit,
    /// even if health is later raised.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, MAX_HEALTH);
        if self.health <= 0 {
            self.game_over = true;
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.game_over {
            self.paused = !self.paused;
        }
    }

    /// Derived display difficulty; monotone in wave tier and bosses defeated
    pub fn display_level(&self) -> u32 {
        1 + crate::wave_tier(self.wave) + self.bosses_defeated
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            health: self.health,
            wave: self.wave,
            level: self.display_level(),
            paused: self.paused,
            game_over: self.game_over,
        }
    }

    /// Ship speed multiplier from the active speed boost, if any
    pub fn ship_speed_factor(&self) -> f32 {
        match self.effects.speed_boost_until {
            Some(until) if self.clock_ms < until => SPEED_BOOST_FACTOR,
            _ => 1.0,
        }
    }

    pub fn non_boss_alien_count(&self) -> usize {
        self.aliens.iter().filter(|a| !a.is_boss()).count()
    }

    pub fn boss_alive(&self) -> bool {
        self.aliens.iter().any(|a| a.is_boss())
    }

    /// Remove an alien by id. Idempotent: absent ids are a no-op.
    pub fn remove_alien(&mut self, id: u32, presentation: &mut dyn Presentation) -> bool {
        match self.aliens.iter().position(|a| a.id == id) {
            Some(index) => {
                let alien = self.aliens.remove(index);
                presentation.destroy_handle(alien.handle);
                true
            }
            None => false,
        }
    }

    /// Remove a projectile by id. Idempotent.
    pub fn remove_projectile(&mut self, id: u32, presentation: &mut dyn Presentation) -> bool {
        match self.projectiles.iter().position(|p| p.id == id) {
            Some(index) => {
                let projectile = self.projectiles.remove(index);
                presentation.destroy_handle(projectile.handle);
                true
            }
            None => false,
        }
    }

    /// Remove a power-up by id. Idempotent.
    pub fn remove_power_up(&mut self, id: u32, presentation: &mut dyn Presentation) -> bool {
        match self.power_ups.iter().position(|p| p.id == id) {
            Some(index) => {
                let power_up = self.power_ups.remove(index);
                presentation.destroy_handle(power_up.handle);
                true
            }
            None => false,
        }
    }

    /// Remove a health pickup by id. Idempotent.
    pub fn remove_health_pickup(&mut self, id: u32, presentation: &mut dyn Presentation) -> bool {
        match self.health_pickups.iter().position(|p| p.id == id) {
            Some(index) => {
                let pickup = self.health_pickups.remove(index);
                presentation.destroy_handle(pickup.handle);
                true
            }
            None => false,
        }
    }
}
