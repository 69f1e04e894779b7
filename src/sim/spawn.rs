//! Time- and count-gated entity creation
//!
//! Every gate is a `clock - last > threshold` comparison against the session
//! sim clock plus a concurrency cap, so spawning is deterministic given the
//! session state and one RNG draw for position/speed/pattern.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::movement::MovePattern;
use super::state::{Alien, BossState, HealthPickup, PowerUp, PowerUpKind, Projectile, ProjectileOwner, Session};
use crate::consts::*;
use crate::presentation::{EntityKind, Presentation};

/// Run all spawn gates for this tick
pub fn update(session: &mut Session, presentation: &mut dyn Presentation) {
    let clock = session.clock_ms;

    let alien_interval = session.config.spawn_rate_ms * session.spawn_interval_scale;
    if clock - session.timers.last_alien_spawn > alien_interval
        && session.non_boss_alien_count() < MAX_ALIENS
    {
        session.timers.last_alien_spawn = clock;
        spawn_alien(session, presentation);
    }

    if session.is_boss_wave
        && !session.boss_alive()
        && clock - session.timers.last_boss_spawn > session.config.boss_spawn_rate_ms
    {
        session.timers.last_boss_spawn = clock;
        spawn_boss(session, presentation);
    }

    // One-shot score-threshold power-ups
    if session.score >= LASER_SCORE_THRESHOLD && !session.laser_power_up_spawned {
        session.laser_power_up_spawned = true;
        spawn_power_up(session, presentation, PowerUpKind::Laser);
    }
    if session.score >= SPEED_BOOST_SCORE_THRESHOLD && !session.speed_boost_spawned {
        session.speed_boost_spawned = true;
        spawn_power_up(session, presentation, PowerUpKind::SpeedBoost);
    }

    if session.health < LOW_HEALTH_THRESHOLD
        && session.health_pickups.is_empty()
        && clock - session.timers.last_pickup_spawn > HEALTH_PICKUP_COOLDOWN_MS
    {
        session.timers.last_pickup_spawn = clock;
        spawn_health_pickup(session, presentation);
    }

    if !session.aliens.is_empty()
        && clock - session.timers.last_alien_shot > session.config.alien_shot_rate_ms
    {
        session.timers.last_alien_shot = clock;
        spawn_enemy_shot(session, presentation);
    }
}

fn spawn_alien(session: &mut Session, presentation: &mut dyn Presentation) {
    let x = session
        .rng
        .random_range(0.0..(session.area.width - ALIEN_WIDTH));
    let y = -ALIEN_HEIGHT;
    let speed = session.config.alien_speed * session.rng.random_range(0.8..1.2);
    let unlocked = MovePattern::unlocked(session.wave);
    let pattern = unlocked[session.rng.random_range(0..unlocked.len())];
    // Boss waves trade spawn volume for durability
    let health = if session.is_boss_wave {
        BOSS_WAVE_ALIEN_HEALTH
    } else {
        1
    };

    let id = session.next_entity_id();
    let handle = presentation.create_handle(EntityKind::Alien, x, y);
    session.aliens.push(Alien {
        id,
        handle,
        pos: Vec2::new(x, y),
        anchor_x: x,
        health,
        speed,
        pattern,
        bounce_dir: if session.rng.random_bool(0.5) { 1.0 } else { -1.0 },
        spawned_at_ms: session.clock_ms,
        boss: None,
    });
}

fn spawn_boss(session: &mut Session, presentation: &mut dyn Presentation) {
    let x = session.area.width / 2.0 - BOSS_WIDTH / 2.0;
    let y = -BOSS_HEIGHT;

    let id = session.next_entity_id();
    let handle = presentation.create_handle(EntityKind::Boss, x, y);
    session.aliens.push(Alien {
        id,
        handle,
        pos: Vec2::new(x, y),
        anchor_x: x,
        health: BOSS_HEALTH,
        speed: session.config.alien_speed,
        pattern: MovePattern::SideToSide,
        bounce_dir: 1.0,
        spawned_at_ms: session.clock_ms,
        boss: Some(BossState::new(session.clock_ms)),
    });
    log::info!("Boss spawned on wave {}", session.wave);
}

fn spawn_power_up(session: &mut Session, presentation: &mut dyn Presentation, kind: PowerUpKind) {
    let x = session
        .rng
        .random_range(0.0..(session.area.width - PICKUP_SIZE));
    let id = session.next_entity_id();
    let handle = presentation.create_handle(EntityKind::PowerUp, x, PICKUP_SPAWN_Y);
    session.power_ups.push(PowerUp {
        id,
        handle,
        kind,
        pos: Vec2::new(x, PICKUP_SPAWN_Y),
    });
    log::info!("Power-up spawned: {kind:?}");
}

fn spawn_health_pickup(session: &mut Session, presentation: &mut dyn Presentation) {
    let x = session
        .rng
        .random_range(0.0..(session.area.width - PICKUP_SIZE));
    let id = session.next_entity_id();
    let handle = presentation.create_handle(EntityKind::HealthPickup, x, PICKUP_SPAWN_Y);
    session.health_pickups.push(HealthPickup {
        id,
        handle,
        pos: Vec2::new(x, PICKUP_SPAWN_Y),
    });
    log::info!("Health pickup spawned at {} health", session.health);
}

/// One random live alien fires straight down
fn spawn_enemy_shot(session: &mut Session, presentation: &mut dyn Presentation) {
    let index = session.rng.random_range(0..session.aliens.len());
    let (x, y) = {
        let alien = &session.aliens[index];
        (
            alien.pos.x + alien.width() / 2.0 - PROJECTILE_WIDTH / 2.0,
            alien.pos.y + alien.height(),
        )
    };

    let id = session.next_entity_id();
    let handle = presentation.create_handle(EntityKind::AlienProjectile, x, y);
    session.projectiles.push(Projectile {
        id,
        handle,
        owner: ProjectileOwner::Alien,
        pos: Vec2::new(x, y),
        vel: Vec2::new(0.0, ENEMY_PROJECTILE_SPEED),
    });
}

/// Radial volley fired by boss bursts and teleports
pub(crate) fn spawn_boss_volley(
    session: &mut Session,
    origin: Vec2,
    presentation: &mut dyn Presentation,
) {
    for i in 0..BOSS_VOLLEY_COUNT {
        let angle = TAU * i as f32 / BOSS_VOLLEY_COUNT as f32;
        let vel = Vec2::new(angle.cos(), angle.sin()) * ENEMY_PROJECTILE_SPEED * 0.8;

        let id = session.next_entity_id();
        let handle = presentation.create_handle(EntityKind::AlienProjectile, origin.x, origin.y);
        session.projectiles.push(Projectile {
            id,
            handle,
            owner: ProjectileOwner::Alien,
            pos: origin,
            vel,
        });
    }
}
