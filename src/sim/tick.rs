//! Frame scheduler
//!
//! One ordered update per host frame: effect expiry, spawning, movement,
//! collisions, wave sync, then a presentation position sync. All gameplay
//! mutation happens inside `tick` or the player operations below, on the
//! single session owner; pause and game over freeze the sim clock, so every
//! timer downstream freezes with it.

use glam::Vec2;

use super::state::{Projectile, ProjectileOwner, Session};
use super::{collision, movement, spawn, wave};
use crate::consts::*;
use crate::presentation::{EntityKind, Presentation};

/// Ship steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, presentation: &mut dyn Presentation, elapsed_ms: f64) {
    // Game over freezes everything until reinit; pause resumes cleanly
    // because the clock never moved
    if session.game_over || session.paused {
        return;
    }
    session.clock_ms += elapsed_ms;
    let dt = (elapsed_ms / 1000.0) as f32;

    expire_effects(session, presentation);
    spawn::update(session, presentation);
    movement::update(session, presentation, dt);
    collision::resolve(session, presentation);
    wave::sync_wave(session);
    sync_presentation(session, presentation);
}

/// Step the ship one notch left or right, clamped to the play area
pub fn move_ship(session: &mut Session, direction: Direction, presentation: &mut dyn Presentation) {
    if session.paused || session.game_over {
        return;
    }
    let step = SHIP_STEP * session.ship_speed_factor();
    let dx = match direction {
        Direction::Left => -step,
        Direction::Right => step,
    };
    let max_x = session.area.width - SHIP_WIDTH;
    session.ship.pos.x = (session.ship.pos.x + dx).clamp(0.0, max_x);
    presentation.set_position(session.ship.handle, session.ship.pos.x, session.ship.pos.y);
}

/// Fire the current weapon pattern, gated by its cooldown
pub fn fire_weapon(session: &mut Session, presentation: &mut dyn Presentation) {
    if session.paused || session.game_over {
        return;
    }
    if session.clock_ms - session.timers.last_shot < session.ship.weapon.cooldown_ms() {
        return;
    }
    session.timers.last_shot = session.clock_ms;

    let muzzle = session.ship.muzzle();
    let speed = session.config.projectile_speed;
    for &offset in session.ship.weapon.offsets() {
        let pos = Vec2::new(
            muzzle.x + offset - PROJECTILE_WIDTH / 2.0,
            muzzle.y - PROJECTILE_HEIGHT,
        );
        let id = session.next_entity_id();
        let handle = presentation.create_handle(EntityKind::PlayerProjectile, pos.x, pos.y);
        session.projectiles.push(Projectile {
            id,
            handle,
            owner: ProjectileOwner::Player,
            pos,
            vel: Vec2::new(0.0, -speed),
        });
    }
}

/// Drop timed effects whose expiry timestamp has passed
fn expire_effects(session: &mut Session, presentation: &mut dyn Presentation) {
    if let Some(laser) = session.effects.laser {
        if session.clock_ms >= laser.expires_at_ms {
            presentation.destroy_handle(laser.handle);
            session.effects.laser = None;
            log::info!("Laser expired");
        }
    }
    if let Some(until) = session.effects.speed_boost_until {
        if session.clock_ms >= until {
            session.effects.speed_boost_until = None;
        }
    }
}

/// Push every live entity's position to the host
fn sync_presentation(session: &Session, presentation: &mut dyn Presentation) {
    presentation.set_position(session.ship.handle, session.ship.pos.x, session.ship.pos.y);
    for alien in &session.aliens {
        presentation.set_position(alien.handle, alien.pos.x, alien.pos.y);
    }
    for projectile in &session.projectiles {
        presentation.set_position(projectile.handle, projectile.pos.x, projectile.pos.y);
    }
    for power_up in &session.power_ups {
        presentation.set_position(power_up.handle, power_up.pos.x, power_up.pos.y);
    }
    for pickup in &session.health_pickups {
        presentation.set_position(pickup.handle, pickup.pos.x, pickup.pos.y);
    }
    if let Some(laser) = session.effects.laser {
        // The beam tracks the ship
        let x = session.ship.pos.x + SHIP_WIDTH / 2.0 - LASER_WIDTH / 2.0;
        presentation.set_position(laser.handle, x, 0.0);
    }
}
