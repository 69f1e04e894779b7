//! Movement pattern engine
//!
//! Regular aliens get one pattern at spawn time, drawn from the set their
//! wave tier has unlocked, and keep it for life. Lateral offsets are computed
//! from the spawn anchor and lifetime so paths are stable and drift-free;
//! only the downward drift accumulates.
//!
//! Bosses run a separate phase machine instead of a pattern. Phase
//! transitions are one-way and permanently raise speed; burst volleys are
//! collected as deferred effects and spawned by the caller after the alien
//! scan, so the borrow of the alien list stays local.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Alien, Session};
use crate::consts::*;
use crate::presentation::Presentation;
use crate::wave_tier;

/// Closed set of movement patterns; dispatch is a single exhaustive match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePattern {
    Zigzag,
    SideToSide,
    Spiral,
    Figure8,
    Bounce,
    Swarm,
    Chaos,
    Pursuit,
}

const BASIC: &[MovePattern] = &[
    MovePattern::Zigzag,
    MovePattern::SideToSide,
    MovePattern::Spiral,
];

const ADVANCED: &[MovePattern] = &[
    MovePattern::Zigzag,
    MovePattern::SideToSide,
    MovePattern::Spiral,
    MovePattern::Figure8,
    MovePattern::Bounce,
];

const EXPERT: &[MovePattern] = &[
    MovePattern::Zigzag,
    MovePattern::SideToSide,
    MovePattern::Spiral,
    MovePattern::Figure8,
    MovePattern::Bounce,
    MovePattern::Swarm,
    MovePattern::Chaos,
    MovePattern::Pursuit,
];

impl MovePattern {
    /// Patterns available at the given wave
    pub fn unlocked(wave: u32) -> &'static [MovePattern] {
        match wave_tier(wave) {
            0 => BASIC,
            1 => ADVANCED,
            _ => EXPERT,
        }
    }
}

/// Advance all moving entities by one tick
pub fn update(session: &mut Session, presentation: &mut dyn Presentation, dt: f32) {
    let volley_origins = update_aliens(session, dt);
    for origin in volley_origins {
        super::spawn::spawn_boss_volley(session, origin, presentation);
    }
    update_projectiles(session, presentation, dt);
    update_pickups(session, presentation, dt);
}

/// Move aliens and run boss machines; returns burst-volley origins
pub(crate) fn update_aliens(session: &mut Session, dt: f32) -> Vec<Vec2> {
    let area = session.area;
    let player_x = session.ship.pos.x + SHIP_WIDTH / 2.0;
    let clock = session.clock_ms;
    let total = session.aliens.len();
    let mut volley_origins = Vec::new();

    let Session { aliens, rng, .. } = session;
    for index in 0..total {
        let alien = &mut aliens[index];
        let t = ((clock - alien.spawned_at_ms) / 1000.0) as f32;

        if alien.is_boss() {
            update_boss(alien, t, dt, player_x, area.width, clock, rng, &mut volley_origins);
        } else {
            apply_pattern(alien, t, dt, index, total, player_x);
            alien.pos.y += alien.speed * drift_scale(alien.pattern, t) * dt;
        }

        // x stays in bounds; y is left free so exits can be detected
        let max_x = area.width - alien.width();
        alien.pos.x = alien.pos.x.clamp(0.0, max_x);
        if alien.pattern == MovePattern::Bounce && !alien.is_boss() {
            if alien.pos.x <= 0.0 {
                alien.bounce_dir = 1.0;
            } else if alien.pos.x >= max_x {
                alien.bounce_dir = -1.0;
            }
        }
    }

    volley_origins
}

fn apply_pattern(alien: &mut Alien, t: f32, dt: f32, index: usize, total: usize, player_x: f32) {
    match alien.pattern {
        MovePattern::Zigzag => {
            alien.pos.x = alien.anchor_x + (t * 4.0).sin() * 40.0;
        }
        MovePattern::SideToSide => {
            alien.pos.x = alien.anchor_x + (t * 1.5).sin() * 110.0;
        }
        MovePattern::Spiral => {
            // Radius grows until the circle settles
            let radius = 30.0 + (t * 8.0).min(70.0);
            alien.pos.x = alien.anchor_x + (t * 2.5).cos() * radius;
        }
        MovePattern::Figure8 => {
            alien.pos.x = alien.anchor_x + (t * 2.0).sin() * 90.0;
        }
        MovePattern::Bounce => {
            alien.pos.x += alien.bounce_dir * 120.0 * dt;
        }
        MovePattern::Swarm => {
            // Angular offset by index keeps formation spacing
            let phase = index as f32 * TAU / total.max(1) as f32;
            alien.pos.x = alien.anchor_x + (t * 2.0 + phase).sin() * 70.0;
        }
        MovePattern::Chaos => {
            alien.pos.x = alien.anchor_x + (t * 3.1).sin() * 50.0 + (t * 1.7).cos() * 45.0;
        }
        MovePattern::Pursuit => {
            let target = player_x - ALIEN_WIDTH / 2.0;
            let step = 90.0 * dt;
            let delta = target - alien.pos.x;
            alien.pos.x += delta.clamp(-step, step);
        }
    }
}

/// Vertical drift modulation for the patterns that weave in y
fn drift_scale(pattern: MovePattern, t: f32) -> f32 {
    match pattern {
        MovePattern::Figure8 => 1.0 + 0.5 * (t * 4.0).sin(),
        MovePattern::Spiral => 1.0 + 0.3 * (t * 2.5).sin(),
        _ => 1.0,
    }
}

/// Boss phase machine: movement, one-way phase transitions, teleport, bursts
#[allow(clippy::too_many_arguments)]
fn update_boss(
    alien: &mut Alien,
    t: f32,
    dt: f32,
    player_x: f32,
    area_width: f32,
    clock: f64,
    rng: &mut rand_pcg::Pcg32,
    volley_origins: &mut Vec<Vec2>,
) {
    let Some(mut boss) = alien.boss else { return };

    // Health-fraction transitions; each one permanently raises speed
    let fraction = alien.health as f32 / boss.max_health as f32;
    if boss.phase == 1 && fraction <= BOSS_PHASE2_FRACTION {
        boss.phase = 2;
        boss.speed_scale *= BOSS_PHASE_SPEED_SCALE;
        log::info!("Boss entered phase 2");
    }
    if boss.phase == 2 && fraction <= BOSS_PHASE3_FRACTION {
        boss.phase = 3;
        boss.speed_scale *= BOSS_PHASE_SPEED_SCALE;
        log::info!("Boss entered phase 3");
    }

    match boss.phase {
        1 => {
            // Wide figure-8 weave
            alien.pos.x = alien.anchor_x + (t * 1.2).sin() * 140.0;
        }
        2 => {
            // Spiral toward the player with a cosine wobble
            let target = player_x - BOSS_WIDTH / 2.0;
            let steer = (target - alien.pos.x).signum() * 100.0 * boss.speed_scale * dt;
            alien.pos.x += steer + (t * 2.0).cos() * 80.0 * dt;
        }
        _ => {
            // Chaotic compound weave
            alien.pos.x = alien.anchor_x + (t * 2.7).sin() * 120.0 + (t * 1.3).cos() * 60.0;
            if clock - boss.last_burst_ms >= BOSS_BURST_INTERVAL_MS {
                boss.last_burst_ms = clock;
                volley_origins.push(alien.aabb().center());
            }
        }
    }

    alien.pos.y += alien.speed * boss.speed_scale * BOSS_DESCENT_FACTOR * dt;

    // Teleport rolls start at phase 2 and run on a fixed cadence
    if boss.phase >= 2 && clock - boss.last_teleport_roll_ms >= BOSS_TELEPORT_CHECK_MS {
        boss.last_teleport_roll_ms = clock;
        if rng.random_bool(BOSS_TELEPORT_CHANCE) {
            alien.pos.x = rng.random_range(0.0..(area_width - BOSS_WIDTH));
            alien.pos.y = 0.0;
            alien.anchor_x = alien.pos.x;
            log::debug!("Boss teleported to x={:.0}", alien.pos.x);
            if rng.random_bool(BOSS_VOLLEY_ON_TELEPORT_CHANCE) {
                volley_origins.push(alien.aabb().center());
            }
        }
    }

    alien.boss = Some(boss);
}

fn update_projectiles(session: &mut Session, presentation: &mut dyn Presentation, dt: f32) {
    let area = session.area;
    session.projectiles.retain_mut(|projectile| {
        projectile.pos += projectile.vel * dt;
        let keep = projectile.pos.y > -PROJECTILE_CULL_MARGIN - PROJECTILE_HEIGHT
            && projectile.pos.y < area.height + PROJECTILE_CULL_MARGIN
            && projectile.pos.x > -PROJECTILE_CULL_MARGIN - PROJECTILE_WIDTH
            && projectile.pos.x < area.width + PROJECTILE_CULL_MARGIN;
        if !keep {
            presentation.destroy_handle(projectile.handle);
        }
        keep
    });
}

fn update_pickups(session: &mut Session, presentation: &mut dyn Presentation, dt: f32) {
    let area = session.area;
    session.power_ups.retain_mut(|power_up| {
        power_up.pos.y += PICKUP_DRIFT_SPEED * dt;
        let keep = power_up.pos.y <= area.height;
        if !keep {
            presentation.destroy_handle(power_up.handle);
        }
        keep
    });
    session.health_pickups.retain_mut(|pickup| {
        pickup.pos.y += PICKUP_DRIFT_SPEED * dt;
        let keep = pickup.pos.y <= area.height;
        if !keep {
            presentation.destroy_handle(pickup.handle);
        }
        keep
    });
}
