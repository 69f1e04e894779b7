//! Collision and scoring resolver
//!
//! Three passes run after movement, each a plain O(n*m) sweep. Removal is
//! order-sensitive, so every scan iterates in reverse; a removal mid-scan
//! never shifts an index the scan still cares about.

use super::state::{LaserEffect, PowerUpKind, ProjectileOwner, Session};
use super::wave;
use crate::consts::*;
use crate::presentation::{EntityKind, Presentation};

/// Run all collision passes for this tick
pub fn resolve(session: &mut Session, presentation: &mut dyn Presentation) {
    player_shots_vs_aliens(session, presentation);
    threats_vs_ship(session, presentation);
    player_shots_vs_pickups(session, presentation);
    laser_sweep(session, presentation);
    cull_escaped_aliens(session, presentation);
}

/// Pass 1: player projectiles damage aliens; kills score
fn player_shots_vs_aliens(session: &mut Session, presentation: &mut dyn Presentation) {
    for pi in (0..session.projectiles.len()).rev() {
        if session.projectiles[pi].owner != ProjectileOwner::Player {
            continue;
        }
        let shot_box = session.projectiles[pi].aabb();

        for ai in (0..session.aliens.len()).rev() {
            if !shot_box.intersects(&session.aliens[ai].aabb()) {
                continue;
            }

            let shot = session.projectiles.remove(pi);
            presentation.destroy_handle(shot.handle);

            let killed = {
                let alien = &mut session.aliens[ai];
                alien.health -= 1;
                alien.health <= 0
            };
            if killed {
                let alien = session.aliens.remove(ai);
                presentation.destroy_handle(alien.handle);
                let points = if alien.is_boss() {
                    session.bosses_defeated += 1;
                    log::info!("Boss defeated ({} total)", session.bosses_defeated);
                    BOSS_KILL_SCORE
                } else {
                    (BASE_KILL_SCORE * session.config.score_multiplier).round() as u32
                };
                wave::award_score(session, points);
            }
            // The projectile is spent either way
            break;
        }
    }
}

/// Pass 2: aliens and alien projectiles hurt the ship
fn threats_vs_ship(session: &mut Session, presentation: &mut dyn Presentation) {
    let ship_box = session.ship.aabb();

    for ai in (0..session.aliens.len()).rev() {
        if ship_box.intersects(&session.aliens[ai].aabb()) {
            let alien = session.aliens.remove(ai);
            presentation.destroy_handle(alien.handle);
            session.set_health(session.health - session.config.health_loss);
        }
    }

    for pi in (0..session.projectiles.len()).rev() {
        if session.projectiles[pi].owner != ProjectileOwner::Alien {
            continue;
        }
        if ship_box.intersects(&session.projectiles[pi].aabb()) {
            let shot = session.projectiles.remove(pi);
            presentation.destroy_handle(shot.handle);
            session.set_health(session.health - session.config.health_loss);
        }
    }
}

/// Pass 3: player projectiles collect power-ups and health pickups
fn player_shots_vs_pickups(session: &mut Session, presentation: &mut dyn Presentation) {
    for pi in (0..session.projectiles.len()).rev() {
        if session.projectiles[pi].owner != ProjectileOwner::Player {
            continue;
        }
        let shot_box = session.projectiles[pi].aabb();
        let mut consumed = false;

        for ui in (0..session.power_ups.len()).rev() {
            if !shot_box.intersects(&session.power_ups[ui].aabb()) {
                continue;
            }
            let power_up = session.power_ups.remove(ui);
            presentation.destroy_handle(power_up.handle);
            apply_power_up(session, power_up.kind, presentation);
            consumed = true;
            break;
        }

        if !consumed {
            for hi in (0..session.health_pickups.len()).rev() {
                if !shot_box.intersects(&session.health_pickups[hi].aabb()) {
                    continue;
                }
                let pickup = session.health_pickups.remove(hi);
                presentation.destroy_handle(pickup.handle);
                session.set_health(MAX_HEALTH);
                log::info!("Health pickup collected, full heal");
                consumed = true;
                break;
            }
        }

        if consumed {
            let shot = session.projectiles.remove(pi);
            presentation.destroy_handle(shot.handle);
        }
    }
}

fn apply_power_up(session: &mut Session, kind: PowerUpKind, presentation: &mut dyn Presentation) {
    match kind {
        PowerUpKind::Laser => {
            let expires_at_ms = session.clock_ms + LASER_DURATION_MS;
            match &mut session.effects.laser {
                // Re-collection extends the running beam
                Some(laser) => laser.expires_at_ms = expires_at_ms,
                None => {
                    let x = session.ship.pos.x + SHIP_WIDTH / 2.0 - LASER_WIDTH / 2.0;
                    let handle = presentation.create_handle(EntityKind::LaserBeam, x, 0.0);
                    session.effects.laser = Some(LaserEffect {
                        handle,
                        expires_at_ms,
                    });
                }
            }
            log::info!("Laser online");
        }
        PowerUpKind::SpeedBoost => {
            session.effects.speed_boost_until = Some(session.clock_ms + SPEED_BOOST_DURATION_MS);
            log::info!("Speed boost online");
        }
    }
}

/// While the laser is live, clear regular aliens that crossed the midline
/// and sit in the beam's horizontal extent. Bosses ride the beam out.
fn laser_sweep(session: &mut Session, presentation: &mut dyn Presentation) {
    if session.effects.laser.is_none() {
        return;
    }
    let midline = session.area.height / 2.0;
    let beam_left = session.ship.pos.x + SHIP_WIDTH / 2.0 - LASER_WIDTH / 2.0;
    let beam_right = beam_left + LASER_WIDTH;

    for ai in (0..session.aliens.len()).rev() {
        let alien = &session.aliens[ai];
        if alien.is_boss() {
            continue;
        }
        let hit_box = alien.aabb();
        if hit_box.center().y >= midline && hit_box.left < beam_right && hit_box.right > beam_left {
            let alien = session.aliens.remove(ai);
            presentation.destroy_handle(alien.handle);
            wave::award_score(session, LASER_KILL_SCORE);
        }
    }
}

/// Aliens that escape off the bottom cost health and score nothing.
/// Exactly at the bottom edge is still in play; past it is out.
fn cull_escaped_aliens(session: &mut Session, presentation: &mut dyn Presentation) {
    let height = session.area.height;
    for ai in (0..session.aliens.len()).rev() {
        if session.aliens[ai].pos.y > height {
            let alien = session.aliens.remove(ai);
            presentation.destroy_handle(alien.handle);
            let penalty = if alien.is_boss() {
                session.config.missed_alien_penalty * MISSED_BOSS_PENALTY_SCALE
            } else {
                session.config.missed_alien_penalty
            };
            session.set_health(session.health - penalty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::presentation::HeadlessPresentation;
    use crate::sim::movement::MovePattern;
    use crate::sim::state::{Alien, BossState, HealthPickup, PowerUp, Projectile};
    use glam::Vec2;

    fn session() -> (Session, HeadlessPresentation) {
        let mut p = HeadlessPresentation::new(800.0, 600.0);
        let s = Session::new(Difficulty::Normal, 42, &mut p);
        (s, p)
    }

    fn push_alien(
        s: &mut Session,
        p: &mut HeadlessPresentation,
        x: f32,
        y: f32,
        health: i32,
    ) -> u32 {
        let id = s.next_entity_id();
        let handle = p.create_handle(EntityKind::Alien, x, y);
        s.aliens.push(Alien {
            id,
            handle,
            pos: Vec2::new(x, y),
            anchor_x: x,
            health,
            speed: 72.0,
            pattern: MovePattern::Zigzag,
            bounce_dir: 1.0,
            spawned_at_ms: 0.0,
            boss: None,
        });
        id
    }

    fn push_boss(s: &mut Session, p: &mut HeadlessPresentation, x: f32, y: f32, health: i32) -> u32 {
        let id = s.next_entity_id();
        let handle = p.create_handle(EntityKind::Boss, x, y);
        s.aliens.push(Alien {
            id,
            handle,
            pos: Vec2::new(x, y),
            anchor_x: x,
            health,
            speed: 72.0,
            pattern: MovePattern::SideToSide,
            bounce_dir: 1.0,
            spawned_at_ms: 0.0,
            boss: Some(BossState::new(0.0)),
        });
        id
    }

    fn push_shot(
        s: &mut Session,
        p: &mut HeadlessPresentation,
        x: f32,
        y: f32,
        owner: ProjectileOwner,
    ) -> u32 {
        let kind = match owner {
            ProjectileOwner::Player => EntityKind::PlayerProjectile,
            ProjectileOwner::Alien => EntityKind::AlienProjectile,
        };
        let id = s.next_entity_id();
        let handle = p.create_handle(kind, x, y);
        s.projectiles.push(Projectile {
            id,
            handle,
            owner,
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, -600.0),
        });
        id
    }

    #[test]
    fn test_single_shot_kills_one_health_alien() {
        let (mut s, mut p) = session();
        push_alien(&mut s, &mut p, 100.0, 100.0, 1);
        push_shot(&mut s, &mut p, 120.0, 110.0, ProjectileOwner::Player);

        resolve(&mut s, &mut p);

        assert!(s.aliens.is_empty());
        assert!(s.projectiles.is_empty());
        // 10 base * 1.5 normal multiplier
        assert_eq!(s.score, 15);
        // Only the ship handle survives: no duplicate or missed destroys
        assert_eq!(p.live_handles(), 1);
    }

    #[test]
    fn test_shot_wounds_tough_alien_without_killing() {
        let (mut s, mut p) = session();
        let id = push_alien(&mut s, &mut p, 100.0, 100.0, 2);
        push_shot(&mut s, &mut p, 120.0, 110.0, ProjectileOwner::Player);

        resolve(&mut s, &mut p);

        assert_eq!(s.aliens.len(), 1);
        assert_eq!(s.aliens[0].id, id);
        assert_eq!(s.aliens[0].health, 1);
        assert!(s.projectiles.is_empty());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_boss_kill_scores_flat_value() {
        let (mut s, mut p) = session();
        push_boss(&mut s, &mut p, 300.0, 100.0, 1);
        push_shot(&mut s, &mut p, 350.0, 120.0, ProjectileOwner::Player);

        resolve(&mut s, &mut p);

        assert!(s.aliens.is_empty());
        assert_eq!(s.score, BOSS_KILL_SCORE);
        assert_eq!(s.bosses_defeated, 1);
    }

    #[test]
    fn test_outcome_is_scan_order_independent() {
        // Two disjoint overlapping pairs must produce the same destroyed set
        // and score delta regardless of insertion order.
        let mut totals = Vec::new();
        for reversed in [false, true] {
            let (mut s, mut p) = session();
            let mut spots = vec![(100.0, 100.0), (500.0, 200.0)];
            if reversed {
                spots.reverse();
            }
            for (x, y) in spots {
                push_alien(&mut s, &mut p, x, y, 1);
                push_shot(&mut s, &mut p, x + 10.0, y + 5.0, ProjectileOwner::Player);
            }
            resolve(&mut s, &mut p);
            assert!(s.aliens.is_empty());
            assert!(s.projectiles.is_empty());
            totals.push(s.score);
        }
        assert_eq!(totals[0], totals[1]);
    }

    #[test]
    fn test_alien_ramming_ship_costs_health() {
        let (mut s, mut p) = session();
        let ship_pos = s.ship.pos;
        push_alien(&mut s, &mut p, ship_pos.x, ship_pos.y, 1);

        resolve(&mut s, &mut p);

        assert!(s.aliens.is_empty());
        assert_eq!(s.health, 100 - s.config.health_loss);
        assert!(!s.game_over);
    }

    #[test]
    fn test_enemy_shot_hitting_ship_costs_health() {
        let (mut s, mut p) = session();
        let ship_pos = s.ship.pos;
        push_shot(&mut s, &mut p, ship_pos.x + 10.0, ship_pos.y + 5.0, ProjectileOwner::Alien);

        resolve(&mut s, &mut p);

        assert!(s.projectiles.is_empty());
        assert_eq!(s.health, 100 - s.config.health_loss);
    }

    #[test]
    fn test_fatal_hit_sets_game_over() {
        let (mut s, mut p) = session();
        s.set_health(s.config.health_loss);
        let ship_pos = s.ship.pos;
        push_alien(&mut s, &mut p, ship_pos.x, ship_pos.y, 1);

        resolve(&mut s, &mut p);

        assert_eq!(s.health, 0);
        assert!(s.game_over);
    }

    #[test]
    fn test_shooting_laser_power_up_arms_the_beam() {
        let (mut s, mut p) = session();
        s.clock_ms = 5000.0;
        let id = s.next_entity_id();
        let handle = p.create_handle(EntityKind::PowerUp, 200.0, 50.0);
        s.power_ups.push(PowerUp {
            id,
            handle,
            kind: PowerUpKind::Laser,
            pos: Vec2::new(200.0, 50.0),
        });
        push_shot(&mut s, &mut p, 210.0, 60.0, ProjectileOwner::Player);

        resolve(&mut s, &mut p);

        assert!(s.power_ups.is_empty());
        assert!(s.projectiles.is_empty());
        let laser = s.effects.laser.expect("laser should be active");
        assert_eq!(laser.expires_at_ms, 5000.0 + LASER_DURATION_MS);
    }

    #[test]
    fn test_shooting_speed_boost_sets_ship_factor() {
        let (mut s, mut p) = session();
        let id = s.next_entity_id();
        let handle = p.create_handle(EntityKind::PowerUp, 200.0, 50.0);
        s.power_ups.push(PowerUp {
            id,
            handle,
            kind: PowerUpKind::SpeedBoost,
            pos: Vec2::new(200.0, 50.0),
        });
        push_shot(&mut s, &mut p, 210.0, 60.0, ProjectileOwner::Player);

        resolve(&mut s, &mut p);

        assert_eq!(s.ship_speed_factor(), SPEED_BOOST_FACTOR);
    }

    #[test]
    fn test_shooting_health_pickup_heals_fully() {
        let (mut s, mut p) = session();
        s.set_health(20);
        let id = s.next_entity_id();
        let handle = p.create_handle(EntityKind::HealthPickup, 200.0, 50.0);
        s.health_pickups.push(HealthPickup {
            id,
            handle,
            pos: Vec2::new(200.0, 50.0),
        });
        push_shot(&mut s, &mut p, 210.0, 60.0, ProjectileOwner::Player);

        resolve(&mut s, &mut p);

        assert!(s.health_pickups.is_empty());
        assert_eq!(s.health, MAX_HEALTH);
    }

    #[test]
    fn test_laser_clears_aliens_past_midline_only() {
        let (mut s, mut p) = session();
        s.effects.laser = Some(LaserEffect {
            handle: p.create_handle(EntityKind::LaserBeam, 0.0, 0.0),
            expires_at_ms: f64::MAX,
        });
        let beam_x = s.ship.pos.x + SHIP_WIDTH / 2.0;

        // In the beam and below the midline: cleared
        push_alien(&mut s, &mut p, beam_x - ALIEN_WIDTH / 2.0, 400.0, 1);
        // In the beam but above the midline: survives
        let high = push_alien(&mut s, &mut p, beam_x - ALIEN_WIDTH / 2.0, 50.0, 1);
        // Below the midline but out of the beam: survives
        let aside = push_alien(&mut s, &mut p, beam_x + 200.0, 400.0, 1);

        resolve(&mut s, &mut p);

        let survivors: Vec<u32> = s.aliens.iter().map(|a| a.id).collect();
        assert_eq!(survivors, vec![high, aside]);
        assert_eq!(s.score, LASER_KILL_SCORE);
    }

    #[test]
    fn test_laser_does_not_touch_bosses() {
        let (mut s, mut p) = session();
        s.effects.laser = Some(LaserEffect {
            handle: p.create_handle(EntityKind::LaserBeam, 0.0, 0.0),
            expires_at_ms: f64::MAX,
        });
        let beam_x = s.ship.pos.x + SHIP_WIDTH / 2.0;
        push_boss(&mut s, &mut p, beam_x - BOSS_WIDTH / 2.0, 400.0, 100);

        resolve(&mut s, &mut p);

        assert!(s.boss_alive());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_escape_boundary_is_exclusive() {
        let (mut s, mut p) = session();
        // Exactly at the bottom edge: still in play
        let edge = push_alien(&mut s, &mut p, 100.0, 600.0, 1);

        resolve(&mut s, &mut p);
        assert_eq!(s.aliens.len(), 1);
        assert_eq!(s.aliens[0].id, edge);
        assert_eq!(s.health, 100);

        // One pixel past: culled with a penalty, no score
        s.aliens[0].pos.y = 600.5;
        resolve(&mut s, &mut p);
        assert!(s.aliens.is_empty());
        assert_eq!(s.health, 100 - s.config.missed_alien_penalty);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_simultaneous_escapes_stack_penalties() {
        let (mut s, mut p) = session();
        push_alien(&mut s, &mut p, 100.0, 601.0, 1);
        push_alien(&mut s, &mut p, 400.0, 601.0, 1);

        resolve(&mut s, &mut p);

        assert!(s.aliens.is_empty());
        assert_eq!(s.health, 100 - 2 * s.config.missed_alien_penalty);
    }

    #[test]
    fn test_escaped_boss_costs_double() {
        let (mut s, mut p) = session();
        push_boss(&mut s, &mut p, 100.0, 601.0, 100);

        resolve(&mut s, &mut p);

        assert!(s.aliens.is_empty());
        let expected = 100 - s.config.missed_alien_penalty * MISSED_BOSS_PENALTY_SCALE;
        assert_eq!(s.health, expected);
    }
}
