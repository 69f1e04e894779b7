//! Nova Strike entry point
//!
//! Headless demo loop: runs an autopiloted session against the render-less
//! presentation and prints the final snapshot as JSON.
//!
//! Usage: nova-strike [difficulty] [seed] [minutes]

use nova_strike::config::ConfigError;
use nova_strike::consts::*;
use nova_strike::presentation::HeadlessPresentation;
use nova_strike::sim::{self, Direction, Session};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = args.next().unwrap_or_else(|| "normal".to_string());
    let seed: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED_CAFE);
    let minutes: f64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2.0);

    let mut presentation = HeadlessPresentation::new(800.0, 600.0);
    let mut session = Session::init(&difficulty, seed, &mut presentation)?;
    log::info!("Nova Strike: {difficulty} autopilot run, seed {seed}");

    let total_frames = (minutes * 60.0 * 60.0) as u64;
    let mut next_report_ms = 10_000.0;
    for _ in 0..total_frames {
        autopilot(&mut session, &mut presentation);
        sim::tick(&mut session, &mut presentation, FRAME_MS);

        if session.clock_ms >= next_report_ms {
            next_report_ms += 10_000.0;
            let snap = session.snapshot();
            log::info!(
                "t={:>4.0}s score={} wave={} health={} aliens={}",
                session.clock_ms / 1000.0,
                snap.score,
                snap.wave,
                snap.health,
                session.aliens.len()
            );
        }
        if session.game_over {
            log::info!("Game over at t={:.1}s", session.clock_ms / 1000.0);
            break;
        }
    }

    let snapshot = session.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
    );
    Ok(())
}

/// Steer under the lowest alien and keep the trigger held
fn autopilot(session: &mut Session, presentation: &mut HeadlessPresentation) {
    let ship_center = session.ship.pos.x + SHIP_WIDTH / 2.0;
    let target = session
        .aliens
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|alien| alien.pos.x + alien.width() / 2.0);

    if let Some(target_x) = target {
        if target_x < ship_center - SHIP_STEP {
            sim::move_ship(session, Direction::Left, presentation);
        } else if target_x > ship_center + SHIP_STEP {
            sim::move_ship(session, Direction::Right, presentation);
        }
    }
    sim::fire_weapon(session, presentation);
}
