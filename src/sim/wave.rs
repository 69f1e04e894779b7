//! Score-driven wave progression
//!
//! The wave is a pure function of score, recomputed on every score update.
//! A transition fires exactly once per crossing and retunes the weapon and
//! spawn policy. Live aliens persist across transitions.

use super::state::Session;
use crate::consts::*;

/// Ship weapon patterns, cycling every four waves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePattern {
    Single,
    Double,
    Triple,
    QuadCenter,
}

impl FirePattern {
    /// Weapon tier table: tier = ((wave - 1) % 4) + 1
    pub fn for_wave(wave: u32) -> Self {
        match (wave.saturating_sub(1)) % 4 {
            0 => FirePattern::Single,
            1 => FirePattern::Double,
            2 => FirePattern::Triple,
            _ => FirePattern::QuadCenter,
        }
    }

    /// Shot cooldown shortens monotonically with tier
    pub fn cooldown_ms(self) -> f64 {
        match self {
            FirePattern::Single => BASE_FIRE_COOLDOWN_MS,
            FirePattern::Double => 210.0,
            FirePattern::Triple => 170.0,
            FirePattern::QuadCenter => 130.0,
        }
    }

    /// Horizontal muzzle offsets, one projectile each
    pub fn offsets(self) -> &'static [f32] {
        match self {
            FirePattern::Single => &[0.0],
            FirePattern::Double => &[-12.0, 12.0],
            FirePattern::Triple => &[-18.0, 0.0, 18.0],
            FirePattern::QuadCenter => &[-26.0, -12.0, 0.0, 12.0, 26.0],
        }
    }
}

/// `wave = score / points_per_wave + 1`
#[inline]
pub fn wave_for_score(score: u32, points_per_wave: u32) -> u32 {
    score / points_per_wave + 1
}

/// Add points and resynchronize the wave
pub fn award_score(session: &mut Session, points: u32) {
    session.score += points;
    sync_wave(session);
}

/// Recompute the wave from score; a change triggers the transition once
pub fn sync_wave(session: &mut Session) {
    let computed = wave_for_score(session.score, session.config.points_per_wave);
    if computed != session.wave {
        transition(session, computed);
    }
}

fn transition(session: &mut Session, new_wave: u32) {
    session.wave = new_wave;
    session.is_boss_wave = new_wave % BOSS_WAVE_INTERVAL == 0;
    session.ship.weapon = FirePattern::for_wave(new_wave);
    // Boss waves stretch the spawn interval; regulars come back to full rate
    session.spawn_interval_scale = if session.is_boss_wave {
        BOSS_WAVE_SPAWN_SCALE
    } else {
        1.0
    };
    // Restart the regular-spawn gate under the new policy
    session.timers.last_alien_spawn = session.clock_ms;

    log::info!(
        "Wave {new_wave}{} - weapon {:?}",
        if session.is_boss_wave { " (boss wave)" } else { "" },
        session.ship.weapon
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::presentation::HeadlessPresentation;
    use proptest::prelude::*;

    fn session() -> (Session, HeadlessPresentation) {
        let mut p = HeadlessPresentation::new(800.0, 600.0);
        let s = Session::new(Difficulty::Normal, 42, &mut p);
        (s, p)
    }

    #[test]
    fn test_wave_crossing_transitions_exactly_once() {
        let (mut s, _p) = session();
        s.score = 90;
        s.clock_ms = 4000.0;
        assert_eq!(s.wave, 1);

        award_score(&mut s, 10);
        assert_eq!(s.score, 100);
        assert_eq!(s.wave, 2);
        assert_eq!(s.ship.weapon, FirePattern::Double);
        // Transition restarted the spawn gate at the current clock
        assert_eq!(s.timers.last_alien_spawn, 4000.0);

        // Further score inside wave 2 must not retrigger the transition
        s.clock_ms = 9000.0;
        award_score(&mut s, 5);
        assert_eq!(s.wave, 2);
        assert_eq!(s.timers.last_alien_spawn, 4000.0);
    }

    #[test]
    fn test_boss_wave_policy() {
        let (mut s, _p) = session();
        s.score = 490;
        award_score(&mut s, 10);

        assert_eq!(s.wave, 5);
        assert!(s.is_boss_wave);
        assert_eq!(s.spawn_interval_scale, BOSS_WAVE_SPAWN_SCALE);
        // Tier cycles back to single shot on wave 5
        assert_eq!(s.ship.weapon, FirePattern::Single);

        // Leaving the boss wave restores the spawn rate
        award_score(&mut s, 100);
        assert_eq!(s.wave, 6);
        assert!(!s.is_boss_wave);
        assert_eq!(s.spawn_interval_scale, 1.0);
    }

    #[test]
    fn test_weapon_tier_table() {
        assert_eq!(FirePattern::for_wave(1), FirePattern::Single);
        assert_eq!(FirePattern::for_wave(2), FirePattern::Double);
        assert_eq!(FirePattern::for_wave(3), FirePattern::Triple);
        assert_eq!(FirePattern::for_wave(4), FirePattern::QuadCenter);
        assert_eq!(FirePattern::for_wave(5), FirePattern::Single);
    }

    #[test]
    fn test_cooldown_shortens_with_tier() {
        let tiers = [
            FirePattern::Single,
            FirePattern::Double,
            FirePattern::Triple,
            FirePattern::QuadCenter,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0].cooldown_ms() > pair[1].cooldown_ms());
        }
    }

    #[test]
    fn test_offsets_include_center_shot() {
        assert!(FirePattern::Single.offsets().contains(&0.0));
        assert!(FirePattern::Triple.offsets().contains(&0.0));
        assert!(FirePattern::QuadCenter.offsets().contains(&0.0));
        assert_eq!(FirePattern::QuadCenter.offsets().len(), 5);
    }

    proptest! {
        #[test]
        fn prop_wave_formula_holds(score in 0u32..50_000) {
            let (mut s, _p) = session();
            award_score(&mut s, score);
            prop_assert_eq!(s.wave, score / s.config.points_per_wave + 1);
        }

        #[test]
        fn prop_wave_never_decreases(a in 0u32..1000, b in 0u32..1000) {
            let (mut s, _p) = session();
            award_score(&mut s, a);
            let before = s.wave;
            award_score(&mut s, b);
            prop_assert!(s.wave >= before);
        }
    }
}
