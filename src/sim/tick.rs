//! Per-frame simulation step
//!
//! Moves the catcher from held input, drops every sphere by its fall speed and
//! resolves catches and misses. Speeds are per frame, not per second.

use glam::Vec2;

use super::collision::{Contact, classify};
use super::input::{Direction, InputTracker};
use super::state::{GameEvent, Session, Visit};

/// What a single frame did to the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// Lives reached zero during this frame
    pub game_over: bool,
}

/// Move the catcher by its speed along every held axis, then clamp into bounds
///
/// Diagonals are not normalized: holding two axes moves full speed on each.
pub fn move_catcher(session: &mut Session, input: &InputTracker) {
    let catcher = &mut session.catcher;
    let mut delta = Vec2::ZERO;
    if input.is_pressed(Direction::Left) {
        delta.x -= catcher.speed;
    }
    if input.is_pressed(Direction::Right) {
        delta.x += catcher.speed;
    }
    if input.is_pressed(Direction::Up) {
        delta.y -= catcher.speed;
    }
    if input.is_pressed(Direction::Down) {
        delta.y += catcher.speed;
    }
    if delta != Vec2::ZERO {
        catcher.pos = session.volume.clamp(catcher.pos + delta, catcher.radius);
    }
}

/// Advance the session by one frame
///
/// Does nothing once lives are exhausted. When the last life is lost the
/// remaining spheres are left untouched for this frame.
pub fn tick(session: &mut Session, input: &InputTracker) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if session.state.is_over() {
        return outcome;
    }

    session.frame += 1;
    move_catcher(session, input);

    let Session {
        catcher,
        objects,
        state,
        ..
    } = session;

    objects.for_each_removable(|object| {
        if outcome.game_over {
            return Visit::Keep;
        }

        object.pos.y -= object.fall_speed;

        match classify(object, catcher) {
            Contact::Caught => {
                state.score = state.score.saturating_add(1);
                outcome.events.push(GameEvent::Caught {
                    id: object.id,
                    score: state.score,
                });
                Visit::Remove
            }
            Contact::Missed => {
                state.lives = state.lives.saturating_sub(1);
                outcome.events.push(GameEvent::Missed {
                    id: object.id,
                    lives: state.lives,
                });
                if state.is_over() {
                    outcome.game_over = true;
                    outcome.events.push(GameEvent::GameOver {
                        score: state.score,
                        level: state.level,
                    });
                }
                Visit::Remove
            }
            Contact::Airborne => Visit::Keep,
        }
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::DVec3;

    fn tuning() -> Tuning {
        Tuning {
            sphere_fall_speed: 0.7,
            ..Tuning::default()
        }
    }

    fn session() -> Session {
        Session::new(&tuning(), 0, 1)
    }

    fn drop_sphere(session: &mut Session, x: f64, z: f64) -> u32 {
        let t = tuning();
        let y = session.volume.height as f64;
        session
            .objects
            .spawn(DVec3::new(x, y, z), t.sphere_radius, t.sphere_fall_speed, 0)
    }

    #[test]
    fn test_catch_above_catcher() {
        let mut session = session();
        let id = drop_sphere(&mut session, 0.0, 0.0);
        let input = InputTracker::new();

        // 5.0 - 0.7n enters the 0.5 band at n = 7
        for _ in 0..6 {
            assert!(tick(&mut session, &input).events.is_empty());
        }
        let outcome = tick(&mut session, &input);
        assert_eq!(outcome.events, vec![GameEvent::Caught { id, score: 1 }]);
        assert_eq!(session.state.score, 1);
        assert!(session.objects.get(id).is_none());
    }

    #[test]
    fn test_default_descent_catch_frame() {
        let mut session = Session::new(&Tuning::default(), 0, 1);
        let id = session.objects.spawn(DVec3::new(0.0, 5.0, 0.0), 0.5, 0.03, 0);
        let input = InputTracker::new();

        // After 150 steps of 0.03 the height is just above 0.5, still outside the band
        for _ in 0..150 {
            assert!(tick(&mut session, &input).events.is_empty());
        }
        assert!(session.objects.get(id).is_some_and(|o| o.pos.y > 0.5));

        let outcome = tick(&mut session, &input);
        assert_eq!(outcome.events, vec![GameEvent::Caught { id, score: 1 }]);
        assert_eq!(session.frame, 151);
    }

    #[test]
    fn test_miss_far_from_catcher() {
        let mut session = session();
        let id = drop_sphere(&mut session, 4.0, 0.0);
        let input = InputTracker::new();

        // ceil((5.0 + 1.0) / 0.7) = 9
        for _ in 0..8 {
            assert!(tick(&mut session, &input).events.is_empty());
        }
        let outcome = tick(&mut session, &input);
        assert_eq!(outcome.events, vec![GameEvent::Missed { id, lives: 2 }]);
        assert_eq!(session.state.lives, 2);
        assert!(session.objects.is_empty());
    }

    #[test]
    fn test_last_life_ends_frame() {
        let mut session = session();
        session.state.lives = 1;
        session.state.score = 4;
        session.state.level = 2;
        for x in [-4.0, 4.0, 3.5] {
            drop_sphere(&mut session, x, 4.0);
        }
        let input = InputTracker::new();

        let mut outcome = TickOutcome::default();
        for _ in 0..9 {
            outcome = tick(&mut session, &input);
        }
        assert!(outcome.game_over);
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(
            outcome.events[1],
            GameEvent::GameOver { score: 4, level: 2 }
        );
        assert_eq!(session.state.lives, 0);
        // Untouched survivors stay where they were
        assert_eq!(session.objects.len(), 2);

        // Nothing moves or fires after game over
        assert_eq!(tick(&mut session, &input), TickOutcome::default());
    }

    #[test]
    fn test_catcher_moves_and_clamps() {
        let mut session = session();
        let mut input = InputTracker::new();
        input.set_pressed(Direction::Right, true);
        input.set_pressed(Direction::Up, true);

        tick(&mut session, &input);
        assert!((session.catcher.pos - Vec2::new(0.1, -0.1)).length() < 1e-6);

        for _ in 0..200 {
            tick(&mut session, &input);
        }
        assert_eq!(session.catcher.pos, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut session = session();
        let mut input = InputTracker::new();
        input.set_pressed(Direction::Left, true);
        input.set_pressed(Direction::Right, true);
        for _ in 0..10 {
            tick(&mut session, &input);
        }
        assert_eq!(session.catcher.pos, Vec2::ZERO);
    }

    #[test]
    fn test_moving_catcher_intercepts() {
        let mut input = InputTracker::new();
        input.set_pressed(Direction::Right, true);

        // After 7 frames the catcher is at x = 0.7, within 1.5 of x = 2.0
        let mut session = session();
        let id = drop_sphere(&mut session, 2.0, 0.0);
        for _ in 0..7 {
            tick(&mut session, &input);
        }
        assert_eq!(session.state.score, 1);
        assert!(session.objects.get(id).is_none());

        // ...but not within reach of x = 3.0 before the sphere leaves the band
        let mut session = self::session();
        drop_sphere(&mut session, 3.0, 0.0);
        for _ in 0..9 {
            tick(&mut session, &input);
        }
        assert_eq!(session.state.score, 0);
        assert_eq!(session.state.lives, 2);
    }
}
