//! Host-side display model
//!
//! `Hud` holds read-only copies of score, lives and level pushed by the game
//! loop's callbacks. `Arcade` wires a `GameLoop` to a `Hud`, feeds it keys and
//! applies the difficulty policy as the score climbs.

use crate::platform;
use crate::sim::{GameLoop, GameObserver, InputTracker, StartConfig, next_difficulty};
use crate::tuning::Tuning;

/// Which panel the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// "Ready to play?" with a start button
    #[default]
    Ready,
    Playing,
    /// Final score, level reached and a restart button
    GameOver,
}

/// Fire-and-forget audio cues for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Catch,
    Miss,
    LevelUp,
    GameOver,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub score: u32,
    pub level: u32,
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Spheres per wave
    pub sphere_count: u32,
    pub screen: Screen,
    /// Last finished session, kept for the game over panel
    pub last_outcome: Option<Outcome>,
    unrecorded: Option<Outcome>,
    cues: Vec<Cue>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            lives: crate::consts::STARTING_LIVES,
            level: 1,
            sphere_count: 1,
            screen: Screen::Ready,
            last_outcome: None,
            unrecorded: None,
            cues: Vec::new(),
        }
    }
}

impl Hud {
    /// Back to the start-of-session values
    pub fn reset(&mut self, lives: u32) {
        self.score = 0;
        self.lives = lives;
        self.level = 1;
        self.sphere_count = 1;
        self.unrecorded = None;
        self.cues.clear();
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// The finished session not yet stored anywhere, handed out once
    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.unrecorded.take()
    }
}

impl GameObserver for Hud {
    fn on_score_update(&mut self, score: u32) {
        self.score = score;
    }

    fn on_lives_update(&mut self, lives: u32) {
        self.lives = lives;
        self.cues.push(Cue::Miss);
    }

    fn on_game_over(&mut self, final_score: u32, level: u32) {
        let outcome = Outcome {
            score: final_score,
            level,
        };
        self.screen = Screen::GameOver;
        self.last_outcome = Some(outcome);
        self.unrecorded = Some(outcome);
        self.cues.push(Cue::GameOver);
    }

    fn on_catch(&mut self) {
        self.cues.push(Cue::Catch);
    }
}

/// A game loop plus the host state around it
pub struct Arcade {
    game: GameLoop,
    hud: Hud,
    input: InputTracker,
}

impl Arcade {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            game: GameLoop::new(tuning, seed),
            hud: Hud::default(),
            input: InputTracker::new(),
        }
    }

    /// Start (or restart) from a clean HUD
    pub fn start(&mut self) -> bool {
        let lives = self.game.tuning().starting_lives;
        self.hud.reset(lives);
        self.input.clear();
        let started = self.game.start(StartConfig {
            sphere_count: self.hud.sphere_count,
            initial_score: Some(self.hud.score),
        });
        if started {
            self.hud.screen = Screen::Playing;
        }
        started
    }

    pub fn stop(&mut self) {
        self.game.stop();
        self.input.clear();
    }

    /// Raw key event; returns whether the key is one the game uses
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        platform::apply_key(&mut self.input, key, pressed)
    }

    /// Drop every held key (focus loss)
    pub fn release_keys(&mut self) {
        self.input.clear();
    }

    /// Advance one display frame; returns whether the session is still running
    pub fn frame(&mut self, dt_ms: f64) -> bool {
        let running = self.game.frame(dt_ms, &self.input, &mut self.hud);
        if running {
            if let Some(step) = next_difficulty(self.hud.score, self.hud.sphere_count) {
                self.game.update_difficulty(step.batch_size, step.level);
                self.hud.sphere_count = step.batch_size;
                self.hud.level = step.level;
                self.hud.cues.push(Cue::LevelUp);
            }
        }
        running
    }

    pub fn game(&self) -> &GameLoop {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameLoop {
        &mut self.game
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use glam::DVec3;

    fn arcade() -> Arcade {
        let mut arcade = Arcade::new(Tuning::default(), 9);
        assert!(arcade.start());
        arcade
    }

    /// Sphere dropping straight into the stationary catcher
    fn feed_catch(arcade: &mut Arcade) {
        let session = arcade.game_mut().session_mut();
        let catcher = session.catcher.pos.as_dvec2();
        let pos = DVec3::new(catcher.x, 0.2, catcher.y);
        session.objects.spawn(pos, 0.5, 0.03, 0);
        arcade.frame(1.0);
    }

    fn feed_miss(arcade: &mut Arcade) {
        let session = arcade.game_mut().session_mut();
        session
            .objects
            .spawn(DVec3::new(4.0, -0.99, 4.0), 0.5, 0.03, 0);
        arcade.frame(1.0);
    }

    #[test]
    fn test_hud_follows_callbacks() {
        let mut arcade = arcade();
        assert_eq!(arcade.hud().screen, Screen::Playing);

        feed_catch(&mut arcade);
        feed_miss(&mut arcade);
        let hud = arcade.hud();
        assert_eq!((hud.score, hud.lives), (1, 2));
        assert_eq!(
            arcade.hud_mut().drain_cues(),
            vec![Cue::Catch, Cue::Miss]
        );
        assert!(arcade.hud_mut().drain_cues().is_empty());
    }

    #[test]
    fn test_difficulty_rises_with_score() {
        let mut arcade = arcade();
        for _ in 0..4 {
            feed_catch(&mut arcade);
        }
        assert_eq!(arcade.hud().level, 1);

        feed_catch(&mut arcade);
        assert_eq!((arcade.hud().level, arcade.hud().sphere_count), (2, 2));
        assert_eq!(arcade.game().spawner().batch_size(), 2);
        assert_eq!(arcade.game().session().state.level, 2);

        for _ in 0..7 {
            feed_catch(&mut arcade);
        }
        assert_eq!(arcade.hud().score, 12);
        assert_eq!((arcade.hud().level, arcade.hud().sphere_count), (3, 3));
        let level_ups = arcade
            .hud_mut()
            .drain_cues()
            .into_iter()
            .filter(|c| *c == Cue::LevelUp)
            .count();
        assert_eq!(level_ups, 2);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut arcade = arcade();
        feed_catch(&mut arcade);
        for _ in 0..3 {
            feed_miss(&mut arcade);
        }
        assert_eq!(arcade.game().phase(), GamePhase::GameOver);
        assert_eq!(arcade.hud().screen, Screen::GameOver);

        let outcome = Outcome { score: 1, level: 1 };
        assert_eq!(arcade.hud_mut().take_outcome(), Some(outcome));
        assert_eq!(arcade.hud_mut().take_outcome(), None);
        assert!(!arcade.frame(16.0));

        assert!(arcade.start());
        let hud = arcade.hud();
        assert_eq!((hud.score, hud.lives, hud.level, hud.sphere_count), (0, 3, 1, 1));
        assert_eq!(hud.last_outcome, Some(outcome));
        assert_eq!(arcade.game().spawner().batch_size(), 1);
    }

    #[test]
    fn test_keys_drive_catcher() {
        let mut arcade = arcade();
        assert!(arcade.key("ArrowRight", true));
        assert!(!arcade.key("x", true));
        for _ in 0..10 {
            arcade.frame(16.0);
        }
        assert!(arcade.game().session().catcher.pos.x > 0.9);

        arcade.release_keys();
        let x = arcade.game().session().catcher.pos.x;
        arcade.frame(16.0);
        assert_eq!(arcade.game().session().catcher.pos.x, x);
    }
}
