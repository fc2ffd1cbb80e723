//! Game loop controller
//!
//! Owns the session lifecycle (Idle -> Running -> GameOver), the spawner and
//! the RNG. The host calls `frame` once per display frame and receives
//! callbacks through a `GameObserver` synchronously inside that call.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::InputTracker;
use super::spawner::Spawner;
use super::state::{GameEvent, GamePhase, Session};
use super::tick::tick;
use crate::consts::MAX_FRAME_MS;
use crate::tuning::Tuning;

/// Host-side callbacks
pub trait GameObserver {
    /// Fired exactly once per catch
    fn on_score_update(&mut self, score: u32);
    /// Fired exactly once per miss
    fn on_lives_update(&mut self, lives: u32);
    /// Fired once per session; nothing fires after it
    fn on_game_over(&mut self, final_score: u32, level: u32);
    /// Fire-and-forget feedback (catch sound), emitted just before `on_score_update`
    fn on_catch(&mut self) {}
}

/// Discards every callback
impl GameObserver for () {
    fn on_score_update(&mut self, _score: u32) {}
    fn on_lives_update(&mut self, _lives: u32) {}
    fn on_game_over(&mut self, _final_score: u32, _level: u32) {}
}

/// Records callbacks as events (replays, tests)
impl GameObserver for Vec<GameEvent> {
    fn on_score_update(&mut self, score: u32) {
        self.push(GameEvent::Caught { id: 0, score });
    }

    fn on_lives_update(&mut self, lives: u32) {
        self.push(GameEvent::Missed { id: 0, lives });
    }

    fn on_game_over(&mut self, final_score: u32, level: u32) {
        self.push(GameEvent::GameOver {
            score: final_score,
            level,
        });
    }
}

/// Parameters for `GameLoop::start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartConfig {
    /// Spheres per wave
    pub sphere_count: u32,
    pub initial_score: Option<u32>,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            sphere_count: 1,
            initial_score: None,
        }
    }
}

pub struct GameLoop {
    tuning: Tuning,
    phase: GamePhase,
    session: Session,
    spawner: Spawner,
    rng: Pcg32,
}

impl GameLoop {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let session = Session::new(&tuning, 0, 1);
        let spawner = Spawner::new(1, tuning.wave_interval_ms, tuning.spawn_stagger_ms);
        Self {
            tuning,
            phase: GamePhase::Idle,
            session,
            spawner,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a fresh session; ignored while one is already running
    pub fn start(&mut self, config: StartConfig) -> bool {
        if self.phase == GamePhase::Running {
            log::warn!("start() ignored: session already running");
            return false;
        }

        let sphere_count = config.sphere_count.max(1);
        let initial_score = config.initial_score.unwrap_or(0);
        self.session = Session::new(&self.tuning, initial_score, sphere_count);
        self.spawner = Spawner::new(
            sphere_count,
            self.tuning.wave_interval_ms,
            self.tuning.spawn_stagger_ms,
        );
        self.spawner.start();
        self.phase = GamePhase::Running;

        log::info!(
            "Session started: score {}, lives {}, {} sphere(s) per wave",
            initial_score,
            self.session.state.lives,
            sphere_count
        );
        true
    }

    /// Cancel frame simulation and all spawning; safe to call in any state
    pub fn stop(&mut self) {
        self.spawner.stop();
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Idle;
            log::info!("Session stopped at score {}", self.session.state.score);
        }
    }

    /// Spheres per wave from the next wave on
    pub fn update_sphere_count(&mut self, count: u32) {
        if count == 0 {
            log::warn!("update_sphere_count(0) ignored");
            return;
        }
        self.spawner.set_batch_size(count);
        self.session.state.spawn_batch_size = count;
    }

    /// Apply a difficulty step; only meaningful while running
    pub fn update_difficulty(&mut self, batch_size: u32, level: u32) {
        if self.phase != GamePhase::Running {
            log::warn!("update_difficulty() ignored: no session running");
            return;
        }
        self.update_sphere_count(batch_size);
        self.session.state.level = level.max(1);
        log::info!("Level {}: {} sphere(s) per wave", level, batch_size);
    }

    /// Simulate one display frame of `dt_ms` milliseconds
    ///
    /// Returns whether the session is still running afterwards.
    pub fn frame<O>(&mut self, dt_ms: f64, input: &InputTracker, observer: &mut O) -> bool
    where
        O: GameObserver + ?Sized,
    {
        if self.phase != GamePhase::Running {
            return false;
        }

        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
        for spawn in self.spawner.advance(dt_ms) {
            let id = self.spawn_sphere();
            log::debug!("Spawned sphere {} (wave {})", id, spawn.wave_id);
        }

        let outcome = tick(&mut self.session, input);
        for event in outcome.events {
            match event {
                GameEvent::Caught { score, .. } => {
                    observer.on_catch();
                    observer.on_score_update(score);
                }
                GameEvent::Missed { lives, .. } => observer.on_lives_update(lives),
                GameEvent::GameOver { score, level } => {
                    self.spawner.stop();
                    self.phase = GamePhase::GameOver;
                    log::info!("Game over: score {}, level {}", score, level);
                    observer.on_game_over(score, level);
                }
            }
        }

        self.phase == GamePhase::Running
    }

    /// Drop a new sphere at a random spot at the top of the volume
    fn spawn_sphere(&mut self) -> u32 {
        let radius = self.tuning.sphere_radius;
        let volume = self.session.volume;
        let ground = volume.random_point(radius, &mut self.rng);
        let color = self.rng.random_range(0..=0xFF_FFFF);
        self.session.objects.spawn(
            DVec3::new(ground.x as f64, volume.height as f64, ground.y as f64),
            radius,
            self.tuning.sphere_fall_speed,
            color,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Current entities and counters (render handoff)
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
