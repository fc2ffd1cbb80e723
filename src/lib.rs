//! Sphere Catch - A catch-the-falling-spheres arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, catch/miss, lifecycle)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser key mapping
//! - `hud`: Host-side display model and difficulty progression
//! - `tuning`: Data-driven game balance
//! - `storage`: JSON values in LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod tuning;

pub use highscores::HighScores;
pub use hud::{Arcade, Hud};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play volume dimensions (world units)
    pub const AREA_WIDTH: f32 = 10.0;
    pub const AREA_HEIGHT: f32 = 5.0;
    pub const AREA_DEPTH: f32 = 10.0;

    /// Falling sphere defaults
    pub const SPHERE_RADIUS: f32 = 0.5;
    /// Units per frame; vertical motion is tracked in f64
    pub const SPHERE_FALL_SPEED: f64 = 0.03;

    /// Catcher (bucket) defaults
    pub const CATCHER_RADIUS: f32 = 1.0;
    /// Vertical capture band
    pub const CATCHER_HEIGHT: f64 = 0.5;
    /// Units per frame, per held axis
    pub const CATCHER_SPEED: f32 = 0.1;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u32 = 3;

    /// Simulation-time milliseconds between spawn waves
    pub const WAVE_INTERVAL_MS: f64 = 5000.0;
    /// Delay between individual spawns within one wave
    pub const SPAWN_STAGGER_MS: f64 = 1000.0;

    /// Maximum simulation time advanced by one frame (backgrounded tabs)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Nominal frame length used when no timestamp is available yet
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Horizontal (ground plane) distance between two X/Z positions
#[inline]
pub fn ground_distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
