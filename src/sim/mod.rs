//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame steps, simulation-time spawning
//! - Seeded RNG only
//! - Session state passed explicitly, no globals
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod game_loop;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod volume;

pub use collision::{Contact, classify, in_capture_zone};
pub use difficulty::{Difficulty, difficulty_for_score, next_difficulty};
pub use game_loop::{GameLoop, GameObserver, StartConfig};
pub use input::{Direction, InputTracker};
pub use spawner::{PendingSpawn, Spawner};
pub use state::{
    Catcher, EntityRegistry, FallingObject, GameEvent, GamePhase, Session, SessionState, Visit,
};
pub use tick::{TickOutcome, move_catcher, tick};
pub use volume::PlayVolume;
