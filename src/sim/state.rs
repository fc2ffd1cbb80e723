//! Game state and core simulation types
//!
//! A `Session` is the explicit context for one play-through: it owns the
//! catcher, the live falling objects and the score/lives counters.

use glam::{DVec3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::volume::PlayVolume;
use crate::tuning::Tuning;

/// Lifecycle of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running yet
    #[default]
    Idle,
    /// Session in progress, frames are simulated
    Running,
    /// Lives ran out; terminal until the next start
    GameOver,
}

/// Something the simulation reports back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An object landed in the catcher
    Caught { id: u32, score: u32 },
    /// An object fell through the floor
    Missed { id: u32, lives: u32 },
    /// Lives reached zero
    GameOver { score: u32, level: u32 },
}

/// The player's bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    /// Ground position (x, z)
    pub pos: Vec2,
    /// Fixed vertical position
    pub y: f64,
    pub radius: f32,
    /// Vertical capture band
    pub height: f64,
    /// Units per frame along each held axis
    pub speed: f32,
}

impl Catcher {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            y: 0.0,
            radius: tuning.catcher_radius,
            height: tuning.catcher_height,
            speed: tuning.catcher_speed,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.pos.x, self.y as f32, self.pos.y)
    }
}

/// A sphere dropping through the play volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// World position (x, y, z), in double precision
    pub pos: DVec3,
    pub radius: f32,
    /// Units per frame
    pub fall_speed: f64,
    /// Packed 0xRRGGBB colour, render only
    pub color: u32,
}

impl FallingObject {
    /// Ground projection (x, z)
    pub fn ground_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x as f32, self.pos.z as f32)
    }

    /// Below this height the object counts as missed
    pub fn floor_threshold(&self) -> f64 {
        -2.0 * self.radius as f64
    }
}

/// Score, lives and difficulty of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub lives: u32,
    pub spawn_batch_size: u32,
    pub level: u32,
}

impl SessionState {
    pub fn new(initial_score: u32, lives: u32, spawn_batch_size: u32) -> Self {
        Self {
            score: initial_score,
            lives,
            spawn_batch_size: spawn_batch_size.max(1),
            level: 1,
        }
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }
}

/// What a visitor wants done with the object it just saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Remove,
}

/// Live falling objects
///
/// The single catcher is not registered here; it lives on `Session`.
/// Removal requested during a pass is applied once the pass finishes, so no
/// entry is ever skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    objects: Vec<FallingObject>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn add(&mut self, object: FallingObject) {
        self.objects.push(object);
    }

    /// Create and register a sphere at `pos`, returning its ID
    pub fn spawn(&mut self, pos: DVec3, radius: f32, fall_speed: f64, color: u32) -> u32 {
        let id = self.next_entity_id();
        self.add(FallingObject {
            id,
            pos,
            radius,
            fall_speed,
            color,
        });
        id
    }

    pub fn remove_by_id(&mut self, id: u32) -> Option<FallingObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Visit every object once; those marked `Remove` are dropped after the pass
    pub fn for_each_removable<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&mut FallingObject) -> Visit,
    {
        let mut doomed = Vec::new();
        for object in self.objects.iter_mut() {
            if visitor(object) == Visit::Remove {
                doomed.push(object.id);
            }
        }
        if !doomed.is_empty() {
            self.objects.retain(|o| !doomed.contains(&o.id));
        }
    }

    pub fn get(&self, id: u32) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

/// Everything one play-through owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub volume: PlayVolume,
    pub catcher: Catcher,
    pub objects: EntityRegistry,
    pub state: SessionState,
    /// Frames simulated so far
    pub frame: u64,
}

impl Session {
    pub fn new(tuning: &Tuning, initial_score: u32, spawn_batch_size: u32) -> Self {
        Self {
            volume: tuning.volume,
            catcher: Catcher::new(tuning),
            objects: EntityRegistry::new(),
            state: SessionState::new(initial_score, tuning.starting_lives, spawn_batch_size),
            frame: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(registry: &mut EntityRegistry, y: f64) -> u32 {
        registry.spawn(DVec3::new(0.0, y, 0.0), 0.5, 0.03, 0xffffff)
    }

    #[test]
    fn test_ids_are_unique() {
        let mut registry = EntityRegistry::new();
        let a = sphere_at(&mut registry, 1.0);
        let b = sphere_at(&mut registry, 2.0);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut registry = EntityRegistry::new();
        let a = sphere_at(&mut registry, 1.0);
        let b = sphere_at(&mut registry, 2.0);

        let removed = registry.remove_by_id(a).map(|o| o.id);
        assert_eq!(removed, Some(a));
        assert!(registry.remove_by_id(a).is_none());
        assert!(registry.get(b).is_some());
    }

    #[test]
    fn test_removal_during_pass_skips_nothing() {
        let mut registry = EntityRegistry::new();
        for i in 0..6 {
            sphere_at(&mut registry, i as f64);
        }

        let mut visited = 0;
        registry.for_each_removable(|object| {
            visited += 1;
            if object.pos.y < 3.0 {
                Visit::Remove
            } else {
                Visit::Keep
            }
        });

        assert_eq!(visited, 6);
        assert_eq!(registry.len(), 3);
        assert!(registry.iter().all(|o| o.pos.y >= 3.0));
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut registry = EntityRegistry::new();
        let a = sphere_at(&mut registry, 1.0);
        registry.clear();
        assert!(registry.is_empty());
        let b = sphere_at(&mut registry, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_reset_values() {
        let session = Session::new(&Tuning::default(), 0, 1);
        assert_eq!(
            session.state,
            SessionState {
                score: 0,
                lives: 3,
                spawn_batch_size: 1,
                level: 1
            }
        );
        assert_eq!(session.catcher.pos, Vec2::ZERO);
        assert!(session.objects.is_empty());
    }
}
