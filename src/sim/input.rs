//! Held-direction tracking
//!
//! Decoupled from any event source; the host feeds it key-down/key-up.

use serde::{Deserialize, Serialize};

/// Logical movement direction on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards -Z
    Up,
    /// Towards +Z
    Down,
    /// Towards -X
    Left,
    /// Towards +X
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }
}

/// Set of currently held directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTracker {
    held: u8,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last event for a key wins; repeats are idempotent
    pub fn set_pressed(&mut self, direction: Direction, pressed: bool) {
        if pressed {
            self.held |= direction.bit();
        } else {
            self.held &= !direction.bit();
        }
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.held & direction.bit() != 0
    }

    /// Release everything (focus loss, restart)
    pub fn clear(&mut self) {
        self.held = 0;
    }

    pub fn any_pressed(&self) -> bool {
        self.held != 0
    }
}
