//! Platform abstraction layer
//!
//! Maps browser `KeyboardEvent.key` names onto simulation directions. Keeps
//! the event plumbing itself in the host so the mapping is testable natively.

use crate::sim::{Direction, InputTracker};

/// Direction bound to a key, if any
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Keys whose default action (page scrolling) the host should suppress
pub fn suppresses_default(key: &str) -> bool {
    direction_for_key(key).is_some()
}

/// Key that flips the mute setting
pub fn is_mute_toggle(key: &str) -> bool {
    key.eq_ignore_ascii_case("m")
}

/// Feed a raw key event into the tracker; unknown keys are ignored
///
/// Returns whether the key was one of ours.
pub fn apply_key(input: &mut InputTracker, key: &str, pressed: bool) -> bool {
    match direction_for_key(key) {
        Some(direction) => {
            input.set_pressed(direction, pressed);
            true
        }
        None => false,
    }
}
