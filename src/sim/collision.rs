//! Sphere-vs-cylinder capture test
//!
//! The catcher is an upright cylinder; a sphere is captured when its centre is
//! horizontally within the summed radii and vertically inside the catcher's band.

use super::state::{Catcher, FallingObject};
use crate::ground_distance;

/// Result of testing one falling object against the catcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Inside the capture zone
    Caught,
    /// Fell strictly below the floor threshold
    Missed,
    /// Still in flight
    Airborne,
}

/// Whether the sphere overlaps the catcher's capture zone
pub fn in_capture_zone(object: &FallingObject, catcher: &Catcher) -> bool {
    let horizontal = ground_distance(object.ground_pos(), catcher.pos);
    let vertical = (object.pos.y - catcher.y).abs();
    horizontal < object.radius + catcher.radius && vertical < catcher.height
}

/// Classify an object after it has moved; a catch always wins over a miss
pub fn classify(object: &FallingObject, catcher: &Catcher) -> Contact {
    if in_capture_zone(object, catcher) {
        Contact::Caught
    } else if object.pos.y < object.floor_threshold() {
        Contact::Missed
    } else {
        Contact::Airborne
    }
}
