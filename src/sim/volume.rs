//! Bounded play volume and placement rules
//!
//! Ground positions are `Vec2(x, z)`; the vertical axis is handled by the
//! entities themselves.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{AREA_DEPTH, AREA_HEIGHT, AREA_WIDTH};

/// Immutable bounds of the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayVolume {
    /// Extent along X, centred on the origin
    pub width: f32,
    /// Spawn height of falling objects
    pub height: f32,
    /// Extent along Z, centred on the origin
    pub depth: f32,
}

impl Default for PlayVolume {
    fn default() -> Self {
        Self {
            width: AREA_WIDTH,
            height: AREA_HEIGHT,
            depth: AREA_DEPTH,
        }
    }
}

impl PlayVolume {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }

    /// Legal X/Z extent for an entity of the given radius, as (min, max) corners
    pub fn inner_bounds(&self, margin: f32) -> (Vec2, Vec2) {
        let hx = (self.half_width() - margin).max(0.0);
        let hz = (self.half_depth() - margin).max(0.0);
        (Vec2::new(-hx, -hz), Vec2::new(hx, hz))
    }

    /// Whether a ground position keeps an entity of radius `margin` fully inside
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let (min, max) = self.inner_bounds(margin);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Project a ground position back inside the bounds shrunk by `margin`
    pub fn clamp(&self, point: Vec2, margin: f32) -> Vec2 {
        let (min, max) = self.inner_bounds(margin);
        point.clamp(min, max)
    }

    /// Uniform random ground position inside the bounds shrunk by `margin`
    pub fn random_point<R: Rng + ?Sized>(&self, margin: f32, rng: &mut R) -> Vec2 {
        let (_, max) = self.inner_bounds(margin);
        let x = (rng.random::<f32>() - 0.5) * 2.0 * max.x;
        let z = (rng.random::<f32>() - 0.5) * 2.0 * max.y;
        Vec2::new(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_contains_respects_margin() {
        let volume = PlayVolume::default();
        assert!(volume.contains(Vec2::ZERO, 1.0));
        assert!(volume.contains(Vec2::new(4.0, -4.0), 1.0));
        assert!(!volume.contains(Vec2::new(4.5, 0.0), 1.0));
        assert!(volume.contains(Vec2::new(4.5, 0.0), 0.5));
        assert!(!volume.contains(Vec2::new(0.0, 5.1), 0.0));
    }

    #[test]
    fn test_clamp_projects_inside() {
        let volume = PlayVolume::default();
        let clamped = volume.clamp(Vec2::new(7.0, -9.0), 1.0);
        assert_eq!(clamped, Vec2::new(4.0, -4.0));

        let inside = Vec2::new(1.5, 2.5);
        assert_eq!(volume.clamp(inside, 1.0), inside);
    }

    #[test]
    fn test_margin_larger_than_volume() {
        let volume = PlayVolume::new(1.0, 5.0, 1.0);
        assert_eq!(volume.clamp(Vec2::new(3.0, 3.0), 2.0), Vec2::ZERO);
    }

    #[test]
    fn test_random_points_stay_inside() {
        let volume = PlayVolume::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let p = volume.random_point(0.5, &mut rng);
            assert!(volume.contains(p, 0.5), "{p:?} escaped the volume");
        }
    }
}
