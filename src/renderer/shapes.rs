//! Shape generation for 2D primitives
//!
//! The scene is drawn top-down from a camera hanging above the origin, so
//! higher spheres appear larger and further from the centre.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, rgb};
use crate::sim::Session;

/// Camera height above the ground plane, relative to the volume's top
pub const CAMERA_CLEARANCE: f32 = 3.0;

const CIRCLE_SEGMENTS: u32 = 32;

/// Perspective projection of a world position onto the ground plane
///
/// Returns screen-space (x, -z) and the size scale at that height.
pub fn project(pos: Vec3, camera_height: f32) -> (Vec2, f32) {
    let depth = (camera_height - pos.y).max(0.1);
    let scale = camera_height / depth;
    (Vec2::new(pos.x, -pos.z) * scale, scale)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Every vertex for the current frame: ground, shadows, catcher, spheres
pub fn scene(session: &Session) -> Vec<Vertex> {
    let volume = &session.volume;
    let camera_height = volume.height + CAMERA_CLEARANCE;
    let half = Vec2::new(volume.half_width(), volume.half_depth());

    let mut vertices = Vec::new();
    vertices.extend(rect(-half - Vec2::splat(0.1), half + Vec2::splat(0.1), colors::GROUND_EDGE));
    vertices.extend(rect(-half, half, colors::GROUND));

    for object in session.objects.iter() {
        let ground = object.ground_pos() * Vec2::new(1.0, -1.0);
        vertices.extend(circle(ground, object.radius, colors::SHADOW, CIRCLE_SEGMENTS));
    }

    let catcher = &session.catcher;
    let (center, scale) = project(catcher.position(), camera_height);
    let radius = catcher.radius * scale;
    vertices.extend(circle(center, radius, colors::CATCHER, CIRCLE_SEGMENTS));
    vertices.extend(ring(center, radius * 0.85, radius, colors::CATCHER_RIM, CIRCLE_SEGMENTS));

    // Lowest first so nearer (higher) spheres draw on top
    let mut spheres: Vec<_> = session.objects.iter().collect();
    spheres.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    for object in spheres {
        let (center, scale) = project(object.pos.as_vec3(), camera_height);
        let radius = object.radius * scale;
        vertices.extend(circle(center, radius, rgb(object.color, 1.0), CIRCLE_SEGMENTS));
        let glint = center + Vec2::new(-0.3, 0.3) * radius;
        vertices.extend(circle(glint, radius * 0.3, colors::HIGHLIGHT, 12));
    }

    vertices
}
