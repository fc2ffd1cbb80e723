//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Unpack a 0xRRGGBB colour
pub fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

/// Colors for game elements
pub mod colors {
    /// Sky blue, 0x87CEEB
    pub const BACKGROUND: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
    /// Forest green, 0x228B22
    pub const GROUND: [f32; 4] = [0.133, 0.545, 0.133, 1.0];
    pub const GROUND_EDGE: [f32; 4] = [0.08, 0.35, 0.08, 1.0];
    /// Dark orange, 0xFF8C00
    pub const CATCHER: [f32; 4] = [1.0, 0.549, 0.0, 1.0];
    pub const CATCHER_RIM: [f32; 4] = [0.7, 0.35, 0.0, 1.0];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.35];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_unpacks_channels() {
        assert_eq!(rgb(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x00FF00, 0.5), [0.0, 1.0, 0.0, 0.5]);
        assert_eq!(rgb(0x0000FF, 1.0), [0.0, 0.0, 1.0, 1.0]);
    }
}
