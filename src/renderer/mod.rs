//! WebGPU rendering module
//!
//! Draws the current catcher and sphere positions each frame, top-down.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
