//! wgpu render backend for the cube arena.
//!
//! Draws a plain floor slab, the actor cube and the boundary walls as
//! translucent boxes, seen through the follow camera.
//!
//! # Invariants
//! - Renderer never mutates arena state.
//! - Render frame rate is independent of the fixed simulation step.

mod camera;
mod gpu;
mod shaders;

pub use camera::Projection;
pub use gpu::WgpuRenderer;
