//! Rendering Adapter: renderer-agnostic interface over the arena.
//!
//! # Invariants
//! - Renderers cannot mutate arena state.
//! - The view is re-aimed at the actor after each step, blocked or not.
//!
//! A text renderer is provided for headless runs and tests; the wgpu
//! backend lives in `arena-render-wgpu`.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "arena-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
