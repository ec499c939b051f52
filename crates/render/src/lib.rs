//! Rendering adapter: renderer-agnostic interface over the scene.
//!
//! # Invariants
//! - Renderers read the scene and terrain; they never mutate either.
//! - Render output derives entirely from the state passed in each frame.
//!
//! The debug text renderer keeps the interface exercised headlessly (CLI,
//! tests); the GPU backend lives in the render-wgpu crate.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "rollfield-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
