//! Shared types and constants for the rollfield scene.
//!
//! # Invariants
//! - `SceneConfig` values are fixed at startup; nothing mutates them at runtime.

mod types;

pub use types::{SceneConfig, Transform};

pub fn crate_info() -> &'static str {
    "rollfield-common v0.1.0"
}
