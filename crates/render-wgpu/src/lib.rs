//! wgpu render backend for the rollfield scene.
//!
//! Renders the streamed ground tiles and the textured sphere from the chase
//! camera's point of view.
//!
//! # Invariants
//! - The renderer never mutates scene or terrain state.
//! - GPU tile buffers mirror the streamer's live set exactly; lifecycle is
//!   driven by the per-frame [`StreamDelta`](rollfield_terrain::StreamDelta).

mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use gpu::WgpuSceneRenderer;
pub use texture::{TextureError, load_texture_or_fallback};
