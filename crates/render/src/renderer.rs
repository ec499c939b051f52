use rollfield_scene::Scene;
use rollfield_terrain::TerrainStreamer;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene and terrain state and produces output. It never
/// mutates them — the frame driver owns all mutation.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and terrain state.
    fn render(&self, scene: &Scene, terrain: &TerrainStreamer) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable snapshot of the scene. Useful for CLI output,
/// logging, and testing the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, terrain: &TerrainStreamer) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Scene (frame={}) ===\n", scene.frame()));

        let p = scene.sphere.position();
        let (axis, angle) = scene.sphere.rotation().to_axis_angle();
        out.push_str(&format!(
            "Sphere: pos=({:.2}, {:.2}, {:.2}) roll_axis=({:.2}, {:.2}, {:.2}) roll_angle={:.3}\n",
            p.x, p.y, p.z, axis.x, axis.y, axis.z, angle
        ));

        let eye = scene.camera.eye();
        let target = scene.camera.target();
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1})\n",
            eye.x, eye.y, eye.z, target.x, target.y, target.z
        ));

        let stats = terrain.stats();
        out.push_str(&format!(
            "Tiles: live={} (+{} / -{} last frame)\n",
            terrain.live_count(),
            stats.created_this_frame,
            stats.removed_this_frame
        ));

        out
    }
}
