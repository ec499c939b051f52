use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Scene constants, fixed at compile time.
///
/// `view_radius` bounds a square lattice of tiles, not a disc — the name is
/// kept for continuity but coverage is a square of side ~2*view_radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Clear color for the viewport (RGBA, linear).
    pub background_color: [f32; 4],
    /// Edge length of one ground tile in world units.
    pub tile_size: f32,
    /// Half-extent of the tile window around the camera, in world units.
    pub view_radius: f32,
    /// Per-frame displacement contributed by one held arrow key.
    pub move_speed: f32,
    /// Radius of the player sphere.
    pub sphere_radius: f32,
    /// World-space offset from the sphere to the camera eye.
    pub camera_offset: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background_color: [1.0, 1.0, 1.0, 1.0],
            tile_size: 10.0,
            view_radius: 50.0,
            move_speed: 0.2,
            sphere_radius: 1.0,
            camera_offset: Vec3::new(0.0, 5.0, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn config_defaults() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.tile_size, 10.0);
        assert_eq!(cfg.view_radius, 50.0);
        assert_eq!(cfg.move_speed, 0.2);
        assert_eq!(cfg.sphere_radius, 1.0);
        assert_eq!(cfg.camera_offset, Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn view_window_is_whole_number_of_tiles() {
        let cfg = SceneConfig::default();
        let steps = cfg.view_radius / cfg.tile_size;
        assert_eq!(steps.fract(), 0.0);
    }
}
