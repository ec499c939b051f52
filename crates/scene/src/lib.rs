//! Scene state: the sphere actor and its chase camera.
//!
//! # Invariants
//! - All mutation happens inside [`Scene::tick`], once per frame, in a fixed
//!   order: integrate movement, then follow with the camera.
//! - The crate has no notion of frame scheduling; an external driver calls
//!   `tick` from whatever loop the host provides.

mod camera;
mod sphere;

pub use camera::ChaseCamera;
pub use sphere::Sphere;

use rollfield_common::SceneConfig;

/// Explicit scene state passed to each update, replacing any hidden globals.
#[derive(Debug, Clone)]
pub struct Scene {
    pub sphere: Sphere,
    pub camera: ChaseCamera,
    config: SceneConfig,
    frame: u64,
}

impl Scene {
    /// Build the initial scene: sphere resting on the floor at the origin,
    /// camera already in its follow position.
    pub fn new(config: SceneConfig) -> Self {
        let sphere = Sphere::new(config.sphere_radius);
        let mut camera = ChaseCamera::new(config.camera_offset);
        camera.follow(sphere.position());
        Self {
            sphere,
            camera,
            config,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame: apply the per-frame displacement to the sphere
    /// (position + rolling rotation), then snap the camera behind it.
    pub fn tick(&mut self, movement: glam::Vec3) {
        self.frame += 1;
        self.sphere.integrate(movement);
        self.camera.follow(self.sphere.position());
        tracing::trace!(frame = self.frame, pos = ?self.sphere.position(), "scene tick");
    }
}
