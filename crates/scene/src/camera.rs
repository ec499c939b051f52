use glam::{Mat4, Vec3};

/// Rigid chase camera: eye = target + constant world-space offset.
///
/// No smoothing or damping; the follow is instantaneous. The offset never
/// rotates with the sphere. Camera motion exists outside any deterministic
/// simulation boundary; it is derived state.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    offset: Vec3,
    eye: Vec3,
    target: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl ChaseCamera {
    pub fn new(offset: Vec3) -> Self {
        Self {
            offset,
            eye: offset,
            target: Vec3::ZERO,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Reposition behind `target` and look straight at it.
    pub fn follow(&mut self, target: Vec3) {
        self.target = target;
        self.eye = target + self.offset;
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_is_target_plus_offset() {
        let offset = Vec3::new(0.0, 5.0, 10.0);
        let mut cam = ChaseCamera::new(offset);
        for target in [
            Vec3::ZERO,
            Vec3::new(12.0, 1.0, -7.5),
            Vec3::new(-300.0, 1.0, 4200.0),
        ] {
            cam.follow(target);
            assert_eq!(cam.eye(), target + offset);
            assert_eq!(cam.target(), target);
        }
    }

    #[test]
    fn follow_is_rigid_across_frames() {
        let mut cam = ChaseCamera::new(Vec3::new(0.0, 5.0, 10.0));
        cam.follow(Vec3::new(1.0, 1.0, 1.0));
        cam.follow(Vec3::new(2.0, 1.0, 1.0));
        // No damping: only the latest target matters.
        assert_eq!(cam.eye(), Vec3::new(2.0, 6.0, 11.0));
    }

    #[test]
    fn view_projection_is_finite() {
        let mut cam = ChaseCamera::new(Vec3::new(0.0, 5.0, 10.0));
        cam.follow(Vec3::new(3.0, 1.0, -2.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
        assert!(vp.is_finite());
    }
}
