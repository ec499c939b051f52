use glam::{Quat, Vec3};
use rollfield_common::Transform;

/// The player-controlled sphere.
///
/// Position and orientation live in a [`Transform`]; the radius ties rolling
/// rotation to distance traveled.
#[derive(Debug, Clone)]
pub struct Sphere {
    transform: Transform,
    radius: f32,
}

impl Sphere {
    /// Sphere of the given radius resting on the ground plane at the origin.
    pub fn new(radius: f32) -> Self {
        Self {
            transform: Transform {
                position: Vec3::new(0.0, radius, 0.0),
                ..Transform::default()
            },
            radius,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Apply one frame of movement: translate on X/Z (Y stays constant) and
    /// roll about a world-space axis so the sphere appears not to slip.
    ///
    /// Rotation angle is distance / radius, making the arc length under the
    /// contact point equal the distance traveled. Zero displacement applies
    /// no rotation.
    pub fn integrate(&mut self, displacement: Vec3) {
        self.transform.position.x += displacement.x;
        self.transform.position.z += displacement.z;

        let planar = Vec3::new(displacement.x, 0.0, displacement.z);
        let distance = planar.length();
        if distance > 0.0 {
            let axis = Vec3::Y.cross(planar).normalize();
            let angle = distance / self.radius;
            // World-axis rotation: the new rotation composes on the left so
            // the axis is not reinterpreted in the sphere's local frame.
            self.transform.rotation =
                (Quat::from_axis_angle(axis, angle) * self.transform.rotation).normalize();
        }
    }
}
