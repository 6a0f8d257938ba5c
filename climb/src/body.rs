use nalgebra as na;

use crate::types::{Quat, Vec3};

/// World transform and outgoing velocity of the player body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub rotation: Quat,
    /// Linear velocity handed to the external physics collaborator.
    ///
    /// The controller only zeroes it on grip contact or assigns a jump impulse.
    pub velocity: Vec3,
}

impl BodyState {
    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            velocity: Vec3::zeros(),
        }
    }

    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::identity())
    }

    /// Rotate the body about `pivot` by `rotation`.
    ///
    /// Position orbits the pivot and orientation is pre-multiplied, the same as
    /// rotating a parent transform around a world point.
    pub fn rotate_around(&mut self, pivot: Vec3, rotation: &Quat) {
        self.position = pivot + rotation * (self.position - pivot);
        self.rotation = rotation * self.rotation;
    }
}

/// Yaw rotation about world +Y by `degrees`.
#[inline]
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_axis_angle(&na::Vector3::y_axis(), degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotate_around_pivot_keeps_distance() {
        let pivot = Vec3::new(0.0, 1.7, 0.0);
        let mut body = BodyState::at(Vec3::new(0.5, 1.0, 0.0));
        body.rotate_around(pivot, &yaw_rotation(90.0));

        assert_relative_eq!(body.position, Vec3::new(0.0, 1.0, -0.5), epsilon = 1.0e-6);
        assert_relative_eq!(
            (body.position - pivot).norm(),
            Vec3::new(0.5, -0.7, 0.0).norm(),
            epsilon = 1.0e-6
        );
        assert_relative_eq!(
            body.rotation.angle(),
            std::f32::consts::FRAC_PI_2,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn rotating_about_own_position_only_turns() {
        let p = Vec3::new(2.0, 0.0, -1.0);
        let mut body = BodyState::at(p);
        body.rotate_around(p, &yaw_rotation(-30.0));
        assert_relative_eq!(body.position, p, epsilon = 1.0e-6);
    }
}
