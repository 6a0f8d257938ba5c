//! Minimal external physics: free fall with a swept landing test.

use climb::{BodyState, LayerMask, PROBE_PRECISION, SweepQuery, Vec3};

/// Downward acceleration (m/s^2).
pub const GRAVITY_MPS2: f32 = -9.81;

/// Clamp for falling speed (m/s, negative is down).
pub const TERMINAL_FALL_SPEED_MPS: f32 = -50.0;

/// Ballistic step for a body no hand is holding up.
pub struct Gravity {
    /// Radius of the sphere swept for the body.
    pub radius: f32,
    pub layers: LayerMask,
}

impl Gravity {
    /// Integrate `body` for `dt` seconds and stop it on the first surface hit.
    ///
    /// Returns true when the body landed this step.
    pub fn step<Q: SweepQuery + ?Sized>(&self, body: &mut BodyState, world: &Q, dt: f32) -> bool {
        // Semi-implicit Euler: v(t+dt) = v(t) + g*dt
        body.velocity.y = (body.velocity.y + GRAVITY_MPS2 * dt).max(TERMINAL_FALL_SPEED_MPS);

        let movement = body.velocity * dt;
        if movement.norm_squared() <= f32::EPSILON * f32::EPSILON {
            return false;
        }

        // Swept slightly smaller than it rests, so a landed body does not start
        // the next step overlapping the ground.
        let lift = Vec3::new(0.0, self.radius, 0.0);
        let center = body.position + lift;
        match world.sweep(center, self.radius * PROBE_PRECISION, movement, self.layers) {
            Some(hit) => {
                body.position = hit.point + hit.normal * self.radius - lift;
                body.velocity = Vec3::zeros();
                true
            }
            None => {
                body.position += movement;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use climb::{
        CollisionLayer, ColliderShapeDef, RapierQueryWorld, WorldStaticDef,
        rapier_world::rapier3d::{na::UnitQuaternion, prelude::Vector},
    };

    fn ground() -> RapierQueryWorld {
        RapierQueryWorld::build(vec![WorldStaticDef {
            id: 1,
            translation: Vector::new(0.0, -0.5, 0.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector::new(50.0, 0.5, 50.0),
            },
            layers: LayerMask::from(CollisionLayer::World),
        }])
    }

    fn gravity() -> Gravity {
        Gravity {
            radius: 0.3,
            layers: LayerMask::from(CollisionLayer::World),
        }
    }

    #[test]
    fn free_fall_accelerates_downward() {
        let world = ground();
        let mut body = BodyState::at(Vec3::new(0.0, 10.0, 0.0));

        assert!(!gravity().step(&mut body, &world, 0.1));
        assert_relative_eq!(body.velocity.y, -0.981, epsilon = 1.0e-5);
        assert_relative_eq!(body.position.y, 10.0 - 0.0981, epsilon = 1.0e-5);
    }

    #[test]
    fn falling_body_lands_on_the_ground() {
        let world = ground();
        let mut body = BodyState::at(Vec3::new(0.0, 2.0, 0.0));
        let g = gravity();

        let landed = (0..200).any(|_| g.step(&mut body, &world, 1.0 / 60.0));
        assert!(landed);
        assert_relative_eq!(body.position.y, 0.0, epsilon = 1.0e-2);
        assert_eq!(body.velocity, Vec3::zeros());
    }

    #[test]
    fn landed_body_stays_on_the_ground() {
        let world = ground();
        let mut body = BodyState::at(Vec3::zeros());
        let g = gravity();
        for _ in 0..30 {
            g.step(&mut body, &world, 1.0 / 60.0);
        }
        assert_relative_eq!(body.position.y, 0.0, epsilon = 1.0e-3);
    }

    #[test]
    fn jump_velocity_carries_the_body_up() {
        let world = ground();
        let mut body = BodyState::at(Vec3::new(0.0, 1.0, 0.0));
        body.velocity = Vec3::new(0.0, 5.0, 0.0);

        gravity().step(&mut body, &world, 0.1);
        assert!(body.position.y > 1.0);
    }

    #[test]
    fn fall_speed_is_clamped() {
        let mut body = BodyState::at(Vec3::new(0.0, 1000.0, 0.0));
        body.velocity.y = TERMINAL_FALL_SPEED_MPS;
        gravity().step(&mut body, &ground(), 0.5);
        assert_eq!(body.velocity.y, TERMINAL_FALL_SPEED_MPS);
    }
}
