/*!
Locomotion data types and math aliases.

Plain data only; the per-tick logic lives in the stage modules that pass these
values around:
- the hand target resolver (raw tracked poses in, clamped grip points out)
- the sweep resolver (probe casts against the `SweepQuery` backend)
- the contact combiner and velocity tracker
- the outer `LocomotionController` driver

Conventions
- Units are meters and seconds.
- +Y is world up.
- Every position is world space unless a field says otherwise.
*/

use std::ops::{Index, IndexMut};

use nalgebra as na;

/// nalgebra aliases used across the crate.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// A tracked pose in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity orientation.
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
        }
    }

    /// Same pose shifted by a world-space translation.
    #[inline]
    pub fn translated(&self, by: Vec3) -> Self {
        Self {
            position: self.position + by,
            rotation: self.rotation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::zeros())
    }
}

/// Which hand a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hand::Left => f.write_str("left"),
            Hand::Right => f.write_str("right"),
        }
    }
}

/// A left/right pair indexed by [`Hand`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hands<T> {
    pub left: T,
    pub right: T,
}

impl<T> Hands<T> {
    #[inline]
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Build a pair by evaluating `f` once per hand (left first).
    pub fn from_fn(mut f: impl FnMut(Hand) -> T) -> Self {
        let left = f(Hand::Left);
        let right = f(Hand::Right);
        Self { left, right }
    }

    pub fn map<U>(self, mut f: impl FnMut(Hand, T) -> U) -> Hands<U> {
        Hands {
            left: f(Hand::Left, self.left),
            right: f(Hand::Right, self.right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Hand, &T)> {
        [(Hand::Left, &self.left), (Hand::Right, &self.right)].into_iter()
    }
}

impl<T> Index<Hand> for Hands<T> {
    type Output = T;

    fn index(&self, hand: Hand) -> &T {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Hand> for Hands<T> {
    fn index_mut(&mut self, hand: Hand) -> &mut T {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }
}

/// First obstruction reported by a [`SweepQuery`](crate::sweep::SweepQuery).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// World-space contact point on the obstructing surface.
    pub point: Vec3,
    /// World-space unit surface normal at `point`, facing the probe.
    pub normal: Vec3,
}
