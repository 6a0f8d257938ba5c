//! Rolling body velocity estimate and the flick jump derived from it.

use crate::{
    config::ConfigError,
    types::{Quat, Vec3},
};

/// Fixed-capacity ring buffer of per-tick body velocities with a running mean.
///
/// The mean is maintained incrementally: each record adds `(new - evicted) / N`,
/// so a tick costs O(1) regardless of capacity. The buffer is allocated once and
/// never resized.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityHistory {
    samples: Box<[Vec3]>,
    cursor: usize,
    average: Vec3,
}

impl VelocityHistory {
    /// A zeroed history of `capacity` samples. Zero capacity is rejected.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroHistorySize);
        }
        Ok(Self {
            samples: vec![Vec3::zeros(); capacity].into_boxed_slice(),
            cursor: 0,
            average: Vec3::zeros(),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Running mean of the stored samples.
    #[inline]
    pub fn average(&self) -> Vec3 {
        self.average
    }

    #[inline]
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    /// Store `velocity`, evicting the oldest sample.
    pub fn record(&mut self, velocity: Vec3) {
        let n = self.samples.len();
        self.cursor = (self.cursor + 1) % n;
        let oldest = self.samples[self.cursor];
        self.average += (velocity - oldest) / n as f32;
        self.samples[self.cursor] = velocity;
    }

    /// Re-express the average and every stored sample in a rotated frame.
    pub fn rotate(&mut self, rotation: &Quat) {
        self.average = rotation * self.average;
        for sample in self.samples.iter_mut() {
            *sample = rotation * *sample;
        }
    }

    /// Mean recomputed from scratch. Used to check drift of the running mean.
    pub fn recomputed_average(&self) -> Vec3 {
        self.samples.iter().sum::<Vec3>() / self.samples.len() as f32
    }
}

/// Tuning inputs for [`jump_impulse`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpParams {
    pub velocity_limit: f32,
    pub jump_multiplier: f32,
    pub max_jump_speed: f32,
}

/// Velocity to assign the body for a flick jump, if the average is fast enough.
///
/// Returns `None` when `|average| <= velocity_limit`. Otherwise the impulse is
/// `average * jump_multiplier`, capped to `max_jump_speed` along the same
/// direction.
pub fn jump_impulse(average: Vec3, params: &JumpParams) -> Option<Vec3> {
    let speed = average.norm();
    if speed <= params.velocity_limit {
        return None;
    }

    let scaled = average * params.jump_multiplier;
    if scaled.norm() > params.max_jump_speed {
        // speed > velocity_limit >= 0, so the direction is well defined.
        return Some(average / speed * params.max_jump_speed);
    }
    Some(scaled)
}
