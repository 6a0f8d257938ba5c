use crate::types::{Hands, Pose, Vec3};

/// One tick's worth of tracked rig input, in world space.
///
/// The head and hand targets are treated as children of the player body: when
/// the controller moves the body mid-tick, it shifts the sample by the same
/// displacement instead of sampling again.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseSample {
    pub head: Vec3,
    /// Raw hand target poses, before the grip offset and arm-length clamp.
    pub hands: Hands<Pose>,
}

impl PoseSample {
    #[inline]
    pub fn new(head: Vec3, left: Pose, right: Pose) -> Self {
        Self {
            head,
            hands: Hands::new(left, right),
        }
    }

    /// The same rig carried along by a body displacement.
    #[inline]
    pub fn translated(&self, by: Vec3) -> Self {
        Self {
            head: self.head + by,
            hands: self.hands.map(|_, pose| pose.translated(by)),
        }
    }
}

/// Supplier of tracked head and hand poses.
///
/// Implementations are sampled exactly once per tick by the driver.
pub trait PoseSource {
    fn sample(&mut self) -> PoseSample;
}
