use crate::types::{Pose, Vec3};

/// Per-hand contact state carried between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandState {
    /// World position the hand is attached to (or last moved to when free).
    pub anchor: Vec3,
    /// Whether the hand ended the previous tick in contact with a surface.
    pub gripping: bool,
}

impl HandState {
    /// A free hand seeded at `anchor`.
    #[inline]
    pub fn released_at(anchor: Vec3) -> Self {
        Self {
            anchor,
            gripping: false,
        }
    }
}

/// Resolve the desired grip point for a tracked hand.
///
/// The offset is applied in the hand's local frame, then the result is clamped to
/// a sphere of radius `max_arm_length` around `head`.
#[inline]
pub fn resolve_hand_target(raw: &Pose, offset: Vec3, head: Vec3, max_arm_length: f32) -> Vec3 {
    let target = raw.position + raw.rotation * offset;
    let reach = target - head;
    let dist = reach.norm();
    if dist < max_arm_length {
        return target;
    }

    // dist >= max_arm_length >= 0, so a zero `dist` only happens with a zero arm length.
    if dist <= f32::EPSILON {
        return head;
    }
    head + reach * (max_arm_length / dist)
}

/// Outcome of the unstick check for one hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnstickResult {
    pub state: HandState,
    /// True when a grip held at the start of the check was let go.
    pub released: bool,
}

/// Release a gripping hand whose desired position drifted past `unstick_distance`.
///
/// A released hand snaps its anchor to `desired`. Free hands pass through unchanged.
#[inline]
pub fn unstick(state: HandState, desired: Vec3, unstick_distance: f32) -> UnstickResult {
    if state.gripping && (desired - state.anchor).norm() > unstick_distance {
        return UnstickResult {
            state: HandState::released_at(desired),
            released: true,
        };
    }

    UnstickResult {
        state,
        released: false,
    }
}
