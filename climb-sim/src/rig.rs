use std::f32::consts::TAU;

use climb::{BodyState, Hand, Hands, Pose, PoseSample, PoseSource, Vec3};
use serde::Deserialize;

/// Distance a hand backs off the surface at the start and end of its return.
const LIFT_OFF: f32 = 0.05;

/// Shape of the scripted reach-and-pull gesture, in the body frame (+Z forward).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RigParams {
    pub head_height: f32,
    /// Half the distance between the hands.
    pub shoulder_half_width: f32,
    /// Hand height at the top of a stroke, relative to the body origin.
    pub stroke_top: f32,
    /// Vertical length of a stroke.
    pub stroke_length: f32,
    /// Forward reach of the hands.
    pub reach: f32,
    /// How far the hand draws back toward the body while returning to the top.
    pub clearance: f32,
    /// Seconds per full stroke of one hand.
    pub period: f32,
}

impl Default for RigParams {
    fn default() -> Self {
        Self {
            head_height: 1.6,
            shoulder_half_width: 0.3,
            stroke_top: 1.9,
            stroke_length: 1.0,
            reach: 0.6,
            clearance: 0.15,
            period: 1.2,
        }
    }
}

/// Deterministic stand-in for tracked hardware.
///
/// Each hand spends the first half of its period pushing straight down, then the
/// second half drawn back and rising to the top again. Pushing down onto a ledge
/// lifts the body. The hands are half a period apart, so one is always pushing.
pub struct ScriptedRig {
    params: RigParams,
    body: BodyState,
    time: f32,
}

impl ScriptedRig {
    pub fn new(params: RigParams, body: BodyState) -> Self {
        Self {
            params,
            body,
            time: 0.0,
        }
    }

    /// Re-attach the rig to the body's current transform.
    pub fn follow(&mut self, body: &BodyState) {
        self.body = *body;
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    fn local_hand(&self, hand: Hand) -> Vec3 {
        let p = &self.params;
        let shift = match hand {
            Hand::Left => 0.0,
            Hand::Right => 0.5,
        };
        let phase = (self.time / p.period + shift).rem_euclid(1.0);

        let x = match hand {
            Hand::Left => -p.shoulder_half_width,
            Hand::Right => p.shoulder_half_width,
        };

        if phase < 0.5 {
            let s = phase * 2.0;
            Vec3::new(x, p.stroke_top - s * p.stroke_length, p.reach)
        } else {
            // Rise on an arc so the hand clears a ledge lip on the way up.
            let s = (phase - 0.5) * 2.0;
            let back = LIFT_OFF + (p.clearance - LIFT_OFF) * (s * TAU * 0.5).sin();
            Vec3::new(x, p.stroke_top - (1.0 - s) * p.stroke_length, p.reach - back)
        }
    }

    fn to_world(&self, local: Vec3) -> Vec3 {
        self.body.position + self.body.rotation * local
    }

    pub fn head(&self) -> Vec3 {
        self.to_world(Vec3::new(0.0, self.params.head_height, 0.0))
    }
}

impl PoseSource for ScriptedRig {
    fn sample(&mut self) -> PoseSample {
        let rotation = self.body.rotation;
        PoseSample {
            head: self.head(),
            hands: Hands::from_fn(|hand| {
                Pose::new(self.to_world(self.local_hand(hand)), rotation)
            }),
        }
    }
}
