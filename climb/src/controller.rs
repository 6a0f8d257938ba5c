//! Per-tick climbing locomotion.
//!
//! `LocomotionState::step` composes the pure per-hand stages:
//!
//! 1. resolve each hand's desired grip point (offset + arm-length clamp)
//! 2. sweep each hand from its anchor toward the desired point
//! 3. turn contacts into per-hand reactions and merge them into one displacement
//! 4. move the body, then record its velocity into the rolling history
//! 5. fire a flick jump when a gripping push is fast enough
//! 6. carry the rig with the body, release over-stretched grips, commit anchors
//!
//! All mutation of controller state happens inside `step` and `turn`; both take
//! `&mut self`, so a turn can never interleave with a tick.

use crate::{
    body::{BodyState, yaw_rotation},
    config::{ConfigError, LocomotionConfig},
    contact::{HandContact, combine_reactions, hand_reaction},
    hand::{HandState, resolve_hand_target, unstick},
    pose::PoseSample,
    sweep::{SweepOutcome, SweepQuery, resolve_sweep},
    types::{Hand, Hands, Vec3},
    velocity::{JumpParams, VelocityHistory, jump_impulse},
};

/// What the tick did to the body's outgoing velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VelocityCommand {
    /// No hand touched anything; physics keeps its velocity.
    Unchanged,
    /// A hand made contact, so the momentum was cancelled.
    Zeroed,
    /// A flick jump assigned this velocity.
    Jump(Vec3),
}

/// Per-hand side effects of one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReport {
    /// Desired grip point resolved from the sampled pose (before the body moved).
    pub desired: Vec3,
    pub outcome: SweepOutcome,
    pub contact: HandContact,
    /// The grip was dropped by the unstick check this tick.
    pub released: bool,
    /// Where the hand's follower marker should be drawn.
    pub follower: Vec3,
}

/// Side effects of one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickEffects {
    pub hands: Hands<HandReport>,
    /// Kinematic displacement applied to the body.
    pub displacement: Vec3,
    pub velocity: VelocityCommand,
    /// Body velocity recorded into the history, if `dt` was usable.
    pub velocity_sample: Option<Vec3>,
}

impl TickEffects {
    #[inline]
    pub fn followers(&self) -> Hands<Vec3> {
        self.hands.map(|_, report| report.follower)
    }

    #[inline]
    pub fn jumped(&self) -> bool {
        matches!(self.velocity, VelocityCommand::Jump(_))
    }

    #[inline]
    pub fn any_contact(&self) -> bool {
        self.hands.left.contact.contact || self.hands.right.contact.contact
    }
}

/// Everything the controller carries from one tick to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionState {
    pub hands: Hands<HandState>,
    pub body: BodyState,
    history: VelocityHistory,
    previous_body_position: Vec3,
}

impl LocomotionState {
    /// Fresh state: both hands free at their follower positions, history zeroed.
    ///
    /// Fails with [`ConfigError::ZeroHistorySize`] when `history_size` is zero.
    pub fn new(
        body: BodyState,
        followers: Hands<Vec3>,
        history_size: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            hands: followers.map(|_, anchor| HandState::released_at(anchor)),
            previous_body_position: body.position,
            body,
            history: VelocityHistory::new(history_size)?,
        })
    }

    #[inline]
    pub fn history(&self) -> &VelocityHistory {
        &self.history
    }

    #[inline]
    pub fn previous_body_position(&self) -> Vec3 {
        self.previous_body_position
    }

    /// Advance one tick.
    ///
    /// `poses` is the tick's single rig sample; `dt` is the tick length in seconds.
    pub fn step<Q: SweepQuery + ?Sized>(
        &mut self,
        config: &LocomotionConfig,
        poses: &PoseSample,
        sweep: &Q,
        dt: f32,
    ) -> TickEffects {
        let resolve = |sample: &PoseSample, hand: Hand| {
            resolve_hand_target(
                &sample.hands[hand],
                config.hand_offset(hand),
                sample.head,
                config.max_arm_length,
            )
        };

        // Sweep both hands against the pre-move state.
        let desired = Hands::from_fn(|hand| resolve(poses, hand));
        let outcomes = Hands::from_fn(|hand| {
            resolve_sweep(
                sweep,
                self.hands[hand].anchor,
                desired[hand],
                config.locomotion_layers,
            )
        });
        let contacts = Hands::from_fn(|hand| {
            let state = self.hands[hand];
            hand_reaction(&outcomes[hand], state.gripping, state.anchor, desired[hand])
        });

        for hand in Hand::BOTH {
            let c = contacts[hand];
            if c.contact && !c.was_gripping {
                log::debug!("{hand} hand gripped at {:?}", outcomes[hand].end());
            } else if !c.contact && c.was_gripping {
                log::debug!("{hand} hand left the surface");
            }
        }

        let any_contact = contacts.left.contact || contacts.right.contact;
        let mut velocity = VelocityCommand::Unchanged;
        if any_contact {
            self.body.velocity = Vec3::zeros();
            velocity = VelocityCommand::Zeroed;
        }

        let displacement = combine_reactions(&contacts);
        self.body.position += displacement;

        // The rig rides on the body, so the same sample shifted by the displacement
        // is where the hands are now.
        let carried = poses.translated(displacement);
        let settled = Hands::from_fn(|hand| resolve(&carried, hand));

        for hand in Hand::BOTH {
            self.hands[hand] = HandState {
                anchor: outcomes[hand].end().unwrap_or(settled[hand]),
                gripping: contacts[hand].contact,
            };
        }

        let velocity_sample = self.record_velocity(dt);

        if any_contact && !config.disable_movement {
            let params = JumpParams {
                velocity_limit: config.velocity_limit,
                jump_multiplier: config.jump_multiplier,
                max_jump_speed: config.max_jump_speed,
            };
            if let Some(impulse) = jump_impulse(self.history.average(), &params) {
                log::debug!("jump impulse {impulse:?}");
                self.body.velocity = impulse;
                velocity = VelocityCommand::Jump(impulse);
            }
        }

        let mut released = Hands::new(false, false);
        for hand in Hand::BOTH {
            let result = unstick(self.hands[hand], settled[hand], config.unstick_distance);
            if result.released {
                log::debug!("{hand} hand unstuck");
            }
            self.hands[hand] = result.state;
            released[hand] = result.released;
        }

        log::trace!(
            "displacement {displacement:?} body {:?} average {:?}",
            self.body.position,
            self.history.average()
        );

        TickEffects {
            hands: Hands::from_fn(|hand| HandReport {
                desired: desired[hand],
                outcome: outcomes[hand],
                contact: contacts[hand],
                released: released[hand],
                follower: self.hands[hand].anchor,
            }),
            displacement,
            velocity,
            velocity_sample,
        }
    }

    /// Rotate the body about world up through `head`, re-basing the velocity history.
    ///
    /// Hand anchors are world-space and left untouched.
    pub fn turn(&mut self, degrees: f32, head: Vec3) {
        let rotation = yaw_rotation(degrees);
        self.body.rotate_around(head, &rotation);
        self.history.rotate(&rotation);
    }

    fn record_velocity(&mut self, dt: f32) -> Option<Vec3> {
        if !dt.is_finite() || dt <= 0.0 {
            log::warn!("skipping velocity sample for unusable dt {dt}");
            return None;
        }

        let sample = (self.body.position - self.previous_body_position) / dt;
        self.history.record(sample);
        self.previous_body_position = self.body.position;
        Some(sample)
    }
}

/// Owned climbing controller: validated configuration plus its per-tick state.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: LocomotionState,
}

impl LocomotionController {
    /// Build a controller for a body whose hand follower markers sit at `followers`.
    pub fn new(
        config: LocomotionConfig,
        body: BodyState,
        followers: Hands<Vec3>,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::error!("rejecting locomotion config: {e}");
            return Err(e);
        }

        log::info!(
            "locomotion controller ready: history {} arm {} unstick {} layers {:#b}",
            config.velocity_history_size,
            config.max_arm_length,
            config.unstick_distance,
            config.locomotion_layers.bits
        );

        let state = LocomotionState::new(body, followers, config.velocity_history_size)?;
        Ok(Self { config, state })
    }

    /// Run one locomotion tick against `sweep` with the tick's rig sample.
    pub fn tick<Q: SweepQuery + ?Sized>(
        &mut self,
        poses: &PoseSample,
        sweep: &Q,
        dt: f32,
    ) -> TickEffects {
        self.state.step(&self.config, poses, sweep, dt)
    }

    /// Snap-turn the player by `degrees` about the head.
    pub fn turn(&mut self, degrees: f32, head: Vec3) {
        self.state.turn(degrees, head);
    }

    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    #[inline]
    pub fn body(&self) -> &BodyState {
        &self.state.body
    }

    /// Body access for the external physics collaborator between ticks.
    #[inline]
    pub fn body_mut(&mut self) -> &mut BodyState {
        &mut self.state.body
    }

    #[inline]
    pub fn hand(&self, hand: Hand) -> &HandState {
        &self.state.hands[hand]
    }

    /// Current follower marker positions (the committed anchors).
    #[inline]
    pub fn followers(&self) -> Hands<Vec3> {
        self.state.hands.map(|_, h| h.anchor)
    }
}
