pub mod body;
pub mod config;
pub mod constants;
pub mod contact;
pub mod controller;
pub mod hand;
pub mod layers;
pub mod pose;
pub mod rapier_world;
pub mod sweep;
pub mod types;
pub mod velocity;

pub use body::{BodyState, yaw_rotation};
pub use config::{ConfigError, LocomotionConfig};
pub use constants::{PROBE_PRECISION, PROBE_RADIUS};
pub use contact::{HandContact, combine_reactions, hand_reaction};
pub use controller::{
    HandReport, LocomotionController, LocomotionState, TickEffects, VelocityCommand,
};
pub use hand::{HandState, UnstickResult, resolve_hand_target, unstick};
pub use layers::{CollisionLayer, LayerBit, LayerFlags, LayerMask};
pub use pose::{PoseSample, PoseSource};
pub use rapier_world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef, collider_from_def};
pub use sweep::{SweepOutcome, SweepQuery, resolve_sweep};
pub use types::{Hand, Hands, Pose, Quat, SweepHit, Vec3};
pub use velocity::{JumpParams, VelocityHistory, jump_impulse};
