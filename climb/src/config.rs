//! Locomotion tuning parameters and their validation.
//!
//! All values are static for the lifetime of a controller; they are checked once
//! when the controller is built and never re-validated during a tick.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::{
        DEFAULT_JUMP_MULTIPLIER, DEFAULT_MAX_ARM_LENGTH, DEFAULT_MAX_JUMP_SPEED,
        DEFAULT_UNSTICK_DISTANCE, DEFAULT_VELOCITY_HISTORY_SIZE, DEFAULT_VELOCITY_LIMIT,
    },
    layers::{CollisionLayer, LayerMask},
    types::{Hand, Vec3},
};

/// Configuration for the climbing controller.
///
/// Distances are in meters, speeds in meters/second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Number of per-tick body velocities averaged for the jump estimate.
    pub velocity_history_size: usize,

    /// Maximum distance from the head to a resolved hand target.
    pub max_arm_length: f32,

    /// Anchor-to-target distance beyond which a gripping hand is released.
    pub unstick_distance: f32,

    /// Averaged body speed that must be exceeded for a jump impulse.
    pub velocity_limit: f32,

    /// Upper bound on the jump impulse speed.
    pub max_jump_speed: f32,

    /// Scale applied to the averaged body velocity to produce the impulse.
    pub jump_multiplier: f32,

    /// Local-space grip point offset for the left hand target.
    pub left_hand_offset: Vec3,

    /// Local-space grip point offset for the right hand target.
    pub right_hand_offset: Vec3,

    /// Collision layers the hands can grip.
    pub locomotion_layers: LayerMask,

    /// Suppress the jump impulse. Hand contact still moves the body.
    pub disable_movement: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            velocity_history_size: DEFAULT_VELOCITY_HISTORY_SIZE,
            max_arm_length: DEFAULT_MAX_ARM_LENGTH,
            unstick_distance: DEFAULT_UNSTICK_DISTANCE,
            velocity_limit: DEFAULT_VELOCITY_LIMIT,
            max_jump_speed: DEFAULT_MAX_JUMP_SPEED,
            jump_multiplier: DEFAULT_JUMP_MULTIPLIER,
            left_hand_offset: Vec3::zeros(),
            right_hand_offset: Vec3::zeros(),
            locomotion_layers: LayerMask::from(CollisionLayer::Climbable),
            disable_movement: false,
        }
    }
}

impl LocomotionConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the preconditions the per-tick update relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.velocity_history_size == 0 {
            return Err(ConfigError::ZeroHistorySize);
        }

        let non_negative = [
            ("max_arm_length", self.max_arm_length),
            ("unstick_distance", self.unstick_distance),
            ("velocity_limit", self.velocity_limit),
            ("max_jump_speed", self.max_jump_speed),
            ("jump_multiplier", self.jump_multiplier),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        for (name, offset) in [
            ("left_hand_offset", self.left_hand_offset),
            ("right_hand_offset", self.right_hand_offset),
        ] {
            if let Some(&value) = offset.iter().find(|c| !c.is_finite()) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }

    /// Fixed local-space offset for `hand`.
    #[inline]
    pub fn hand_offset(&self, hand: Hand) -> Vec3 {
        match hand {
            Hand::Left => self.left_hand_offset,
            Hand::Right => self.right_hand_offset,
        }
    }
}

/// Errors raised while loading or validating a [`LocomotionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("velocity_history_size must be greater than zero")]
    ZeroHistorySize,

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LocomotionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.velocity_history_size > 0);
        assert!(config.locomotion_layers.has(CollisionLayer::Climbable));
    }

    #[test]
    fn zero_history_size_is_rejected() {
        let config = LocomotionConfig {
            velocity_history_size: 0,
            ..LocomotionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroHistorySize)));
    }

    #[test]
    fn negative_and_nan_parameters_are_rejected() {
        let negative = LocomotionConfig {
            unstick_distance: -1.0,
            ..LocomotionConfig::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidParameter {
                name: "unstick_distance",
                ..
            })
        ));

        let nan_offset = LocomotionConfig {
            right_hand_offset: Vec3::new(0.0, f32::NAN, 0.0),
            ..LocomotionConfig::default()
        };
        assert!(matches!(
            nan_offset.validate(),
            Err(ConfigError::InvalidParameter {
                name: "right_hand_offset",
                ..
            })
        ));
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let toml = r#"
            velocity_history_size = 4
            max_jump_speed = 15.0
            left_hand_offset = [0.0, -0.05, 0.1]
            locomotion_layers = 3
        "#;
        let config: LocomotionConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.velocity_history_size, 4);
        assert_eq!(config.max_jump_speed, 15.0);
        assert_eq!(config.left_hand_offset, Vec3::new(0.0, -0.05, 0.1));
        assert_eq!(config.hand_offset(Hand::Left), config.left_hand_offset);
        assert!(config.locomotion_layers.has(CollisionLayer::World));
        assert_eq!(config.max_arm_length, DEFAULT_MAX_ARM_LENGTH);
        assert!(!config.disable_movement);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = LocomotionConfig::from_file(Path::new("/nonexistent/climb.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
        assert!(err.to_string().contains("/nonexistent/climb.toml"));
    }
}
