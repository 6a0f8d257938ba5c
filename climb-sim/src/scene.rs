//! Scene files: locomotion tuning, starting body, scripted rig and world statics.

use std::path::Path;

use anyhow::{Context, bail};
use climb::{
    CollisionLayer, ColliderShapeDef, LayerMask, LocomotionConfig, Vec3, WorldStaticDef,
    yaw_rotation,
};
use serde::Deserialize;

use crate::rig::RigParams;

#[derive(Debug, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub locomotion: LocomotionConfig,
    #[serde(default)]
    pub body: BodyDef,
    #[serde(default)]
    pub rig: RigParams,
    #[serde(default)]
    pub statics: Vec<StaticDef>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BodyDef {
    pub position: Vec3,
    /// Radius of the sphere the gravity step sweeps for the body.
    pub radius: f32,
    /// Layers the falling body collides with.
    pub layers: Vec<CollisionLayer>,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            radius: 0.3,
            layers: vec![CollisionLayer::World, CollisionLayer::Climbable],
        }
    }
}

impl BodyDef {
    pub fn layer_mask(&self) -> LayerMask {
        LayerMask::from_layers(&self.layers)
    }
}

#[derive(Debug, Deserialize)]
pub struct StaticDef {
    pub id: u32,
    pub translation: Vec3,
    #[serde(default)]
    pub yaw_degrees: f32,
    pub shape: ColliderShapeDef,
    pub layers: Vec<CollisionLayer>,
}

impl StaticDef {
    pub fn to_world_static(&self) -> WorldStaticDef {
        WorldStaticDef {
            id: self.id,
            translation: self.translation,
            rotation: yaw_rotation(self.yaw_degrees),
            shape: self.shape.clone(),
            layers: LayerMask::from_layers(&self.layers),
        }
    }
}

impl Scene {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid scene {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let scene: Scene = toml::from_str(content)?;
        scene.check()?;
        Ok(scene)
    }

    /// Scene-level checks. Locomotion tuning is validated by the controller.
    fn check(&self) -> anyhow::Result<()> {
        if !(self.body.radius.is_finite() && self.body.radius > 0.0) {
            bail!("body radius must be positive, got {}", self.body.radius);
        }
        if !self.body.position.iter().all(|c| c.is_finite()) {
            bail!("body position must be finite");
        }

        let mut ids: Vec<u32> = self.statics.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            bail!("duplicate static id {}", pair[0]);
        }

        for s in &self.statics {
            if !s.translation.iter().all(|c| c.is_finite()) || !s.yaw_degrees.is_finite() {
                bail!("static {} has a non-finite pose", s.id);
            }
            if s.layers.is_empty() {
                log::warn!("static {} belongs to no layer and will never be hit", s.id);
            }
        }
        Ok(())
    }

    pub fn world_statics(&self) -> Vec<WorldStaticDef> {
        self.statics.iter().map(StaticDef::to_world_static).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scene_parses() {
        let scene = Scene::parse(include_str!("../scenes/ledge.toml")).unwrap();
        assert!(scene.locomotion.validate().is_ok());
        assert!(!scene.statics.is_empty());

        let statics = scene.world_statics();
        assert!(
            statics
                .iter()
                .any(|s| s.layers.has(CollisionLayer::Climbable))
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let scene = Scene::parse("").unwrap();
        assert_eq!(scene.locomotion, LocomotionConfig::default());
        assert_eq!(scene.body.radius, 0.3);
        assert!(scene.statics.is_empty());
    }

    #[test]
    fn duplicate_static_ids_are_rejected() {
        let err = Scene::parse(
            r#"
            [[statics]]
            id = 1
            translation = [0.0, 0.0, 0.0]
            shape = { type = "sphere", radius = 1.0 }
            layers = ["world"]

            [[statics]]
            id = 1
            translation = [0.0, 3.0, 0.0]
            shape = { type = "sphere", radius = 1.0 }
            layers = ["climbable"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate static id 1"));
    }

    #[test]
    fn unknown_layer_name_fails_to_parse() {
        let result = Scene::parse(
            r#"
            [[statics]]
            id = 1
            translation = [0.0, 0.0, 0.0]
            shape = { type = "sphere", radius = 1.0 }
            layers = ["ladder"]
            "#,
        );
        assert!(result.is_err());
    }
}
