//! Scene settings, persisted as RON.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! values it changes and unknown fields from newer versions are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::BounceConfig;
use crate::error::ConfigError;
use crate::scene::SceneKind;

/// Top-level configuration shared by the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub scene: SceneKind,
    /// Seed for the random vertex colours
    pub seed: u64,
    pub ping_pong: PingPongConfig,
    pub double_pyramid: DoublePyramidConfig,
    pub shape_set: ShapeSetConfig,
}

/// Ball between two walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingPongConfig {
    /// Subdivision depth of the ball
    pub depth: u32,
    pub bounce: BounceConfig,
}

/// Spinning double pyramid with an adjustable number of sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoublePyramidConfig {
    pub sides: u32,
    /// Spin about y in radians per second
    pub spin: f32,
}

/// Row of fixed shapes, of which the first `count` are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSetConfig {
    pub count: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::PingPong,
            seed: 2016,
            ping_pong: PingPongConfig::default(),
            double_pyramid: DoublePyramidConfig::default(),
            shape_set: ShapeSetConfig::default(),
        }
    }
}

impl Default for PingPongConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            bounce: BounceConfig::default(),
        }
    }
}

impl Default for DoublePyramidConfig {
    fn default() -> Self {
        Self {
            sides: 4,
            spin: 0.6,
        }
    }
}

impl Default for ShapeSetConfig {
    fn default() -> Self {
        Self { count: 1 }
    }
}

impl SceneConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(ConfigError::Parse)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }

    /// Load a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let serialized = self.to_ron_string()?;
        std::fs::write(path, serialized).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let ron_str = SceneConfig::default().to_ron_string().unwrap();
        assert!(ron_str.contains("scene: PingPong"));
        assert!(ron_str.contains("depth: 3"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = SceneConfig::default();
        config.scene = SceneKind::Suits;
        config.ping_pong.bounce.radius = 0.3;
        let ron_str = config.to_ron_string().unwrap();
        assert_eq!(SceneConfig::from_ron_str(&ron_str).unwrap(), config);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config = SceneConfig::from_ron_str("(double_pyramid: (sides: 7))").unwrap();
        assert_eq!(config.double_pyramid.sides, 7);
        assert_eq!(config.double_pyramid.spin, DoublePyramidConfig::default().spin);
        assert_eq!(config.ping_pong, PingPongConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        assert!(SceneConfig::from_ron_str("(future_setting: true)").is_ok());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        assert!(matches!(
            SceneConfig::from_ron_str("{{not valid}}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");
        let mut config = SceneConfig::default();
        config.seed = 99;
        config.shape_set.count = 4;

        config.save(&path).unwrap();
        assert_eq!(SceneConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SceneConfig::load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
