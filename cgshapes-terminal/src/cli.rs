//! Command-line arguments for the terminal renderer.

use std::path::PathBuf;

use cgshapes_core::{ProjectionMode, SceneConfig, SceneKind};
use clap::Parser;

use crate::logging::LoggingConfig;

/// CLI values override settings loaded from `--config`.
#[derive(Parser, Debug, Default)]
#[command(name = "cgshapes-terminal", about = "Render the shape scenes in a terminal")]
pub struct CliArgs {
    /// Scene to show (ping-pong, double-pyramid, suits, shape-set, moving-globe).
    #[arg(long)]
    pub scene: Option<SceneKind>,

    /// RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ball subdivision depth.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Double pyramid side count.
    #[arg(long)]
    pub sides: Option<u32>,

    /// Number of shapes in the shape set.
    #[arg(long)]
    pub count: Option<u32>,

    /// Seed for the random colours.
    #[arg(long)]
    pub seed: Option<u64>,

    /// View through a perspective camera instead of clip space.
    #[arg(long)]
    pub perspective: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        if self.perspective {
            ProjectionMode::Perspective
        } else {
            ProjectionMode::ClipSpace
        }
    }
}

/// Apply CLI overrides to a loaded config.
pub trait CliOverrides {
    fn apply_cli_overrides(&mut self, args: &CliArgs);
}

impl CliOverrides for SceneConfig {
    fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(scene) = args.scene {
            self.scene = scene;
        }
        if let Some(depth) = args.depth {
            self.ping_pong.depth = depth;
        }
        if let Some(sides) = args.sides {
            self.double_pyramid.sides = sides;
        }
        if let Some(count) = args.count {
            self.shape_set.count = count;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = SceneConfig::default();
        let args = CliArgs::parse_from([
            "cgshapes-terminal",
            "--scene",
            "double-pyramid",
            "--sides",
            "9",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.scene, SceneKind::DoublePyramid);
        assert_eq!(config.double_pyramid.sides, 9);
        // Non-overridden fields retain defaults
        assert_eq!(config.ping_pong.depth, 3);
        assert_eq!(config.seed, 2016);
    }

    #[test]
    fn test_cli_no_override() {
        let original = SceneConfig::default();
        let mut config = SceneConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(CliArgs::try_parse_from(["cgshapes-terminal", "--scene", "teapot"]).is_err());
    }

    #[test]
    fn test_perspective_flag() {
        let args = CliArgs::parse_from(["cgshapes-terminal", "--perspective", "--log-level", "debug"]);
        assert_eq!(args.projection_mode(), ProjectionMode::Perspective);
        assert_eq!(args.logging_config().env_filter.as_deref(), Some("debug"));
    }
}
