//! Error types for shape generation, colours, configuration and scene lookup.

use std::path::PathBuf;

/// Invalid parameters for a parametric shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A polygon-based shape needs a base of at least three sides.
    #[error("a {shape} needs at least 3 sides, got {sides}")]
    TooFewSides { shape: &'static str, sides: u32 },

    /// A globe needs at least 3 longitude and 2 latitude divisions.
    #[error("a globe needs longitude >= 3 and latitude >= 2 divisions, got {long_divs}x{lat_divs}")]
    GlobeDivisions { long_divs: u32, lat_divs: u32 },
}

/// Invalid bounds for random colour generation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// Channel bounds must satisfy `0 <= min <= max <= 1`.
    #[error("invalid range for channel {channel}: min {min}, max {max}")]
    InvalidRange { channel: usize, min: f32, max: f32 },
}

/// Errors that can occur when loading scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file to disk.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}

/// Unknown scene name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene '{0}' (expected ping-pong, double-pyramid, suits, shape-set or moving-globe)")]
pub struct SceneParseError(pub String);
