/// cgshapes core library - shape generation, animation and scene state
///
/// This library holds everything the renderers share: mesh generators,
/// the bouncing-ball animation, random colouring, transforms, projection
/// and the `Scene` contract. It does no I/O beyond reading config files.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod scenes;
pub mod shapes;
pub mod sphere;
pub mod suits;
pub mod transform;

// Re-export commonly used types
pub use animation::{BounceConfig, BounceState, CompressionPhase};
pub use color::{Color, ColorRange};
pub use config::SceneConfig;
pub use error::{ColorError, ConfigError, GeometryError, SceneParseError};
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::{Camera, ProjectionMode, Viewport};
pub use scene::{DrawCall, Scene, SceneKind};
pub use scenes::build_scene;
pub use transform::{RotationState, Transform};
