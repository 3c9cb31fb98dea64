//! The contract between shape programs and renderers.
//!
//! A scene owns one mesh (the vertex buffer a renderer uploads) plus one
//! colour per vertex, and describes each frame as a list of draw calls over
//! ranges of that mesh. Renderers re-upload only when `adjust` reports a
//! rebuild.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point2};

use crate::color::Color;
use crate::error::SceneParseError;
use crate::geometry::Mesh;

/// One `draw_arrays(TRIANGLES, first, count)` with its uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub first: usize,
    pub count: usize,
    pub model_view: Matrix4<f32>,
    /// Flat colour replacing the per-vertex colours for this call
    pub color: Option<Color>,
}

impl DrawCall {
    pub fn new(first: usize, count: usize) -> Self {
        Self {
            first,
            count,
            model_view: Matrix4::identity(),
            color: None,
        }
    }

    pub fn with_transform(mut self, model_view: Matrix4<f32>) -> Self {
        self.model_view = model_view;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Range of triangle indices covered by this call
    pub fn triangles(&self) -> std::ops::Range<usize> {
        self.first / 3..(self.first + self.count) / 3
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    fn mesh(&self) -> &Mesh;

    /// One colour per mesh vertex
    fn vertex_colors(&self) -> &[Color];

    fn clear_color(&self) -> Color;

    fn depth_test(&self) -> bool {
        true
    }

    /// Draw calls already carry the scene's own view and projection, so
    /// renderers must not add theirs
    fn includes_projection(&self) -> bool {
        false
    }

    /// Advance animation state by `dt` seconds
    fn update(&mut self, _dt: f32) {}

    fn draw_calls(&self) -> Vec<DrawCall>;

    /// Step the scene's numeric control; returns true when the mesh was rebuilt
    fn adjust(&mut self, _delta: i32) -> bool {
        false
    }

    /// Current value of the numeric control, if the scene has one
    fn control_value(&self) -> Option<u32> {
        None
    }

    /// Handle a click at normalized device coordinates; returns true when a redraw is needed
    fn click(&mut self, _ndc: Point2<f32>) -> bool {
        false
    }

    /// Pause or resume animation
    fn set_paused(&mut self, _paused: bool) {}
}

/// The shape programs available to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SceneKind {
    PingPong,
    DoublePyramid,
    Suits,
    ShapeSet,
    MovingGlobe,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::PingPong,
        SceneKind::DoublePyramid,
        SceneKind::Suits,
        SceneKind::ShapeSet,
        SceneKind::MovingGlobe,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::PingPong => "ping-pong",
            SceneKind::DoublePyramid => "double-pyramid",
            SceneKind::Suits => "suits",
            SceneKind::ShapeSet => "shape-set",
            SceneKind::MovingGlobe => "moving-globe",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneKind {
    type Err = SceneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SceneKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| SceneParseError(s.to_string()))
    }
}
