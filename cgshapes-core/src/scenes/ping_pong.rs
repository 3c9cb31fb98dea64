//! A ball bouncing between two walls; every ball triangle has its own red.

use nalgebra::Matrix4;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{BounceConfig, BounceState};
use crate::color::{Color, ColorRange};
use crate::config::PingPongConfig;
use crate::geometry::Mesh;
use crate::scene::{DrawCall, Scene};
use crate::sphere::{append_sphere, MAX_SPHERE_DEPTH};
use crate::transform::Transform;

use super::step_control;

const WALL_COLORS: ColorRange = ColorRange::new(Color::rgb(0.0, 0.0, 0.0), Color::rgb(0.1, 0.1, 0.3));
const BALL_COLORS: ColorRange = ColorRange::new(Color::rgb(0.8, 0.0, 0.0), Color::rgb(1.0, 0.2, 0.1));

pub struct PingPongScene {
    mesh: Mesh,
    colors: Vec<Color>,
    wall_count: usize,
    ball_count: usize,
    depth: u32,
    bounce: BounceState,
    left_wall: Matrix4<f32>,
    right_wall: Matrix4<f32>,
    rng: StdRng,
    paused: bool,
}

impl PingPongScene {
    pub fn new(config: &PingPongConfig, seed: u64) -> Self {
        let (left_wall, right_wall) = wall_transforms(&config.bounce);
        let mut scene = Self {
            mesh: Mesh::new(),
            colors: Vec::new(),
            wall_count: 0,
            ball_count: 0,
            depth: config.depth.min(MAX_SPHERE_DEPTH),
            bounce: BounceState::new(&config.bounce),
            left_wall,
            right_wall,
            rng: StdRng::seed_from_u64(seed),
            paused: false,
        };
        scene.rebuild();
        scene
    }

    /// One cube shared by both walls, then the ball.
    fn rebuild(&mut self) {
        let mut mesh = Mesh::cube(1.0);
        self.wall_count = mesh.vertex_count();
        self.ball_count = append_sphere(&mut mesh, self.depth);

        let mut colors = WALL_COLORS.sample_vertices(&mut self.rng, self.wall_count);
        colors.extend(BALL_COLORS.sample_triangles(&mut self.rng, self.ball_count / 3));

        self.mesh = mesh;
        self.colors = colors;
        log::info!(
            "ping-pong mesh: {} wall + {} ball vertices (depth {})",
            self.wall_count,
            self.ball_count,
            self.depth
        );
    }

    pub fn bounce(&self) -> &BounceState {
        &self.bounce
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Walls are the unit cube squeezed to span `[wall_offset, 1]` in x on either side.
fn wall_transforms(config: &BounceConfig) -> (Matrix4<f32>, Matrix4<f32>) {
    let inner = config.wall_face();
    let half_width = (1.0 - inner) / 2.0;
    let center = (1.0 + inner) / 2.0;
    let squeeze = Transform::scale_matrix(half_width, 1.0, 1.0);
    (
        Transform::translation_matrix(-center, 0.0, 0.0) * squeeze,
        Transform::translation_matrix(center, 0.0, 0.0) * squeeze,
    )
}

impl Scene for PingPongScene {
    fn name(&self) -> &'static str {
        "ping-pong"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn vertex_colors(&self) -> &[Color] {
        &self.colors
    }

    fn clear_color(&self) -> Color {
        Color::LIGHT_YELLOW
    }

    fn update(&mut self, dt: f32) {
        if !self.paused {
            self.bounce.advance(dt);
        }
    }

    fn draw_calls(&self) -> Vec<DrawCall> {
        vec![
            DrawCall::new(0, self.wall_count).with_transform(self.left_wall),
            DrawCall::new(0, self.wall_count).with_transform(self.right_wall),
            DrawCall::new(self.wall_count, self.ball_count).with_transform(self.bounce.model_matrix()),
        ]
    }

    fn adjust(&mut self, delta: i32) -> bool {
        let depth = step_control(self.depth, delta, 0, MAX_SPHERE_DEPTH);
        if depth == self.depth {
            return false;
        }
        self.depth = depth;
        self.rebuild();
        true
    }

    fn control_value(&self) -> Option<u32> {
        Some(self.depth)
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
