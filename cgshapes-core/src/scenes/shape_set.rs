//! Up to five two-triangle shapes on a dark green canvas.

use crate::color::Color;
use crate::config::ShapeSetConfig;
use crate::geometry::{Mesh, Triangle, Vertex};
use crate::scene::{DrawCall, Scene};

use super::step_control;

pub const MAX_SHAPES: u32 = 5;

const SHAPES: [[[f32; 2]; 6]; MAX_SHAPES as usize] = [
    [[-0.2, -0.2], [0.2, -0.2], [0.2, 0.2], [0.0, 0.0], [0.0, 0.4], [0.4, 0.4]],
    [[-0.7, -0.2], [-0.3, -0.2], [-0.3, 0.2], [-0.5, 0.0], [-0.5, 0.4], [-0.1, 0.4]],
    [[0.3, -0.2], [0.7, -0.2], [0.7, 0.2], [0.5, 0.0], [0.5, 0.4], [0.9, 0.4]],
    [[-0.45, -0.3], [-0.05, -0.3], [-0.45, -0.7], [-0.65, -0.9], [-0.25, -0.9], [-0.25, -0.5]],
    [[0.05, -0.3], [0.45, -0.3], [0.05, -0.7], [-0.15, -0.9], [0.25, -0.9], [0.25, -0.5]],
];

const BACKGROUND: Color = Color::rgb(0.0, 0.2, 0.0);

pub struct ShapeSetScene {
    mesh: Mesh,
    colors: Vec<Color>,
    count: u32,
}

impl ShapeSetScene {
    pub fn new(config: &ShapeSetConfig) -> Self {
        let mut scene = Self {
            mesh: Mesh::new(),
            colors: Vec::new(),
            count: config.count.clamp(1, MAX_SHAPES),
        };
        scene.rebuild();
        scene
    }

    fn rebuild(&mut self) {
        self.mesh = SHAPES[..self.count as usize]
            .iter()
            .flat_map(|shape| shape.chunks(3))
            .map(|corners| {
                Triangle::new(
                    Vertex::flat(corners[0][0], corners[0][1]),
                    Vertex::flat(corners[1][0], corners[1][1]),
                    Vertex::flat(corners[2][0], corners[2][1]),
                )
            })
            .collect();
        self.colors = vec![Color::WHITE; self.mesh.vertex_count()];
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Scene for ShapeSetScene {
    fn name(&self) -> &'static str {
        "shape-set"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn vertex_colors(&self) -> &[Color] {
        &self.colors
    }

    fn clear_color(&self) -> Color {
        BACKGROUND
    }

    fn depth_test(&self) -> bool {
        false
    }

    fn draw_calls(&self) -> Vec<DrawCall> {
        vec![DrawCall::new(0, self.mesh.vertex_count())]
    }

    fn adjust(&mut self, delta: i32) -> bool {
        let count = step_control(self.count, delta, 1, MAX_SHAPES);
        if count == self.count {
            return false;
        }
        self.count = count;
        self.rebuild();
        true
    }

    fn control_value(&self) -> Option<u32> {
        Some(self.count)
    }
}
