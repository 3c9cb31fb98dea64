//! A double pyramid spinning about y, with a random colour at every vertex.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::{Color, ColorRange};
use crate::config::DoublePyramidConfig;
use crate::geometry::Mesh;
use crate::scene::{DrawCall, Scene};
use crate::shapes::double_pyramid;
use crate::transform::{wrap_angle, RotationState, Transform};

use super::step_control;

pub const MIN_SIDES: u32 = 3;
pub const MAX_SIDES: u32 = 64;

/// Fixed lean toward the viewer so both apexes stay visible
const TILT: f32 = 0.35;

pub struct DoublePyramidScene {
    mesh: Mesh,
    colors: Vec<Color>,
    sides: u32,
    spin: f32,
    angle: f32,
    rng: StdRng,
    paused: bool,
}

impl DoublePyramidScene {
    pub fn new(config: &DoublePyramidConfig, seed: u64) -> Self {
        let mut scene = Self {
            mesh: Mesh::new(),
            colors: Vec::new(),
            sides: config.sides.clamp(MIN_SIDES, MAX_SIDES),
            spin: if config.spin.is_finite() { config.spin } else { 0.0 },
            angle: 0.0,
            rng: StdRng::seed_from_u64(seed),
            paused: false,
        };
        scene.rebuild();
        scene
    }

    fn rebuild(&mut self) {
        // `sides` is always clamped to a valid count
        self.mesh = double_pyramid(self.sides).unwrap_or_default();
        self.colors = ColorRange::ANY.sample_vertices(&mut self.rng, self.mesh.vertex_count());
        log::debug!("double pyramid: {} sides, {} vertices", self.sides, self.mesh.vertex_count());
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Scene for DoublePyramidScene {
    fn name(&self) -> &'static str {
        "double-pyramid"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn vertex_colors(&self) -> &[Color] {
        &self.colors
    }

    fn clear_color(&self) -> Color {
        Color::MEDIUM_GREY
    }

    fn update(&mut self, dt: f32) {
        if !self.paused && dt.is_finite() && dt > 0.0 {
            self.angle = wrap_angle(self.angle + self.spin * dt);
        }
    }

    fn draw_calls(&self) -> Vec<DrawCall> {
        let model = Transform::rotation_matrix(&RotationState::new(TILT, 0.0, 0.0))
            * Transform::rotation_y(self.angle)
            * Transform::scale_matrix(0.6, 0.6, 0.6);
        vec![DrawCall::new(0, self.mesh.vertex_count()).with_transform(model)]
    }

    fn adjust(&mut self, delta: i32) -> bool {
        let sides = step_control(self.sides, delta, MIN_SIDES, MAX_SIDES);
        if sides == self.sides {
            return false;
        }
        self.sides = sides;
        self.rebuild();
        true
    }

    fn control_value(&self) -> Option<u32> {
        Some(self.sides)
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(sides: u32) -> DoublePyramidScene {
        let config = DoublePyramidConfig {
            sides,
            ..DoublePyramidConfig::default()
        };
        DoublePyramidScene::new(&config, 7)
    }

    #[test]
    fn test_sides_are_clamped() {
        assert_eq!(scene(1).sides(), MIN_SIDES);
        assert_eq!(scene(500).sides(), MAX_SIDES);
    }

    #[test]
    fn test_adjust_rebuilds_mesh() {
        let mut scene = scene(4);
        assert_eq!(scene.mesh().vertex_count(), 24);
        assert!(scene.adjust(2));
        assert_eq!(scene.mesh().vertex_count(), 36);
        assert_eq!(scene.vertex_colors().len(), 36);
        assert!(scene.adjust(1000));
        assert_eq!(scene.sides(), MAX_SIDES);
        assert!(!scene.adjust(1));
    }

    #[test]
    fn test_update_spins_and_wraps() {
        let mut scene = scene(4);
        scene.update(1.0);
        assert!((scene.angle() - 0.6).abs() < 1e-6);
        for _ in 0..100 {
            scene.update(1.0);
        }
        assert!((0.0..std::f32::consts::TAU).contains(&scene.angle()));
    }

    #[test]
    fn test_same_seed_same_colors() {
        assert_eq!(scene(5).vertex_colors(), scene(5).vertex_colors());
    }
}
